//! Conflict tagging of candidate slots against existing appointments.

use chrono::{DateTime, Duration, Utc};

use crate::models::schedule::TimeOfDay;

/// An existing appointment interval that still constrains availability.
/// Callers build these from pending and confirmed bookings only; cancelled
/// and completed bookings never block a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A candidate slot projected onto a concrete day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedSlot {
    pub time: TimeOfDay,
    pub start: DateTime<Utc>,
}

/// Half-open overlap test on instants: `[a_start, a_end)` intersects
/// `[b_start, b_end)`. A slot ending exactly when a booking starts is not a
/// conflict.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Tags every candidate with whether it is still free. Candidates are kept
/// either way so callers can render taken slots as disabled rather than
/// hiding them.
pub fn mark_conflicts(
    candidates: &[ProjectedSlot],
    duration_minutes: u16,
    existing: &[BookingInterval],
) -> Vec<(TimeOfDay, bool)> {
    let duration = Duration::minutes(duration_minutes as i64);
    candidates
        .iter()
        .map(|slot| {
            let end = slot.start + duration;
            let taken = existing
                .iter()
                .any(|booked| intervals_overlap(slot.start, end, booked.start, booked.end));
            (slot.time, !taken)
        })
        .collect()
}

/// True when a single proposed interval collides with any existing one.
/// Used by the booking writer's re-validation pass.
pub fn has_conflict(
    start: DateTime<Utc>,
    duration_minutes: u16,
    existing: &[BookingInterval],
) -> bool {
    let end = start + Duration::minutes(duration_minutes as i64);
    existing
        .iter()
        .any(|booked| intervals_overlap(start, end, booked.start, booked.end))
}
