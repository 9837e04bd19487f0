//! Candidate slot generation for a single day of a staff schedule.

use crate::models::schedule::{DaySchedule, TimeOfDay};

/// Candidate start times advance in fixed steps regardless of service
/// duration; the duration only decides which grid points still fit.
pub const DEFAULT_GRID_MINUTES: u16 = 30;

/// Half-open overlap test on minutes since midnight: `[a_start, a_end)`
/// intersects `[b_start, b_end)`. End-touching ranges do not overlap.
fn ranges_overlap(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    a_start < b_end && b_start < a_end
}

/// Generates the candidate start times for a service of `duration_minutes`
/// on `day`, stepping by `grid_minutes` from the start of the working
/// hours.
///
/// A grid point survives when the full `[start, start + duration)` interval
/// fits before closing time and does not intersect any break. A day marked
/// unavailable yields no candidates, which is not an error. Output is
/// ascending and duplicate-free by construction.
pub fn generate_slots(
    day: &DaySchedule,
    duration_minutes: u16,
    grid_minutes: u16,
) -> Vec<TimeOfDay> {
    if !day.is_available || duration_minutes == 0 || grid_minutes == 0 {
        return Vec::new();
    }

    let close = day.end.minutes();
    let mut slots = Vec::new();
    let mut current = day.start.minutes();

    while current.saturating_add(duration_minutes) <= close {
        let end = current + duration_minutes;
        let blocked = day
            .breaks
            .iter()
            .any(|brk| ranges_overlap(current, end, brk.start.minutes(), brk.end.minutes()));
        if !blocked {
            if let Some(time) = TimeOfDay::from_minutes(current) {
                slots.push(time);
            }
        }
        match current.checked_add(grid_minutes) {
            Some(next) => current = next,
            None => break,
        }
    }

    slots
}
