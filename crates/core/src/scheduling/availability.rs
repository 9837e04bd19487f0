//! Merging per-staff slot availability into one vendor-level view.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::models::availability::SlotView;
use crate::models::schedule::TimeOfDay;

/// One staff member's tagged candidates for a day, as produced by the slot
/// generator and conflict filter.
#[derive(Debug, Clone)]
pub struct StaffDayAvailability {
    pub staff_id: Uuid,
    pub slots: Vec<(TimeOfDay, bool)>,
}

/// Unions slot availability across staff members, keyed by time of day.
///
/// A time is available overall when at least one staff member is free then.
/// Among free staff the lowest id wins the `staff_id` tag, so automatic
/// assignment is reproducible no matter the order slots were computed in.
pub fn merge_staff_availability(per_staff: &[StaffDayAvailability]) -> Vec<SlotView> {
    let mut ordered: Vec<&StaffDayAvailability> = per_staff.iter().collect();
    ordered.sort_by_key(|staff| staff.staff_id);

    let mut merged: BTreeMap<TimeOfDay, Option<Uuid>> = BTreeMap::new();
    for staff in ordered {
        for (time, free) in &staff.slots {
            let assigned = merged.entry(*time).or_insert(None);
            if assigned.is_none() && *free {
                *assigned = Some(staff.staff_id);
            }
        }
    }

    merged
        .into_iter()
        .map(|(time, assigned)| SlotView {
            time,
            available: assigned.is_some(),
            staff_id: assigned,
        })
        .collect()
}

/// The plain list of free times, in ascending order.
pub fn available_times(slots: &[SlotView]) -> Vec<TimeOfDay> {
    slots
        .iter()
        .filter(|slot| slot.available)
        .map(|slot| slot.time)
        .collect()
}

/// Staff members free at one specific time, lowest id first. This is the
/// assignment order for an "any staff" booking.
pub fn free_staff_at(per_staff: &[StaffDayAvailability], time: TimeOfDay) -> Vec<Uuid> {
    let mut free: Vec<Uuid> = per_staff
        .iter()
        .filter(|staff| {
            staff
                .slots
                .iter()
                .any(|(slot_time, available)| *slot_time == time && *available)
        })
        .map(|staff| staff.staff_id)
        .collect();
    free.sort();
    free
}
