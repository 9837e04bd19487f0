use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use bookwise_core::models::availability::SlotView;
use bookwise_core::models::schedule::TimeOfDay;
use bookwise_core::scheduling::availability::{
    available_times, free_staff_at, merge_staff_availability, StaffDayAvailability,
};
use bookwise_core::scheduling::conflicts::{
    has_conflict, intervals_overlap, mark_conflicts, BookingInterval, ProjectedSlot,
};

fn t(s: &str) -> TimeOfDay {
    s.parse().expect("valid time of day")
}

fn utc(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 10, hour, minute, 0).unwrap()
}

fn projected(inputs: &[(&str, u32, u32)]) -> Vec<ProjectedSlot> {
    inputs
        .iter()
        .map(|(time, hour, minute)| ProjectedSlot {
            time: t(time),
            start: utc(*hour, *minute),
        })
        .collect()
}

#[test]
fn test_interval_overlap_is_half_open() {
    // End-touching intervals do not overlap.
    assert!(!intervals_overlap(utc(9, 0), utc(10, 0), utc(10, 0), utc(11, 0)));
    assert!(!intervals_overlap(utc(10, 0), utc(11, 0), utc(9, 0), utc(10, 0)));

    assert!(intervals_overlap(utc(9, 30), utc(10, 30), utc(10, 0), utc(11, 0)));
    assert!(intervals_overlap(utc(9, 0), utc(12, 0), utc(10, 0), utc(10, 30)));
    assert!(intervals_overlap(utc(10, 0), utc(10, 30), utc(9, 0), utc(12, 0)));
}

#[test]
fn test_adjacent_slot_survives_existing_booking() {
    // Existing confirmed booking 10:00-11:00. The 09:00 slot ends exactly
    // at 10:00 and stays available; 09:30 runs into the booking.
    let candidates = projected(&[
        ("09:00", 9, 0),
        ("09:30", 9, 30),
        ("10:00", 10, 0),
        ("10:30", 10, 30),
        ("11:00", 11, 0),
    ]);
    let existing = vec![BookingInterval {
        start: utc(10, 0),
        end: utc(11, 0),
    }];

    let tagged = mark_conflicts(&candidates, 60, &existing);

    assert_eq!(
        tagged,
        vec![
            (t("09:00"), true),
            (t("09:30"), false),
            (t("10:00"), false),
            (t("10:30"), false),
            (t("11:00"), true),
        ]
    );
}

#[test]
fn test_all_candidates_are_preserved() {
    // Taken slots are tagged, never removed, so the caller can render them
    // as disabled.
    let candidates = projected(&[("09:00", 9, 0), ("09:30", 9, 30), ("10:00", 10, 0)]);
    let existing = vec![BookingInterval {
        start: utc(9, 0),
        end: utc(10, 0),
    }];

    let tagged = mark_conflicts(&candidates, 30, &existing);

    assert_eq!(tagged.len(), candidates.len());
    assert_eq!(
        tagged.iter().map(|(time, _)| *time).collect::<Vec<_>>(),
        vec![t("09:00"), t("09:30"), t("10:00")]
    );
}

#[test]
fn test_no_existing_bookings_leaves_everything_free() {
    let candidates = projected(&[("09:00", 9, 0), ("09:30", 9, 30)]);

    let tagged = mark_conflicts(&candidates, 60, &[]);

    assert!(tagged.iter().all(|(_, available)| *available));
}

#[test]
fn test_has_conflict_for_single_interval() {
    let existing = vec![BookingInterval {
        start: utc(10, 0),
        end: utc(11, 0),
    }];

    assert!(has_conflict(utc(10, 30), 60, &existing));
    assert!(has_conflict(utc(9, 30), 60, &existing));
    assert!(!has_conflict(utc(9, 0), 60, &existing));
    assert!(!has_conflict(utc(11, 0), 60, &existing));
}

fn staff_day(id: Uuid, slots: &[(&str, bool)]) -> StaffDayAvailability {
    StaffDayAvailability {
        staff_id: id,
        slots: slots.iter().map(|(time, free)| (t(time), *free)).collect(),
    }
}

#[test]
fn test_union_reports_time_free_when_any_staff_is_free() {
    let first = Uuid::from_u128(1);
    let second = Uuid::from_u128(2);

    let per_staff = vec![
        staff_day(first, &[("09:00", true), ("09:30", false), ("10:00", false)]),
        staff_day(second, &[("09:00", true), ("09:30", true), ("10:00", false)]),
    ];

    let merged = merge_staff_availability(&per_staff);

    assert_eq!(
        merged,
        vec![
            SlotView { time: t("09:00"), available: true, staff_id: Some(first) },
            SlotView { time: t("09:30"), available: true, staff_id: Some(second) },
            SlotView { time: t("10:00"), available: false, staff_id: None },
        ]
    );
}

#[test]
fn test_union_includes_times_only_one_staff_offers() {
    let first = Uuid::from_u128(1);
    let second = Uuid::from_u128(2);

    let per_staff = vec![
        staff_day(first, &[("09:00", true)]),
        staff_day(second, &[("11:00", true)]),
    ];

    let merged = merge_staff_availability(&per_staff);

    assert_eq!(
        merged.iter().map(|slot| slot.time).collect::<Vec<_>>(),
        vec![t("09:00"), t("11:00")]
    );
    assert!(merged.iter().all(|slot| slot.available));
}

#[test]
fn test_union_tie_break_is_lowest_staff_id() {
    let first = Uuid::from_u128(1);
    let second = Uuid::from_u128(2);

    // Pass the higher id first; the tag must still go to the lowest id.
    let per_staff = vec![
        staff_day(second, &[("09:00", true)]),
        staff_day(first, &[("09:00", true)]),
    ];

    let merged = merge_staff_availability(&per_staff);

    assert_eq!(merged[0].staff_id, Some(first));
}

#[test]
fn test_union_is_independent_of_input_order() {
    let first = Uuid::from_u128(1);
    let second = Uuid::from_u128(2);

    let forward = vec![
        staff_day(first, &[("09:00", true), ("09:30", false)]),
        staff_day(second, &[("09:30", true), ("10:00", true)]),
    ];
    let reversed: Vec<_> = forward.iter().rev().cloned().collect();

    assert_eq!(
        merge_staff_availability(&forward),
        merge_staff_availability(&reversed)
    );
}

#[test]
fn test_available_times_filters_taken_slots() {
    let first = Uuid::from_u128(1);
    let per_staff = vec![staff_day(
        first,
        &[("09:00", true), ("09:30", false), ("10:00", true)],
    )];

    let merged = merge_staff_availability(&per_staff);

    assert_eq!(available_times(&merged), vec![t("09:00"), t("10:00")]);
}

#[test]
fn test_free_staff_at_returns_sorted_ids() {
    let first = Uuid::from_u128(1);
    let second = Uuid::from_u128(2);
    let third = Uuid::from_u128(3);

    let per_staff = vec![
        staff_day(third, &[("09:00", true)]),
        staff_day(first, &[("09:00", true)]),
        staff_day(second, &[("09:00", false)]),
    ];

    assert_eq!(free_staff_at(&per_staff, t("09:00")), vec![first, third]);
    assert_eq!(free_staff_at(&per_staff, t("10:00")), Vec::<Uuid>::new());
}
