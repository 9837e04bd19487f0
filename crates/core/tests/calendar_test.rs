use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use chrono_tz::UTC;
use pretty_assertions::assert_eq;

use bookwise_core::models::schedule::TimeOfDay;
use bookwise_core::scheduling::calendar::{local_day_bounds, project_local, weekday_index};

fn t(s: &str) -> TimeOfDay {
    s.parse().expect("valid time of day")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_weekday_index_starts_monday() {
    assert_eq!(weekday_index(date(2026, 8, 3)), 0); // Monday
    assert_eq!(weekday_index(date(2026, 8, 6)), 3); // Thursday
    assert_eq!(weekday_index(date(2026, 8, 9)), 6); // Sunday
}

#[test]
fn test_project_plain_local_time() {
    // EDT is UTC-4 in August.
    let instant = project_local(date(2026, 8, 10), t("10:00"), New_York);
    assert_eq!(instant, Some(Utc.with_ymd_and_hms(2026, 8, 10, 14, 0, 0).unwrap()));
}

#[test]
fn test_project_in_utc_is_identity() {
    let instant = project_local(date(2026, 8, 10), t("10:00"), UTC);
    assert_eq!(instant, Some(Utc.with_ymd_and_hms(2026, 8, 10, 10, 0, 0).unwrap()));
}

#[test]
fn test_spring_forward_gap_does_not_project() {
    // Clocks jump from 02:00 EST to 03:00 EDT on 2026-03-08; 02:30 never
    // happens and yields no instant.
    assert_eq!(project_local(date(2026, 3, 8), t("02:30"), New_York), None);

    // Either side of the gap projects normally.
    assert_eq!(
        project_local(date(2026, 3, 8), t("01:30"), New_York),
        Some(Utc.with_ymd_and_hms(2026, 3, 8, 6, 30, 0).unwrap())
    );
    assert_eq!(
        project_local(date(2026, 3, 8), t("03:00"), New_York),
        Some(Utc.with_ymd_and_hms(2026, 3, 8, 7, 0, 0).unwrap())
    );
}

#[test]
fn test_fall_back_resolves_to_earliest_instant() {
    // 01:30 happens twice on 2026-11-01; policy picks the first (EDT)
    // occurrence.
    assert_eq!(
        project_local(date(2026, 11, 1), t("01:30"), New_York),
        Some(Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap())
    );
}

#[test]
fn test_day_bounds_cover_a_plain_day() {
    let (start, end) = local_day_bounds(date(2026, 8, 10), UTC);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 10, 0, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2026, 8, 11, 0, 0, 0).unwrap());
}

#[test]
fn test_day_bounds_shrink_on_spring_forward() {
    let (start, end) = local_day_bounds(date(2026, 3, 8), New_York);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 8, 5, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 9, 4, 0, 0).unwrap());
    assert_eq!((end - start).num_hours(), 23);
}

#[test]
fn test_day_bounds_grow_on_fall_back() {
    let (start, end) = local_day_bounds(date(2026, 11, 1), New_York);
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 11, 1, 4, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2026, 11, 2, 5, 0, 0).unwrap());
    assert_eq!((end - start).num_hours(), 25);
}
