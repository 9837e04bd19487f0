//! Projection between vendor-local wall-clock times and UTC instants.
//!
//! All persisted booking times are UTC; schedule templates are wall-clock
//! values in the vendor's IANA time zone. Projection policy at DST
//! boundaries: an ambiguous local time (clocks rolled back) resolves to the
//! earliest instant, and a nonexistent local time (clocks sprang forward)
//! does not project at all, so the affected slots are skipped.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::schedule::TimeOfDay;

/// Weekday index used throughout the schema: 0 = Monday .. 6 = Sunday.
pub fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

/// Projects a wall-clock time on a vendor-local calendar day to a UTC
/// instant, or `None` when that local time does not exist on that day.
pub fn project_local(date: NaiveDate, time: TimeOfDay, tz: Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_time(time.to_naive());
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _latest) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// The UTC window `[start, end)` covering one vendor-local calendar day.
/// Existing appointments are fetched over this window before conflict
/// tagging.
pub fn local_day_bounds(date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    (day_start(date, tz), day_start(date + Duration::days(1), tz))
}

/// First instant of a local calendar day. Walks forward minute by minute
/// when midnight itself falls into a DST gap.
fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let mut minutes = 0u16;
    while minutes < TimeOfDay::MINUTES_PER_DAY {
        if let Some(time) = TimeOfDay::from_minutes(minutes) {
            if let Some(instant) = project_local(date, time, tz) {
                return instant;
            }
        }
        minutes += 1;
    }
    // A zone that skips the entire day; treat it as UTC midnight.
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}
