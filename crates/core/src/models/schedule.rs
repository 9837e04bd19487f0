use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{BookingError, BookingResult};

/// A wall-clock time of day with minute precision, serialized as `HH:MM`.
///
/// Schedule templates and slot times are wall-clock values in the vendor's
/// time zone; they only become absolute instants once projected onto a
/// concrete calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour as u16 * 60 + minute as u16))
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < Self::MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Truncates seconds; schedules operate at minute precision.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour() as u32, self.minute() as u32, 0).unwrap()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::Validation(format!("Invalid time of day: {}", s));
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An unpaid pause inside a working day, e.g. a lunch hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// One weekday of a staff member's weekly schedule template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub is_available: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub breaks: Vec<BreakInterval>,
}

impl DaySchedule {
    /// Checks the template invariants: working hours are a non-empty range,
    /// breaks fall inside them, and breaks are sorted and non-overlapping.
    pub fn validate(&self) -> BookingResult<()> {
        if self.start >= self.end {
            return Err(BookingError::Validation(format!(
                "Schedule start {} must be before end {}",
                self.start, self.end
            )));
        }
        for brk in &self.breaks {
            if brk.start >= brk.end {
                return Err(BookingError::Validation(format!(
                    "Break start {} must be before end {}",
                    brk.start, brk.end
                )));
            }
            if brk.start < self.start || brk.end > self.end {
                return Err(BookingError::Validation(format!(
                    "Break {}-{} falls outside working hours {}-{}",
                    brk.start, brk.end, self.start, self.end
                )));
            }
        }
        for pair in self.breaks.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(BookingError::Validation(format!(
                    "Breaks {}-{} and {}-{} overlap",
                    pair[0].start, pair[0].end, pair[1].start, pair[1].end
                )));
            }
        }
        Ok(())
    }
}
