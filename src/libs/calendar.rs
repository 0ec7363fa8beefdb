//! Calendar and workday arithmetic.
//!
//! All functions work on whole calendar days ([`NaiveDate`]). Timestamps are
//! normalized by the caller with `.date()` before they reach this module, so a
//! due date never flips to "past" in the middle of the day it falls on.
//!
//! ## Workdays
//!
//! Which weekdays count as workdays is configurable through [`WorkWeek`]. The
//! default week is Monday to Friday. Weekdays are addressed by index with
//! `0 = Sunday .. 6 = Saturday`, the same numbering used in `config.json`.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pmt::libs::calendar::WorkWeek;
//!
//! let week = WorkWeek::default();
//! let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! assert_eq!(week.diff_workdays(monday, friday), 5);
//! assert_eq!(week.add_workdays(friday, 1), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
//! ```

use super::error::{TrackerError, TrackerResult};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Default workdays, Monday through Friday.
pub const DEFAULT_WORKDAYS: [u32; 5] = [1, 2, 3, 4, 5];

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// The set of weekdays treated as workdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWeek {
    days: [bool; 7],
}

impl Default for WorkWeek {
    fn default() -> Self {
        let mut days = [false; 7];
        for day in DEFAULT_WORKDAYS {
            days[day as usize] = true;
        }
        WorkWeek { days }
    }
}

impl WorkWeek {
    /// Builds a work week from weekday indices (`0 = Sunday .. 6 = Saturday`).
    ///
    /// An empty set or an index outside `0..=6` is rejected: workday
    /// arithmetic over a week without workdays would never terminate.
    pub fn new(weekdays: &[u32]) -> TrackerResult<Self> {
        let mut errors = Vec::new();
        let mut days = [false; 7];
        for &day in weekdays {
            match days.get_mut(day as usize) {
                Some(slot) => *slot = true,
                None => errors.push(format!("weekday index {} is out of range 0-6", day)),
            }
        }
        if !days.iter().any(|&d| d) {
            errors.push("at least one workday is required".to_string());
        }
        if !errors.is_empty() {
            return Err(TrackerError::validation("WorkWeek", errors));
        }
        Ok(WorkWeek { days })
    }

    /// Weekday indices of this week in ascending order.
    pub fn weekdays(&self) -> Vec<u32> {
        (0..7u32).filter(|&i| self.days[i as usize]).collect()
    }

    pub fn is_workday(&self, date: NaiveDate) -> bool {
        self.days[date.weekday().num_days_from_sunday() as usize]
    }

    /// Number of workdays in the inclusive range `[a, b]`, or 0 when `b < a`.
    pub fn diff_workdays(&self, a: NaiveDate, b: NaiveDate) -> i64 {
        if b < a {
            return 0;
        }
        let total = diff_days(a, b) + 1;
        let per_week = self.days.iter().filter(|&&d| d).count() as i64;
        let start = a.weekday().num_days_from_sunday() as i64;
        let remainder = (0..total % 7).filter(|offset| self.days[((start + offset) % 7) as usize]).count() as i64;

        (total / 7) * per_week + remainder
    }

    /// Advances `date` one calendar day at a time, counting only workdays,
    /// and returns the day on which `n` workdays have been consumed.
    /// `n = 0` returns `date` unchanged.
    pub fn add_workdays(&self, date: NaiveDate, n: u32) -> NaiveDate {
        let mut current = date;
        let mut remaining = n;
        while remaining > 0 {
            let Some(next) = current.succ_opt() else {
                break;
            };
            current = next;
            if self.is_workday(current) {
                remaining -= 1;
            }
        }
        current
    }

    /// Earliest day `d >= start` such that `[start, d]` holds exactly
    /// `duration` workdays. Returns `None` for a zero duration.
    pub fn end_for_duration(&self, start: NaiveDate, duration: i64) -> Option<NaiveDate> {
        if duration <= 0 {
            return None;
        }
        let duration = u32::try_from(duration).ok()?;
        if self.is_workday(start) {
            Some(self.add_workdays(start, duration - 1))
        } else {
            Some(self.add_workdays(start, duration))
        }
    }
}

/// True when `reference` falls on a calendar day strictly after `boundary`.
pub fn is_past_due_day(reference: NaiveDate, boundary: NaiveDate) -> bool {
    reference > boundary
}

/// Signed calendar-day difference `b - a`.
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Workdays in `[a, b]` under the default Monday to Friday week.
pub fn diff_workdays(a: NaiveDate, b: NaiveDate) -> i64 {
    WorkWeek::default().diff_workdays(a, b)
}

/// [`WorkWeek::add_workdays`] under the default Monday to Friday week.
pub fn add_workdays(date: NaiveDate, n: u32) -> NaiveDate {
    WorkWeek::default().add_workdays(date, n)
}

/// Every calendar day in the inclusive range `[a, b]`.
pub fn date_range(a: NaiveDate, b: NaiveDate) -> Vec<NaiveDate> {
    a.iter_days().take_while(|day| *day <= b).collect()
}

/// Parses a date from `YYYY-MM-DD`, a local `YYYY-MM-DD HH:MM:SS` timestamp
/// (space or `T` separated) or an RFC 3339 timestamp. Only the day is kept;
/// an RFC 3339 timestamp is read as the local calendar day it falls on.
pub fn parse_date(text: &str) -> TrackerResult<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.with_timezone(&Local).date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
        .ok_or_else(|| TrackerError::InvalidDate(text.to_string()))
}
