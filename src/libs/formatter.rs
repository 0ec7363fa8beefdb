//! Formatting helpers shared by records and views.
//!
//! Besides display helpers this module hosts the serde adapters used by the
//! entity records. Older records store plan dates as full ISO timestamps
//! (`2024-03-01T00:00:00.000Z`) while current records use plain dates; both
//! are accepted on read and plain dates are always written.

use super::calendar::parse_date;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_DISPLAY_FORMAT).to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_datetime(datetime: Option<NaiveDateTime>) -> String {
    datetime.map(|d| d.format(DATETIME_DISPLAY_FORMAT).to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_rate(rate: u32) -> String {
    format!("{}%", rate)
}

/// Renders a fixed-width bar for a Gantt row.
pub fn format_bar(left: f64, width: f64, columns: usize, milestone: bool) -> String {
    let start = ((left * columns as f64).round() as usize).min(columns);
    let length = ((width * columns as f64).round() as usize).max(1).min(columns - start.min(columns));
    let fill = if milestone { '◆' } else { '█' };
    let mut bar = String::with_capacity(columns);
    for column in 0..columns {
        if column >= start && column < start + length {
            bar.push(fill);
        } else {
            bar.push('·');
        }
    }
    bar
}

pub mod optional_date {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_DISPLAY_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => parse_date(&text).map(Some).map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

pub mod optional_datetime {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    const STORED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(datetime) => serializer.serialize_str(&datetime.format(STORED_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(datetime) = DateTime::parse_from_rfc3339(&text) {
            return Ok(Some(datetime.naive_utc()));
        }
        NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S"))
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
