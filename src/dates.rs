//! Publication and capture timestamps.
//!
//! Publications print dates in many shapes. Everything is normalized to a
//! [`Stamp`] of `YYYY-MM-DD` / `HH:MM:SS` strings; text that cannot be parsed
//! is kept verbatim as the date so nothing is silently lost.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";

/// Datelines carrying a time of day.
const HUMAN_DATETIME_FORMATS: &[&str] = &[
    "%B %d, %Y %I:%M%p",
    "%B %d, %Y %I:%M %p",
    "%b %d, %Y %I:%M%p",
    "%b %d, %Y %I:%M %p",
    "%b. %d, %Y %I:%M %p",
    "%B %d, %Y at %I:%M %p",
    "%a %d %b %Y %H.%M",
    "%a %d %b %Y %H:%M",
];

/// Date-only datelines.
const HUMAN_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%b. %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %d %b %Y",
    "%Y-%m-%d",
];

/// A publication timestamp split into date and time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub date: String,
    pub time: String,
}

impl Stamp {
    fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            date: dt.format(DATE_FMT).to_string(),
            time: dt.format(TIME_FMT).to_string(),
        }
    }

    fn from_date(d: NaiveDate) -> Self {
        Self {
            date: d.format(DATE_FMT).to_string(),
            time: String::new(),
        }
    }

    /// Unparseable input, kept as-is.
    pub fn raw(text: &str) -> Self {
        Self {
            date: text.trim().to_string(),
            time: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.time.is_empty()
    }
}

/// Captured date and time for a run.
pub fn captured(now: NaiveDateTime) -> (String, String) {
    (
        now.format(DATE_FMT).to_string(),
        now.format(TIME_FMT).to_string(),
    )
}

/// Parse a machine timestamp, typically a `datetime` attribute.
pub fn from_iso(text: &str) -> Stamp {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Stamp::from_datetime(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Stamp::from_datetime(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, DATE_FMT) {
        return Stamp::from_date(d);
    }
    Stamp::raw(text)
}

/// Parse a human dateline such as `October 18, 2026 9:00am PT`.
pub fn from_human(text: &str) -> Stamp {
    let trimmed = text.trim();
    let candidate = strip_zone(trimmed);
    for fmt in HUMAN_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(candidate, fmt) {
            return Stamp::from_datetime(dt);
        }
    }
    for fmt in HUMAN_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(candidate, fmt) {
            return Stamp::from_date(d);
        }
    }
    from_iso(trimmed)
}

/// Meridiem markers look like zones but belong to the time.
const MERIDIEMS: &[&str] = &["AM", "PM"];

/// Drop a trailing all-caps zone abbreviation ("PT", "EDT", "BST").
fn strip_zone(text: &str) -> &str {
    match text.rsplit_once(' ') {
        Some((head, tail))
            if (2..=4).contains(&tail.len())
                && tail.chars().all(|c| c.is_ascii_uppercase())
                && !MERIDIEMS.contains(&tail) =>
        {
            head.trim_end()
        }
        _ => text,
    }
}

/// Guardian day-section id, e.g. `19-october-2026`.
pub fn section_id(today: NaiveDate) -> String {
    today.format("%d-%B-%Y").to_string().to_lowercase()
}
