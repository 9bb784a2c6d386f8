//! Calendar dates as they travel to and from the document store.
//!
//! Dates are written as UTC midnight (`2024-03-15T00:00:00.000Z`) and any
//! RFC 3339 timestamp read back is normalized to its UTC calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Serialize a calendar date as an ISO-8601 UTC timestamp at midnight.
pub fn to_iso(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Parse a stored date string back into a calendar date.
///
/// Accepts full RFC 3339 timestamps (any offset, converted to UTC), naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps and bare `YYYY-MM-DD` dates.
pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Human-readable form used in lists and headers, e.g. `Fri Mar 15 2024`.
pub fn display(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// `#[serde(with = "iso")]` adapter for `NaiveDate` fields.
pub mod iso {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
    }
}

/// `#[serde(with = "iso_opt")]` adapter for optional patch fields.
pub mod iso_opt {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&super::to_iso(*d)),
            None => serializer.serialize_none(),
        }
    }
}
