//! Timestamp value object for review creation times.
//!
//! The review API emits ISO datetimes, sometimes without an offset. Values
//! without an offset are taken to be UTC.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ValidationError;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parses an RFC 3339 datetime or a naive ISO datetime (assumed UTC).
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
            .map_err(|e| ValidationError::invalid_format("timestamp", e.to_string()))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - chrono::Duration::days(days))
    }

    /// Formats as "Jan 5, 2024, 03:30 PM" in the given time zone.
    pub fn format_display_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.0
            .with_timezone(tz)
            .format("%b %-d, %Y, %I:%M %p")
            .to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset, Timelike};

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = Timestamp::parse("2024-03-10T12:00:00+02:00").unwrap();
        assert_eq!(ts.as_datetime().hour(), 10);
    }

    #[test]
    fn parses_naive_iso_as_utc() {
        let ts = Timestamp::parse("2024-01-05T15:30:12.123456").unwrap();
        assert_eq!(ts.as_datetime().year(), 2024);
        assert_eq!(ts.as_datetime().hour(), 15);
        assert_eq!(ts.as_datetime().minute(), 30);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn formats_month_day_year_and_clock() {
        let ts = Timestamp::parse("2024-01-05T15:30:00Z").unwrap();
        assert_eq!(ts.format_display_in(&Utc), "Jan 5, 2024, 03:30 PM");
    }

    #[test]
    fn formats_in_requested_zone() {
        let ts = Timestamp::parse("2024-01-05T23:30:00Z").unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(ts.format_display_in(&tokyo), "Jan 6, 2024, 08:30 AM");
    }

    #[test]
    fn deserializes_from_json_string() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-05T15:30:00\"").unwrap();
        assert_eq!(ts.format_display_in(&Utc), "Jan 5, 2024, 03:30 PM");
    }

    #[test]
    fn minus_days_moves_backwards() {
        let ts = Timestamp::parse("2024-01-08T00:00:00Z").unwrap();
        assert_eq!(ts.minus_days(7).as_datetime().day(), 1);
    }
}
