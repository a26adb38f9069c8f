//! Store-timezone temporal handling
//!
//! All calendar semantics in the system (invoice day keys, date-range
//! filters) are anchored to the store's fixed operating timezone, not to
//! UTC and not to the server's local zone. Timestamps are stored as UTC and
//! converted at the edges.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Input format for date-range filters (`31/05/2025`).
pub const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";

/// Format of the day key that scopes the invoice sequence (`20250531`).
pub const DAY_KEY_FORMAT: &str = "%Y%m%d";

/// The store's operating timezone (UTC+7 in the reference deployment).
pub const OPERATING_TZ: Tz = chrono_tz::Asia::Bangkok;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    /// Date input did not match `dd/mm/yyyy`
    #[error("Invalid date format (expected dd/mm/yyyy): {0}")]
    InvalidDateFormat(String),

    /// Range end precedes range start
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}

/// Timezone wrapper carrying the store's operating zone
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimezone(pub Tz);

impl Serialize for StoreTimezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for StoreTimezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(StoreTimezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Default for StoreTimezone {
    fn default() -> Self {
        Self(OPERATING_TZ)
    }
}

impl StoreTimezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC timestamp to the store's local time
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Derives the calendar-day key (`YYYYMMDD`) for a UTC instant
    ///
    /// The key is taken from the store's local calendar, so an invoice
    /// created at 23:30 UTC lands on the next local day in a UTC+7 store.
    pub fn day_key(&self, utc: DateTime<Utc>) -> String {
        self.to_local(utc).format(DAY_KEY_FORMAT).to_string()
    }

    /// Parses a `dd/mm/yyyy` date string
    pub fn parse_day(&self, input: &str) -> Result<NaiveDate, TemporalError> {
        NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT)
            .map_err(|_| TemporalError::InvalidDateFormat(input.to_string()))
    }

    /// Gets the start of day (00:00:00) in the store timezone as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(self.0)
            .single()
            .expect("Invalid timezone conversion")
            .with_timezone(&Utc)
    }

    /// Gets the end of day (23:59:59.999) in the store timezone as UTC
    ///
    /// A caller-supplied `to` date is a calendar day; filters must extend it
    /// to the last instant of that day so the range is inclusive.
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        date.and_hms_milli_opt(23, 59, 59, 999)
            .unwrap()
            .and_local_timezone(self.0)
            .single()
            .expect("Invalid timezone conversion")
            .with_timezone(&Utc)
    }

    /// Expands an inclusive `[from, to]` calendar-day pair into a UTC window
    pub fn day_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), TemporalError> {
        if from > to {
            return Err(TemporalError::InvalidRange { from, to });
        }
        Ok((self.start_of_day(from), self.end_of_day(to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tz() -> StoreTimezone {
        StoreTimezone::default()
    }

    #[test]
    fn test_day_key_uses_store_local_calendar() {
        // 17:30 UTC is 00:30 on the next day in UTC+7
        let utc = Utc.with_ymd_and_hms(2025, 6, 9, 17, 30, 0).unwrap();
        assert_eq!(tz().day_key(utc), "20250610");
    }

    #[test]
    fn test_day_key_before_local_midnight() {
        let utc = Utc.with_ymd_and_hms(2025, 6, 9, 16, 59, 59).unwrap();
        assert_eq!(tz().day_key(utc), "20250609");
    }

    #[test]
    fn test_parse_day_accepts_dd_mm_yyyy() {
        let date = tz().parse_day("31/05/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
    }

    #[test]
    fn test_parse_day_rejects_other_formats() {
        assert!(matches!(
            tz().parse_day("2025-05-31"),
            Err(TemporalError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            tz().parse_day("31/13/2025"),
            Err(TemporalError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_day_range_is_inclusive_of_to_day() {
        let from = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let (start, end) = tz().day_range(from, to).unwrap();

        // 31/05 23:59:59 local falls inside the window
        let late = tz()
            .0
            .with_ymd_and_hms(2025, 5, 31, 23, 59, 59)
            .unwrap()
            .with_timezone(&Utc);
        assert!(late >= start && late <= end);

        // 01/06 00:00:01 local does not
        let next = tz()
            .0
            .with_ymd_and_hms(2025, 6, 1, 0, 0, 1)
            .unwrap()
            .with_timezone(&Utc);
        assert!(next > end);
    }

    #[test]
    fn test_day_range_rejects_inverted_pair() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(matches!(
            tz().day_range(from, to),
            Err(TemporalError::InvalidRange { .. })
        ));
    }
}
