//! Canonical calendar-day key.
//!
//! # Invariants
//! - The key is the local calendar date, rendered as ISO `YYYY-MM-DD`.
//! - Keys compare by calendar order and round-trip through their string form.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Identifier of one calendar day, used both to detect rollover and to key
/// archived days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a key from calendar components, `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Key of the current local calendar day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

/// Raised when a persisted or user-supplied day key is not ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateKeyParseError {
    pub input: String,
}

impl Display for DateKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date key `{}`; expected YYYY-MM-DD", self.input)
    }
}

impl Error for DateKeyParseError {}

impl FromStr for DateKey {
    type Err = DateKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        // chrono accepts unpadded fields; keys must stay byte-comparable.
        if trimmed.len() != 10 {
            return Err(DateKeyParseError {
                input: value.to_string(),
            });
        }
        NaiveDate::parse_from_str(trimmed, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| DateKeyParseError {
                input: value.to_string(),
            })
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::DateKey;

    #[test]
    fn renders_iso_calendar_day() {
        let key = DateKey::from_ymd(2024, 1, 2).unwrap();
        assert_eq!(key.to_string(), "2024-01-02");
    }

    #[test]
    fn parses_iso_and_rejects_locale_formats() {
        assert_eq!(
            "2024-01-02".parse::<DateKey>().unwrap(),
            DateKey::from_ymd(2024, 1, 2).unwrap()
        );
        assert!("2/1/2024".parse::<DateKey>().is_err());
        assert!("2024-1-2".parse::<DateKey>().is_err());
        assert!("1704153600000".parse::<DateKey>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = DateKey::from_ymd(2024, 12, 31).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-12-31\"");
        let back: DateKey = serde_json::from_str("\"2024-12-31\"").unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn orders_by_calendar() {
        let earlier = DateKey::from_ymd(2023, 12, 31).unwrap();
        let later = DateKey::from_ymd(2024, 1, 1).unwrap();
        assert!(earlier < later);
    }
}
