//! Core value types shared by every driver.
//!
//! [`DateValue`] is the single internal representation all drivers normalize
//! into; [`DateInput`] is the heterogeneous "date-like" value accepted at the
//! API boundary.

use serde::{Deserialize, Serialize};

/// A validated civil (timezone-less) datetime with millisecond precision.
///
/// This is what every driver operation returns, regardless of backend.
/// Construction is checked, so a `DateValue` obtained from [`Self::new`] or
/// from a driver always names a real calendar instant. Field order makes the
/// derived `Ord` chronological.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DateValue {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
}

impl DateValue {
    /// Build a value from full components, `None` if any is out of range.
    #[must_use]
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > days_in_month(year, month) {
            return None;
        }
        if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// Build a value at midnight, `None` if the date is out of range.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-12.
    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, 1-31.
    #[must_use]
    pub fn day(&self) -> u8 {
        self.day
    }

    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    #[must_use]
    pub fn second(&self) -> u8 {
        self.second
    }

    #[must_use]
    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// The calendar-day key `(year, month, day)`, for day-level comparisons.
    #[must_use]
    pub fn day_key(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Constructor for drivers converting a datetime their backend already
    /// validated. Callers guarantee the components name a real instant.
    pub(crate) fn from_backend(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Self {
        debug_assert!(Self::new(year, month, day, hour, minute, second, millisecond).is_some());
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        }
    }
}

impl std::fmt::Display for DateValue {
    /// ISO 8601 with millisecond precision, e.g. `1991-07-13T00:00:00.000`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// Days in a calendar month, Gregorian rules.
pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// A date-like input value accepted by every driver operation.
///
/// Either an already-normalized [`DateValue`], a native timestamp (epoch
/// milliseconds, UTC), or an ISO-8601 text string. Drivers normalize all
/// three into a [`DateValue`] and return `None` for anything unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Value(DateValue),
    Millis(i64),
    Text(String),
}

impl From<DateValue> for DateInput {
    fn from(value: DateValue) -> Self {
        DateInput::Value(value)
    }
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        DateInput::Millis(millis)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

/// Named field overrides for [`crate::DateDriver::set`].
///
/// `None` fields are left untouched. The `weekday` field is special-cased:
/// it moves the value within its Monday-based week and is applied before the
/// plain fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFields {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    pub millisecond: Option<u16>,
    /// Monday-based weekday index, 0-6.
    pub weekday: Option<u8>,
}

impl DateFields {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_ranges() {
        assert!(DateValue::new(1991, 7, 13, 0, 0, 0, 0).is_some());
        assert!(DateValue::new(1991, 13, 1, 0, 0, 0, 0).is_none());
        assert!(DateValue::new(1991, 0, 1, 0, 0, 0, 0).is_none());
        assert!(DateValue::new(1991, 7, 32, 0, 0, 0, 0).is_none());
        assert!(DateValue::new(1991, 7, 13, 24, 0, 0, 0).is_none());
        assert!(DateValue::new(1991, 7, 13, 0, 0, 0, 1000).is_none());
    }

    #[test]
    fn test_leap_years() {
        assert!(DateValue::from_ymd(2024, 2, 29).is_some());
        assert!(DateValue::from_ymd(2023, 2, 29).is_none());
        assert!(DateValue::from_ymd(2000, 2, 29).is_some());
        assert!(DateValue::from_ymd(1900, 2, 29).is_none());
    }

    #[test]
    fn test_display_is_iso() {
        let value = DateValue::new(1991, 7, 13, 9, 5, 2, 40).unwrap();
        assert_eq!(value.to_string(), "1991-07-13T09:05:02.040");
    }

    #[test]
    fn test_ord_is_chronological() {
        let a = DateValue::from_ymd(1991, 7, 13).unwrap();
        let b = DateValue::new(1991, 7, 13, 0, 0, 0, 1).unwrap();
        let c = DateValue::from_ymd(1991, 8, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_input_conversions() {
        assert_eq!(
            DateInput::from("1991-07-13"),
            DateInput::Text("1991-07-13".into())
        );
        assert_eq!(
            DateInput::from(679_363_200_000_i64),
            DateInput::Millis(679_363_200_000)
        );
    }
}
