//! Driver backed by the `chrono` crate.
//!
//! Patterns are strftime-style (`%m/%d/%Y`). Normalization accepts ISO 8601
//! datetimes (with or without offset), date-only strings, and epoch
//! milliseconds.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

use crate::driver::{DateDriver, DriverInfo};
use crate::parts::{FormatType, Part};
use crate::span::Span;
use crate::types::{DateFields, DateInput, DateValue};

pub struct ChronoDriver;

impl ChronoDriver {
    fn resolve(&self, input: &DateInput) -> Option<NaiveDateTime> {
        match input {
            DateInput::Value(value) => to_naive(value),
            DateInput::Millis(millis) => {
                DateTime::from_timestamp_millis(*millis).map(|dt| dt.naive_utc())
            }
            DateInput::Text(text) => {
                let parsed = parse_text(text);
                if parsed.is_none() {
                    tracing::debug!(input = %text, driver = "chrono", "input failed normalization");
                }
                parsed
            }
        }
    }
}

impl DateDriver for ChronoDriver {
    fn id(&self) -> &'static str {
        "chrono"
    }

    fn name(&self) -> &'static str {
        "Chrono"
    }

    fn info(&self) -> DriverInfo {
        DriverInfo {
            id: self.id(),
            name: self.name(),
            backend: "chrono",
            description: "Date operations via the chrono crate (strftime-style patterns)",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["c"]
    }

    fn normalize(&self, input: &DateInput) -> Option<DateValue> {
        self.resolve(input).map(from_naive)
    }

    fn parse_pattern(&self, text: &str, pattern: &str) -> Option<DateValue> {
        let parsed = NaiveDateTime::parse_from_str(text, pattern)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(text, pattern)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })?;
        Some(from_naive(parsed))
    }

    fn now(&self) -> DateValue {
        from_naive(Utc::now().naive_utc())
    }

    fn format(&self, input: &DateInput, pattern: Option<&str>) -> Option<String> {
        let dt = self.resolve(input)?;

        let Some(pattern) = pattern else {
            return Some(from_naive(dt).to_string());
        };

        // A bad specifier makes chrono's Display path panic, so reject the
        // pattern up front and keep the operation total.
        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            tracing::debug!(pattern, driver = "chrono", "unsupported format pattern");
            return None;
        }
        Some(dt.format_with_items(items.iter()).to_string())
    }

    fn start_of(&self, input: &DateInput, part: Part) -> Option<DateValue> {
        let dt = self.resolve(input)?;
        let date = dt.date();
        let result = match part {
            Part::Seconds => dt.with_nanosecond(0)?,
            Part::Minutes => dt.with_nanosecond(0)?.with_second(0)?,
            Part::Hours => dt.with_nanosecond(0)?.with_second(0)?.with_minute(0)?,
            Part::Days => date.and_hms_opt(0, 0, 0)?,
            Part::Weekdays | Part::Weeks => {
                let back = i64::from(date.weekday().num_days_from_monday());
                date.checked_sub_signed(TimeDelta::try_days(back)?)?
                    .and_hms_opt(0, 0, 0)?
            }
            Part::Months => date.with_day(1)?.and_hms_opt(0, 0, 0)?,
            Part::Years => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0)?,
        };
        Some(from_naive(result))
    }

    fn end_of(&self, input: &DateInput, part: Part) -> Option<DateValue> {
        let dt = self.resolve(input)?;
        let date = dt.date();
        let result = match part {
            Part::Seconds => dt.with_nanosecond(999_000_000)?,
            Part::Minutes => dt.with_second(59)?.with_nanosecond(999_000_000)?,
            Part::Hours => dt
                .with_minute(59)?
                .with_second(59)?
                .with_nanosecond(999_000_000)?,
            Part::Days => date.and_hms_milli_opt(23, 59, 59, 999)?,
            Part::Weekdays | Part::Weeks => {
                let forward = 6 - i64::from(date.weekday().num_days_from_monday());
                date.checked_add_signed(TimeDelta::try_days(forward)?)?
                    .and_hms_milli_opt(23, 59, 59, 999)?
            }
            Part::Months => last_day_of_month(date)?.and_hms_milli_opt(23, 59, 59, 999)?,
            Part::Years => {
                NaiveDate::from_ymd_opt(date.year(), 12, 31)?.and_hms_milli_opt(23, 59, 59, 999)?
            }
        };
        Some(from_naive(result))
    }

    fn set(&self, input: &DateInput, fields: &DateFields) -> Option<DateValue> {
        let mut dt = self.resolve(input)?;

        // The weekday setter moves within the Monday-based week and runs
        // before the plain field setters.
        if let Some(weekday) = fields.weekday {
            if weekday > 6 {
                return None;
            }
            let current = i64::from(dt.weekday().num_days_from_monday());
            let delta = i64::from(weekday) - current;
            dt = dt.checked_add_signed(TimeDelta::try_days(delta)?)?;
        }

        if let Some(year) = fields.year {
            dt = dt.with_year(year)?;
        }
        if let Some(month) = fields.month {
            dt = dt.with_month(u32::from(month))?;
        }
        if let Some(day) = fields.day {
            dt = dt.with_day(u32::from(day))?;
        }
        if let Some(hour) = fields.hour {
            dt = dt.with_hour(u32::from(hour))?;
        }
        if let Some(minute) = fields.minute {
            dt = dt.with_minute(u32::from(minute))?;
        }
        if let Some(second) = fields.second {
            dt = dt.with_second(u32::from(second))?;
        }
        if let Some(millisecond) = fields.millisecond {
            if millisecond > 999 {
                return None;
            }
            dt = dt.with_nanosecond(u32::from(millisecond) * 1_000_000)?;
        }

        Some(from_naive(dt))
    }

    fn add(&self, input: &DateInput, span: &Span) -> Option<DateValue> {
        let dt = self.resolve(input)?;
        let dt = shift_months(dt, span.total_months())?;
        let dt = dt.checked_add_signed(TimeDelta::try_days(span.total_days())?)?;
        let dt = dt.checked_add_signed(TimeDelta::try_seconds(span.total_seconds()?)?)?;
        Some(from_naive(dt))
    }

    fn diff(&self, a: &DateInput, b: &DateInput, part: Part) -> Option<i64> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        let delta = a.signed_duration_since(b);
        let value = match part {
            Part::Seconds => delta.num_seconds(),
            Part::Minutes => delta.num_minutes(),
            Part::Hours => delta.num_hours(),
            Part::Days => delta.num_days(),
            Part::Weekdays | Part::Weeks => delta.num_weeks(),
            Part::Months => whole_month_diff(a, b),
            Part::Years => whole_month_diff(a, b) / 12,
        };
        Some(value)
    }

    fn get(&self, input: &DateInput, part: Part) -> Option<i64> {
        let dt = self.resolve(input)?;
        let value = match part {
            Part::Seconds => i64::from(dt.second()),
            Part::Minutes => i64::from(dt.minute()),
            Part::Hours => i64::from(dt.hour()),
            Part::Days => i64::from(dt.day()),
            Part::Weekdays => i64::from(dt.weekday().num_days_from_monday()),
            Part::Weeks => i64::from(dt.iso_week().week()),
            Part::Months => i64::from(dt.month()),
            Part::Years => i64::from(dt.year()),
        };
        Some(value)
    }

    fn days_in_month(&self, input: &DateInput) -> Option<u8> {
        let dt = self.resolve(input)?;
        Some(last_day_of_month(dt.date())?.day() as u8)
    }

    fn format_string(&self, format_type: FormatType) -> &'static str {
        match format_type {
            FormatType::Day => "%-d",
            FormatType::Month => "%B %Y",
            FormatType::Weekday => "%a",
            FormatType::Display => "%m/%d/%Y",
            FormatType::AriaLabel => "%A, %B %-d, %Y",
        }
    }
}

fn to_naive(value: &DateValue) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(
        value.year(),
        u32::from(value.month()),
        u32::from(value.day()),
    )?
    .and_hms_milli_opt(
        u32::from(value.hour()),
        u32::from(value.minute()),
        u32::from(value.second()),
        u32::from(value.millisecond()),
    )
}

fn from_naive(dt: NaiveDateTime) -> DateValue {
    // Leap-second nanos fold into the 999 ms bucket.
    let millis = ((dt.nanosecond() / 1_000_000).min(999)) as u16;
    DateValue::from_backend(
        dt.year(),
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        millis,
    )
}

/// Parse ISO 8601 text: full datetime with offset first, then naive
/// datetime, then date-only.
fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let first_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }?;
    first_next.pred_opt()
}

/// Shift by whole calendar months, clamping the day to the target month.
fn shift_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    if months == 0 {
        return Some(dt);
    }
    let abs = u32::try_from(months.unsigned_abs()).ok()?;
    if months > 0 {
        dt.checked_add_months(Months::new(abs))
    } else {
        dt.checked_sub_months(Months::new(abs))
    }
}

/// Whole-month difference `a - b`: the largest `n` such that `b` shifted by
/// `n` months (clamped) does not pass `a`.
fn whole_month_diff(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    let raw = i64::from(a.year() - b.year()) * 12 + i64::from(a.month()) - i64::from(b.month());
    match shift_months(b, raw) {
        Some(shifted) if raw > 0 && shifted > a => raw - 1,
        Some(shifted) if raw < 0 && shifted < a => raw + 1,
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAT: &str = "1991-07-13";

    fn input(text: &str) -> DateInput {
        DateInput::from(text)
    }

    #[test]
    fn test_normalize_iso_forms() {
        let driver = ChronoDriver;
        let from_date = driver.normalize(&input(SAT)).unwrap();
        let from_datetime = driver.normalize(&input("1991-07-13T00:00:00")).unwrap();
        let from_offset = driver.normalize(&input("1991-07-13T00:00:00Z")).unwrap();
        let from_millis = driver.normalize(&DateInput::Millis(679_363_200_000)).unwrap();

        assert_eq!(from_date, from_datetime);
        assert_eq!(from_date, from_offset);
        assert_eq!(from_date, from_millis);
        assert_eq!(from_date.day_key(), (1991, 7, 13));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let driver = ChronoDriver;
        assert!(driver.normalize(&input("not-a-date")).is_none());
        assert!(driver.normalize(&input("2023-02-30")).is_none());
        assert!(driver.normalize(&DateInput::Millis(i64::MAX)).is_none());
    }

    #[test]
    fn test_week_boundaries_are_monday_based() {
        let driver = ChronoDriver;
        let start = driver.start_of(&input(SAT), Part::Weekdays).unwrap();
        let end = driver.end_of(&input(SAT), Part::Weekdays).unwrap();

        assert_eq!(start.day_key(), (1991, 7, 8));
        assert_eq!(end.day_key(), (1991, 7, 14));
        assert_eq!(end.hour(), 23);
        assert_eq!(end.millisecond(), 999);
    }

    #[test]
    fn test_set_weekday_moves_within_week() {
        let driver = ChronoDriver;
        let fields = DateFields {
            weekday: Some(0),
            ..DateFields::default()
        };
        let monday = driver.set(&input(SAT), &fields).unwrap();
        assert_eq!(monday.day_key(), (1991, 7, 8));

        let fields = DateFields {
            weekday: Some(7),
            ..DateFields::default()
        };
        assert!(driver.set(&input(SAT), &fields).is_none());
    }

    #[test]
    fn test_add_clamps_month_ends() {
        let driver = ChronoDriver;
        let clamped = driver.add(&input("2024-01-31"), &Span::months(1)).unwrap();
        assert_eq!(clamped.day_key(), (2024, 2, 29));

        let back = driver
            .subtract(&input("2024-03-31"), &Span::months(1))
            .unwrap();
        assert_eq!(back.day_key(), (2024, 2, 29));
    }

    #[test]
    fn test_whole_month_diff_needs_full_months() {
        let driver = ChronoDriver;
        let a = input("1991-08-12");
        let b = input("1991-07-13");
        assert_eq!(driver.diff(&a, &b, Part::Months), Some(0));
        assert_eq!(driver.diff(&input("1991-08-13"), &b, Part::Months), Some(1));
        assert_eq!(driver.diff(&b, &input("1991-08-13"), Part::Months), Some(-1));
    }

    #[test]
    fn test_format_patterns() {
        let driver = ChronoDriver;
        assert_eq!(
            driver.format(&input(SAT), Some("%m/%d/%Y")).unwrap(),
            "07/13/1991"
        );
        assert_eq!(
            driver.format(&input(SAT), None).unwrap(),
            "1991-07-13T00:00:00.000"
        );
        assert!(driver.format(&input(SAT), Some("%Q")).is_none());
        assert!(driver.format(&input("garbage"), Some("%m/%d/%Y")).is_none());
    }

    #[test]
    fn test_parse_pattern_round_trip() {
        let driver = ChronoDriver;
        let display = driver.format_string(FormatType::Display);
        let rendered = driver.format(&input(SAT), Some(display)).unwrap();
        let reparsed = driver.parse_pattern(&rendered, display).unwrap();
        assert_eq!(reparsed.day_key(), (1991, 7, 13));
    }

    #[test]
    fn test_get_components() {
        let driver = ChronoDriver;
        let at = input("1991-07-13T09:05:02.040");
        assert_eq!(driver.get(&at, Part::Years), Some(1991));
        assert_eq!(driver.get(&at, Part::Months), Some(7));
        assert_eq!(driver.get(&at, Part::Days), Some(13));
        assert_eq!(driver.get(&at, Part::Weekdays), Some(5));
        assert_eq!(driver.get(&at, Part::Hours), Some(9));
        assert_eq!(driver.get(&at, Part::Minutes), Some(5));
        assert_eq!(driver.get(&at, Part::Seconds), Some(2));
        assert_eq!(driver.weekday(&at), Some(5));
    }

    #[test]
    fn test_days_in_month() {
        let driver = ChronoDriver;
        assert_eq!(driver.days_in_month(&input("2024-02-10")), Some(29));
        assert_eq!(driver.days_in_month(&input("2023-02-10")), Some(28));
        assert_eq!(driver.days_in_month(&input(SAT)), Some(31));
    }
}
