//! Driver backed by the `time` crate.
//!
//! Patterns use `format_description` syntax (`[month]/[day]/[year]`).
//! Normalization accepts the same inputs as the chrono driver: ISO 8601
//! datetimes (with or without offset), date-only strings, and epoch
//! milliseconds.

use time::format_description::well_known::Iso8601;
use time::util::days_in_year_month;
use time::{
    format_description, Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
};

use crate::driver::{DateDriver, DriverInfo};
use crate::parts::{FormatType, Part};
use crate::span::Span;
use crate::types::{DateFields, DateInput, DateValue};

pub struct TimeDriver;

impl TimeDriver {
    fn resolve(&self, input: &DateInput) -> Option<PrimitiveDateTime> {
        match input {
            DateInput::Value(value) => to_primitive(value),
            DateInput::Millis(millis) => {
                let nanos = i128::from(*millis).checked_mul(1_000_000)?;
                let odt = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
                Some(PrimitiveDateTime::new(odt.date(), odt.time()))
            }
            DateInput::Text(text) => {
                let parsed = parse_text(text);
                if parsed.is_none() {
                    tracing::debug!(input = %text, driver = "time", "input failed normalization");
                }
                parsed
            }
        }
    }
}

impl DateDriver for TimeDriver {
    fn id(&self) -> &'static str {
        "time"
    }

    fn name(&self) -> &'static str {
        "Time"
    }

    fn info(&self) -> DriverInfo {
        DriverInfo {
            id: self.id(),
            name: self.name(),
            backend: "time",
            description: "Date operations via the time crate (format_description patterns)",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["t"]
    }

    fn normalize(&self, input: &DateInput) -> Option<DateValue> {
        self.resolve(input).map(from_primitive)
    }

    fn parse_pattern(&self, text: &str, pattern: &str) -> Option<DateValue> {
        let description = format_description::parse(pattern).ok()?;
        let parsed = PrimitiveDateTime::parse(text, &description)
            .ok()
            .or_else(|| {
                Date::parse(text, &description)
                    .ok()
                    .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
            })?;
        Some(from_primitive(parsed))
    }

    fn now(&self) -> DateValue {
        let odt = OffsetDateTime::now_utc();
        from_primitive(PrimitiveDateTime::new(odt.date(), odt.time()))
    }

    fn format(&self, input: &DateInput, pattern: Option<&str>) -> Option<String> {
        let dt = self.resolve(input)?;

        let Some(pattern) = pattern else {
            return Some(from_primitive(dt).to_string());
        };

        let description = match format_description::parse(pattern) {
            Ok(description) => description,
            Err(error) => {
                tracing::debug!(pattern, driver = "time", %error, "unsupported format pattern");
                return None;
            }
        };
        dt.format(&description).ok()
    }

    fn start_of(&self, input: &DateInput, part: Part) -> Option<DateValue> {
        let dt = self.resolve(input)?;
        let date = dt.date();
        let result = match part {
            Part::Seconds => dt.replace_millisecond(0).ok()?,
            Part::Minutes => dt.replace_second(0).ok()?.replace_millisecond(0).ok()?,
            Part::Hours => dt
                .replace_minute(0)
                .ok()?
                .replace_second(0)
                .ok()?
                .replace_millisecond(0)
                .ok()?,
            Part::Days => PrimitiveDateTime::new(date, Time::MIDNIGHT),
            Part::Weekdays | Part::Weeks => {
                let back = i64::from(date.weekday().number_days_from_monday());
                let monday = checked_shift_days(date, -back)?;
                PrimitiveDateTime::new(monday, Time::MIDNIGHT)
            }
            Part::Months => {
                let first = Date::from_calendar_date(date.year(), date.month(), 1).ok()?;
                PrimitiveDateTime::new(first, Time::MIDNIGHT)
            }
            Part::Years => {
                let first = Date::from_calendar_date(date.year(), Month::January, 1).ok()?;
                PrimitiveDateTime::new(first, Time::MIDNIGHT)
            }
        };
        Some(from_primitive(result))
    }

    fn end_of(&self, input: &DateInput, part: Part) -> Option<DateValue> {
        let dt = self.resolve(input)?;
        let date = dt.date();
        let end_of_day = Time::from_hms_milli(23, 59, 59, 999).ok()?;
        let result = match part {
            Part::Seconds => dt.replace_millisecond(999).ok()?,
            Part::Minutes => dt.replace_second(59).ok()?.replace_millisecond(999).ok()?,
            Part::Hours => dt
                .replace_minute(59)
                .ok()?
                .replace_second(59)
                .ok()?
                .replace_millisecond(999)
                .ok()?,
            Part::Days => PrimitiveDateTime::new(date, end_of_day),
            Part::Weekdays | Part::Weeks => {
                let forward = 6 - i64::from(date.weekday().number_days_from_monday());
                let sunday = checked_shift_days(date, forward)?;
                PrimitiveDateTime::new(sunday, end_of_day)
            }
            Part::Months => {
                let last_day = days_in_year_month(date.year(), date.month());
                let last = Date::from_calendar_date(date.year(), date.month(), last_day).ok()?;
                PrimitiveDateTime::new(last, end_of_day)
            }
            Part::Years => {
                let last = Date::from_calendar_date(date.year(), Month::December, 31).ok()?;
                PrimitiveDateTime::new(last, end_of_day)
            }
        };
        Some(from_primitive(result))
    }

    fn set(&self, input: &DateInput, fields: &DateFields) -> Option<DateValue> {
        let mut dt = self.resolve(input)?;

        // The weekday setter moves within the Monday-based week and runs
        // before the plain field setters.
        if let Some(weekday) = fields.weekday {
            if weekday > 6 {
                return None;
            }
            let current = i64::from(dt.date().weekday().number_days_from_monday());
            let delta = i64::from(weekday) - current;
            let date = checked_shift_days(dt.date(), delta)?;
            dt = PrimitiveDateTime::new(date, dt.time());
        }

        if let Some(year) = fields.year {
            dt = dt.replace_year(year).ok()?;
        }
        if let Some(month) = fields.month {
            dt = dt.replace_month(Month::try_from(month).ok()?).ok()?;
        }
        if let Some(day) = fields.day {
            dt = dt.replace_day(day).ok()?;
        }
        if let Some(hour) = fields.hour {
            dt = dt.replace_hour(hour).ok()?;
        }
        if let Some(minute) = fields.minute {
            dt = dt.replace_minute(minute).ok()?;
        }
        if let Some(second) = fields.second {
            dt = dt.replace_second(second).ok()?;
        }
        if let Some(millisecond) = fields.millisecond {
            dt = dt.replace_millisecond(millisecond).ok()?;
        }

        Some(from_primitive(dt))
    }

    fn add(&self, input: &DateInput, span: &Span) -> Option<DateValue> {
        let dt = self.resolve(input)?;
        let dt = shift_months(dt, span.total_months())?;
        let day_seconds = span.total_days().checked_mul(86_400)?;
        let dt = dt.checked_add(Duration::seconds(day_seconds))?;
        let dt = dt.checked_add(Duration::seconds(span.total_seconds()?))?;
        Some(from_primitive(dt))
    }

    fn diff(&self, a: &DateInput, b: &DateInput, part: Part) -> Option<i64> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        let delta = a - b;
        let value = match part {
            Part::Seconds => delta.whole_seconds(),
            Part::Minutes => delta.whole_minutes(),
            Part::Hours => delta.whole_hours(),
            Part::Days => delta.whole_days(),
            Part::Weekdays | Part::Weeks => delta.whole_weeks(),
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
            Part::Weekdays => i64::from(dt.date().weekday().number_days_from_monday()),
            Part::Weeks => i64::from(dt.date().iso_week()),
            Part::Months => i64::from(u8::from(dt.month())),
            Part::Years => i64::from(dt.year()),
        };
        Some(value)
    }

    fn days_in_month(&self, input: &DateInput) -> Option<u8> {
        let dt = self.resolve(input)?;
        Some(days_in_year_month(dt.year(), dt.month()))
    }

    fn format_string(&self, format_type: FormatType) -> &'static str {
        match format_type {
            FormatType::Day => "[day padding:none]",
            FormatType::Month => "[month repr:long] [year]",
            FormatType::Weekday => "[weekday repr:short]",
            FormatType::Display => "[month]/[day]/[year]",
            FormatType::AriaLabel => {
                "[weekday repr:long], [month repr:long] [day padding:none], [year]"
            }
        }
    }
}

fn to_primitive(value: &DateValue) -> Option<PrimitiveDateTime> {
    let month = Month::try_from(value.month()).ok()?;
    let date = Date::from_calendar_date(value.year(), month, value.day()).ok()?;
    let time = Time::from_hms_milli(
        value.hour(),
        value.minute(),
        value.second(),
        value.millisecond(),
    )
    .ok()?;
    Some(PrimitiveDateTime::new(date, time))
}

fn from_primitive(dt: PrimitiveDateTime) -> DateValue {
    DateValue::from_backend(
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.millisecond(),
    )
}

/// Parse ISO 8601 text: full datetime with offset first, then naive
/// datetime, then date-only.
fn parse_text(text: &str) -> Option<PrimitiveDateTime> {
    let trimmed = text.trim();

    if let Ok(odt) = OffsetDateTime::parse(trimmed, &Iso8601::DEFAULT) {
        let utc = odt.to_offset(UtcOffset::UTC);
        return Some(PrimitiveDateTime::new(utc.date(), utc.time()));
    }

    if let Ok(dt) = PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT) {
        return Some(dt);
    }

    Date::parse(trimmed, &Iso8601::DEFAULT)
        .ok()
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
}

fn checked_shift_days(date: Date, days: i64) -> Option<Date> {
    let seconds = days.checked_mul(86_400)?;
    date.checked_add(Duration::seconds(seconds))
}

/// Shift by whole calendar months, clamping the day to the target month.
fn shift_months(dt: PrimitiveDateTime, months: i64) -> Option<PrimitiveDateTime> {
    if months == 0 {
        return Some(dt);
    }
    let zero_based = i64::from(dt.year()) * 12 + i64::from(u8::from(dt.month())) - 1;
    let target = zero_based.checked_add(months)?;
    let year = i32::try_from(target.div_euclid(12)).ok()?;
    let month = Month::try_from((target.rem_euclid(12) + 1) as u8).ok()?;
    let day = dt.day().min(days_in_year_month(year, month));
    let date = Date::from_calendar_date(year, month, day).ok()?;
    Some(PrimitiveDateTime::new(date, dt.time()))
}

/// Whole-month difference `a - b`: the largest `n` such that `b` shifted by
/// `n` months (clamped) does not pass `a`.
fn whole_month_diff(a: PrimitiveDateTime, b: PrimitiveDateTime) -> i64 {
    let raw =
        i64::from(a.year() - b.year()) * 12 + i64::from(u8::from(a.month()))
            - i64::from(u8::from(b.month()));
    match shift_months(b, raw) {
        Some(shifted) if raw > 0 && shifted > a => raw - 1,
        Some(shifted) if raw < 0 && shifted < a => raw + 1,
        _ => raw,
    }
}
