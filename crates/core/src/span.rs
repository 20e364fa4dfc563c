//! Calendar spans for add/subtract.
//!
//! Parses human-readable spans like:
//! - `1h30m`, `2d`, `1h`, `30s` (compact)
//! - `5 days`, `2 hours`, `30 minutes` (spelled out)
//! - `5 days 2 hours`, `1 hour 30 minutes` (mixed)
//! - `P5D`, `PT2H30M`, `P1DT12H` (ISO 8601)
//! - `1:30:00` (HH:MM:SS)
//!
//! Unlike a plain millisecond count, a span keeps calendar units apart so
//! month and year arithmetic can clamp to month length.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A signed calendar duration. Fields are applied largest-unit first by
/// [`crate::DateDriver::add`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Span {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Span {
    #[must_use]
    pub fn years(n: i64) -> Self {
        Self {
            years: n,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn months(n: i64) -> Self {
        Self {
            months: n,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn weeks(n: i64) -> Self {
        Self {
            weeks: n,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn days(n: i64) -> Self {
        Self {
            days: n,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hours(n: i64) -> Self {
        Self {
            hours: n,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn minutes(n: i64) -> Self {
        Self {
            minutes: n,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn seconds(n: i64) -> Self {
        Self {
            seconds: n,
            ..Self::default()
        }
    }

    /// True when every field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The span with every field sign-flipped.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }

    /// Total calendar months (years folded in).
    pub(crate) fn total_months(&self) -> i64 {
        self.years * 12 + self.months
    }

    /// Total days below the month level (weeks folded in).
    pub(crate) fn total_days(&self) -> i64 {
        self.weeks * 7 + self.days
    }

    /// Total clock seconds below the day level.
    pub(crate) fn total_seconds(&self) -> Option<i64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }
}

/// Failure to parse a [`Span`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanParseError {
    #[error("empty span")]
    Empty,
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
    #[error("malformed span `{0}`")]
    Malformed(String),
}

impl std::str::FromStr for Span {
    type Err = SpanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SpanParseError::Empty);
        }

        // Leading minus negates the whole span.
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        if body.is_empty() {
            return Err(SpanParseError::Malformed(s.to_string()));
        }

        let span = parse_iso8601(body)
            .or_else(|| parse_hms(body))
            .map_or_else(|| parse_human_readable(body), Ok)?;

        Ok(if negative { span.negated() } else { span })
    }
}

/// Parse ISO 8601 span format: `P5D`, `PT2H30M`, `P1DT12H30M15S`.
fn parse_iso8601(s: &str) -> Option<Span> {
    let upper = s.to_ascii_uppercase();
    let rest = upper.strip_prefix('P')?;

    let mut span = Span::default();
    let mut in_time_part = false;
    let mut current_num = String::new();
    let mut found_any = false;

    for c in rest.chars() {
        if c == 'T' {
            in_time_part = true;
            continue;
        }

        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            match (c, in_time_part) {
                ('Y', false) => span.years += num,
                ('M', false) => span.months += num,
                ('W', false) => span.weeks += num,
                ('D', false) => span.days += num,
                ('H', true) => span.hours += num,
                ('M', true) => span.minutes += num,
                ('S', true) => span.seconds += num,
                _ => return None,
            }
            found_any = true;
        } else {
            return None;
        }
    }

    if !current_num.is_empty() {
        // Trailing number without a designator.
        return None;
    }

    found_any.then_some(span)
}

/// Parse `HH:MM:SS` or `MM:SS`.
fn parse_hms(s: &str) -> Option<Span> {
    let parts: Vec<&str> = s.split(':').collect();

    match parts.len() {
        2 => {
            let minutes: i64 = parts[0].parse().ok()?;
            let seconds: i64 = parts[1].parse().ok()?;
            Some(Span {
                minutes,
                seconds,
                ..Span::default()
            })
        }
        3 => {
            let hours: i64 = parts[0].parse().ok()?;
            let minutes: i64 = parts[1].parse().ok()?;
            let seconds: i64 = parts[2].parse().ok()?;
            Some(Span {
                hours,
                minutes,
                seconds,
                ..Span::default()
            })
        }
        _ => None,
    }
}

/// Parse human-readable forms: `1h30m`, `5 days`, `5 days 2 hours`, `5 d`.
fn parse_human_readable(s: &str) -> Result<Span, SpanParseError> {
    let lower = s.to_ascii_lowercase();
    let mut span = Span::default();
    let mut found_any = false;

    let mut tokens = lower.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        // Compound tokens like "1h30m" or simple "5d".
        if let Some(parsed) = parse_compound_token(token)? {
            accumulate(&mut span, parsed);
            found_any = true;
            continue;
        }

        // A bare number followed by a separate unit token.
        if let Ok(num) = token.parse::<i64>() {
            let Some(&next) = tokens.peek() else {
                return Err(SpanParseError::Malformed(s.to_string()));
            };
            let Some(unit) = normalize_unit(next) else {
                return Err(SpanParseError::UnknownUnit(next.to_string()));
            };
            tokens.next();
            accumulate(&mut span, vec![(num, unit)]);
            found_any = true;
            continue;
        }

        return Err(SpanParseError::UnknownUnit(token.to_string()));
    }

    if found_any {
        Ok(span)
    } else {
        Err(SpanParseError::Malformed(s.to_string()))
    }
}

/// Parse a compound token like `1h30m` or `5d` into (number, unit) pairs.
/// Returns `Ok(None)` when the token is not number-led (so the caller can
/// try other shapes), an error for a bad unit inside a number-led token.
fn parse_compound_token(s: &str) -> Result<Option<Vec<(i64, &'static str)>>, SpanParseError> {
    let mut pairs = Vec::new();
    let mut current_num = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num
                .parse()
                .map_err(|_| SpanParseError::Malformed(s.to_string()))?;
            current_num.clear();

            let mut unit_str = String::new();
            unit_str.push(c);
            while let Some(&next_c) = chars.peek() {
                if next_c.is_ascii_alphabetic() {
                    unit_str.push(next_c);
                    chars.next();
                } else {
                    break;
                }
            }

            let unit =
                normalize_unit(&unit_str).ok_or(SpanParseError::UnknownUnit(unit_str.clone()))?;
            pairs.push((num, unit));
        } else {
            // Not number-led: not a compound token at all.
            return Ok(None);
        }
    }

    if !current_num.is_empty() {
        if pairs.is_empty() {
            // A bare number; the caller pairs it with the next token.
            return Ok(None);
        }
        return Err(SpanParseError::Malformed(s.to_string()));
    }

    if pairs.is_empty() {
        Ok(None)
    } else {
        Ok(Some(pairs))
    }
}

fn accumulate(span: &mut Span, pairs: Vec<(i64, &'static str)>) {
    for (num, unit) in pairs {
        match unit {
            "y" => span.years += num,
            "mo" => span.months += num,
            "w" => span.weeks += num,
            "d" => span.days += num,
            "h" => span.hours += num,
            "m" => span.minutes += num,
            "s" => span.seconds += num,
            _ => unreachable!("normalize_unit only yields known units"),
        }
    }
}

/// Normalize unit spellings to a canonical form. `m` means minutes; months
/// are `mo`.
fn normalize_unit(s: &str) -> Option<&'static str> {
    match s.trim() {
        "s" | "sec" | "secs" | "second" | "seconds" => Some("s"),
        "m" | "min" | "mins" | "minute" | "minutes" => Some("m"),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some("h"),
        "d" | "day" | "days" => Some("d"),
        "w" | "wk" | "wks" | "week" | "weeks" => Some("w"),
        "mo" | "mos" | "month" | "months" => Some("mo"),
        "y" | "yr" | "yrs" | "year" | "years" => Some("y"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_units() {
        assert_eq!("1h".parse::<Span>().unwrap(), Span::hours(1));
        assert_eq!("30m".parse::<Span>().unwrap(), Span::minutes(30));
        assert_eq!("2d".parse::<Span>().unwrap(), Span::days(2));
        assert_eq!("3mo".parse::<Span>().unwrap(), Span::months(3));
        assert_eq!("1y".parse::<Span>().unwrap(), Span::years(1));
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(
            "1h30m".parse::<Span>().unwrap(),
            Span {
                hours: 1,
                minutes: 30,
                ..Span::default()
            }
        );
        assert_eq!(
            "1d12h".parse::<Span>().unwrap(),
            Span {
                days: 1,
                hours: 12,
                ..Span::default()
            }
        );
    }

    #[test]
    fn test_parse_spelled_out() {
        assert_eq!("5 days".parse::<Span>().unwrap(), Span::days(5));
        assert_eq!("2 hours".parse::<Span>().unwrap(), Span::hours(2));
        assert_eq!(
            "5 days 2 hours".parse::<Span>().unwrap(),
            Span {
                days: 5,
                hours: 2,
                ..Span::default()
            }
        );
        assert_eq!("2 weeks".parse::<Span>().unwrap(), Span::weeks(2));
    }

    #[test]
    fn test_parse_iso8601() {
        assert_eq!("P5D".parse::<Span>().unwrap(), Span::days(5));
        assert_eq!(
            "PT2H30M".parse::<Span>().unwrap(),
            Span {
                hours: 2,
                minutes: 30,
                ..Span::default()
            }
        );
        assert_eq!(
            "P1DT12H".parse::<Span>().unwrap(),
            Span {
                days: 1,
                hours: 12,
                ..Span::default()
            }
        );
        // Calendar units stay calendar units.
        assert_eq!("P1M".parse::<Span>().unwrap(), Span::months(1));
        assert_eq!("P2Y3M".parse::<Span>().unwrap(), Span {
            years: 2,
            months: 3,
            ..Span::default()
        });
    }

    #[test]
    fn test_parse_hms() {
        assert_eq!(
            "1:30:00".parse::<Span>().unwrap(),
            Span {
                hours: 1,
                minutes: 30,
                ..Span::default()
            }
        );
        assert_eq!(
            "10:30".parse::<Span>().unwrap(),
            Span {
                minutes: 10,
                seconds: 30,
                ..Span::default()
            }
        );
    }

    #[test]
    fn test_parse_negative() {
        assert_eq!("-1d".parse::<Span>().unwrap(), Span::days(-1));
        assert_eq!("-P1M".parse::<Span>().unwrap(), Span::months(-1));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Span>(), Err(SpanParseError::Empty));
        assert!(matches!(
            "5 fortnights".parse::<Span>(),
            Err(SpanParseError::UnknownUnit(_))
        ));
        assert!("5".parse::<Span>().is_err());
        assert!("h5".parse::<Span>().is_err());
    }

    #[test]
    fn test_negated() {
        let span = Span {
            months: 1,
            days: -2,
            ..Span::default()
        };
        assert_eq!(span.negated().months, -1);
        assert_eq!(span.negated().days, 2);
        assert!(Span::default().is_zero());
    }

    #[test]
    fn test_totals() {
        let span = Span {
            years: 1,
            months: 2,
            weeks: 1,
            days: 3,
            hours: 1,
            minutes: 30,
            seconds: 15,
        };
        assert_eq!(span.total_months(), 14);
        assert_eq!(span.total_days(), 10);
        assert_eq!(span.total_seconds(), Some(5415));
    }
}
