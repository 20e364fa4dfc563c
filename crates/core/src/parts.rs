//! Date granularities and display format types.
//!
//! These enums parameterize the driver operations. Being exhaustive enums,
//! an "unrecognized part" cannot reach a driver at runtime; text input (CLI
//! flags, config) goes through [`std::str::FromStr`] instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A date granularity used to parameterize start/end, get and diff
/// operations.
///
/// Weekday indices are Monday-based throughout (0 = Monday, 6 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Part {
    Seconds,
    Minutes,
    Hours,
    /// Day-of-month granularity.
    Days,
    /// Monday-based week granularity: boundaries fall on Monday/Sunday,
    /// `get` extracts the weekday index, `diff` counts whole weeks.
    Weekdays,
    /// ISO week granularity: `get` extracts the ISO week number.
    Weeks,
    Months,
    Years,
}

impl Part {
    /// All parts, finest granularity first.
    pub const ALL: [Part; 8] = [
        Part::Seconds,
        Part::Minutes,
        Part::Hours,
        Part::Days,
        Part::Weekdays,
        Part::Weeks,
        Part::Months,
        Part::Years,
    ];

    /// Stable identifier, matching the serde representation.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Part::Seconds => "seconds",
            Part::Minutes => "minutes",
            Part::Hours => "hours",
            Part::Days => "days",
            Part::Weekdays => "weekdays",
            Part::Weeks => "weeks",
            Part::Months => "months",
            Part::Years => "years",
        }
    }
}

/// Error for text that names no known [`Part`] or [`FormatType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{input}`")]
pub struct UnknownNameError {
    pub kind: &'static str,
    pub input: String,
}

impl std::str::FromStr for Part {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" | "s" => Ok(Part::Seconds),
            "minute" | "minutes" | "min" => Ok(Part::Minutes),
            "hour" | "hours" | "h" => Ok(Part::Hours),
            "day" | "days" | "d" => Ok(Part::Days),
            "weekday" | "weekdays" => Ok(Part::Weekdays),
            "week" | "weeks" | "w" => Ok(Part::Weeks),
            "month" | "months" | "mo" => Ok(Part::Months),
            "year" | "years" | "y" => Ok(Part::Years),
            _ => Err(UnknownNameError {
                kind: "part",
                input: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A named display format a driver resolves to a backend-native pattern via
/// [`crate::DateDriver::format_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatType {
    /// Day-of-month number, e.g. `13`.
    Day,
    /// Month caption, e.g. `July 1991`.
    Month,
    /// Abbreviated weekday name, e.g. `Sat`.
    Weekday,
    /// Locale-medium date, e.g. `07/13/1991`. The default display format.
    Display,
    /// Long form for accessible labels, e.g. `Saturday, July 13, 1991`.
    AriaLabel,
}

impl FormatType {
    pub const ALL: [FormatType; 5] = [
        FormatType::Day,
        FormatType::Month,
        FormatType::Weekday,
        FormatType::Display,
        FormatType::AriaLabel,
    ];

    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            FormatType::Day => "day",
            FormatType::Month => "month",
            FormatType::Weekday => "weekday",
            FormatType::Display => "display",
            FormatType::AriaLabel => "aria-label",
        }
    }
}

impl std::str::FromStr for FormatType {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(FormatType::Day),
            "month" => Ok(FormatType::Month),
            "weekday" => Ok(FormatType::Weekday),
            "display" => Ok(FormatType::Display),
            "aria-label" | "aria" => Ok(FormatType::AriaLabel),
            _ => Err(UnknownNameError {
                kind: "format type",
                input: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
