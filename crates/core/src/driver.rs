//! Driver trait definition.

use crate::parts::{FormatType, Part};
use crate::span::Span;
use crate::types::{DateFields, DateInput, DateValue};

/// Metadata about a driver for help/documentation.
#[derive(Debug, Clone)]
pub struct DriverInfo {
    /// Unique identifier (e.g., "chrono")
    pub id: &'static str,
    /// Human-readable name (e.g., "Chrono")
    pub name: &'static str,
    /// The date-arithmetic crate backing the driver
    pub backend: &'static str,
    /// Short description
    pub description: &'static str,
}

/// Uniform date operations over a specific date-arithmetic backend.
///
/// Everything above the driver (comparison helpers, grid computation, the
/// CLI) calls this trait and never the backing crate, so backends can be
/// swapped at composition time without touching call sites.
///
/// All operations are total: invalid date input yields `None` rather than a
/// panic or an error type, so callers degrade gracefully (skip a label,
/// leave a cell empty) instead of handling failures.
pub trait DateDriver: Send + Sync {
    /// Unique identifier for this driver (e.g., "chrono", "time").
    fn id(&self) -> &'static str;

    /// Human-readable name (e.g., "Chrono").
    fn name(&self) -> &'static str;

    /// Get driver metadata for help/documentation.
    fn info(&self) -> DriverInfo {
        DriverInfo {
            id: self.id(),
            name: self.name(),
            backend: "",
            description: "",
        }
    }

    /// Short aliases for this driver (e.g., "c" for "chrono").
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Check if the given name matches this driver's id or any alias.
    fn matches_name(&self, name: &str) -> bool {
        self.id() == name || self.aliases().contains(&name)
    }

    /// Normalize a date-like input into the internal representation.
    ///
    /// Idempotent: normalizing an already-normalized value returns it
    /// unchanged.
    fn normalize(&self, input: &DateInput) -> Option<DateValue>;

    /// Parse text with a backend-native pattern (e.g. a date previously
    /// rendered via [`Self::format_string`]).
    fn parse_pattern(&self, text: &str, pattern: &str) -> Option<DateValue>;

    /// The current date/time, UTC.
    fn now(&self) -> DateValue;

    /// Render a date-like input with a backend-native pattern. `None`
    /// pattern means the default serialized form (full ISO 8601).
    fn format(&self, input: &DateInput, pattern: Option<&str>) -> Option<String>;

    /// Truncate to the start boundary of the given part.
    fn start_of(&self, input: &DateInput, part: Part) -> Option<DateValue>;

    /// Extend to the end boundary of the given part (inclusive, at
    /// millisecond precision).
    fn end_of(&self, input: &DateInput, part: Part) -> Option<DateValue>;

    /// Overwrite named fields. A weekday field moves the value within its
    /// Monday-based week; out-of-range fields yield `None`.
    fn set(&self, input: &DateInput, fields: &DateFields) -> Option<DateValue>;

    /// Shift by a calendar span, largest unit first. Month and year
    /// arithmetic clamps the day to the target month's length.
    fn add(&self, input: &DateInput, span: &Span) -> Option<DateValue>;

    /// Shift backwards by a calendar span.
    fn subtract(&self, input: &DateInput, span: &Span) -> Option<DateValue> {
        self.add(input, &span.negated())
    }

    /// Signed whole-unit difference `a - b` expressed in the part's unit.
    fn diff(&self, a: &DateInput, b: &DateInput, part: Part) -> Option<i64>;

    /// Extract the numeric component for the given part.
    fn get(&self, input: &DateInput, part: Part) -> Option<i64>;

    /// Number of days in the input's month.
    fn days_in_month(&self, input: &DateInput) -> Option<u8>;

    /// Monday-based index of the first day of the week (0 = Monday).
    fn first_day_of_week(&self) -> u8 {
        0
    }

    /// The backend-native pattern string for a named display format.
    fn format_string(&self, format_type: FormatType) -> &'static str;

    /// Monday-based weekday index, 0-6. Equals `get(input, Part::Weekdays)`.
    fn weekday(&self, input: &DateInput) -> Option<u8> {
        self.get(input, Part::Weekdays).map(|w| w as u8)
    }
}
