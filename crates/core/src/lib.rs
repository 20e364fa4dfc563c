//! Datumorbit Core
//!
//! Uniform date operations over swappable date-arithmetic backends. Pick a
//! driver once, at composition time, and every consumer (comparison
//! helpers, month grids, your own widgets) stays backend-agnostic.
//!
//! # Quick Start
//!
//! ```
//! use datumorbit_core::{Datumorbit, FormatType, Part};
//!
//! let dob = Datumorbit::new();
//!
//! // Heterogeneous inputs normalize to one representation
//! let date = dob.normalize("1991-07-13").unwrap();
//! assert_eq!(date.day_key(), (1991, 7, 13));
//!
//! // Operations are total: invalid input yields None, never a panic
//! assert!(dob.normalize("not-a-date").is_none());
//!
//! // Named formats resolve to backend-native patterns
//! let pattern = dob.driver().format_string(FormatType::Display);
//! assert_eq!(dob.format(date, Some(pattern)).unwrap(), "07/13/1991");
//!
//! // Weekdays are Monday-based
//! assert_eq!(dob.get(date, Part::Weekdays), Some(5));
//! ```
//!
//! # Swapping Backends
//!
//! ```
//! use datumorbit_core::{Datumorbit, TimeDriver};
//!
//! let dob = Datumorbit::with_driver(Box::new(TimeDriver));
//! let pattern = "[month repr:long] [year]";
//! assert_eq!(dob.format("1991-07-13", Some(pattern)).unwrap(), "July 1991");
//! ```

pub mod compare;
pub mod driver;
pub mod drivers;
pub mod grid;
pub mod parts;
pub mod span;
pub mod types;

pub use driver::{DateDriver, DriverInfo};
pub use drivers::{ChronoDriver, TimeDriver};
pub use grid::{month_grid, MonthGrid, DAYS_IN_WEEK};
pub use parts::{FormatType, Part, UnknownNameError};
pub use span::{Span, SpanParseError};
pub use types::{DateFields, DateInput, DateValue};

/// Main entry point - a date toolkit composed with one driver.
///
/// Owns the driver chosen at construction; everything else delegates. This
/// replaces any notion of a process-wide "current driver": two instances
/// with different backends coexist without interfering.
pub struct Datumorbit {
    driver: Box<dyn DateDriver>,
}

impl Datumorbit {
    /// Create a toolkit with the default chrono backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_driver(Box::new(ChronoDriver))
    }

    /// Create a toolkit with an explicit driver.
    #[must_use]
    pub fn with_driver(driver: Box<dyn DateDriver>) -> Self {
        Self { driver }
    }

    /// The composed driver, for passing to free functions.
    #[must_use]
    pub fn driver(&self) -> &dyn DateDriver {
        self.driver.as_ref()
    }

    pub fn normalize(&self, input: impl Into<DateInput>) -> Option<DateValue> {
        self.driver.normalize(&input.into())
    }

    pub fn now(&self) -> DateValue {
        self.driver.now()
    }

    pub fn format(&self, input: impl Into<DateInput>, pattern: Option<&str>) -> Option<String> {
        self.driver.format(&input.into(), pattern)
    }

    pub fn start_of(&self, input: impl Into<DateInput>, part: Part) -> Option<DateValue> {
        self.driver.start_of(&input.into(), part)
    }

    pub fn end_of(&self, input: impl Into<DateInput>, part: Part) -> Option<DateValue> {
        self.driver.end_of(&input.into(), part)
    }

    pub fn set(&self, input: impl Into<DateInput>, fields: &DateFields) -> Option<DateValue> {
        self.driver.set(&input.into(), fields)
    }

    pub fn add(&self, input: impl Into<DateInput>, span: &Span) -> Option<DateValue> {
        self.driver.add(&input.into(), span)
    }

    pub fn subtract(&self, input: impl Into<DateInput>, span: &Span) -> Option<DateValue> {
        self.driver.subtract(&input.into(), span)
    }

    pub fn diff(
        &self,
        a: impl Into<DateInput>,
        b: impl Into<DateInput>,
        part: Part,
    ) -> Option<i64> {
        self.driver.diff(&a.into(), &b.into(), part)
    }

    pub fn get(&self, input: impl Into<DateInput>, part: Part) -> Option<i64> {
        self.driver.get(&input.into(), part)
    }

    pub fn days_in_month(&self, input: impl Into<DateInput>) -> Option<u8> {
        self.driver.days_in_month(&input.into())
    }

    pub fn weekday(&self, input: impl Into<DateInput>) -> Option<u8> {
        self.driver.weekday(&input.into())
    }

    /// The month grid containing the input date.
    pub fn month_grid(&self, input: impl Into<DateInput>) -> Option<MonthGrid> {
        grid::month_grid(self.driver(), &input.into())
    }
}

impl Default for Datumorbit {
    fn default() -> Self {
        Self::new()
    }
}

/// All built-in drivers, default first.
#[must_use]
pub fn builtin_drivers() -> Vec<Box<dyn DateDriver>> {
    vec![Box::new(ChronoDriver), Box::new(TimeDriver)]
}

/// Look up a driver by id or alias.
#[must_use]
pub fn driver_by_name(name: &str) -> Option<Box<dyn DateDriver>> {
    builtin_drivers()
        .into_iter()
        .find(|driver| driver.matches_name(name))
}

/// Ids of all built-in drivers.
#[must_use]
pub fn driver_ids() -> Vec<&'static str> {
    builtin_drivers().iter().map(|driver| driver.id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_lookup() {
        assert_eq!(driver_by_name("chrono").unwrap().id(), "chrono");
        assert_eq!(driver_by_name("t").unwrap().id(), "time");
        assert!(driver_by_name("moment").is_none());
        assert_eq!(driver_ids(), vec!["chrono", "time"]);
    }

    #[test]
    fn test_facade_delegates_to_composed_driver() {
        let chrono = Datumorbit::new();
        let time = Datumorbit::with_driver(Box::new(TimeDriver));

        let a = chrono.normalize("1991-07-13").unwrap();
        let b = time.normalize("1991-07-13").unwrap();
        assert_eq!(a, b);

        // Each instance keeps its own backend's pattern syntax.
        assert_eq!(
            chrono.format(a, Some("%m/%d/%Y")).unwrap(),
            time.format(b, Some("[month]/[day]/[year]")).unwrap()
        );
    }

    #[test]
    fn test_facade_now_formats() {
        let dob = Datumorbit::new();
        let now = dob.now();
        assert!(dob.format(now, None).is_some());
    }
}
