//! Day-level comparison helpers.
//!
//! These are the predicates range pickers lean on for blocking days and
//! validating selections. All of them treat invalid input as "not
//! comparable" and answer `false`, so callers never branch on errors.

use crate::driver::DateDriver;
use crate::parts::FormatType;
use crate::types::DateInput;

/// True when `a` and `b` fall on the same calendar day.
pub fn is_same_day(driver: &dyn DateDriver, a: &DateInput, b: &DateInput) -> bool {
    match (driver.normalize(a), driver.normalize(b)) {
        (Some(a), Some(b)) => a.day_key() == b.day_key(),
        _ => false,
    }
}

/// True when `a`'s calendar day is strictly before `b`'s.
pub fn is_before_day(driver: &dyn DateDriver, a: &DateInput, b: &DateInput) -> bool {
    match (driver.normalize(a), driver.normalize(b)) {
        (Some(a), Some(b)) => a.day_key() < b.day_key(),
        _ => false,
    }
}

/// True when `a`'s calendar day is strictly after `b`'s.
pub fn is_after_day(driver: &dyn DateDriver, a: &DateInput, b: &DateInput) -> bool {
    match (driver.normalize(a), driver.normalize(b)) {
        (Some(a), Some(b)) => a.day_key() > b.day_key(),
        _ => false,
    }
}

/// True when `a`'s calendar day is on or before `b`'s.
pub fn is_inclusively_before_day(driver: &dyn DateDriver, a: &DateInput, b: &DateInput) -> bool {
    match (driver.normalize(a), driver.normalize(b)) {
        (Some(a), Some(b)) => a.day_key() <= b.day_key(),
        _ => false,
    }
}

/// True when `a`'s calendar day is on or after `b`'s.
pub fn is_inclusively_after_day(driver: &dyn DateDriver, a: &DateInput, b: &DateInput) -> bool {
    match (driver.normalize(a), driver.normalize(b)) {
        (Some(a), Some(b)) => a.day_key() >= b.day_key(),
        _ => false,
    }
}

/// Render any date-like input with the driver's display format.
///
/// When the input is text that fails plain normalization and `from_pattern`
/// is given, the text is re-parsed with that pattern first. This keeps
/// already-localized strings stable: parsing `07/13/1991` with the display
/// pattern and re-rendering yields the same string.
pub fn to_localized_date_string(
    driver: &dyn DateDriver,
    input: &DateInput,
    from_pattern: Option<&str>,
) -> Option<String> {
    let display = driver.format_string(FormatType::Display);

    let value = match driver.normalize(input) {
        Some(value) => value,
        None => match (input, from_pattern) {
            (DateInput::Text(text), Some(pattern)) => driver.parse_pattern(text, pattern)?,
            _ => return None,
        },
    };

    driver.format(&value.into(), Some(display))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ChronoDriver;

    fn text(s: &str) -> DateInput {
        DateInput::from(s)
    }

    #[test]
    fn test_same_day_ignores_time_of_day() {
        let driver = ChronoDriver;
        assert!(is_same_day(
            &driver,
            &text("1991-07-13T09:30:00"),
            &text("1991-07-13T23:00:00")
        ));
        assert!(!is_same_day(
            &driver,
            &text("1991-07-13"),
            &text("1991-07-14")
        ));
    }

    #[test]
    fn test_invalid_input_is_never_comparable() {
        let driver = ChronoDriver;
        assert!(!is_same_day(&driver, &text("garbage"), &text("1991-07-13")));
        assert!(!is_before_day(&driver, &text("garbage"), &text("1991-07-13")));
        assert!(!is_inclusively_before_day(
            &driver,
            &text("1991-07-13"),
            &text("garbage")
        ));
        assert!(!is_inclusively_after_day(
            &driver,
            &text("garbage"),
            &text("garbage")
        ));
    }

    #[test]
    fn test_inclusive_bounds() {
        let driver = ChronoDriver;
        let day = text("1991-07-13");
        assert!(is_inclusively_before_day(&driver, &day, &day));
        assert!(is_inclusively_after_day(&driver, &day, &day));
        assert!(!is_before_day(&driver, &day, &day));
        assert!(!is_after_day(&driver, &day, &day));
    }

    #[test]
    fn test_ordering_across_months() {
        let driver = ChronoDriver;
        assert!(is_before_day(
            &driver,
            &text("1991-07-31"),
            &text("1991-08-01")
        ));
        assert!(is_after_day(
            &driver,
            &text("1992-01-01"),
            &text("1991-12-31")
        ));
    }

    #[test]
    fn test_localized_date_string() {
        let driver = ChronoDriver;
        assert_eq!(
            to_localized_date_string(&driver, &text("1991-07-13"), None).unwrap(),
            "07/13/1991"
        );
        // Already-localized strings stay the same.
        let display = driver.format_string(FormatType::Display);
        assert_eq!(
            to_localized_date_string(&driver, &text("07/13/1991"), Some(display)).unwrap(),
            "07/13/1991"
        );
        assert!(to_localized_date_string(&driver, &text("garbage"), None).is_none());
    }
}
