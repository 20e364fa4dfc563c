//! Month grid computation.
//!
//! The data behind a calendar month view: a caption plus full weeks of days
//! covering the month, padded with adjacent-month days so every row starts
//! on the driver's first day of week. Pure data, no rendering.

use crate::driver::DateDriver;
use crate::parts::{FormatType, Part};
use crate::span::Span;
use crate::types::{DateInput, DateValue};

pub const DAYS_IN_WEEK: usize = 7;

/// One calendar month laid out week by week.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    /// Caption rendered with the driver's month format, e.g. `July 1991`.
    pub caption: String,
    pub year: i32,
    /// Month number, 1-12.
    pub month: u8,
    /// Full weeks covering the month; every row has [`DAYS_IN_WEEK`] days at
    /// midnight, rows may begin or end with adjacent-month days.
    pub weeks: Vec<Vec<DateValue>>,
}

impl MonthGrid {
    /// True when the day belongs to the grid's own month.
    #[must_use]
    pub fn is_own_month(&self, day: &DateValue) -> bool {
        day.year() == self.year && day.month() == self.month
    }
}

/// Compute the grid for the month containing `input`, `None` for invalid
/// input.
pub fn month_grid(driver: &dyn DateDriver, input: &DateInput) -> Option<MonthGrid> {
    let first = driver.start_of(input, Part::Months)?;
    let last = driver.end_of(&first.into(), Part::Months)?;
    let caption = driver.format(
        &first.into(),
        Some(driver.format_string(FormatType::Month)),
    )?;

    // Walk from the week containing the 1st, one full row at a time, until
    // a row starts past the month's end.
    let mut cursor = driver.start_of(&first.into(), Part::Weekdays)?;
    let mut weeks = Vec::new();

    while cursor <= last {
        let mut week = Vec::with_capacity(DAYS_IN_WEEK);
        for offset in 0..DAYS_IN_WEEK {
            let day = driver.add(&cursor.into(), &Span::days(offset as i64))?;
            week.push(day);
        }
        weeks.push(week);
        cursor = driver.add(&cursor.into(), &Span::weeks(1))?;
    }

    Some(MonthGrid {
        caption,
        year: first.year(),
        month: first.month(),
        weeks,
    })
}
