//! Terminal output rendering.

use colored::Colorize;
use datumorbit_core::MonthGrid;
use serde::Serialize;

/// Everything `dorb` reports about a single date.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub driver: String,
    pub iso: String,
    pub display: String,
    pub aria_label: String,
    pub weekday: u8,
    pub weekday_name: String,
    pub month_caption: String,
    pub days_in_month: u8,
    pub parts: Parts,
}

/// Numeric components, one per date granularity.
#[derive(Debug, Serialize)]
pub struct Parts {
    pub seconds: i64,
    pub minutes: i64,
    pub hours: i64,
    pub days: i64,
    pub weekdays: i64,
    pub weeks: i64,
    pub months: i64,
    pub years: i64,
}

pub fn print_summary(summary: &Summary) {
    println!("{}", summary.iso.bold());
    row("driver", &summary.driver);
    row("display", &summary.display);
    row("aria label", &summary.aria_label);
    row(
        "weekday",
        &format!("{} ({})", summary.weekday_name, summary.weekday),
    );
    row("iso week", &summary.parts.weeks.to_string());
    row(
        "month",
        &format!(
            "{} ({} days)",
            summary.month_caption, summary.days_in_month
        ),
    );
}

fn row(label: &str, value: &str) {
    // Pad before styling: ANSI escapes would break the column width.
    println!("  {} {}", format!("{:<11}", label).dimmed(), value);
}

/// Render a month as a Monday-first calendar block. `highlight` marks one
/// day (normally the one being inspected); adjacent-month padding days are
/// dimmed.
pub fn print_calendar(grid: &MonthGrid, highlight: Option<(i32, u8, u8)>) {
    const HEADER: &str = "Mo Tu We Th Fr Sa Su";

    let pad = HEADER.len().saturating_sub(grid.caption.len()) / 2;
    println!("{}{}", " ".repeat(pad), grid.caption.bold());
    println!("{}", HEADER.dimmed());

    for week in &grid.weeks {
        let mut line = String::new();
        for day in week {
            let cell = format!("{:>2}", day.day());
            let styled = if highlight == Some(day.day_key()) {
                cell.reversed().bold().to_string()
            } else if grid.is_own_month(day) {
                cell
            } else {
                cell.dimmed().to_string()
            };
            line.push_str(&styled);
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }
}
