//! Built-in driver implementations.

mod chrono;
mod time;

pub use chrono::ChronoDriver;
pub use time::TimeDriver;
