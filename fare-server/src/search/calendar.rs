//! Weekday rules for weekend-family trips.
//!
//! | Mode        | Outbound       | Inbound      |
//! |-------------|----------------|--------------|
//! | Weekend     | Fri, Sat       | Sat, Sun     |
//! | LongWeekend | Thu, Fri, Sat  | Sun, Mon     |

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::WeekendMode;

/// Whether a trip in `mode` may leave on `date`.
pub fn is_valid_outbound_day(date: NaiveDate, mode: WeekendMode) -> bool {
    match mode {
        WeekendMode::Weekend => matches!(date.weekday(), Weekday::Fri | Weekday::Sat),
        WeekendMode::LongWeekend => {
            matches!(date.weekday(), Weekday::Thu | Weekday::Fri | Weekday::Sat)
        }
    }
}

/// Whether a trip in `mode` may come back on `date`.
pub fn is_valid_inbound_day(date: NaiveDate, mode: WeekendMode) -> bool {
    match mode {
        WeekendMode::Weekend => matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        WeekendMode::LongWeekend => matches!(date.weekday(), Weekday::Sun | Weekday::Mon),
    }
}

/// Whether an outbound/inbound pair of dates fits the weekday pattern.
///
/// `None` means the trip has no weekend constraint, which always passes.
pub fn is_valid_pair(outbound: NaiveDate, inbound: NaiveDate, mode: Option<WeekendMode>) -> bool {
    match mode {
        None => true,
        Some(mode) => is_valid_outbound_day(outbound, mode) && is_valid_inbound_day(inbound, mode),
    }
}
