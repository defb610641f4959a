//! ISO-8601 week identifiers (`YYYY-Www`), week ranges and year-over-year
//! alignment.
//!
//! Two layers sit side by side. The typed layer ([`IsoWeek`], [`WeekRange`],
//! [`DateSpan`]) validates on construction and orders chronologically. The
//! identifier layer is a set of free functions that take and return the
//! string forms, for callers that pass weeks around as query parameters.

mod clock;
mod compare;
mod consts;
mod navigation;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;
mod week;

pub use clock::{Clock, FixedClock, SystemClock};
pub use compare::{
    YearOverYear, compare_weeks, is_valid_range_format, is_valid_week_format,
    same_week_previous_year,
};
pub use consts::*;
pub use navigation::{
    Direction, WeekRangeOptions, next_week, previous_week, week_range, week_sequence,
    week_sequence_with_limit, weeks_between,
};
pub use range::{
    DateSpan, WeekRange, build_range_string, parse_range_string, week_end, week_midpoint,
    week_start, week_to_date_range,
};
pub use types::{WeekNumber, Year};
pub use week::{
    IsoWeek, current_week_identifier, date_to_week_identifier, format_week_identifier,
    parse_week_identifier, weeks_in_year,
};

/// Every way a week calculation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeekError {
    /// Input does not match `YYYY-Www`.
    #[error("Invalid week identifier format: {0} (expected YYYY-Www)")]
    InvalidFormat(String),

    /// Year outside `1..=MAX_YEAR`.
    #[error("Invalid year: {0} (must be 1-{max})", max = MAX_YEAR)]
    InvalidYear(u16),

    /// Week number outside `1..=53`.
    #[error("Invalid week number: {0} (must be {min}-{max})", min = MIN_WEEK, max = MAX_WEEK)]
    InvalidWeekNumber(u8),

    /// Week number exceeds the weeks present in that ISO year.
    #[error("Week {week} does not exist in {year}, which has {weeks_in_year} weeks")]
    WeekOutOfRange {
        year: u16,
        week: u8,
        weeks_in_year: u8,
    },

    /// Input is not a recognisable calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Argument outside its accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A week sequence would exceed its length cap.
    #[error("Week range {start}..{end} exceeds the limit of {limit} weeks")]
    RangeTooLarge {
        start: IsoWeek,
        end: IsoWeek,
        limit: usize,
    },

    /// An operation that needs at least one week received none.
    #[error("Empty week list")]
    EmptyInput,

    /// Input matches neither a week identifier nor a range grammar.
    #[error("Invalid week range format: {0}")]
    InvalidRangeFormat(String),
}
