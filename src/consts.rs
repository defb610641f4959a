/// Maximum valid ISO week-numbering year (inclusive)
///
/// Identifiers carry exactly four year digits, so anything past this
/// would break fixed-width ordering.
pub const MAX_YEAR: u16 = 9999;

/// Lowest week number in any ISO year
pub const MIN_WEEK: u8 = 1;

/// Highest week number an ISO year can have
pub const MAX_WEEK: u8 = 53;

/// Week count of an ordinary ISO year
pub const WEEKS_IN_SHORT_YEAR: u8 = 52;

/// Week count of a week-53 ISO year
pub const WEEKS_IN_LONG_YEAR: u8 = MAX_WEEK;

/// Days in one ISO week, Monday through Sunday
pub const DAYS_PER_WEEK: i64 = 7;

/// Offset from Monday to Thursday, the day that decides a week's year
pub(crate) const MONDAY_TO_THURSDAY: i64 = 3;

/// Offset from Monday to Sunday
pub(crate) const MONDAY_TO_SUNDAY: i64 = 6;

/// Milliseconds in a calendar day
pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

/// Upper bound on the number of weeks a single sequence may expand to.
/// Roughly four years; larger spans fail with `RangeTooLarge`.
pub const MAX_SEQUENCE_WEEKS: usize = 200;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator between year and week (`2026-W05`)
pub const DATE_SEPARATOR: char = '-';
/// Marker preceding the week number
pub const WEEK_DESIGNATOR: char = 'W';
/// Separator between the two bounds of a week range (`2026-W01:W05`)
pub const RANGE_SEPARATOR: char = ':';
