use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    WeekError,
    clock::Clock,
    consts::{
        DATE_SEPARATOR, MONDAY_TO_SUNDAY, MONDAY_TO_THURSDAY, WEEK_DESIGNATOR, WEEKS_IN_LONG_YEAR,
        WEEKS_IN_SHORT_YEAR,
    },
    prelude::*,
    types::{WeekNumber, Year, is_leap_year},
};

/// `YYYY-Www`, ASCII digits only
static WEEK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-W([0-9]{2})$").expect("week identifier pattern compiles")
});

/// Day-of-week numbering used by the year-length rule (Sunday = 0)
const WEDNESDAY: i32 = 3;
const THURSDAY: i32 = 4;

/// One ISO-8601 week, identified as `YYYY-Www`.
///
/// The year is the ISO week-numbering year, which can differ from the
/// Gregorian year of the week's Monday or Sunday. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-W{week}")]
pub struct IsoWeek {
    year: Year,
    week: WeekNumber,
    monday: NaiveDate,
}

impl IsoWeek {
    /// Creates a week from raw components.
    ///
    /// # Errors
    /// `InvalidYear` outside `1..=9999`, `InvalidWeekNumber` outside `1..=53`,
    /// `WeekOutOfRange` when the year has fewer weeks than requested.
    pub fn new(year: u16, week: u8) -> Result<Self, WeekError> {
        Self::from_parts(Year::new(year)?, WeekNumber::new(week)?)
    }

    /// Creates a week from already validated components, checking only that
    /// the week exists in that particular year.
    ///
    /// # Errors
    /// Returns `WeekError::WeekOutOfRange` for week 53 of a 52-week year.
    pub fn from_parts(year: Year, week: WeekNumber) -> Result<Self, WeekError> {
        let out_of_range = || WeekError::WeekOutOfRange {
            year: year.get(),
            week: week.get(),
            weeks_in_year: weeks_in_year(year.get()),
        };

        if week.get() > weeks_in_year(year.get()) {
            return Err(out_of_range());
        }
        let monday = NaiveDate::from_isoywd_opt(year.as_i32(), u32::from(week.get()), Weekday::Mon)
            .ok_or_else(out_of_range)?;

        Ok(Self { year, week, monday })
    }

    /// The week containing `date`.
    ///
    /// # Errors
    /// Returns `WeekError::InvalidYear` when the date's ISO year is outside `1..=9999`.
    pub fn from_date<D: Datelike>(date: &D) -> Result<Self, WeekError> {
        let iso = date.iso_week();
        let year = Year::from_i32(iso.year())?;
        let week = u8::try_from(iso.week())
            .map_err(|_| WeekError::InvalidWeekNumber(u8::MAX))
            .and_then(WeekNumber::new)?;
        Self::from_parts(year, week)
    }

    /// The week containing `clock.today()`.
    ///
    /// # Errors
    /// Only fails if the clock reports a date outside years `1..=9999`.
    pub fn current(clock: &impl Clock) -> Result<Self, WeekError> {
        Self::from_date(&clock.today())
    }

    /// ISO week-numbering year
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Week number within the ISO year
    pub const fn week(&self) -> u8 {
        self.week.get()
    }

    /// ISO year as a validated [`Year`]
    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// Week number as a validated [`WeekNumber`]
    pub const fn week_typed(&self) -> WeekNumber {
        self.week
    }

    /// First day of the week
    pub const fn monday(&self) -> NaiveDate {
        self.monday
    }

    /// The day that decides which year owns the week
    pub fn thursday(&self) -> NaiveDate {
        self.monday + Duration::days(MONDAY_TO_THURSDAY)
    }

    /// Last day of the week
    pub fn sunday(&self) -> NaiveDate {
        self.monday + Duration::days(MONDAY_TO_SUNDAY)
    }

    /// Number of weeks in this week's ISO year
    pub const fn weeks_in_year(&self) -> u8 {
        weeks_in_year(self.year.get())
    }
}

impl FromStr for IsoWeek {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = WEEK_PATTERN
            .captures(s)
            .ok_or_else(|| WeekError::InvalidFormat(s.to_owned()))?;

        // Both groups are fixed-width ASCII digits, so these only fail on a pattern bug
        let year = caps[1]
            .parse::<u16>()
            .map_err(|_| WeekError::InvalidFormat(s.to_owned()))?;
        let week = caps[2]
            .parse::<u8>()
            .map_err(|_| WeekError::InvalidFormat(s.to_owned()))?;

        Self::new(year, week)
    }
}

impl TryFrom<NaiveDate> for IsoWeek {
    type Error = WeekError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_date(&date)
    }
}

impl Serialize for IsoWeek {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IsoWeek {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Weekday of December 31st of `year` (Sunday = 0), proleptic Gregorian.
const fn dec31_weekday(year: i32) -> i32 {
    (year + year.div_euclid(4) - year.div_euclid(100) + year.div_euclid(400)).rem_euclid(7)
}

/// Number of ISO weeks in `year`: 53 when January 1st is a Thursday, or when
/// a leap year starts on a Wednesday. Otherwise 52.
pub const fn weeks_in_year(year: u16) -> u8 {
    let jan1 = (dec31_weekday(year as i32 - 1) + 1) % 7;
    if jan1 == THURSDAY || (jan1 == WEDNESDAY && is_leap_year(year)) {
        WEEKS_IN_LONG_YEAR
    } else {
        WEEKS_IN_SHORT_YEAR
    }
}

/// Identifier of the week containing the clock's current date.
///
/// # Errors
/// See [`IsoWeek::current`].
pub fn current_week_identifier(clock: &impl Clock) -> Result<String, WeekError> {
    IsoWeek::current(clock).map(|w| w.to_string())
}

/// Formats `year` and `week` as `YYYY-Www` without validating either.
pub fn format_week_identifier(year: u16, week: u8) -> String {
    format!("{year:04}{DATE_SEPARATOR}{WEEK_DESIGNATOR}{week:02}")
}

/// Monday of the week named by `identifier`.
///
/// # Errors
/// `InvalidFormat`, `InvalidYear`, `InvalidWeekNumber` or `WeekOutOfRange`.
pub fn parse_week_identifier(identifier: &str) -> Result<NaiveDate, WeekError> {
    identifier.parse::<IsoWeek>().map(|w| w.monday())
}

/// Identifier of the week containing `input`, which may be `YYYY-MM-DD`, an
/// RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp.
/// Timestamps carrying an offset are classified by their date in that offset.
/// Surrounding whitespace is rejected, as it is for week and range identifiers.
///
/// # Errors
/// Returns `WeekError::InvalidDate` when the input is not a recognisable date.
pub fn date_to_week_identifier(input: &str) -> Result<String, WeekError> {
    let date = parse_calendar_date(input)?;
    IsoWeek::from_date(&date).map(|w| w.to_string())
}

fn parse_calendar_date(input: &str) -> Result<NaiveDate, WeekError> {
    // chrono lets numeric fields skip leading whitespace
    if input.trim() != input {
        return Err(WeekError::InvalidDate(input.to_owned()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(stamp.date_naive());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(stamp.date());
    }

    Err(WeekError::InvalidDate(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::test_utils::{date, iso_week};

    #[test]
    fn test_weeks_in_year_known_years() {
        struct TestCase {
            year: u16,
            weeks: u8,
        }

        let cases = [
            TestCase {
                year: 2004,
                weeks: 53,
            },
            TestCase {
                year: 2009,
                weeks: 53,
            },
            TestCase {
                year: 2015,
                weeks: 53,
            },
            TestCase {
                year: 2020,
                weeks: 53,
            },
            TestCase {
                year: 2021,
                weeks: 52,
            },
            TestCase {
                year: 2024,
                weeks: 52,
            },
            TestCase {
                year: 2025,
                weeks: 52,
            },
            TestCase {
                year: 2026,
                weeks: 53,
            },
            TestCase {
                year: 2032,
                weeks: 53,
            },
        ];

        for case in &cases {
            assert_eq!(weeks_in_year(case.year), case.weeks, "Year {}", case.year);
        }
    }

    #[test]
    fn test_weeks_in_year_agrees_with_december_28() {
        // December 28th always falls in the last ISO week of its year
        for year in 1600..=2400u16 {
            let last = date(i32::from(year), 12, 28).iso_week().week();
            assert_eq!(u32::from(weeks_in_year(year)), last, "Year {year}");
        }
    }

    #[test]
    fn test_format_week_identifier_pads() {
        assert_eq!(format_week_identifier(2026, 5), "2026-W05");
        assert_eq!(format_week_identifier(2020, 53), "2020-W53");
        assert_eq!(format_week_identifier(999, 1), "0999-W01");
        // No validation at this layer
        assert_eq!(format_week_identifier(2021, 60), "2021-W60");
    }

    #[test]
    fn test_parse_week_identifier_returns_monday() {
        assert_eq!(parse_week_identifier("2026-W05").unwrap(), date(2026, 1, 26));
        assert_eq!(parse_week_identifier("2026-W01").unwrap(), date(2025, 12, 29));
        assert_eq!(parse_week_identifier("2020-W53").unwrap(), date(2020, 12, 28));
        assert_eq!(parse_week_identifier("2025-W01").unwrap(), date(2024, 12, 30));
    }

    #[test]
    fn test_parse_week_identifier_errors() {
        struct TestCase {
            input: &'static str,
            description: &'static str,
        }

        let bad_format = [
            TestCase {
                input: "26-W5",
                description: "short year and week",
            },
            TestCase {
                input: "2026-W5",
                description: "unpadded week",
            },
            TestCase {
                input: "2026W05",
                description: "missing separator",
            },
            TestCase {
                input: "2026-w05",
                description: "lowercase designator",
            },
            TestCase {
                input: " 2026-W05",
                description: "leading whitespace",
            },
            TestCase {
                input: "2026-W05:W06",
                description: "range string",
            },
            TestCase {
                input: "",
                description: "empty",
            },
            TestCase {
                input: "２０２６-W05",
                description: "non-ASCII digits",
            },
        ];
        for case in &bad_format {
            assert!(
                matches!(parse_week_identifier(case.input), Err(WeekError::InvalidFormat(_))),
                "Expected InvalidFormat for: {}",
                case.description
            );
        }

        assert!(matches!(
            parse_week_identifier("2026-W00"),
            Err(WeekError::InvalidWeekNumber(0))
        ));
        assert!(matches!(
            parse_week_identifier("2026-W54"),
            Err(WeekError::InvalidWeekNumber(54))
        ));
        assert!(matches!(
            parse_week_identifier("2025-W53"),
            Err(WeekError::WeekOutOfRange { year: 2025, week: 53, weeks_in_year: 52 })
        ));
        assert!(matches!(parse_week_identifier("0000-W10"), Err(WeekError::InvalidYear(0))));
    }

    #[test]
    fn test_date_to_week_identifier_year_boundaries() {
        struct TestCase {
            input: &'static str,
            expected: &'static str,
        }

        let cases = [
            // Friday: belongs to the last week of the previous ISO year
            TestCase {
                input: "2021-01-01",
                expected: "2020-W53",
            },
            TestCase {
                input: "2021-01-03",
                expected: "2020-W53",
            },
            TestCase {
                input: "2021-01-04",
                expected: "2021-W01",
            },
            // Tuesday in December already belongs to next ISO year
            TestCase {
                input: "2024-12-31",
                expected: "2025-W01",
            },
            TestCase {
                input: "2024-12-29",
                expected: "2024-W52",
            },
            TestCase {
                input: "2026-01-01",
                expected: "2026-W01",
            },
            TestCase {
                input: "2026-12-31",
                expected: "2026-W53",
            },
            TestCase {
                input: "2027-01-03",
                expected: "2026-W53",
            },
            TestCase {
                input: "2026-10-16",
                expected: "2026-W42",
            },
        ];

        for case in &cases {
            assert_eq!(
                date_to_week_identifier(case.input).unwrap(),
                case.expected,
                "Input {}",
                case.input
            );
        }
    }

    #[test]
    fn test_date_to_week_identifier_accepts_timestamps() {
        assert_eq!(date_to_week_identifier("2026-01-26T10:15:00Z").unwrap(), "2026-W05");
        assert_eq!(date_to_week_identifier("2026-01-26T10:15:00.250").unwrap(), "2026-W05");
        assert_eq!(date_to_week_identifier("2026-01-26T10:15:00").unwrap(), "2026-W05");
        // Sunday late evening in UTC-05:00 is still Sunday there
        assert_eq!(date_to_week_identifier("2026-02-01T23:30:00-05:00").unwrap(), "2026-W05");
    }

    #[test]
    fn test_date_to_week_identifier_invalid() {
        for input in [
            "",
            "not a date",
            "2026-02-30",
            "2026-13-01",
            "16/10/2026",
            " 2026-01-26",
            "2026-01-26 ",
            "\t2026-01-26T10:15:00Z",
        ] {
            assert!(
                matches!(date_to_week_identifier(input), Err(WeekError::InvalidDate(_))),
                "Expected InvalidDate for {input:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_identifier_through_monday() {
        let identifiers = [
            "2020-W53", "2021-W01", "2025-W52", "2026-W05", "2026-W53", "0001-W01", "9999-W52",
        ];
        for identifier in identifiers {
            let monday = parse_week_identifier(identifier).unwrap();
            assert_eq!(monday.weekday(), Weekday::Mon);
            assert_eq!(IsoWeek::from_date(&monday).unwrap().to_string(), identifier);
        }
    }

    #[test]
    fn test_round_trip_every_day_of_2025_and_2026() {
        let mut day = date(2025, 1, 1);
        while day <= date(2026, 12, 31) {
            let identifier = date_to_week_identifier(&day.to_string()).unwrap();
            let monday = parse_week_identifier(&identifier).unwrap();
            let offset = (day - monday).num_days();
            assert!((0..7).contains(&offset), "{day} is {offset} days after {monday}");
            assert_eq!(IsoWeek::from_date(&monday).unwrap().to_string(), identifier);
            day += Duration::days(1);
        }
    }

    #[test]
    fn test_current_week_identifier_uses_clock() {
        let clock = FixedClock(date(2026, 10, 16));
        assert_eq!(current_week_identifier(&clock).unwrap(), "2026-W42");

        let clock = FixedClock(date(2021, 1, 1));
        assert_eq!(current_week_identifier(&clock).unwrap(), "2020-W53");
    }

    #[test]
    fn test_week_days() {
        let w = iso_week(2026, 5);
        assert_eq!(w.monday(), date(2026, 1, 26));
        assert_eq!(w.thursday(), date(2026, 1, 29));
        assert_eq!(w.sunday(), date(2026, 2, 1));
        assert_eq!(w.weeks_in_year(), 53);
        assert_eq!(w.year(), 2026);
        assert_eq!(w.week(), 5);
        assert_eq!(w.year_typed(), Year::new(2026).unwrap());
        assert_eq!(w.week_typed(), WeekNumber::new(5).unwrap());
    }

    #[test]
    fn test_try_from_naive_date() {
        assert_eq!(IsoWeek::try_from(date(2021, 1, 1)).unwrap(), iso_week(2020, 53));
        assert_eq!(IsoWeek::try_from(date(2026, 1, 26)).unwrap(), iso_week(2026, 5));
        assert!(matches!(IsoWeek::try_from(date(0, 6, 1)), Err(WeekError::InvalidYear(0))));
    }

    #[test]
    fn test_from_date_rejects_year_outside_range() {
        let too_early = date(0, 6, 1);
        assert!(matches!(IsoWeek::from_date(&too_early), Err(WeekError::InvalidYear(0))));
        let too_late = date(10_000, 6, 1);
        assert!(matches!(IsoWeek::from_date(&too_late), Err(WeekError::InvalidYear(10_000))));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(iso_week(2020, 53) < iso_week(2021, 1));
        assert!(iso_week(2026, 5) < iso_week(2026, 10));
        assert!(iso_week(2025, 52) > iso_week(2025, 1));
    }

    #[test]
    fn test_serde_string_format() {
        let week = iso_week(2026, 5);
        let json = serde_json::to_string(&week).unwrap();
        assert_eq!(json, r#""2026-W05""#);
        let parsed: IsoWeek = serde_json::from_str(&json).unwrap();
        assert_eq!(week, parsed);

        assert!(serde_json::from_str::<IsoWeek>(r#""2025-W53""#).is_err());
        assert!(serde_json::from_str::<IsoWeek>(r#""2025-05""#).is_err());
    }
}
