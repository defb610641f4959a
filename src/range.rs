use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    IsoWeek, MAX_SEQUENCE_WEEKS, RANGE_SEPARATOR, WEEK_DESIGNATOR, WeekError,
    consts::MILLIS_PER_DAY,
    prelude::*,
};

/// A bare week, `YYYY-Www:Www`, or `YYYY-Www:YYYY-Www`
pub(crate) static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-W([0-9]{2})(?::(?:([0-9]{4})-)?W([0-9]{2}))?$")
        .expect("week range pattern compiles")
});

/// Inclusive span of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{from}..={to}")]
pub struct DateSpan {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateSpan {
    /// Checks if `date` falls on or between the two bounds
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of calendar days covered, counting both bounds
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// Midnight at the start of `from`
    pub fn start_of_day(&self) -> NaiveDateTime {
        self.from.and_time(NaiveTime::MIN)
    }

    /// Last millisecond of `to`, for inclusive timestamp filters
    pub fn end_of_day(&self) -> NaiveDateTime {
        last_instant(self.to)
    }
}

fn last_instant(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::milliseconds(MILLIS_PER_DAY - 1)
}

impl IsoWeek {
    /// Monday through Sunday of this week
    pub fn date_span(&self) -> DateSpan {
        DateSpan {
            from: self.monday(),
            to: self.sunday(),
        }
    }

    /// Thursday at 23:59:59.999, the instant used to decide which week a
    /// record belongs to.
    pub fn midpoint(&self) -> NaiveDateTime {
        last_instant(self.thursday())
    }
}

/// An inclusive run of consecutive ISO weeks.
/// The start week must not be after the end week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekRange {
    start: IsoWeek,
    end: IsoWeek,
}

impl WeekRange {
    /// Creates a new week range with validation.
    ///
    /// # Errors
    /// Returns `WeekError::InvalidRangeFormat` if `start` is after `end`.
    pub fn new(start: IsoWeek, end: IsoWeek) -> Result<Self, WeekError> {
        if start > end {
            return Err(WeekError::InvalidRangeFormat(format!(
                "range starts at {start} but ends earlier at {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one week
    pub const fn single(week: IsoWeek) -> Self {
        Self {
            start: week,
            end: week,
        }
    }

    pub const fn start(&self) -> IsoWeek {
        self.start
    }

    pub const fn end(&self) -> IsoWeek {
        self.end
    }

    /// Number of weeks in the range (at least one)
    pub fn len(&self) -> usize {
        usize::try_from(self.start.weeks_until(self.end)).map_or(1, |n| n + 1)
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, week: &IsoWeek) -> bool {
        self.start <= *week && *week <= self.end
    }

    /// Monday of the first week through Sunday of the last
    pub fn date_span(&self) -> DateSpan {
        DateSpan {
            from: self.start.monday(),
            to: self.end.sunday(),
        }
    }

    /// Every week in the range, in chronological order.
    ///
    /// # Errors
    /// `RangeTooLarge` when the range holds more than [`MAX_SEQUENCE_WEEKS`] weeks.
    pub fn weeks(&self) -> Result<Vec<IsoWeek>, WeekError> {
        IsoWeek::sequence(self.start, self.end, MAX_SEQUENCE_WEEKS)
    }
}

/// Shortest serialization of `start..=end`
struct RangeText<'a>(&'a IsoWeek, &'a IsoWeek);

impl fmt::Display for RangeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(start, end) = *self;
        if start == end {
            write!(f, "{start}")
        } else if start.year() == end.year() {
            write!(f, "{start}{RANGE_SEPARATOR}{WEEK_DESIGNATOR}{}", end.week_typed())
        } else {
            write!(f, "{start}{RANGE_SEPARATOR}{end}")
        }
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&RangeText(&self.start, &self.end), f)
    }
}

impl FromStr for WeekRange {
    type Err = WeekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RANGE_PATTERN
            .captures(s)
            .ok_or_else(|| WeekError::InvalidRangeFormat(s.to_owned()))?;

        // Captured groups are fixed-width ASCII digits
        let number = |i: usize| -> Result<u16, WeekError> {
            caps[i]
                .parse::<u16>()
                .map_err(|_| WeekError::InvalidRangeFormat(s.to_owned()))
        };
        let week_number = |i: usize| -> Result<u8, WeekError> {
            caps[i]
                .parse::<u8>()
                .map_err(|_| WeekError::InvalidRangeFormat(s.to_owned()))
        };

        let start = IsoWeek::new(number(1)?, week_number(2)?)?;
        if caps.get(4).is_none() {
            return Ok(Self::single(start));
        }

        let end_year = if caps.get(3).is_some() {
            number(3)?
        } else {
            start.year()
        };
        let end = IsoWeek::new(end_year, week_number(4)?)?;

        Self::new(start, end)
    }
}

impl From<IsoWeek> for WeekRange {
    fn from(week: IsoWeek) -> Self {
        Self::single(week)
    }
}

impl Serialize for WeekRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WeekRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Monday-to-Sunday dates of the week named by `identifier`.
///
/// # Errors
/// Any week identifier parse error.
pub fn week_to_date_range(identifier: &str) -> Result<DateSpan, WeekError> {
    identifier.parse::<IsoWeek>().map(|w| w.date_span())
}

/// Monday of the week named by `identifier`.
///
/// # Errors
/// Any week identifier parse error.
pub fn week_start(identifier: &str) -> Result<NaiveDate, WeekError> {
    identifier.parse::<IsoWeek>().map(|w| w.monday())
}

/// Sunday of the week named by `identifier`.
///
/// # Errors
/// Any week identifier parse error.
pub fn week_end(identifier: &str) -> Result<NaiveDate, WeekError> {
    identifier.parse::<IsoWeek>().map(|w| w.sunday())
}

/// Thursday 23:59:59.999 of the week named by `identifier`.
///
/// # Errors
/// Any week identifier parse error.
pub fn week_midpoint(identifier: &str) -> Result<NaiveDateTime, WeekError> {
    identifier.parse::<IsoWeek>().map(|w| w.midpoint())
}

/// Serializes a run of weeks to its shortest range string.
///
/// Only the first and last entries shape the output. `weeks` is expected in
/// ascending order without duplicates; other input is logged and serialized
/// as given.
///
/// # Errors
/// `EmptyInput` for an empty slice; parse errors for any entry.
pub fn build_range_string<S: AsRef<str>>(weeks: &[S]) -> Result<String, WeekError> {
    let parsed = weeks
        .iter()
        .map(|w| w.as_ref().parse::<IsoWeek>())
        .collect::<Result<Vec<_>, _>>()?;

    let (Some(first), Some(last)) = (parsed.first(), parsed.last()) else {
        return Err(WeekError::EmptyInput);
    };

    if !parsed.windows(2).all(|pair| pair[0] < pair[1]) {
        tracing::warn!(
            first = %first,
            last = %last,
            len = parsed.len(),
            "building range string from weeks that are not strictly ascending"
        );
    }

    Ok(RangeText(first, last).to_string())
}

/// Expands a range string (or a bare week identifier) to every identifier it
/// covers, in chronological order.
///
/// # Errors
/// `InvalidRangeFormat` for unrecognised input or a start after the end,
/// week parse errors for either bound, `RangeTooLarge` past the sequence cap.
pub fn parse_range_string(range: &str) -> Result<Vec<String>, WeekError> {
    let weeks = range.parse::<WeekRange>()?.weeks()?;
    Ok(weeks.iter().map(ToString::to_string).collect())
}
