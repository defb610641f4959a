use crate::WeekError;
use crate::consts::{CENTURY_CYCLE, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_WEEK, MAX_YEAR, MIN_WEEK};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// An ISO week-numbering year guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `WeekError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, WeekError> {
        let non_zero = NonZeroU16::new(value).ok_or(WeekError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(WeekError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Creates a Year from chrono's signed year representation
    ///
    /// # Errors
    /// Returns `WeekError::InvalidYear` if the value falls outside `1..=MAX_YEAR`.
    pub fn from_i32(value: i32) -> Result<Self, WeekError> {
        // Anything that does not fit a u16 is reported saturated
        let narrowed = u16::try_from(value).map_err(|_| {
            WeekError::InvalidYear(if value < 0 { 0 } else { u16::MAX })
        })?;
        Self::new(narrowed)
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Returns the year in the form chrono expects
    #[inline]
    pub fn as_i32(self) -> i32 {
        i32::from(self.0.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = WeekError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0.get())
    }
}

/// A week number guaranteed to be in the range `MIN_WEEK..=MAX_WEEK` (1..=53)
///
/// This only bounds the number itself. Whether week 53 exists in a given
/// year is checked when the number is paired with a year in [`crate::IsoWeek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekNumber(NonZeroU8);

impl WeekNumber {
    /// Creates a new WeekNumber, validating that it's within `MIN_WEEK..=MAX_WEEK`
    ///
    /// # Errors
    /// Returns `WeekError::InvalidWeekNumber` if the value is 0 or > `MAX_WEEK`.
    pub fn new(value: u8) -> Result<Self, WeekError> {
        if value < MIN_WEEK || value > MAX_WEEK {
            return Err(WeekError::InvalidWeekNumber(value));
        }
        let non_zero = NonZeroU8::new(value).ok_or(WeekError::InvalidWeekNumber(value))?;
        Ok(Self(non_zero))
    }

    /// Returns the week number as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for WeekNumber {
    type Error = WeekError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekNumber> for u8 {
    fn from(week: WeekNumber) -> Self {
        week.0.get()
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}
