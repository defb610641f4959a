use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    IsoWeek, WeekError,
    range::RANGE_PATTERN,
    types::{WeekNumber, Year},
    week::weeks_in_year,
};

/// Result of aligning a week with the same week number one year earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYear {
    /// The aligned week in the previous ISO year
    pub week: IsoWeek,
    /// Set when the previous year had no matching week number and the last
    /// week of that year was used instead
    pub week_mismatch: bool,
}

impl IsoWeek {
    /// The same week number one ISO year earlier, clamped to that year's last
    /// week when it is shorter.
    ///
    /// # Errors
    /// `InvalidYear` for weeks of year 1.
    pub fn same_week_previous_year(&self) -> Result<YearOverYear, WeekError> {
        let year = self
            .year()
            .checked_sub(1)
            .ok_or(WeekError::InvalidYear(0))
            .and_then(Year::new)?;
        let available = weeks_in_year(year.get());

        if self.week() > available {
            tracing::debug!(
                week = %self,
                previous_year = year.get(),
                clamped_to = available,
                "previous year is shorter, clamping week"
            );
            let week = Self::from_parts(year, WeekNumber::new(available)?)?;
            return Ok(YearOverYear {
                week,
                week_mismatch: true,
            });
        }

        let week = Self::from_parts(year, self.week_typed())?;
        Ok(YearOverYear {
            week,
            week_mismatch: false,
        })
    }
}

/// True when `s` is a well-formed identifier for a week that exists.
pub fn is_valid_week_format(s: &str) -> bool {
    s.parse::<IsoWeek>().is_ok()
}

/// True when `s` matches the range grammar: a bare week, `YYYY-Www:Www`, or
/// `YYYY-Www:YYYY-Www`.
///
/// Only the shape is checked. Week numbers are not validated against their
/// year and the bounds are not checked for order.
pub fn is_valid_range_format(s: &str) -> bool {
    RANGE_PATTERN.is_match(s)
}

/// Orders two identifiers chronologically.
///
/// Identifiers are fixed-width and zero-padded, so byte order is
/// chronological order.
pub fn compare_weeks(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Identifier of the same week number one year before `week`.
///
/// # Errors
/// Parse errors for `week`; `InvalidYear` for weeks of year 1.
pub fn same_week_previous_year(week: &str) -> Result<YearOverYear, WeekError> {
    week.parse::<IsoWeek>()?.same_week_previous_year()
}
