use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{DAYS_PER_WEEK, IsoWeek, MAX_SEQUENCE_WEEKS, WeekError, clock::Clock};

/// Which way [`week_range`] walks from its starting week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards earlier weeks
    #[default]
    Backward,
    /// Towards later weeks
    Forward,
}

impl Direction {
    const fn step(self) -> i64 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }
}

/// Options for [`week_range`], with builder chaining.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekRangeOptions {
    /// First identifier of the result; the current week when `None`
    pub start_week: Option<String>,
    pub direction: Direction,
}

impl WeekRangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(mut self, week: impl Into<String>) -> Self {
        self.start_week = Some(week.into());
        self
    }

    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl IsoWeek {
    /// Moves `weeks` weeks forward (or backward when negative).
    ///
    /// # Errors
    /// `InvalidYear` when the result leaves years `1..=9999`.
    pub fn checked_add_weeks(self, weeks: i64) -> Result<Self, WeekError> {
        let monday = weeks
            .checked_mul(DAYS_PER_WEEK)
            .and_then(Duration::try_days)
            .and_then(|delta| self.monday().checked_add_signed(delta))
            .ok_or_else(|| {
                WeekError::InvalidArgument(format!("cannot move {weeks} weeks from {self}"))
            })?;
        Self::from_date(&monday)
    }

    /// The following week.
    ///
    /// # Errors
    /// `InvalidYear` after the last week of year 9999.
    pub fn next(self) -> Result<Self, WeekError> {
        self.checked_add_weeks(1)
    }

    /// The preceding week.
    ///
    /// # Errors
    /// `InvalidYear` before the first week of year 1.
    pub fn previous(self) -> Result<Self, WeekError> {
        self.checked_add_weeks(-1)
    }

    /// Signed number of whole weeks from `self` to `other`.
    pub fn weeks_until(self, other: Self) -> i64 {
        (other.monday() - self.monday()).num_weeks()
    }

    /// Every week from `start` to `end` inclusive, in chronological order.
    /// Empty when `end` precedes `start`.
    ///
    /// # Errors
    /// `RangeTooLarge` when the span holds more than `limit` weeks.
    pub fn sequence(start: Self, end: Self, limit: usize) -> Result<Vec<Self>, WeekError> {
        if end < start {
            return Ok(Vec::new());
        }

        let span = usize::try_from(start.weeks_until(end))
            .ok()
            .and_then(|n| n.checked_add(1))
            .unwrap_or(usize::MAX);
        if span > limit {
            tracing::warn!(
                %start,
                %end,
                span,
                limit,
                "refusing to expand oversized week range"
            );
            return Err(WeekError::RangeTooLarge { start, end, limit });
        }

        let mut weeks = Vec::with_capacity(span);
        let mut current = start;
        loop {
            weeks.push(current);
            if current == end {
                break;
            }
            current = current.next()?;
        }

        tracing::trace!(%start, %end, len = weeks.len(), "expanded week sequence");
        Ok(weeks)
    }
}

/// Identifier of the week before `identifier`.
///
/// # Errors
/// Parse errors for `identifier`; `InvalidYear` before year 1.
pub fn previous_week(identifier: &str) -> Result<String, WeekError> {
    identifier.parse::<IsoWeek>()?.previous().map(|w| w.to_string())
}

/// Identifier of the week after `identifier`.
///
/// # Errors
/// Parse errors for `identifier`; `InvalidYear` after year 9999.
pub fn next_week(identifier: &str) -> Result<String, WeekError> {
    identifier.parse::<IsoWeek>()?.next().map(|w| w.to_string())
}

/// `count` consecutive identifiers starting at `options.start_week` (or the
/// clock's current week) and walking in `options.direction`.
///
/// The result is in traversal order: a backward walk lists the newest week
/// first.
///
/// # Errors
/// `InvalidArgument` for a negative count, parse errors for the start week,
/// `InvalidYear` if the walk leaves years `1..=9999`, which also bounds how
/// far a large `count` can get.
pub fn week_range(
    count: i32,
    options: &WeekRangeOptions,
    clock: &impl Clock,
) -> Result<Vec<String>, WeekError> {
    let count = usize::try_from(count).map_err(|_| {
        WeekError::InvalidArgument(format!("week count must not be negative, got {count}"))
    })?;

    let mut current = match &options.start_week {
        Some(identifier) => identifier.parse::<IsoWeek>()?,
        None => IsoWeek::current(clock)?,
    };

    let mut weeks = Vec::with_capacity(count.min(MAX_SEQUENCE_WEEKS));
    for i in 0..count {
        weeks.push(current.to_string());
        if i + 1 < count {
            current = current.checked_add_weeks(options.direction.step())?;
        }
    }
    Ok(weeks)
}

/// Every identifier from `start` to `end` inclusive, capped at
/// [`MAX_SEQUENCE_WEEKS`]. Empty when `end` precedes `start`.
///
/// # Errors
/// Parse errors for either bound; `RangeTooLarge` past the cap.
pub fn week_sequence(start: &str, end: &str) -> Result<Vec<String>, WeekError> {
    week_sequence_with_limit(start, end, MAX_SEQUENCE_WEEKS)
}

/// [`week_sequence`] with an explicit cap on the number of weeks.
///
/// # Errors
/// Parse errors for either bound; `RangeTooLarge` past `limit`.
pub fn week_sequence_with_limit(
    start: &str,
    end: &str,
    limit: usize,
) -> Result<Vec<String>, WeekError> {
    let start = start.parse::<IsoWeek>()?;
    let end = end.parse::<IsoWeek>()?;
    IsoWeek::sequence(start, end, limit)
        .map(|weeks| weeks.iter().map(ToString::to_string).collect())
}

/// Signed number of weeks from `start` to `end`; negative when `end` is earlier.
///
/// # Errors
/// Parse errors for either identifier.
pub fn weeks_between(start: &str, end: &str) -> Result<i64, WeekError> {
    Ok(start.parse::<IsoWeek>()?.weeks_until(end.parse::<IsoWeek>()?))
}
