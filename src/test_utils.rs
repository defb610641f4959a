//! Short constructors shared by the unit tests.

use chrono::NaiveDate;

use crate::IsoWeek;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn iso_week(year: u16, week: u8) -> IsoWeek {
    IsoWeek::new(year, week).expect("valid test week")
}

/// Owned identifiers, for comparing against functions that return `Vec<String>`
pub fn ids(weeks: &[&str]) -> Vec<String> {
    weeks.iter().map(|w| (*w).to_owned()).collect()
}
