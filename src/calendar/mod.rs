pub mod agenda;
pub mod grid;
pub mod week;

pub use agenda::{Agenda, Event, EventId, EventRange};
pub use grid::{compute_grid, DayCell, MonthGrid};
pub use week::{compute_week, WeekDay, WeekGrid, HOURS_PER_DAY};

use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;

use crate::error::{Error, Result};

pub const DAYS_PER_WEEK: usize = 7;

/// Weekday labels in grid column order, Sunday first.
pub const WEEKDAYS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Column of `date` in a Sunday-first grid.
pub fn weekday_index(date: &NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn first_of_month(month: &Month, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).ok_or_else(|| {
        Error::invalid_date(&format!("{} {} is not representable", month.name(), year))
    })
}

pub fn days_of_month(month: &Month, year: i32) -> Result<u32> {
    let first = first_of_month(month, year)?;

    // December never needs a lookup into the following year, which may not
    // be representable.
    match month.succ() {
        Month::January => Ok(31),
        next => NaiveDate::from_ymd_opt(year, next.number_from_month(), 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .ok_or_else(|| Error::invalid_date(&format!("no month after {}", first))),
    }
}

/// A (year, month) pair with the month always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    /// Builds an index from a zero-based month that may lie outside `0..12`,
    /// carrying into or borrowing from the year.
    pub fn normalize(year: i64, month0: i64) -> Result<Self> {
        let total = year
            .checked_mul(12)
            .and_then(|months| months.checked_add(month0))
            .ok_or_else(|| {
                Error::invalid_date(&format!("year {} month {} overflows", year, month0))
            })?;

        let year = i32::try_from(total.div_euclid(12))
            .map_err(|_| Error::invalid_date(&format!("year {} out of range", year)))?;
        let index = Month::from_i64(total.rem_euclid(12) + 1)
            .ok_or_else(|| Error::invalid_date(&format!("month {} out of range", month0)))?;

        let idx = MonthIndex { index, year };
        idx.first_day()?;

        Ok(idx)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn month0(&self) -> u32 {
        self.index.number_from_month() - 1
    }

    pub fn name(&self) -> &'static str {
        self.index.name()
    }

    pub fn first_day(&self) -> Result<NaiveDate> {
        first_of_month(&self.index, self.year)
    }

    pub fn num_days(&self) -> Result<u32> {
        days_of_month(&self.index, self.year)
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year && date.month() == self.index.number_from_month()
    }

    pub fn add(&self, months: i64) -> Result<Self> {
        MonthIndex::normalize(self.year as i64, self.month0() as i64 + months)
    }

    pub fn succ(&self) -> Result<Self> {
        self.add(1)
    }

    pub fn pred(&self) -> Result<Self> {
        self.add(-1)
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex::new(
            Month::from_u32(m.month()).unwrap_or(Month::January),
            m.year(),
        )
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.month0().cmp(&other.month0()))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}
