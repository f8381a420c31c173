use chrono::{Duration, NaiveDate};

use super::{weekday_index, DAYS_PER_WEEK};
use crate::error::{Error, Result};

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub is_today: bool,
}

/// Hour-by-day table for one Sunday-first week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub days: [WeekDay; DAYS_PER_WEEK],
}

impl WeekGrid {
    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[DAYS_PER_WEEK - 1].date
    }

    pub fn hours(&self) -> impl Iterator<Item = u32> {
        0..HOURS_PER_DAY
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        (self.first_day()..=self.last_day()).contains(date)
    }
}

/// Week containing `anchor`, starting on the Sunday on or before it.
pub fn compute_week(anchor: NaiveDate, today: NaiveDate) -> Result<WeekGrid> {
    let out_of_range =
        || Error::invalid_date(&format!("week of {} is not representable", anchor));

    let start = anchor
        .checked_sub_signed(Duration::days(weekday_index(&anchor) as i64))
        .ok_or_else(out_of_range)?;

    let mut days = [WeekDay {
        date: start,
        is_today: start == today,
    }; DAYS_PER_WEEK];

    for (offset, day) in days.iter_mut().enumerate().skip(1) {
        let date = start
            .checked_add_signed(Duration::days(offset as i64))
            .ok_or_else(out_of_range)?;
        *day = WeekDay {
            date,
            is_today: date == today,
        };
    }

    Ok(WeekGrid { days })
}
