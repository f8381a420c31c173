use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::slice::Chunks;

use super::{weekday_index, MonthIndex, DAYS_PER_WEEK};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day_number: u32,
    pub is_current_month: bool,
    pub is_today: bool,
}

impl DayCell {
    fn active(day_number: u32, is_today: bool) -> Self {
        DayCell {
            day_number,
            is_current_month: true,
            is_today,
        }
    }

    fn inactive(day_number: u32) -> Self {
        DayCell {
            day_number,
            is_current_month: false,
            is_today: false,
        }
    }
}

/// All cells needed to draw one month as a 7-column grid, including the
/// padding days borrowed from the neighbouring months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// Zero-based, `0..=11`.
    pub month: u32,
    pub cells: Vec<DayCell>,
    pub label: String,
}

impl MonthGrid {
    pub fn index(&self) -> MonthIndex {
        MonthIndex::new(
            Month::from_u32(self.month + 1).unwrap_or(Month::January),
            self.year,
        )
    }

    pub fn weeks(&self) -> Chunks<'_, DayCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn num_weeks(&self) -> usize {
        self.cells.len() / DAYS_PER_WEEK
    }

    pub fn active_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|c| c.is_current_month)
    }

    pub fn leading_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().take_while(|c| !c.is_current_month)
    }

    pub fn today(&self) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.is_today)
    }
}

/// Lays out the month `month` (zero-based) of `year`.
///
/// Months outside `0..12` are normalized into the year, so `(2024, -1)` is
/// December 2023 and `(2024, 12)` is January 2025. Only `today` is consulted
/// for the today marker; the wall clock is never read here.
///
/// Fails with an invalid date input error if the normalized month cannot be
/// represented. The neighbouring months only lend day labels, so the first
/// and last month of the supported date range still lay out.
pub fn compute_grid(year: i32, month: i32, today: NaiveDate) -> Result<MonthGrid> {
    let idx = MonthIndex::normalize(year as i64, month as i64)?;

    let first_weekday = weekday_index(&idx.first_day()?);
    let last_date_of_month = idx.num_days()?;
    // December is 31 days long in every year.
    let last_date_of_prev_month = match idx.month() {
        Month::January => 31,
        _ => idx.pred()?.num_days()?,
    };

    let mut cells = Vec::with_capacity(6 * DAYS_PER_WEEK);

    cells.extend(
        (last_date_of_prev_month - first_weekday + 1..=last_date_of_prev_month)
            .map(DayCell::inactive),
    );

    let today_num = if idx.contains(&today) {
        Some(today.day())
    } else {
        None
    };

    cells.extend(
        (1..=last_date_of_month)
            .map(|day_num| DayCell::active(day_num, Some(day_num) == today_num)),
    );

    let trailing = (DAYS_PER_WEEK - cells.len() % DAYS_PER_WEEK) % DAYS_PER_WEEK;
    cells.extend((1..=trailing as u32).map(DayCell::inactive));

    log::trace!("computed grid for {} with {} cells", idx, cells.len());

    Ok(MonthGrid {
        year: idx.year(),
        month: idx.month0(),
        cells,
        label: idx.to_string(),
    })
}
