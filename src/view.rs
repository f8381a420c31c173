use chrono::NaiveDate;

use crate::calendar::{compute_grid, compute_week, MonthGrid, MonthIndex, WeekGrid};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next(u32),
    Prev(u32),
    /// Zero-based month, normalized into the year.
    Jump { year: i32, month: i32 },
    Today,
}

/// The month currently on screen. Only `navigate` and `refresh` change it.
#[derive(Debug, Clone)]
pub struct CalendarView {
    grid: MonthGrid,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Result<Self> {
        let idx = MonthIndex::from(today);
        Ok(CalendarView {
            grid: compute_grid(idx.year(), idx.month0() as i32, today)?,
        })
    }

    pub fn with_month(year: i32, month: i32, today: NaiveDate) -> Result<Self> {
        Ok(CalendarView {
            grid: compute_grid(year, month, today)?,
        })
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn index(&self) -> MonthIndex {
        self.grid.index()
    }

    /// Replaces the grid with the month `nav` leads to. The current grid is
    /// kept if the target month cannot be computed.
    pub fn navigate(&mut self, nav: Navigation, today: NaiveDate) -> Result<&MonthGrid> {
        let current = self.index();
        let target = match nav {
            Navigation::Next(n) => current.add(n as i64)?,
            Navigation::Prev(n) => current.add(-(n as i64))?,
            Navigation::Jump { year, month } => MonthIndex::normalize(year as i64, month as i64)?,
            Navigation::Today => MonthIndex::from(today),
        };

        self.grid = compute_grid(target.year(), target.month0() as i32, today)?;
        log::debug!("navigated {:?} from {} to {}", nav, current, self.grid.label);

        Ok(&self.grid)
    }

    /// Recomputes the shown month, e.g. after the date changed at midnight.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<&MonthGrid> {
        self.grid = compute_grid(self.grid.year, self.grid.month as i32, today)?;
        Ok(&self.grid)
    }

    /// Week table for the shown month: today's week if today falls into the
    /// month, otherwise the week holding the 1st.
    pub fn week(&self, today: NaiveDate) -> Result<WeekGrid> {
        let idx = self.index();
        let anchor = if idx.contains(&today) {
            today
        } else {
            idx.first_day()?
        };
        compute_week(anchor, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn opens_on_todays_month() {
        let today = date(2024, 2, 10);
        let view = CalendarView::new(today).unwrap();

        assert_eq!(view.grid().label, "February 2024");
        assert_eq!(view.grid().today().map(|c| c.day_number), Some(10));
    }

    #[test]
    fn next_and_prev_wrap_years() {
        let today = date(2024, 12, 1);
        let mut view = CalendarView::new(today).unwrap();

        let grid = view.navigate(Navigation::Next(1), today).unwrap();
        assert_eq!((grid.year, grid.month), (2025, 0));
        assert!(grid.today().is_none());

        view.navigate(Navigation::Prev(13), today).unwrap();
        assert_eq!(view.index(), MonthIndex::new(Month::December, 2023));

        view.navigate(Navigation::Today, today).unwrap();
        assert_eq!(view.index(), MonthIndex::new(Month::December, 2024));
        assert!(view.grid().today().is_some());
    }

    #[test]
    fn jump_normalizes() {
        let today = date(2024, 1, 1);
        let mut view = CalendarView::new(today).unwrap();

        view.navigate(Navigation::Jump { year: 2024, month: -1 }, today)
            .unwrap();
        assert_eq!(view.index(), MonthIndex::new(Month::December, 2023));

        view.navigate(Navigation::Jump { year: 2024, month: 12 }, today)
            .unwrap();
        assert_eq!(view.index(), MonthIndex::new(Month::January, 2025));
    }

    #[test]
    fn failed_navigation_keeps_grid() {
        let today = date(2024, 5, 5);
        let mut view = CalendarView::new(today).unwrap();
        let before = view.grid().clone();

        let err = view
            .navigate(
                Navigation::Jump {
                    year: i32::MAX,
                    month: 0,
                },
                today,
            )
            .unwrap_err();
        assert!(err.is_invalid_date());
        assert_eq!(view.grid(), &before);
    }

    #[test]
    fn refresh_moves_today_marker() {
        let mut view = CalendarView::new(date(2024, 5, 5)).unwrap();
        assert_eq!(view.grid().today().map(|c| c.day_number), Some(5));

        view.refresh(date(2024, 5, 6)).unwrap();
        assert_eq!(view.grid().today().map(|c| c.day_number), Some(6));

        view.refresh(date(2024, 6, 1)).unwrap();
        assert!(view.grid().today().is_none());
        assert_eq!(view.grid().label, "May 2024");
    }

    #[test]
    fn week_follows_today_or_first() {
        let today = date(2024, 5, 15);
        let mut view = CalendarView::new(today).unwrap();
        assert!(view.week(today).unwrap().contains(&today));

        view.navigate(Navigation::Next(1), today).unwrap();
        let week = view.week(today).unwrap();
        assert!(week.contains(&date(2024, 6, 1)));
        assert_eq!(week.first_day(), date(2024, 5, 26));
    }
}
