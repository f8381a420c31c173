use chrono::{Local, NaiveDate};

use crate::calendar::WeekGrid;
use crate::config::Theme;
use crate::error::Result;
use crate::view::{CalendarView, Navigation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Month,
    Week,
}

pub struct Context {
    pub mode: Mode,
    pub layout: Layout,
    pub theme: Theme,
    pub command_line: String,
    pub last_error_message: Option<String>,
    pub quit: bool,
    view: CalendarView,
    today: NaiveDate,
}

impl Context {
    pub fn new(view: CalendarView, theme: Theme, today: NaiveDate) -> Self {
        Context {
            mode: Mode::Normal,
            layout: Layout::Month,
            theme,
            command_line: String::new(),
            last_error_message: None,
            quit: false,
            view,
            today,
        }
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn navigate(&mut self, nav: Navigation) -> Result<()> {
        self.view.navigate(nav, self.today)?;
        Ok(())
    }

    pub fn week(&self) -> Result<WeekGrid> {
        self.view.week(self.today)
    }

    /// Reads the clock and recomputes the grid once the date changed.
    pub fn update(&mut self) -> Result<()> {
        self.set_today(Local::now().date_naive())
    }

    pub fn set_today(&mut self, today: NaiveDate) -> Result<()> {
        if today != self.today {
            log::debug!("date changed from {} to {}", self.today, today);
            self.today = today;
            self.view.refresh(today)?;
        }
        Ok(())
    }

    pub fn report_error(&mut self, message: String) {
        log::warn!("{}", message);
        self.last_error_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_change_moves_today() {
        let today = date(2024, 1, 31);
        let mut context = Context::new(CalendarView::new(today).unwrap(), Theme::default(), today);

        context.set_today(date(2024, 2, 1)).unwrap();
        assert_eq!(context.today(), date(2024, 2, 1));
        assert_eq!(context.view().grid().label, "January 2024");
        assert!(context.view().grid().today().is_none());

        context.navigate(Navigation::Today).unwrap();
        assert_eq!(context.view().grid().label, "February 2024");
        assert_eq!(
            context.view().grid().today().map(|c| c.day_number),
            Some(1)
        );
    }

    #[test]
    fn errors_are_kept_for_the_status_line() {
        let today = date(2024, 1, 31);
        let mut context = Context::new(CalendarView::new(today).unwrap(), Theme::default(), today);

        context.report_error("unknown command 'x'".to_owned());
        assert_eq!(
            context.last_error_message.as_deref(),
            Some("unknown command 'x'")
        );
    }
}
