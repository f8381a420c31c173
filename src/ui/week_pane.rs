use std::fmt::{self, Display};
use termion::style;

use crate::calendar::{Agenda, Event, WeekDay, WeekGrid};
use crate::config::Theme;

/// Hour-by-day table of one week, with the first event of each hour in its cell.
pub struct WeekPane<'a> {
    grid: &'a WeekGrid,
    theme: &'a Theme,
    agenda: Option<&'a Agenda>,
    styled: bool,
}

impl<'a> WeekPane<'a> {
    const HOUR_WIDTH: usize = 5;
    const COLUMN_WIDTH: usize = 7;

    pub fn new(grid: &'a WeekGrid, theme: &'a Theme) -> Self {
        WeekPane {
            grid,
            theme,
            agenda: None,
            styled: false,
        }
    }

    pub fn with_agenda(mut self, agenda: &'a Agenda) -> Self {
        self.agenda = Some(agenda);
        self
    }

    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.grid.first_day().format("%b %d %Y"),
            self.grid.last_day().format("%b %d %Y")
        )
    }

    fn head(&self, day: &WeekDay) -> String {
        let marker = if day.is_today {
            self.theme.today_char.unwrap_or(' ')
        } else {
            ' '
        };
        let head = format!("{}{}", marker, day.date.format("%a %d"));

        if self.styled && day.is_today && self.theme.invert_today {
            format!("|{}{}{}", style::Invert, head, style::Reset)
        } else {
            format!("|{}", head)
        }
    }

    fn slot(event: Option<&Event>) -> String {
        let summary: String = event
            .map(|e| e.summary.chars().take(Self::COLUMN_WIDTH).collect())
            .unwrap_or_default();
        format!("|{:<width$}", summary, width = Self::COLUMN_WIDTH)
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.grid.hours().count() + 2);
        lines.push(self.label());

        let heads: String = self.grid.days.iter().map(|day| self.head(day)).collect();
        lines.push(format!("{:width$}{}|", "", heads, width = Self::HOUR_WIDTH));

        let slots = self
            .agenda
            .map(|agenda| agenda.week_slots(self.grid))
            .unwrap_or_default();
        for hour in self.grid.hours() {
            let row: String = match slots.get(hour as usize) {
                Some(row) => row.iter().map(|event| Self::slot(*event)).collect(),
                None => self.grid.days.iter().map(|_| Self::slot(None)).collect(),
            };
            lines.push(format!("{:02}:00{}|", hour, row));
        }

        lines
    }
}

impl Display for WeekPane<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
