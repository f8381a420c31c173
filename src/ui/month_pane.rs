use std::fmt::{self, Display};
use termion::style;

use crate::calendar::{DayCell, MonthGrid, DAYS_PER_WEEK, WEEKDAYS};
use crate::config::Theme;

struct Cell<'a> {
    cell: &'a DayCell,
    theme: &'a Theme,
    styled: bool,
}

impl Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.cell.is_current_month && !self.theme.show_inactive {
            return write!(f, "{:width$}", "", width = MonthPane::CELL_WIDTH);
        }

        let marker = if self.cell.is_today {
            self.theme.today_char.unwrap_or(' ')
        } else {
            ' '
        };

        let text = format!(" {}{:>2}", marker, self.cell.day_number);

        if !self.styled {
            return write!(f, "{}", text);
        }

        if self.cell.is_today && self.theme.invert_today {
            write!(f, "{}{}{}", style::Invert, text, style::Reset)
        } else if !self.cell.is_current_month && self.theme.dim_inactive {
            write!(f, "{}{}{}", style::Faint, text, style::Reset)
        } else {
            write!(f, "{}", text)
        }
    }
}

/// Text rendering of a month grid: label, weekday header, one line per week.
pub struct MonthPane<'a> {
    grid: &'a MonthGrid,
    theme: &'a Theme,
    styled: bool,
}

impl<'a> MonthPane<'a> {
    pub const CELL_WIDTH: usize = 4;
    pub const WIDTH: usize = DAYS_PER_WEEK * Self::CELL_WIDTH;

    pub fn new(grid: &'a MonthGrid, theme: &'a Theme) -> Self {
        MonthPane {
            grid,
            theme,
            styled: false,
        }
    }

    /// Emit terminal escape sequences for today and inactive cells.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.grid.num_weeks() + 2);

        lines.push(format!("{:^width$}", self.grid.label, width = Self::WIDTH));

        lines.push(
            WEEKDAYS
                .iter()
                .map(|head| format!("{:>width$}", head, width = Self::CELL_WIDTH))
                .collect(),
        );

        for week in self.grid.weeks() {
            lines.push(
                week.iter()
                    .map(|cell| {
                        Cell {
                            cell,
                            theme: self.theme,
                            styled: self.styled,
                        }
                        .to_string()
                    })
                    .collect(),
            );
        }

        lines
    }
}

impl Display for MonthPane<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
