use std::io::Write;

use termion::event::Key;
use termion::{clear, cursor, style};

use crate::config::Config;
use crate::events::{Dispatcher, Event};

use super::command::run_command;
use super::{Context, Layout, Mode, MonthPane, WeekPane};

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, context: Context) -> App<'a> {
        App { config, context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn execute(&mut self, cmd: &str) {
        self.context.last_error_message = None;
        if let Err(e) = run_command(&mut self.context, cmd) {
            self.context.report_error(e.to_string());
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        match self.context.mode {
            Mode::Normal => match key {
                Key::Char(':') => {
                    self.context.mode = Mode::Command;
                    self.context.command_line.clear();
                }
                Key::Right => self.execute("next"),
                Key::Left => self.execute("prev"),
                Key::Ctrl('c') => self.context.quit = true,
                Key::Char(c) => {
                    if let Some(cmd) = self.config.command_for(c).map(str::to_owned) {
                        self.execute(&cmd);
                    }
                }
                _ => {}
            },
            Mode::Command => match key {
                Key::Esc => self.context.mode = Mode::Normal,
                Key::Char('\n') => {
                    let cmd = std::mem::take(&mut self.context.command_line);
                    self.context.mode = Mode::Normal;
                    self.execute(&cmd);
                }
                Key::Backspace => {
                    if self.context.command_line.pop().is_none() {
                        self.context.mode = Mode::Normal;
                    }
                }
                Key::Char(c) => self.context.command_line.push(c),
                _ => {}
            },
        }
    }

    fn lines(&self) -> Vec<String> {
        let theme = &self.context.theme;
        let pane = match self.context.layout {
            Layout::Month => Ok(MonthPane::new(self.context.view().grid(), theme)
                .styled(true)
                .lines()),
            Layout::Week => self
                .context
                .week()
                .map(|week| {
                    WeekPane::new(&week, theme)
                        .with_agenda(&self.config.agenda)
                        .styled(true)
                        .lines()
                }),
        };

        let mut lines = pane.unwrap_or_else(|e| vec![e.to_string()]);
        lines.push(String::new());

        let status = match (&self.context.mode, &self.context.last_error_message) {
            (Mode::Command, _) => format!(":{}", self.context.command_line),
            (Mode::Normal, Some(msg)) => format!("{}{}{}", style::Bold, msg, style::Reset),
            (Mode::Normal, None) => String::new(),
        };
        lines.push(status);

        lines
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{}", clear::All)?;
        for (row, line) in self.lines().iter().enumerate() {
            write!(out, "{}{}", cursor::Goto(1, row as u16 + 1), line)?;
        }
        out.flush()
    }

    pub fn run<W: Write>(
        &mut self,
        dispatcher: Dispatcher,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        write!(out, "{}", cursor::Hide)?;
        self.draw(out)?;

        while !self.context.quit {
            match dispatcher.next()? {
                Event::Update => {
                    if let Err(e) = self.context.update() {
                        self.context.report_error(e.to_string());
                    }
                }
                Event::Input(key) => self.handle_key(key),
            }

            self.draw(out)?;
        }

        write!(out, "{}", cursor::Show)?;
        out.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CalendarView;
    use chrono::NaiveDate;

    fn app(config: &Config) -> App<'_> {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let context = Context::new(
            CalendarView::new(today).unwrap(),
            config.theme.clone(),
            today,
        );
        App::new(config, context)
    }

    fn label(app: &App) -> String {
        app.context().view().grid().label.clone()
    }

    #[test]
    fn bound_keys_navigate() {
        let config = Config::default();
        let mut app = app(&config);

        app.handle_key(Key::Char('l'));
        assert_eq!(label(&app), "March 2024");
        app.handle_key(Key::Left);
        app.handle_key(Key::Char('h'));
        assert_eq!(label(&app), "January 2024");
        app.handle_key(Key::Char('L'));
        assert_eq!(label(&app), "January 2025");
        app.handle_key(Key::Char('t'));
        assert_eq!(label(&app), "February 2024");

        app.handle_key(Key::Char('q'));
        assert!(app.context().quit);
    }

    #[test]
    fn command_line_jumps() {
        let config = Config::default();
        let mut app = app(&config);

        for key in ":goto 1989 11\n".chars() {
            app.handle_key(Key::Char(key));
        }
        assert_eq!(label(&app), "November 1989");
        assert_eq!(app.context().mode, Mode::Normal);
        assert!(app.context().last_error_message.is_none());
    }

    #[test]
    fn errors_go_to_status_line() {
        let config = Config::default();
        let mut app = app(&config);

        for key in ":goto may\n".chars() {
            app.handle_key(Key::Char(key));
        }
        assert_eq!(label(&app), "February 2024");
        let msg = app.context().last_error_message.clone().unwrap();
        assert!(msg.starts_with("invalid date input"));

        let lines = app.lines();
        assert!(lines.last().unwrap().contains(&msg));
    }

    #[test]
    fn draws_week_layout() {
        let config = Config::default();
        let mut app = app(&config);

        app.handle_key(Key::Char('w'));
        let lines = app.lines();
        assert_eq!(lines[0], "Feb 11 2024 - Feb 17 2024");

        let mut out = Vec::new();
        app.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("23:00|"));
    }

    #[test]
    fn week_layout_shows_configured_events() {
        let config = Config::from_toml(
            r#"
            [[events]]
            start = "2024-02-15 14:00"
            summary = "dentist"
            "#,
        )
        .unwrap();
        let mut app = app(&config);

        app.handle_key(Key::Char('w'));
        let lines = app.lines();
        assert_eq!(
            lines[2 + 14],
            "14:00|       |       |       |       |dentist|       |       |"
        );
    }
}
