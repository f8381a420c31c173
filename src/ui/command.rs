use std::convert::TryFrom;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, digit1, i64 as integer, space0, space1},
    combinator::{all_consuming, opt, rest},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use super::context::{Context, Layout};
use crate::error::{Error, ErrorKind, Result};
use crate::view::Navigation;

pub type ActionResult = Result<()>;

pub enum Action {
    Arg(fn(&mut Context, &str) -> ActionResult),
    NoArg(fn(&mut Context) -> ActionResult),
    Repeatable(fn(&mut Context, u32) -> ActionResult),
}

const COMMANDS: &[(&str, Action)] = &[
    (
        "next",
        Action::Repeatable(|c, n| c.navigate(Navigation::Next(n))),
    ),
    ("n", Action::Repeatable(|c, n| c.navigate(Navigation::Next(n)))),
    (
        "prev",
        Action::Repeatable(|c, n| c.navigate(Navigation::Prev(n))),
    ),
    ("p", Action::Repeatable(|c, n| c.navigate(Navigation::Prev(n)))),
    ("goto", Action::Arg(|c, arg| c.navigate(parse_goto(arg)?))),
    ("g", Action::Arg(|c, arg| c.navigate(parse_goto(arg)?))),
    ("today", Action::NoArg(|c| c.navigate(Navigation::Today))),
    ("t", Action::NoArg(|c| c.navigate(Navigation::Today))),
    (
        "week",
        Action::NoArg(|c| {
            c.layout = Layout::Week;
            Ok(())
        }),
    ),
    (
        "w",
        Action::NoArg(|c| {
            c.layout = Layout::Week;
            Ok(())
        }),
    ),
    (
        "month",
        Action::NoArg(|c| {
            c.layout = Layout::Month;
            Ok(())
        }),
    ),
    (
        "m",
        Action::NoArg(|c| {
            c.layout = Layout::Month;
            Ok(())
        }),
    ),
    (
        "quit",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
    (
        "q",
        Action::NoArg(|c| {
            c.quit = true;
            Ok(())
        }),
    ),
];

fn find_action(name: &str) -> Option<&'static Action> {
    COMMANDS
        .iter()
        .find(|(cmd, _)| *cmd == name)
        .map(|(_, act)| act)
}

/// `[count]name[ argument]`
fn command(input: &str) -> IResult<&str, (Option<&str>, &str, Option<&str>)> {
    all_consuming(tuple((
        opt(digit1),
        alpha1,
        opt(preceded(space1, rest)),
    )))(input)
}

/// `year month`, `year-month` or just `year`.
fn year_month(input: &str) -> IResult<&str, (i64, Option<i64>)> {
    all_consuming(terminated(
        pair(integer, opt(preceded(alt((space1, tag("-"))), integer))),
        space0,
    ))(input)
}

/// Parses `YEAR [MONTH]` into a year and a zero-based month. Months are
/// one-based in the text and normalized later, so `2024 13` is `(2024, 12)`.
pub fn parse_year_month(arg: &str) -> Result<(i32, i32)> {
    let (_, (year, month)) = year_month(arg.trim()).map_err(|_| {
        Error::invalid_date(&format!("expected 'YEAR [MONTH]', got '{}'", arg))
    })?;

    let year = i32::try_from(year)
        .map_err(|_| Error::invalid_date(&format!("year {} out of range", year)))?;
    let month = month
        .unwrap_or(1)
        .checked_sub(1)
        .and_then(|m| i32::try_from(m).ok())
        .ok_or_else(|| Error::invalid_date("month out of range"))?;

    Ok((year, month))
}

/// Parses the argument of `goto` into a jump, so `goto 2024 13` lands on
/// January 2025.
pub fn parse_goto(arg: &str) -> Result<Navigation> {
    let (year, month) = parse_year_month(arg)?;
    Ok(Navigation::Jump { year, month })
}

pub fn run_command(context: &mut Context, cmd: &str) -> ActionResult {
    let cmd = cmd.trim();
    let (_, (count, name, arg)) = command(cmd).map_err(|_| {
        Error::new(ErrorKind::CommandParse, &format!("cannot parse '{}'", cmd))
    })?;

    let act = find_action(name).ok_or_else(|| {
        Error::new(ErrorKind::CommandParse, &format!("unknown command '{}'", name))
    })?;

    let unexpected = |what: &str| {
        Error::new(
            ErrorKind::CommandParse,
            &format!("'{}' does not take {}", name, what),
        )
    };

    match (act, count, arg) {
        (Action::Repeatable(a), count, None) => {
            let repeats = match count {
                Some(digits) => digits.parse::<u32>().map_err(|_| {
                    Error::new(
                        ErrorKind::CommandParse,
                        &format!("invalid count '{}'", digits),
                    )
                })?,
                None => 1,
            };
            a(context, repeats)
        }
        (Action::Repeatable(_), _, Some(_)) => Err(unexpected("an argument")),
        (Action::Arg(a), None, Some(arg)) => a(context, arg),
        (Action::Arg(_), None, None) => Err(Error::new(
            ErrorKind::CommandParse,
            &format!("'{}' requires an argument", name),
        )),
        (Action::NoArg(a), None, None) => a(context),
        (Action::NoArg(_), None, Some(_)) => Err(unexpected("an argument")),
        (_, Some(_), _) => Err(unexpected("a count")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthIndex;
    use crate::config::Theme;
    use crate::view::CalendarView;
    use chrono::{Month, NaiveDate};

    fn context() -> Context {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        Context::new(CalendarView::new(today).unwrap(), Theme::default(), today)
    }

    fn shown(context: &Context) -> MonthIndex {
        context.view().index()
    }

    #[test]
    fn next_and_prev_with_counts() {
        let mut c = context();

        run_command(&mut c, "next").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::March, 2024));

        run_command(&mut c, "12n").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::March, 2025));

        run_command(&mut c, "3prev").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::December, 2024));

        run_command(&mut c, " t ").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::February, 2024));
    }

    #[test]
    fn goto_forms() {
        let mut c = context();

        run_command(&mut c, "goto 1999 7").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::July, 1999));

        run_command(&mut c, "g 2030-11").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::November, 2030));

        run_command(&mut c, "goto 2024").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::January, 2024));
    }

    #[test]
    fn goto_normalizes_months() {
        assert_eq!(
            parse_goto("2024 13").unwrap(),
            Navigation::Jump {
                year: 2024,
                month: 12
            }
        );
        assert_eq!(
            parse_goto("2024 0").unwrap(),
            Navigation::Jump {
                year: 2024,
                month: -1
            }
        );

        let mut c = context();
        run_command(&mut c, "goto 2024 0").unwrap();
        assert_eq!(shown(&c), MonthIndex::new(Month::December, 2023));
    }

    #[test]
    fn year_month_is_zero_based() {
        assert_eq!(parse_year_month("2024 2").unwrap(), (2024, 1));
        assert_eq!(parse_year_month(" 1999-12 ").unwrap(), (1999, 11));
        assert_eq!(parse_year_month("2024").unwrap(), (2024, 0));
        assert!(parse_year_month("2024 june").unwrap_err().is_invalid_date());
    }

    #[test]
    fn goto_rejects_non_integers() {
        for arg in &["feb", "2024 feb", "20x4 2", "2024 2 1", "99999999999 1"] {
            assert!(parse_goto(arg).unwrap_err().is_invalid_date(), "{}", arg);
        }

        let mut c = context();
        let err = run_command(&mut c, "goto 2024 march").unwrap_err();
        assert!(err.is_invalid_date());
        assert_eq!(shown(&c), MonthIndex::new(Month::February, 2024));
    }

    #[test]
    fn layout_and_quit() {
        let mut c = context();

        run_command(&mut c, "week").unwrap();
        assert_eq!(c.layout, Layout::Week);
        run_command(&mut c, "m").unwrap();
        assert_eq!(c.layout, Layout::Month);

        assert!(!c.quit);
        run_command(&mut c, "q").unwrap();
        assert!(c.quit);
    }

    #[test]
    fn rejects_malformed_commands() {
        let mut c = context();

        for cmd in &["", "jump", "3today", "today now", "goto", "next 3", "99999999999n"] {
            let err = run_command(&mut c, cmd).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::CommandParse), "{}", cmd);
        }
    }
}
