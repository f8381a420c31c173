extern crate calgrid as lib;

use chrono::{Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::config::Config;
use lib::events::Dispatcher;
use lib::ui::command::parse_year_month;
use lib::ui::{App, Context, MonthPane, WeekPane};
use lib::view::CalendarView;
use nix::sys::termios;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;

#[derive(Debug, StructOpt)]
#[structopt(name = "cg", about = "Month grid calendar for the terminal.")]
pub struct Args {
    #[structopt(
        name = "DATE",
        help = "year and optional one-based month to show, defaults to today",
        max_values = 2
    )]
    pub date: Vec<String>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "i", long = "interactive", help = "browse months interactively")]
    pub interactive: bool,

    #[structopt(short = "w", long = "week", help = "show the hour-by-day week table")]
    pub week: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn initial_view(args: &Args, today: NaiveDate) -> lib::error::Result<CalendarView> {
    if args.date.is_empty() {
        return CalendarView::new(today);
    }

    let (year, month) = parse_year_month(&args.date.join(" "))?;
    CalendarView::with_month(year, month, today)
}

fn print(
    args: &Args,
    config: &Config,
    view: &CalendarView,
    today: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let styled = termion::is_tty(&stdout());

    if args.week {
        let week = view.week(today)?;
        print!(
            "{}",
            WeekPane::new(&week, &config.theme)
                .with_agenda(&config.agenda)
                .styled(styled)
        );
    } else {
        print!(
            "{}",
            MonthPane::new(view.grid(), &config.theme).styled(styled)
        );
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    // Without a log file, log lines would garble the interactive screen.
    let _logger = if args.log_file.is_some() || !args.interactive {
        Some(logger.start()?)
    } else {
        None
    };

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let today = Local::now().date_naive();
    let view = initial_view(&args, today)?;

    if !args.interactive {
        return print(&args, &config, &view, today);
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("calgrid ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let mut context = Context::new(view, config.theme.clone(), today);
    if args.week {
        context.layout = lib::ui::Layout::Week;
    }

    let dispatcher = Dispatcher::from_config(&config);
    let mut screen = AlternateScreen::from(stdout().into_raw_mode()?);

    let mut app = App::new(&config, context);
    app.run(dispatcher, &mut screen)
}
