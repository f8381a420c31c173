pub mod app;
pub mod command;
pub mod context;
pub mod month_pane;
pub mod week_pane;

pub use app::App;
pub use context::{Context, Layout, Mode};
pub use month_pane::MonthPane;
pub use week_pane::WeekPane;
