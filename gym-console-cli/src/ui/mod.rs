// Terminal UI module using ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{App, Panel};
pub use dashboard::Dashboard;
