use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::app::{App, Panel};
use super::widgets;
use crate::api::{Members, Sessions, Trainers};
use crate::context::AppContext;
use crate::summary::DashboardSummary;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
}

impl Dashboard {
    /// Take over the terminal
    pub fn new(app: App) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self { terminal, app })
    }

    /// Run the event loop until `q`
    pub async fn run(&mut self, ctx: &AppContext) -> Result<()> {
        loop {
            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.app.handle_key(key.code);
                    }
                }
            }

            if self.app.should_quit {
                break;
            }

            if self.app.refresh_requested {
                tracing::debug!("Refreshing dashboard");
                let summary = DashboardSummary::fetch(
                    &ctx.resource::<Members>(),
                    &ctx.resource::<Trainers>(),
                    &ctx.resource::<Sessions>(),
                    Local::now().date_naive(),
                )
                .await;
                self.app.apply_refresh(summary);
            }
        }

        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    // Main layout: top area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[0]);

    // Left column: counts (top) + chart (bottom)
    let left_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(columns[0]);

    // Right column: upcoming sessions (top) + recent members (bottom)
    let right_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    widgets::render_overview(
        left_panels[0],
        f.buffer_mut(),
        &app.summary,
        app.selected_panel == Panel::Overview,
    );

    widgets::render_counts_chart(left_panels[1], f.buffer_mut(), &app.summary);

    widgets::render_upcoming_sessions(
        right_panels[0],
        f.buffer_mut(),
        &app.summary.upcoming_sessions,
        app.time_pattern,
        app.selected_index,
        app.selected_panel == Panel::Upcoming,
    );

    widgets::render_recent_members(
        right_panels[1],
        f.buffer_mut(),
        &app.summary.recent_members,
        app.selected_index,
        app.selected_panel == Panel::RecentMembers,
    );

    widgets::render_status_bar(main_chunks[1], f.buffer_mut(), app);

    if app.show_help {
        let help_area = centered_rect(60, 70, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
