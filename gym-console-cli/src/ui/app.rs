use chrono::{DateTime, Local};
use crossterm::event::KeyCode;

use crate::summary::DashboardSummary;

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Set by `r`; the event loop reloads and clears it
    pub refresh_requested: bool,
    pub selected_panel: Panel,
    /// Selected row in the current panel
    pub selected_index: usize,
    pub show_help: bool,
    pub summary: DashboardSummary,
    pub refreshed_at: DateTime<Local>,
    /// strftime pattern for session times
    pub time_pattern: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Upcoming,
    RecentMembers,
}

impl App {
    pub fn new(summary: DashboardSummary, time_pattern: &'static str) -> Self {
        Self {
            should_quit: false,
            refresh_requested: false,
            selected_panel: Panel::Overview,
            selected_index: 0,
            show_help: false,
            summary,
            refreshed_at: Local::now(),
            time_pattern,
        }
    }

    /// Swap in freshly loaded data, keeping the selection in range
    pub fn apply_refresh(&mut self, summary: DashboardSummary) {
        self.summary = summary;
        self.refreshed_at = Local::now();
        self.refresh_requested = false;
        self.selected_index = self.selected_index.min(self.max_index());
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_requested = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.next_panel(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.prev_panel(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index < self.max_index() {
                    self.selected_index += 1;
                }
            }
            _ => {}
        }
    }

    fn next_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Overview => Panel::Upcoming,
            Panel::Upcoming => Panel::RecentMembers,
            Panel::RecentMembers => Panel::Overview,
        };
        self.selected_index = 0;
    }

    fn prev_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Overview => Panel::RecentMembers,
            Panel::Upcoming => Panel::Overview,
            Panel::RecentMembers => Panel::Upcoming,
        };
        self.selected_index = 0;
    }

    fn max_index(&self) -> usize {
        match self.selected_panel {
            Panel::Overview => 0,
            Panel::Upcoming => self.summary.upcoming_sessions.len().saturating_sub(1),
            Panel::RecentMembers => self.summary.recent_members.len().saturating_sub(1),
        }
    }
}
