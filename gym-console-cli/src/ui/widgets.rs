use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph, Widget},
};

use super::app::App;
use crate::models::{Member, TrainingSession};
use crate::summary::DashboardSummary;

fn panel_block(title: &str, is_selected: bool) -> Block<'_> {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn stat_line(label: &str, value: usize, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<20}", label), Style::default().fg(Color::Gray)),
        Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Headline counts
pub fn render_overview(area: Rect, buf: &mut Buffer, summary: &DashboardSummary, is_selected: bool) {
    let block = panel_block(" Overview ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        stat_line("Members:", summary.total_members, Color::Green),
        stat_line("Trainers:", summary.total_trainers, Color::Cyan),
        stat_line("Sessions:", summary.total_sessions, Color::Yellow),
        stat_line("Today's attendance:", summary.todays_attendance, Color::Magenta),
    ];

    Paragraph::new(lines).render(inner, buf);
}

pub fn render_counts_chart(area: Rect, buf: &mut Buffer, summary: &DashboardSummary) {
    let block = panel_block(" Totals ", false);
    let inner = block.inner(area);
    block.render(area, buf);

    let data: Vec<(&str, u64)> = vec![
        ("Mbrs", summary.total_members as u64),
        ("Trnr", summary.total_trainers as u64),
        ("Sess", summary.total_sessions as u64),
        ("Today", summary.todays_attendance as u64),
    ];

    BarChart::default()
        .data(&data)
        .bar_width(6)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::White).bg(Color::Green))
        .render(inner, buf);
}

fn row_style(highlight: bool) -> Style {
    if highlight {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn render_upcoming_sessions(
    area: Rect,
    buf: &mut Buffer,
    sessions: &[TrainingSession],
    time_pattern: &str,
    selected_index: usize,
    is_selected: bool,
) {
    let block = panel_block(" Upcoming Sessions ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    if sessions.is_empty() {
        Paragraph::new("No upcoming sessions.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = sessions
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let start = s.local_start();
            let content = format!(
                "{} {} {:<8} {} with {}",
                start.format("%m/%d"),
                start.format(time_pattern),
                s.session_type.to_string(),
                s.member_label(),
                s.trainer_label()
            );
            let style = row_style(is_selected && idx == selected_index);
            ListItem::new(Line::from(Span::styled(content, style)))
        })
        .collect();

    List::new(items).render(inner, buf);
}

pub fn render_recent_members(
    area: Rect,
    buf: &mut Buffer,
    members: &[Member],
    selected_index: usize,
    is_selected: bool,
) {
    let block = panel_block(" Recent Members ", is_selected);
    let inner = block.inner(area);
    block.render(area, buf);

    if members.is_empty() {
        Paragraph::new("No members yet.")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = members
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let status = if m.is_active { "active" } else { "inactive" };
            let content = format!(
                "{:<24} {:<8} {}",
                m.display_name(),
                m.membership_type.to_string(),
                status
            );
            let style = row_style(is_selected && idx == selected_index);
            ListItem::new(Line::from(Span::styled(content, style)))
        })
        .collect();

    List::new(items).render(inner, buf);
}

pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Navigation:", Style::default().fg(Color::Cyan))),
        Line::from("  ↑/k       - Move up"),
        Line::from("  ↓/j       - Move down"),
        Line::from("  Tab/→/l   - Next panel"),
        Line::from("  Shift+Tab/←/h - Previous panel"),
        Line::from(""),
        Line::from(Span::styled("Other:", Style::default().fg(Color::Cyan))),
        Line::from("  r         - Refresh data"),
        Line::from("  ?         - Toggle this help"),
        Line::from("  q         - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

pub fn render_status_bar(area: Rect, buf: &mut Buffer, app: &App) {
    let refreshed = Span::styled(
        format!(" Updated {} ", app.refreshed_at.format(app.time_pattern)),
        Style::default().fg(Color::Green).bg(Color::DarkGray),
    );

    let help_hint = Span::styled(
        " Press ? for help ",
        Style::default().fg(Color::Gray).bg(Color::DarkGray),
    );

    let mut spans = vec![refreshed, help_hint];
    if !app.summary.load_errors.is_empty() {
        spans.push(Span::styled(
            format!(" Failed to load {} ", app.summary.load_errors.join("; ")),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}
