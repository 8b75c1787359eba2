use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Fixed-width text table for list pages
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self, limit: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();

        for row in self.rows.iter().take(limit) {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        widths
    }

    fn format_line(cells: &[String], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    /// Header line followed by at most `limit` rows, without styling
    pub fn lines(&self, limit: usize) -> Vec<String> {
        let widths = self.widths(limit);
        let headers: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();

        let mut lines = vec![Self::format_line(&headers, &widths)];
        lines.extend(
            self.rows
                .iter()
                .take(limit)
                .map(|row| Self::format_line(row, &widths)),
        );
        lines
    }

    pub fn print(&self, limit: usize, empty_message: &str) {
        if self.rows.is_empty() {
            println!("{}", empty_message.dimmed());
            return;
        }

        let mut lines = self.lines(limit).into_iter();
        if let Some(header) = lines.next() {
            println!("{}", header.bold());
        }
        for line in lines {
            println!("{}", line);
        }

        if self.rows.len() > limit {
            println!(
                "{}",
                format!("... {} more not shown", self.rows.len() - limit).dimmed()
            );
        }
    }
}

pub fn heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count().max(32)));
}

/// `label: value` line of a detail view
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<20} {}", format!("{}:", label), value);
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn yes_no(flag: bool) -> ColoredString {
    if flag {
        "yes".green()
    } else {
        "no".red()
    }
}

/// Unstyled flag for table cells
pub fn flag(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

pub fn optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Spinner on stderr while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
