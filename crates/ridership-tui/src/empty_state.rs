//! Placeholder screens for the loading, empty and failed states

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::path::Path;

/// Builder for empty state messages
pub struct EmptyState {
    title: String,
    title_color: Color,
    message: Vec<String>,
    actions: Vec<(String, String)>, // (key, description)
}

impl EmptyState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_color: Color::Yellow,
            message: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// Add a message line
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message.push(msg.into());
        self
    }

    /// Add an action hint
    pub fn action(mut self, key: impl Into<String>, description: impl Into<String>) -> Self {
        self.actions.push((key.into(), description.into()));
        self
    }

    pub fn build(self) -> Paragraph<'static> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.title,
                Style::default().fg(self.title_color),
            )),
            Line::from(""),
        ];

        for msg in self.message {
            lines.push(Line::from(Span::styled(
                msg,
                Style::default().fg(Color::DarkGray),
            )));
        }

        if !self.actions.is_empty() {
            lines.push(Line::from(""));
            for (key, desc) in self.actions {
                lines.push(Line::from(vec![
                    Span::styled("[", Style::default().fg(Color::DarkGray)),
                    Span::styled(key, Style::default().fg(Color::Green)),
                    Span::styled("] ", Style::default().fg(Color::DarkGray)),
                    Span::raw(desc),
                ]));
            }
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }
}

pub fn loading(path: &Path) -> Paragraph<'static> {
    EmptyState::new("Loading...")
        .message(format!("Reading {}", path.display()))
        .build()
}

pub fn no_data(path: &Path) -> Paragraph<'static> {
    EmptyState::new("No data available")
        .message(format!("{} contains no daily records", path.display()))
        .message("")
        .message("Point the dashboard at another file:")
        .message("  ridership --data ~/path/to/ttc_passengers.json")
        .action("q", "Quit")
        .build()
}

pub fn load_failed(path: &Path, error: &str) -> Paragraph<'static> {
    EmptyState::new("Failed to load data")
        .title_color(Color::Red)
        .message(error.to_string())
        .message("")
        .message(format!("Data file: {}", path.display()))
        .action("q", "Quit")
        .build()
}
