//! Methodology modal: data source notes and keybindings

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::{BaseColors, ColorScheme};

const NOTES: [(&str, &str); 4] = [
    (
        "Data Source",
        "Daily passenger counts are scraped from the Tbilisi Transport Company (TTC) \
         official website at 3:00 AM local time.",
    ),
    (
        "Coverage",
        "All four public transport modes in Tbilisi: buses, metro, minibuses \
         (marshrutkas), and cable cars.",
    ),
    (
        "Update Frequency",
        "Data is updated once daily, capturing the previous day's ridership totals.",
    ),
    (
        "Georgian Public Holidays",
        "Official public holidays are marked on the chart and may show different \
         ridership patterns.",
    ),
];

const KEYS: [(&str, &str); 5] = [
    ("mouse", "Hover the chart to inspect a day"),
    ("← / →", "Previous / next day"),
    ("Home / End", "First / latest day"),
    ("m", "Toggle this panel"),
    ("q", "Quit"),
];

/// Centered overlay explaining where the numbers come from
pub struct MethodologyModal {
    visible: bool,
}

impl Default for MethodologyModal {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodologyModal {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, scheme: ColorScheme) {
        if !self.visible {
            return;
        }

        let modal_width = 72.min(area.width);
        let modal_height = 22.min(area.height);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(modal_height)) / 2),
                Constraint::Length(modal_height),
                Constraint::Min(0),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length((area.width.saturating_sub(modal_width)) / 2),
                Constraint::Length(modal_width),
                Constraint::Min(0),
            ])
            .split(vertical[1]);

        let modal_area = horizontal[1];
        frame.render_widget(Clear, modal_area);

        let accent = BaseColors::accent(scheme);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                " Methodology ",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);

        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let text = Paragraph::new(self.build_content(scheme)).wrap(Wrap { trim: false });
        frame.render_widget(text, inner);
    }

    fn build_content(&self, scheme: ColorScheme) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(match scheme {
                ColorScheme::Truecolor => Color::Yellow,
                ColorScheme::Monochrome => Color::Reset,
            })
            .add_modifier(Modifier::BOLD);
        let key = Style::default().fg(BaseColors::accent(scheme));

        let mut lines = Vec::new();
        for (title, body) in NOTES {
            lines.push(Line::from(vec![
                Span::styled(format!("{title}: "), heading),
                Span::raw(body),
            ]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled("Keys:", heading)));
        for (k, description) in KEYS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {k:<12}"), key),
                Span::raw(description),
            ]));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut modal = MethodologyModal::new();
        assert!(!modal.is_visible());
        modal.toggle();
        assert!(modal.is_visible());
        modal.hide();
        assert!(!modal.is_visible());
    }

    #[test]
    fn test_content_mentions_source_and_keys() {
        let lines = MethodologyModal::new().build_content(ColorScheme::Truecolor);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Tbilisi Transport Company"));
        assert!(text.contains("Georgian Public Holidays"));
        assert!(text.contains("Toggle this panel"));
    }
}
