//! Insight cards: total passengers plus one card per transport mode

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ridership_core::dispatcher::CardView;
use ridership_core::format::format_thousands;
use ridership_core::Card;

use crate::theme::{change_color, rgb, BaseColors, ColorScheme, SeriesStyle};

pub const HOLIDAY_BADGE: &str = "🎉 Public Holiday";

/// Renders one row of insight cards
pub struct InsightCards {
    scheme: ColorScheme,
}

impl InsightCards {
    pub fn new(scheme: ColorScheme) -> Self {
        Self { scheme }
    }

    /// Lay the cards out left to right, total first
    pub fn render(&self, frame: &mut Frame, area: Rect, cards: &[CardView<'_>]) {
        if cards.is_empty() {
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
            .split(area);

        for (view, chunk) in cards.iter().zip(chunks.iter()) {
            self.render_card(frame, *chunk, view);
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, view: &CardView<'_>) {
        let (title_color, body) = match view.card {
            Card::Total => (
                Color::White,
                Style::default().bg(BaseColors::total_card_bg(self.scheme)),
            ),
            Card::Mode(mode) => (SeriesStyle::color(mode, self.scheme), Style::default()),
        };
        let title_color = match self.scheme {
            ColorScheme::Truecolor => title_color,
            ColorScheme::Monochrome => Color::Reset,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(self.scheme)))
            .style(body)
            .title(Span::styled(
                format!(" {} ", view.card.title()),
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value_color = match (view.card, self.scheme) {
            (Card::Total, ColorScheme::Truecolor) => Color::White,
            _ => BaseColors::fg(self.scheme),
        };
        let label_color = match (view.card, self.scheme) {
            (Card::Total, ColorScheme::Truecolor) => rgb(view.label.rgb),
            _ => change_color(view.label, self.scheme),
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format_thousands(view.value),
                Style::default().fg(value_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                view.label.text.clone(),
                Style::default().fg(label_color),
            )),
        ];
        if view.holiday {
            lines.push(Line::from(Span::styled(
                HOLIDAY_BADGE,
                Style::default().fg(value_color),
            )));
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rows[1]);
    }
}
