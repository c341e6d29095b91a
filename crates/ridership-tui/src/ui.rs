//! TUI rendering logic

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ridership_core::{Card, Clock};

use crate::app::{App, Dashboard, LoadState};
use crate::chart::ChartView;
use crate::components::InsightCards;
use crate::empty_state;
use crate::theme::{BaseColors, ColorScheme};

/// Height of the insight card row
const CARD_HEIGHT: u16 = 7;

/// Draw one frame; records the chart geometry on `app` for mouse mapping
pub fn render<C: Clock + Clone>(frame: &mut Frame, app: &mut App<C>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(8),    // body
            Constraint::Length(2), // footer
        ])
        .split(area);

    render_header(frame, chunks[0], app.scheme);

    app.chart = None;
    match &app.state {
        LoadState::Loading => {
            frame.render_widget(bordered(empty_state::loading(&app.data_path)), chunks[1]);
        }
        LoadState::Failed(message) => {
            frame.render_widget(
                bordered(empty_state::load_failed(&app.data_path, message)),
                chunks[1],
            );
        }
        LoadState::Ready(dashboard) if dashboard.store().is_empty() => {
            frame.render_widget(bordered(empty_state::no_data(&app.data_path)), chunks[1]);
        }
        LoadState::Ready(dashboard) => {
            app.chart = Some(render_dashboard(frame, chunks[1], dashboard, app.scheme));
        }
    }

    render_footer(frame, chunks[2], app);
    app.methodology.render(frame, area, app.scheme);
}

fn bordered(widget: Paragraph<'static>) -> Paragraph<'static> {
    widget.block(Block::default().borders(Borders::ALL))
}

fn render_header(frame: &mut Frame, area: Rect, scheme: ColorScheme) {
    let title = Line::from(vec![
        Span::styled(
            " Tbilisi Public Transport ",
            Style::default()
                .fg(BaseColors::accent(scheme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "· daily ridership",
            Style::default().fg(BaseColors::muted(scheme)),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_dashboard<C: Clock>(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard<C>,
    scheme: ColorScheme,
) -> crate::chart::ChartGeometry {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(CARD_HEIGHT)])
        .split(area);

    let chart = ChartView {
        store: dashboard.store(),
        overlay: &dashboard.overlay,
        selected: dashboard.dispatcher.selected(),
        scheme,
    };
    let geometry = chart.render(frame, chunks[0]);

    let cards: Vec<_> = Card::ALL
        .iter()
        .filter_map(|card| dashboard.dispatcher.card(*card))
        .collect();
    InsightCards::new(scheme).render(frame, chunks[1], &cards);

    geometry
}

fn render_footer<C: Clock + Clone>(frame: &mut Frame, area: Rect, app: &App<C>) {
    let muted = Style::default().fg(BaseColors::muted(app.scheme));
    let key = Style::default().fg(BaseColors::accent(app.scheme));

    let mut status = vec![Span::styled(" Last update: ", muted)];
    let last = app
        .dashboard()
        .and_then(|d| d.store().records().last().map(|r| r.date.short_label()));
    status.push(Span::raw(match last {
        Some(date) => format!("{date} • 03:00 AM"),
        None => "—".to_string(),
    }));
    if let Some(message) = &app.status_message {
        status.push(Span::styled(format!("   ⚠ {message}"), muted));
    }

    let hints = Line::from(vec![
        Span::styled(" [m]", key),
        Span::styled(" Methodology  ", muted),
        Span::styled("[←/→]", key),
        Span::styled(" Day  ", muted),
        Span::styled("[q]", key),
        Span::styled(" Quit   ", muted),
        Span::styled("Data Source: Tbilisi Transport Company (ttc.com.ge)", muted),
    ]);

    frame.render_widget(Paragraph::new(vec![Line::from(status), hints]), area);
}
