//! Ridership line chart with calendar bands
//!
//! The chart is drawn in two passes over the same cells: the overlay paints
//! weekend/holiday backgrounds through [`BufferPainter`], then the ratatui
//! `Chart` draws the four series on top without touching cell backgrounds.
//! [`ChartGeometry`] is the single source of the index ↔ column mapping, used
//! both for band placement and for turning mouse columns into hover indices.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
    Frame,
};
use ridership_core::format::format_axis_k;
use ridership_core::overlay::{Band, BandPainter, PlotArea, Rgba};
use ridership_core::{Mode, OverlayRenderer, TimeSeriesStore};

use crate::theme::{BaseColors, ChartColors, ColorScheme, SeriesStyle};

/// Width of the y-axis label column
const Y_LABEL_WIDTH: u16 = 6;

/// Maps category indices to terminal columns inside the plot area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartGeometry {
    pub area: Rect,
    pub len: usize,
}

impl ChartGeometry {
    pub fn new(area: Rect, len: usize) -> Self {
        Self { area, len }
    }

    /// Distance between the first and last category on the x axis
    fn span(&self) -> f64 {
        self.len.saturating_sub(1).max(1) as f64
    }

    /// Upper x bound handed to the chart
    pub fn x_max(&self) -> f64 {
        self.span()
    }

    pub fn plot_area(&self) -> PlotArea {
        PlotArea::new(
            self.area.left() as f64,
            self.area.right() as f64,
            self.area.top() as f64,
            self.area.bottom() as f64,
        )
    }

    /// Horizontal centre of category `index`, in columns
    pub fn x_to_pixel(&self, index: usize) -> f64 {
        let usable = self.area.width.saturating_sub(1) as f64;
        self.area.left() as f64 + 0.5 + index as f64 * usable / self.span()
    }

    /// Nearest category under a mouse position, if it is over the plot
    pub fn index_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.len == 0 || !self.area.contains(Position::new(column, row)) {
            return None;
        }
        let usable = self.area.width.saturating_sub(1).max(1) as f64;
        let offset = (column - self.area.left()) as f64;
        let index = (offset / usable * self.span()).round() as usize;
        Some(index.min(self.len - 1))
    }

    /// Column under category `index`
    pub fn column_of(&self, index: usize) -> u16 {
        self.x_to_pixel(index).floor() as u16
    }
}

/// Paints band tints straight into a ratatui buffer
pub struct BufferPainter<'a> {
    buf: &'a mut Buffer,
    clip: Rect,
    scheme: ColorScheme,
}

impl<'a> BufferPainter<'a> {
    pub fn new(buf: &'a mut Buffer, clip: Rect, scheme: ColorScheme) -> Self {
        Self { buf, clip, scheme }
    }
}

/// Half-open cell range covered by `[start, start + len)` pixels, clipped
fn cell_span(start: f64, len: f64, min: u16, max: u16) -> std::ops::Range<u16> {
    if start + len <= min as f64 || start >= max as f64 {
        return min..min;
    }
    let from = start.round().clamp(min as f64, max as f64) as u16;
    let to = (start + len).round().clamp(min as f64, max as f64) as u16;
    // Narrow bands still get one cell
    let to = if to <= from && from < max { from + 1 } else { to };
    from..to
}

/// Copy the drawn glyphs of `layer` onto `target`, keeping target backgrounds
fn draw_over(target: &mut Buffer, layer: &Buffer, area: Rect) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(src) = layer.cell((x, y)) else {
                continue;
            };
            if src.symbol() == " " {
                continue;
            }
            if let Some(dst) = target.cell_mut((x, y)) {
                dst.set_symbol(src.symbol());
                dst.set_fg(src.fg);
            }
        }
    }
}

impl BandPainter for BufferPainter<'_> {
    fn fill_band(&mut self, band: &Band, tint: Rgba) {
        let Some(bg) = ChartColors::band(tint, self.scheme) else {
            return;
        };
        let columns = cell_span(band.x, band.width, self.clip.left(), self.clip.right());
        let rows = cell_span(band.y, band.height, self.clip.top(), self.clip.bottom());

        for x in columns {
            for y in rows.clone() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.set_bg(bg);
                }
            }
        }
    }
}

/// Everything the chart needs for one frame
pub struct ChartView<'a> {
    pub store: &'a TimeSeriesStore,
    pub overlay: &'a OverlayRenderer,
    pub selected: Option<usize>,
    pub scheme: ColorScheme,
}

impl ChartView<'_> {
    /// Render the chart block; returns the geometry of the plot area
    pub fn render(&self, frame: &mut Frame, area: Rect) -> ChartGeometry {
        let muted = Style::default().fg(BaseColors::muted(self.scheme));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(muted)
            .title(Span::styled(
                " Daily Passengers ",
                Style::default()
                    .fg(BaseColors::accent(self.scheme))
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // [legend] / [y labels | plot] / [x labels]
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(Y_LABEL_WIDTH), Constraint::Min(4)])
            .split(rows[1]);
        let x_label_area = Rect {
            x: columns[1].x,
            width: columns[1].width,
            ..rows[2]
        };

        frame.render_widget(legend(self.scheme), rows[0]);

        let geometry = ChartGeometry::new(columns[1], self.store.len());
        let y_max = self.y_max();
        self.render_y_labels(frame, columns[0], y_max);
        self.render_plot(frame, geometry, y_max);
        self.render_x_labels(frame, x_label_area, geometry);

        geometry
    }

    /// Top of the value axis: zero-based with a little headroom
    fn y_max(&self) -> f64 {
        (self.store.max_mode_value() as f64 * 1.1).max(1.0)
    }

    fn render_plot(&self, frame: &mut Frame, geometry: ChartGeometry, y_max: f64) {
        let area = geometry.area;
        frame
            .buffer_mut()
            .set_style(area, Style::default().bg(ChartColors::surface(self.scheme)));

        {
            let mut painter = BufferPainter::new(frame.buffer_mut(), area, self.scheme);
            self.overlay.draw_before_datasets(
                geometry.plot_area(),
                |i| geometry.x_to_pixel(i),
                &mut painter,
            );
        }

        let series: Vec<(Mode, Vec<(f64, f64)>)> = Mode::ALL
            .iter()
            .map(|mode| {
                let points = self
                    .store
                    .series(*mode)
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, v as f64))
                    .collect();
                (*mode, points)
            })
            .collect();

        let datasets = series
            .iter()
            .map(|(mode, points)| {
                Dataset::default()
                    .marker(SeriesStyle::marker(*mode, self.scheme))
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(SeriesStyle::color(*mode, self.scheme)))
                    .data(points)
            })
            .collect();

        // No names on the datasets, so the built-in legend stays hidden.
        // The chart clears cell backgrounds, so it goes to its own layer and
        // only its glyphs land on top of the bands.
        let chart = Chart::new(datasets)
            .x_axis(Axis::default().bounds([0.0, geometry.x_max()]))
            .y_axis(Axis::default().bounds([0.0, y_max]));
        let mut layer = Buffer::empty(area);
        chart.render(area, &mut layer);
        draw_over(frame.buffer_mut(), &layer, area);
    }

    fn render_y_labels(&self, frame: &mut Frame, area: Rect, y_max: f64) {
        let height = area.height as usize;
        let gap = height.saturating_sub(3) / 2;

        let mut labels = vec![format_axis_k(y_max)];
        labels.extend(std::iter::repeat_n(String::new(), gap));
        if height >= 3 {
            labels.push(format_axis_k(y_max / 2.0));
        }
        labels.extend(std::iter::repeat_n(String::new(), height.saturating_sub(labels.len() + 1)));
        if height >= 2 {
            labels.push(format_axis_k(0.0));
        }

        let widget = Paragraph::new(labels.join("\n"))
            .alignment(Alignment::Right)
            .style(Style::default().fg(BaseColors::muted(self.scheme)));
        frame.render_widget(widget, Rect { width: area.width.saturating_sub(1), ..area });
    }

    /// First and last day at the edges, a marker under the selected day
    fn render_x_labels(&self, frame: &mut Frame, area: Rect, geometry: ChartGeometry) {
        let muted = Style::default().fg(BaseColors::muted(self.scheme));
        let (Some(first), Some(last)) = (self.store.get(0), self.store.records().last()) else {
            return;
        };

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        frame.render_widget(
            Paragraph::new(Span::styled(first.date.short_label(), muted)),
            halves[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(last.date.short_label(), muted)).alignment(Alignment::Right),
            halves[1],
        );

        if let Some(index) = self.selected {
            let column = geometry.column_of(index);
            if let Some(cell) = frame.buffer_mut().cell_mut((column, area.y)) {
                cell.set_symbol("▲");
                cell.set_fg(BaseColors::accent(self.scheme));
            }
        }
    }
}

fn legend(scheme: ColorScheme) -> Line<'static> {
    let mut spans = Vec::new();
    for mode in Mode::ALL {
        spans.push(Span::styled(
            "● ",
            Style::default().fg(SeriesStyle::color(mode, scheme)),
        ));
        spans.push(Span::raw(format!("{}  ", mode.label())));
    }
    spans.push(Span::styled(
        "  ",
        Style::default().bg(ChartColors::swatch(Rgba::WEEKEND, scheme)),
    ));
    spans.push(Span::raw(" Weekend  "));
    spans.push(Span::styled(
        "  ",
        Style::default().bg(ChartColors::swatch(Rgba::HOLIDAY, scheme)),
    ));
    spans.push(Span::raw(" Holiday"));
    Line::from(spans)
}
