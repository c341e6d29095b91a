//! Weekend and holiday bands behind the ridership chart
//!
//! Classification is computed once per store index when the chart is built.
//! Band geometry is recomputed on every draw from the chart's current
//! plot area and index-to-pixel mapping, so resizes and zooms stay aligned.

use serde::Serialize;
use tracing::trace;

use crate::calendar::HolidayCalendar;
use crate::context::DashboardContext;
use crate::models::DateKey;

/// Calendar class of one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayClass {
    /// Weekday with no band
    Plain,
    /// Saturday, Sunday, or a holiday falling on either
    Weekend,
    /// Holiday on a weekday
    Holiday,
}

impl DayClass {
    /// Tint painted for this class, `None` for plain days
    pub fn tint(&self) -> Option<Rgba> {
        match self {
            DayClass::Plain => None,
            DayClass::Weekend => Some(Rgba::WEEKEND),
            DayClass::Holiday => Some(Rgba::HOLIDAY),
        }
    }
}

/// Colour with alpha, as the chart canvas takes it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Neutral, light
    pub const WEEKEND: Rgba = Rgba::new(0, 0, 0, 0.03);
    /// Distinct, more saturated
    pub const HOLIDAY: Rgba = Rgba::new(102, 126, 234, 0.08);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composite over an opaque background colour
    pub fn over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

/// Classify one date
///
/// A holiday on a weekday gets the holiday tint; any weekend day, holiday or
/// not, gets the weekend tint. With `holiday_aware` off only weekends count.
pub fn classify(date: &DateKey, calendar: &HolidayCalendar, holiday_aware: bool) -> DayClass {
    let is_weekend = date.is_weekend();
    let is_holiday = holiday_aware && calendar.contains(date);

    if is_holiday && !is_weekend {
        DayClass::Holiday
    } else if is_weekend || is_holiday {
        DayClass::Weekend
    } else {
        DayClass::Plain
    }
}

/// Pixel bounds of the chart's plotting area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// One background rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub index: usize,
    pub class: DayClass,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Band {
    pub fn tint(&self) -> Option<Rgba> {
        self.class.tint()
    }
}

/// Drawing surface that receives bands before the data series
pub trait BandPainter {
    fn fill_band(&mut self, band: &Band, tint: Rgba);
}

/// Paints calendar bands for a chart whose categories are store indices
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    classes: Vec<DayClass>,
    holiday_aware: bool,
}

impl OverlayRenderer {
    /// Classify every index of the context's store
    pub fn new(ctx: &DashboardContext) -> Self {
        let holiday_aware = ctx.settings().holiday_aware;
        Self::from_dates(&ctx.store().dates(), ctx.calendar(), holiday_aware)
    }

    pub fn from_dates(dates: &[DateKey], calendar: &HolidayCalendar, holiday_aware: bool) -> Self {
        let classes = dates
            .iter()
            .map(|d| classify(d, calendar, holiday_aware))
            .collect();
        Self {
            classes,
            holiday_aware,
        }
    }

    pub fn holiday_aware(&self) -> bool {
        self.holiday_aware
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_at(&self, index: usize) -> Option<DayClass> {
        self.classes.get(index).copied()
    }

    pub fn classes(&self) -> &[DayClass] {
        &self.classes
    }

    /// Band rectangles for the current geometry
    ///
    /// Each band is one category wide, centered on `x_to_pixel(i)`, and spans
    /// the full plot height. Plain days produce no band.
    pub fn bands(&self, area: PlotArea, x_to_pixel: impl Fn(usize) -> f64) -> Vec<Band> {
        if self.classes.is_empty() {
            return Vec::new();
        }

        let band_width = area.width() / self.classes.len() as f64;

        self.classes
            .iter()
            .enumerate()
            .filter(|(_, class)| **class != DayClass::Plain)
            .map(|(index, class)| Band {
                index,
                class: *class,
                x: x_to_pixel(index) - band_width / 2.0,
                y: area.top,
                width: band_width,
                height: area.height(),
            })
            .collect()
    }

    /// Hook run before the datasets are drawn; returns the number of bands
    pub fn draw_before_datasets<P: BandPainter + ?Sized>(
        &self,
        area: PlotArea,
        x_to_pixel: impl Fn(usize) -> f64,
        painter: &mut P,
    ) -> usize {
        let bands = self.bands(area, x_to_pixel);
        for band in &bands {
            if let Some(tint) = band.tint() {
                painter.fill_band(band, tint);
            }
        }
        trace!(bands = bands.len(), width = area.width(), "Overlay bands painted");
        bands.len()
    }
}
