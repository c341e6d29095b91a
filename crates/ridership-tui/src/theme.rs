//! Colour system for the ridership TUI
//!
//! Series, change and band colours come from the core types so the terminal
//! chart matches the web palette:
//! - 🔵 Bus, 🟢 Metro, 🟠 Minibus, 🟣 Cable
//! - 🟢 Up, 🔴 Down, ⚪ Flat
//!
//! `Monochrome` drops every colour (for `--no-color` and dumb terminals) and
//! tells the series apart by marker instead.

use ratatui::style::Color;
use ratatui::symbols::Marker;
use ridership_core::dispatcher::ChangeLabel;
use ridership_core::overlay::Rgba;
use ridership_core::Mode;

/// Rendering colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// 24-bit colour (default)
    #[default]
    Truecolor,
    /// No colour at all
    Monochrome,
}

impl ColorScheme {
    pub fn from_no_color(no_color: bool) -> Self {
        if no_color {
            ColorScheme::Monochrome
        } else {
            ColorScheme::Truecolor
        }
    }
}

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Series colour per transport mode
pub struct SeriesStyle;

impl SeriesStyle {
    pub fn color(mode: Mode, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Truecolor => rgb(mode.rgb()),
            ColorScheme::Monochrome => Color::Reset,
        }
    }

    pub fn marker(mode: Mode, scheme: ColorScheme) -> Marker {
        match scheme {
            ColorScheme::Truecolor => Marker::Braille,
            ColorScheme::Monochrome => match mode {
                Mode::Bus => Marker::Braille,
                Mode::Metro => Marker::Dot,
                Mode::Minibus => Marker::Block,
                Mode::Cable => Marker::Bar,
            },
        }
    }
}

/// Change label colour
pub fn change_color(label: &ChangeLabel, scheme: ColorScheme) -> Color {
    match scheme {
        ColorScheme::Truecolor => rgb(label.rgb),
        ColorScheme::Monochrome => Color::Reset,
    }
}

/// Chart surface colours
pub struct ChartColors;

impl ChartColors {
    /// Background the band tints are composited over
    pub const SURFACE: (u8, u8, u8) = (255, 255, 255);

    pub fn surface(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Truecolor => rgb(Self::SURFACE),
            ColorScheme::Monochrome => Color::Reset,
        }
    }

    /// Cell background for a band tint, `None` when bands are not drawn
    pub fn band(tint: Rgba, scheme: ColorScheme) -> Option<Color> {
        match scheme {
            ColorScheme::Truecolor => Some(rgb(tint.over(Self::SURFACE))),
            ColorScheme::Monochrome => None,
        }
    }

    /// Legend swatch, drawn stronger than the band so it stays readable
    pub fn swatch(tint: Rgba, scheme: ColorScheme) -> Color {
        let strong = Rgba::new(tint.r, tint.g, tint.b, (tint.a * 3.0).min(1.0));
        Self::band(strong, scheme).unwrap_or(Color::Reset)
    }
}

/// Gradient-start colour of the total card
pub const TOTAL_CARD_BG: (u8, u8, u8) = (0x66, 0x7e, 0xea);

/// Base colour helpers for backgrounds and foregrounds
pub struct BaseColors;

impl BaseColors {
    pub fn total_card_bg(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Truecolor => rgb(TOTAL_CARD_BG),
            ColorScheme::Monochrome => Color::Reset,
        }
    }

    pub fn fg(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Truecolor => Color::Black,
            ColorScheme::Monochrome => Color::Reset,
        }
    }

    /// Muted/secondary text color
    pub fn muted(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Truecolor => Color::DarkGray,
            ColorScheme::Monochrome => Color::Reset,
        }
    }

    pub fn accent(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Truecolor => Color::Cyan,
            ColorScheme::Monochrome => Color::Reset,
        }
    }
}
