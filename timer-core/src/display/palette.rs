//! Four-color palettes stored per display mode.

use super::{DISPLAY_MODE_COUNT, DisplayMode};

/// 8-bit ARGB2222 color: two bits each of alpha, red, green, and blue.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Color = Color(0xC0);
    pub const WHITE: Color = Color(0xFF);
    pub const LIGHT_GRAY: Color = Color(0xEA);
    pub const DARK_GRAY: Color = Color(0xD5);
    pub const VIVID_CERULEAN: Color = Color(0xCB);
    pub const CYAN: Color = Color(0xCF);
    pub const MELON: Color = Color(0xFA);
    pub const RED: Color = Color(0xF0);
    pub const RAJAH: Color = Color(0xF9);
    pub const MINT_GREEN: Color = Color(0xEE);
    pub const ORANGE: Color = Color(0xF4);
    pub const YELLOW: Color = Color(0xFC);
    pub const VIVID_VIOLET: Color = Color(0xE7);
    pub const BRIGHT_GREEN: Color = Color(0xDC);
    pub const GREEN: Color = Color(0xCC);
    pub const DARK_GREEN: Color = Color(0xC4);
    pub const MAGENTA: Color = Color(0xF3);
    pub const CHROME_YELLOW: Color = Color(0xF8);

    /// Raw ARGB2222 byte as persisted.
    #[must_use]
    pub const fn argb(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        Self::expand(self.0 >> 4)
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        Self::expand(self.0 >> 2)
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        Self::expand(self.0)
    }

    /// 8-bit RGB triple for hosts that draw in true color.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r(), self.g(), self.b())
    }

    const fn expand(channel: u8) -> u8 {
        (channel & 0b11) * 0x55
    }
}

/// Colors used by one visualization.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
}

impl Palette {
    #[must_use]
    pub const fn new(background: Color, primary: Color, secondary: Color, accent: Color) -> Self {
        Self {
            background,
            primary,
            secondary,
            accent,
        }
    }

    /// Palette shipped for `mode`.
    #[must_use]
    pub const fn default_for(mode: DisplayMode) -> Self {
        let (primary, secondary, accent) = match mode {
            DisplayMode::Text => (Color::WHITE, Color::LIGHT_GRAY, Color::WHITE),
            DisplayMode::Blocks | DisplayMode::VerticalBlocks => {
                (Color::VIVID_CERULEAN, Color::DARK_GRAY, Color::VIVID_CERULEAN)
            }
            DisplayMode::Clock => (Color::MELON, Color::WHITE, Color::RED),
            DisplayMode::Ring => (Color::CYAN, Color::DARK_GRAY, Color::CYAN),
            DisplayMode::Hourglass => (Color::RAJAH, Color::WHITE, Color::RAJAH),
            DisplayMode::Binary => (Color::MINT_GREEN, Color::DARK_GRAY, Color::MINT_GREEN),
            DisplayMode::Radial => (Color::RED, Color::ORANGE, Color::YELLOW),
            DisplayMode::Hex => (Color::VIVID_VIOLET, Color::LIGHT_GRAY, Color::VIVID_VIOLET),
            DisplayMode::Matrix => (Color::BRIGHT_GREEN, Color::GREEN, Color::DARK_GREEN),
            DisplayMode::WaterLevel => (Color::VIVID_CERULEAN, Color::WHITE, Color::VIVID_CERULEAN),
            DisplayMode::SpiralOut | DisplayMode::SpiralIn => {
                (Color::MAGENTA, Color::DARK_GRAY, Color::MAGENTA)
            }
            DisplayMode::PercentElapsed | DisplayMode::PercentRemaining => {
                (Color::CHROME_YELLOW, Color::DARK_GRAY, Color::CHROME_YELLOW)
            }
        };
        Self::new(Color::BLACK, primary, secondary, accent)
    }

    /// A palette whose primary color matches its background renders nothing.
    #[must_use]
    pub fn is_legible(&self) -> bool {
        self.background != self.primary
    }
}

/// Built-in palettes for every mode, in catalog order.
#[must_use]
pub fn default_palettes() -> [Palette; DISPLAY_MODE_COUNT] {
    DisplayMode::ALL.map(Palette::default_for)
}
