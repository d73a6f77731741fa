//! Display-mode catalog and the read-only projection renderers consume.
//!
//! Renderers never see the mutable [`TimerContext`]; they receive a
//! [`DisplayContext`] snapshot plus the palette configured for the active mode.

pub mod animation;
pub mod palette;
pub mod screen;

use core::fmt;

use crate::context::{TimerContext, TimerState};

pub use animation::{AnimationState, HourglassState, MatrixState};
pub use palette::{Color, Palette};
pub use screen::{ScreenText, TextTone};

/// Number of visualization kinds (`N`).
pub const DISPLAY_MODE_COUNT: usize = 15;

/// Visualization kinds, ordered by their persisted index.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum DisplayMode {
    #[default]
    Text = 0,
    Blocks,
    VerticalBlocks,
    Clock,
    Ring,
    Hourglass,
    Binary,
    Radial,
    Hex,
    Matrix,
    WaterLevel,
    SpiralOut,
    SpiralIn,
    PercentElapsed,
    PercentRemaining,
}

impl DisplayMode {
    /// Every mode in index order.
    pub const ALL: [DisplayMode; DISPLAY_MODE_COUNT] = [
        DisplayMode::Text,
        DisplayMode::Blocks,
        DisplayMode::VerticalBlocks,
        DisplayMode::Clock,
        DisplayMode::Ring,
        DisplayMode::Hourglass,
        DisplayMode::Binary,
        DisplayMode::Radial,
        DisplayMode::Hex,
        DisplayMode::Matrix,
        DisplayMode::WaterLevel,
        DisplayMode::SpiralOut,
        DisplayMode::SpiralIn,
        DisplayMode::PercentElapsed,
        DisplayMode::PercentRemaining,
    ];

    /// Position of the mode in [`DisplayMode::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a mode by index, returning `None` past the catalog.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < DISPLAY_MODE_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Human readable label shown in menus and the emulator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DisplayMode::Text => "Text",
            DisplayMode::Blocks => "Blocks",
            DisplayMode::VerticalBlocks => "Vertical Blocks",
            DisplayMode::Clock => "Clock",
            DisplayMode::Ring => "Ring",
            DisplayMode::Hourglass => "Hourglass",
            DisplayMode::Binary => "Binary",
            DisplayMode::Radial => "Radial",
            DisplayMode::Hex => "Hex",
            DisplayMode::Matrix => "Matrix",
            DisplayMode::WaterLevel => "Water Level",
            DisplayMode::SpiralOut => "Spiral Out",
            DisplayMode::SpiralIn => "Spiral In",
            DisplayMode::PercentElapsed => "% Elapsed",
            DisplayMode::PercentRemaining => "% Remaining",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of the values a renderer needs for one frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayContext {
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub state: TimerState,
    pub mode: DisplayMode,
    pub hide_time_text: bool,
    pub palette: Palette,
}

impl DisplayContext {
    /// Projects the timer context using the palette configured for its mode.
    #[must_use]
    pub fn project(ctx: &TimerContext, palettes: &[Palette; DISPLAY_MODE_COUNT]) -> Self {
        Self {
            remaining_seconds: ctx.remaining_seconds,
            total_seconds: ctx.total_seconds,
            state: ctx.state,
            mode: ctx.display_mode,
            hide_time_text: ctx.hide_time_text,
            palette: palettes[ctx.display_mode.index()],
        }
    }

    /// Seconds already counted down.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.total_seconds.saturating_sub(self.remaining_seconds)
    }

    /// Whether the time label should be drawn on top of the face.
    #[must_use]
    pub const fn shows_time_text(&self) -> bool {
        !self.hide_time_text || matches!(self.mode, DisplayMode::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn index_round_trips_through_catalog() {
        for (index, mode) in DisplayMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), index);
            assert_eq!(DisplayMode::from_index(index), Some(*mode));
        }
        assert_eq!(DisplayMode::from_index(DISPLAY_MODE_COUNT), None);
    }

    #[test]
    fn names_match_menu_labels() {
        assert_eq!(DisplayMode::VerticalBlocks.name(), "Vertical Blocks");
        let mut label = heapless::String::<32>::new();
        write!(label, "{}", DisplayMode::PercentRemaining).unwrap();
        assert_eq!(label.as_str(), "% Remaining");
    }

    #[test]
    fn projection_carries_mode_palette() {
        let mut ctx = TimerContext::new();
        ctx.display_mode = DisplayMode::Matrix;
        ctx.total_seconds = 120;
        ctx.remaining_seconds = 45;
        let palettes = palette::default_palettes();

        let view = DisplayContext::project(&ctx, &palettes);
        assert_eq!(view.palette, palettes[DisplayMode::Matrix.index()]);
        assert_eq!(view.elapsed_seconds(), 75);
        assert!(view.shows_time_text());
    }

    #[test]
    fn text_mode_always_shows_time() {
        let mut ctx = TimerContext::new();
        ctx.hide_time_text = true;
        let palettes = palette::default_palettes();

        assert!(DisplayContext::project(&ctx, &palettes).shows_time_text());
        ctx.display_mode = DisplayMode::Ring;
        assert!(!DisplayContext::project(&ctx, &palettes).shows_time_text());
    }
}
