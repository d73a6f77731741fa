//! User preferences and their bridge to the timer context.
//!
//! Settings are loaded once at startup, repaired with [`TimerSettings::validate`],
//! and pushed into the context. The context feeds display preferences back
//! before the settings are saved again.

pub mod persist;

use crate::context::TimerContext;
use crate::display::palette::{Palette, default_palettes};
use crate::display::{DISPLAY_MODE_COUNT, DisplayMode};
use crate::time::CUSTOM_PRESET_INDEX;

pub use persist::{
    LEGACY_VERSION, MemoryStore, PersistError, SETTINGS_BLOB_LEN, SETTINGS_VERSION, SettingsStore,
    StorageKey, load_settings, save_settings,
};

/// Custom duration used when the stored one is missing or invalid.
pub const DEFAULT_CUSTOM_MINUTES: u16 = 5;
/// Longest custom duration that can be stored (24 hours).
pub const MAX_DEFAULT_CUSTOM_MINUTES: u16 = 24 * 60;

/// Persisted preferences.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerSettings {
    /// Raw display-mode index. Only trusted after [`TimerSettings::validate`].
    pub default_display_mode: u8,
    pub visualization_enabled: [bool; DISPLAY_MODE_COUNT],
    pub visualization_colors: [Palette; DISPLAY_MODE_COUNT],
    /// Preset index, or the custom slot.
    pub default_preset_index: u8,
    pub default_custom_minutes: u16,
    pub hide_time_text: bool,
}

impl TimerSettings {
    /// Display mode named by the stored index, falling back to text.
    #[must_use]
    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_index(usize::from(self.default_display_mode)).unwrap_or_default()
    }

    /// Repairs every field in place so the settings can be applied safely.
    pub fn validate(&mut self) {
        if usize::from(self.default_display_mode) >= DISPLAY_MODE_COUNT {
            self.default_display_mode = mode_byte(DisplayMode::Text);
        }

        if !self.visualization_enabled.iter().any(|enabled| *enabled) {
            self.visualization_enabled = [true; DISPLAY_MODE_COUNT];
        }

        if !self.visualization_enabled[usize::from(self.default_display_mode)] {
            self.default_display_mode = DisplayMode::ALL
                .iter()
                .find(|mode| self.visualization_enabled[mode.index()])
                .map_or(self.default_display_mode, |first| mode_byte(*first));
        }

        for (palette, mode) in self.visualization_colors.iter_mut().zip(DisplayMode::ALL) {
            if !palette.is_legible() {
                *palette = Palette::default_for(mode);
            }
        }

        if u32::from(self.default_preset_index) > CUSTOM_PRESET_INDEX {
            self.default_preset_index = 0;
        }

        if self.default_custom_minutes < 1 {
            self.default_custom_minutes = DEFAULT_CUSTOM_MINUTES;
        } else if self.default_custom_minutes > MAX_DEFAULT_CUSTOM_MINUTES {
            self.default_custom_minutes = MAX_DEFAULT_CUSTOM_MINUTES;
        }
    }

    /// Seeds the context with the stored defaults.
    pub fn apply_to_context(&self, ctx: &mut TimerContext) {
        ctx.display_mode = self.display_mode();
        ctx.display_mode_enabled = self.visualization_enabled;
        ctx.selected_preset = u32::from(self.default_preset_index);
        ctx.hide_time_text = self.hide_time_text;

        if ctx.selected_preset == CUSTOM_PRESET_INDEX {
            let minutes = u32::from(self.default_custom_minutes);
            // A full 24 hours does not fit the hour picker.
            ctx.custom_hours = (minutes / 60).min(crate::time::MAX_CUSTOM_HOURS);
            ctx.custom_minutes = minutes % 60;
        }
    }

    /// Copies the display preferences the user changed while the timer ran.
    pub fn update_from_context(&mut self, ctx: &TimerContext) {
        self.default_display_mode = mode_byte(ctx.display_mode);
        self.hide_time_text = ctx.hide_time_text;
    }

    /// Stores the current preset selection and custom entry as the new defaults.
    pub fn remember_selection(&mut self, ctx: &TimerContext) {
        self.default_preset_index = u8::try_from(ctx.selected_preset).unwrap_or(0);
        let minutes = ctx
            .custom_hours
            .saturating_mul(60)
            .saturating_add(ctx.custom_minutes);
        self.default_custom_minutes = u16::try_from(minutes).unwrap_or(MAX_DEFAULT_CUSTOM_MINUTES);
    }

    /// Enables or disables `mode` in the rotation.
    pub fn set_mode_enabled(&mut self, mode: DisplayMode, enabled: bool) {
        self.visualization_enabled[mode.index()] = enabled;
    }

    /// Palette configured for `mode`.
    #[must_use]
    pub fn palette(&self, mode: DisplayMode) -> Palette {
        self.visualization_colors[mode.index()]
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_display_mode: mode_byte(DisplayMode::Text),
            visualization_enabled: [true; DISPLAY_MODE_COUNT],
            visualization_colors: default_palettes(),
            default_preset_index: 0,
            default_custom_minutes: DEFAULT_CUSTOM_MINUTES,
            hide_time_text: false,
        }
    }
}

// The catalog has fewer than 256 modes.
fn mode_byte(mode: DisplayMode) -> u8 {
    mode as u8
}
