//! The single mutable record the timer transitions operate on.

use core::fmt;

use crate::display::{DISPLAY_MODE_COUNT, DisplayMode};

/// Screen the device is currently showing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TimerState {
    #[default]
    SelectPreset,
    SetCustomHours,
    SetCustomMinutes,
    Running,
    Paused,
    Completed,
    ConfirmExit,
}

impl TimerState {
    /// Every state, in declaration order.
    pub const ALL: [TimerState; 7] = [
        TimerState::SelectPreset,
        TimerState::SetCustomHours,
        TimerState::SetCustomMinutes,
        TimerState::Running,
        TimerState::Paused,
        TimerState::Completed,
        TimerState::ConfirmExit,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TimerState::SelectPreset => "select-preset",
            TimerState::SetCustomHours => "set-custom-hours",
            TimerState::SetCustomMinutes => "set-custom-minutes",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Completed => "completed",
            TimerState::ConfirmExit => "confirm-exit",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timer state plus the values every screen reads.
///
/// Owned by the host loop and handed to transitions by `&mut`; the fields stay
/// public so renderers and settings code can read them without accessors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerContext {
    pub state: TimerState,
    pub display_mode: DisplayMode,
    pub display_mode_enabled: [bool; DISPLAY_MODE_COUNT],
    /// Never exceeds `total_seconds`.
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    /// Preset index, or [`crate::time::CUSTOM_PRESET_INDEX`] for custom entry.
    pub selected_preset: u32,
    pub custom_hours: u32,
    pub custom_minutes: u32,
    pub hide_time_text: bool,
}

impl TimerContext {
    pub const DEFAULT_CUSTOM_MINUTES: u32 = 5;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TimerState::SelectPreset,
            display_mode: DisplayMode::Text,
            display_mode_enabled: [true; DISPLAY_MODE_COUNT],
            remaining_seconds: 0,
            total_seconds: 0,
            selected_preset: 0,
            custom_hours: 0,
            custom_minutes: Self::DEFAULT_CUSTOM_MINUTES,
            hide_time_text: false,
        }
    }

    /// Returns `true` while a countdown is in progress, paused or not.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    /// Returns `true` when a graphical face replaces the plain text layer.
    #[must_use]
    pub const fn shows_canvas(&self) -> bool {
        self.is_active() && !matches!(self.display_mode, DisplayMode::Text)
    }

    /// Returns `true` if `mode` is part of the display-mode rotation.
    #[must_use]
    pub const fn is_mode_enabled(&self, mode: DisplayMode) -> bool {
        self.display_mode_enabled[mode.index()]
    }
}

impl Default for TimerContext {
    fn default() -> Self {
        Self::new()
    }
}
