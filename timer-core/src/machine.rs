//! Timer transitions.
//!
//! Each operation mutates the [`TimerContext`] in place and returns the
//! [`Effects`] the host must carry out. Inputs that mean nothing in the current
//! state return [`Effects::none`] and leave the context untouched.

use crate::context::{TimerContext, TimerState};
use crate::display::{DISPLAY_MODE_COUNT, DisplayMode};
use crate::effects::Effects;
use crate::input::{Button, Input};
use crate::time::{
    CUSTOM_PRESET_INDEX, MAX_CUSTOM_HOURS, MAX_CUSTOM_MINUTES, preset_minutes, wrap_decrement,
    wrap_increment,
};

const SECONDS_PER_MINUTE: u32 = 60;
const MINUTES_PER_HOUR: u32 = 60;

impl TimerContext {
    /// Dispatches any input through the matching handler.
    pub fn handle(&mut self, input: Input) -> Effects {
        match input {
            Input::Tick => self.tick(),
            Input::Press(Button::Select) => self.handle_select(),
            Input::Press(Button::Up) => self.handle_up(),
            Input::Press(Button::Down) => self.handle_down(),
            Input::Press(Button::Back) => self.handle_back(),
            Input::LongPress(Button::Select) => self.handle_select_long(),
            Input::LongPress(Button::Up) => self.handle_up_long(),
            Input::LongPress(Button::Down | Button::Back) => Effects::none(),
        }
    }

    /// Starts a countdown of `minutes`. Non-positive durations are ignored.
    pub fn start(&mut self, minutes: i32) -> Effects {
        let Ok(minutes) = u32::try_from(minutes) else {
            return Effects::none();
        };
        if minutes == 0 {
            return Effects::none();
        }

        self.total_seconds = minutes.saturating_mul(SECONDS_PER_MINUTE);
        self.remaining_seconds = self.total_seconds;
        self.state = TimerState::Running;

        Effects {
            subscribe_tick: true,
            update_display: true,
            init_hourglass: true,
            init_matrix: true,
            ..Effects::none()
        }
    }

    /// Counts one second down while running.
    pub fn tick(&mut self) -> Effects {
        if self.state != TimerState::Running {
            return Effects::none();
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        let mut effects = Effects::redraw();

        if self.remaining_seconds == 0 {
            self.state = TimerState::Completed;
            effects.start_vibration = true;
        }
        effects
    }

    pub fn pause(&mut self) -> Effects {
        if self.state != TimerState::Running {
            return Effects::none();
        }
        self.state = TimerState::Paused;
        Effects::redraw()
    }

    pub fn resume(&mut self) -> Effects {
        if self.state != TimerState::Paused {
            return Effects::none();
        }
        self.state = TimerState::Running;
        Effects::redraw()
    }

    /// Abandons the countdown and returns to preset selection.
    pub fn cancel(&mut self) -> Effects {
        self.state = TimerState::SelectPreset;
        self.remaining_seconds = 0;

        Effects {
            unsubscribe_tick: true,
            update_display: true,
            ..Effects::none()
        }
    }

    /// Runs the last duration again from the top.
    pub fn restart(&mut self) -> Effects {
        let was_completed = self.state == TimerState::Completed;

        self.remaining_seconds = self.total_seconds;
        self.state = TimerState::Running;

        Effects {
            stop_vibration: was_completed,
            update_display: true,
            init_hourglass: true,
            init_matrix: true,
            ..Effects::none()
        }
    }

    /// Silences the completion alert and returns to preset selection.
    pub fn dismiss_completion(&mut self) -> Effects {
        self.state = TimerState::SelectPreset;

        Effects {
            stop_vibration: true,
            unsubscribe_tick: true,
            update_display: true,
            ..Effects::none()
        }
    }

    /// Moves to the next enabled display mode, wrapping around the catalog.
    ///
    /// An enabled vector with no modes set is repaired to all-enabled first.
    pub fn cycle_display_mode(&mut self) -> Effects {
        if !self.display_mode_enabled.iter().any(|enabled| *enabled) {
            self.display_mode_enabled = [true; DISPLAY_MODE_COUNT];
        }

        let current = self.display_mode.index();
        let next = (1..=DISPLAY_MODE_COUNT)
            .map(|step| (current + step) % DISPLAY_MODE_COUNT)
            .find(|&index| self.display_mode_enabled[index])
            .and_then(DisplayMode::from_index);
        if let Some(mode) = next {
            self.display_mode = mode;
        }

        Effects {
            vibrate_short: true,
            update_display: true,
            ..Effects::none()
        }
    }

    pub fn toggle_hide_time_text(&mut self) -> Effects {
        self.hide_time_text = !self.hide_time_text;

        Effects {
            vibrate_short: true,
            update_display: true,
            ..Effects::none()
        }
    }

    pub fn handle_select(&mut self) -> Effects {
        match self.state {
            TimerState::SelectPreset => match preset_minutes(self.selected_preset) {
                Some(minutes) => self.start(minutes_arg(minutes)),
                None => {
                    self.state = TimerState::SetCustomHours;
                    Effects::redraw()
                }
            },
            TimerState::SetCustomHours => {
                self.state = TimerState::SetCustomMinutes;
                Effects::redraw()
            }
            TimerState::SetCustomMinutes => {
                let minutes = self
                    .custom_hours
                    .saturating_mul(MINUTES_PER_HOUR)
                    .saturating_add(self.custom_minutes);
                self.start(minutes_arg(minutes))
            }
            TimerState::Completed => self.restart(),
            TimerState::Running | TimerState::Paused | TimerState::ConfirmExit => Effects::none(),
        }
    }

    pub fn handle_select_long(&mut self) -> Effects {
        match self.state {
            TimerState::SelectPreset | TimerState::Running | TimerState::Paused => {
                self.cycle_display_mode()
            }
            _ => Effects::none(),
        }
    }

    pub fn handle_up(&mut self) -> Effects {
        match self.state {
            TimerState::SelectPreset => {
                self.selected_preset = wrap_decrement(self.selected_preset, CUSTOM_PRESET_INDEX);
                Effects::redraw()
            }
            TimerState::SetCustomHours => {
                self.custom_hours = wrap_increment(self.custom_hours, MAX_CUSTOM_HOURS);
                Effects::redraw()
            }
            TimerState::SetCustomMinutes => {
                self.custom_minutes = wrap_increment(self.custom_minutes, MAX_CUSTOM_MINUTES);
                Effects::redraw()
            }
            TimerState::Paused | TimerState::Completed => self.restart(),
            TimerState::ConfirmExit => Effects {
                pop_window: true,
                ..self.cancel()
            },
            TimerState::Running => Effects::none(),
        }
    }

    pub fn handle_up_long(&mut self) -> Effects {
        if self.is_active() {
            self.toggle_hide_time_text()
        } else {
            Effects::none()
        }
    }

    pub fn handle_down(&mut self) -> Effects {
        match self.state {
            TimerState::SelectPreset => {
                self.selected_preset = wrap_increment(self.selected_preset, CUSTOM_PRESET_INDEX);
                Effects::redraw()
            }
            TimerState::SetCustomHours => {
                self.custom_hours = wrap_decrement(self.custom_hours, MAX_CUSTOM_HOURS);
                Effects::redraw()
            }
            TimerState::SetCustomMinutes => {
                self.custom_minutes = wrap_decrement(self.custom_minutes, MAX_CUSTOM_MINUTES);
                Effects::redraw()
            }
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Completed => self.dismiss_completion(),
            TimerState::ConfirmExit => {
                self.state = TimerState::Paused;
                Effects::redraw()
            }
        }
    }

    pub fn handle_back(&mut self) -> Effects {
        match self.state {
            TimerState::Running | TimerState::Paused => {
                self.state = TimerState::ConfirmExit;
                Effects::redraw()
            }
            TimerState::SetCustomHours | TimerState::SetCustomMinutes => {
                self.state = TimerState::SelectPreset;
                Effects::redraw()
            }
            TimerState::ConfirmExit => {
                self.state = TimerState::Paused;
                Effects::redraw()
            }
            TimerState::Completed => self.dismiss_completion(),
            TimerState::SelectPreset => Effects {
                pop_window: true,
                ..Effects::none()
            },
        }
    }
}

// Durations above `i32::MAX` minutes saturate rather than wrap negative.
fn minutes_arg(minutes: u32) -> i32 {
    i32::try_from(minutes).unwrap_or(i32::MAX)
}
