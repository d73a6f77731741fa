//! Title, time, and hint labels shown around the face for each state.

use core::fmt::Write;

use heapless::String;

use super::DisplayMode;
use crate::context::{TimerContext, TimerState};
use crate::time::{TimeText, format_adaptive, format_preset};

/// Remaining seconds at or below which the running time is drawn in the low tone.
pub const LOW_TIME_SECONDS: u32 = 10;

/// Hint text buffer.
pub type HintText = String<64>;

/// Color role of the time label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextTone {
    Normal,
    Running,
    Low,
    Paused,
    Completed,
}

/// Labels for one frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScreenText {
    /// Empty while running.
    pub title: &'static str,
    pub time: TimeText,
    pub hint: HintText,
    pub tone: TextTone,
}

impl ScreenText {
    #[must_use]
    pub fn for_context(ctx: &TimerContext) -> Self {
        let mut time = TimeText::new();
        let mut hint = HintText::new();

        let (title, tone) = match ctx.state {
            TimerState::SelectPreset => {
                time = format_preset(ctx.selected_preset);
                let _ = write!(
                    hint,
                    "UP/DOWN: Change\nSELECT: Start\nHold: {}",
                    ctx.display_mode
                );
                ("Select Time", TextTone::Normal)
            }
            TimerState::SetCustomHours => {
                let _ = write!(time, "{} hr", ctx.custom_hours);
                let _ = hint.push_str("UP/DOWN: Adjust\nSELECT: Next");
                ("Set Hours", TextTone::Normal)
            }
            TimerState::SetCustomMinutes => {
                let _ = write!(time, "{} min", ctx.custom_minutes);
                let _ = hint.push_str("UP/DOWN: Adjust\nSELECT: Start");
                ("Set Minutes", TextTone::Normal)
            }
            TimerState::Running => {
                time = remaining_text(ctx);
                let tone = if ctx.remaining_seconds <= LOW_TIME_SECONDS {
                    TextTone::Low
                } else {
                    TextTone::Running
                };
                ("", tone)
            }
            TimerState::Paused => {
                time = remaining_text(ctx);
                let _ = hint.push_str("DOWN: Resume\nUP: Restart\nBACK: Exit");
                ("Paused", TextTone::Paused)
            }
            TimerState::Completed => {
                let _ = time.push_str("0:00");
                let _ = hint.push_str("SELECT/UP: Restart\nDOWN/BACK: Done");
                ("Complete!", TextTone::Completed)
            }
            TimerState::ConfirmExit => {
                let _ = time.push_str("Exit?");
                let _ = hint.push_str("UP: Yes, exit\nDOWN: No, stay");
                ("Timer Active!", TextTone::Paused)
            }
        };

        Self {
            title,
            time,
            hint,
            tone,
        }
    }

    /// Whether the title and hint are drawn over a running face.
    #[must_use]
    pub const fn shows_labels(ctx: &TimerContext) -> bool {
        !(matches!(ctx.state, TimerState::Running) && !matches!(ctx.display_mode, DisplayMode::Text))
    }
}

fn remaining_text(ctx: &TimerContext) -> TimeText {
    format_adaptive(i32::try_from(ctx.remaining_seconds).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Button, Input};

    #[test]
    fn selection_screen_names_preset_and_mode() {
        let mut ctx = TimerContext::new();
        ctx.selected_preset = 2;
        ctx.display_mode = DisplayMode::Ring;

        let screen = ScreenText::for_context(&ctx);
        assert_eq!(screen.title, "Select Time");
        assert_eq!(screen.time.as_str(), "15 min");
        assert!(screen.hint.ends_with("Hold: Ring"));
    }

    #[test]
    fn running_tone_drops_to_low() {
        let mut ctx = TimerContext::new();
        let _ = ctx.start(1);
        assert_eq!(ScreenText::for_context(&ctx).tone, TextTone::Running);
        assert_eq!(ScreenText::for_context(&ctx).time.as_str(), "1:00");

        ctx.remaining_seconds = 10;
        let screen = ScreenText::for_context(&ctx);
        assert_eq!(screen.tone, TextTone::Low);
        assert_eq!(screen.title, "");
        assert!(screen.hint.is_empty());
    }

    #[test]
    fn confirm_exit_asks_before_leaving() {
        let mut ctx = TimerContext::new();
        ctx.state = TimerState::ConfirmExit;
        let screen = ScreenText::for_context(&ctx);
        assert_eq!(screen.title, "Timer Active!");
        assert_eq!(screen.time.as_str(), "Exit?");
    }

    fn named_buttons(label: &str) -> Option<heapless::Vec<Button, 4>> {
        let mut buttons = heapless::Vec::new();
        for name in label.split('/') {
            let button = match name {
                "SELECT" => Button::Select,
                "UP" => Button::Up,
                "DOWN" => Button::Down,
                "BACK" => Button::Back,
                _ => return None,
            };
            buttons.push(button).ok()?;
        }
        Some(buttons)
    }

    #[test]
    fn every_hinted_button_acts() {
        for state in TimerState::ALL {
            let mut ctx = TimerContext::new();
            let _ = ctx.start(1);
            ctx.remaining_seconds = 30;
            ctx.state = state;

            let screen = ScreenText::for_context(&ctx);
            for line in screen.hint.lines() {
                let (label, _) = line.split_once(": ").unwrap();
                let Some(buttons) = named_buttons(label) else {
                    continue;
                };
                for button in buttons {
                    let mut pressed = ctx;
                    let effects = pressed.handle(Input::Press(button));
                    assert!(!effects.is_none(), "{state}: {line:?} does nothing for {button}");
                }
            }
        }
    }

    #[test]
    fn paused_hint_matches_dispatch() {
        let mut ctx = TimerContext::new();
        let _ = ctx.start(5);
        let _ = ctx.handle(Input::Press(Button::Down));
        assert_eq!(ctx.state, TimerState::Paused);

        let screen = ScreenText::for_context(&ctx);
        assert_eq!(screen.hint.as_str(), "DOWN: Resume\nUP: Restart\nBACK: Exit");

        let mut resumed = ctx;
        let _ = resumed.handle(Input::Press(Button::Down));
        assert_eq!(resumed.state, TimerState::Running);

        let mut leaving = ctx;
        let _ = leaving.handle(Input::Press(Button::Back));
        assert_eq!(leaving.state, TimerState::ConfirmExit);

        assert!(ctx.handle(Input::Press(Button::Select)).is_none());
        assert_eq!(ctx.state, TimerState::Paused);
    }

    #[test]
    fn completed_hint_leaves_out_long_presses() {
        let mut ctx = TimerContext::new();
        let _ = ctx.start(1);
        ctx.state = TimerState::Completed;
        ctx.remaining_seconds = 0;

        let screen = ScreenText::for_context(&ctx);
        assert!(!screen.hint.contains("any"));
        assert!(ctx.handle(Input::LongPress(Button::Select)).is_none());
        assert!(ctx.handle(Input::LongPress(Button::Up)).is_none());
    }

    #[test]
    fn labels_hidden_only_over_running_faces() {
        let mut ctx = TimerContext::new();
        ctx.state = TimerState::Running;
        assert!(ScreenText::shows_labels(&ctx));
        ctx.display_mode = DisplayMode::Clock;
        assert!(!ScreenText::shows_labels(&ctx));
        ctx.state = TimerState::Paused;
        assert!(ScreenText::shows_labels(&ctx));
    }
}
