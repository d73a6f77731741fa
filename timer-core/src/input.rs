//! Button identities and press classification.

use core::fmt;
use core::time::Duration;

/// The four physical buttons.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    Select,
    Up,
    Down,
    Back,
}

impl Button {
    /// Only Select and Up have a long-press meaning.
    #[must_use]
    pub const fn supports_long_press(self) -> bool {
        matches!(self, Button::Select | Button::Up)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Button::Select => "select",
            Button::Up => "up",
            Button::Down => "down",
            Button::Back => "back",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every event the state machine consumes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Input {
    /// One second of wall time elapsed while ticks are subscribed.
    Tick,
    Press(Button),
    LongPress(Button),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Tick => f.write_str("tick"),
            Input::Press(button) => write!(f, "{button}"),
            Input::LongPress(button) => write!(f, "{button} long"),
        }
    }
}

/// Outcome of measuring how long a button stayed down.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PressKind {
    Short,
    Long,
}

/// Hold timing used to tell short presses, long presses, and contact bounce apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongPressConfig {
    /// Holds at or beyond this length count as a long press.
    pub threshold: Duration,
    /// Holds shorter than this are treated as bounce and dropped.
    pub debounce: Duration,
}

impl LongPressConfig {
    pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(500);
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(20);

    #[must_use]
    pub const fn new(threshold: Duration, debounce: Duration) -> Self {
        Self {
            threshold,
            debounce,
        }
    }

    /// Classifies a completed hold of `held`. Returns `None` for bounce.
    #[must_use]
    pub fn classify_hold(&self, held: Duration) -> Option<PressKind> {
        if held < self.debounce {
            None
        } else if held >= self.threshold {
            Some(PressKind::Long)
        } else {
            Some(PressKind::Short)
        }
    }

    /// Builds the input for `button` held for `held`.
    ///
    /// Long holds on buttons without a long-press meaning fall back to a plain press.
    #[must_use]
    pub fn input_for(&self, button: Button, held: Duration) -> Option<Input> {
        match self.classify_hold(held)? {
            PressKind::Long if button.supports_long_press() => Some(Input::LongPress(button)),
            PressKind::Long | PressKind::Short => Some(Input::Press(button)),
        }
    }
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD, Self::DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_hold_uses_threshold_and_debounce() {
        let config = LongPressConfig::default();
        assert_eq!(config.classify_hold(Duration::from_millis(5)), None);
        assert_eq!(
            config.classify_hold(Duration::from_millis(20)),
            Some(PressKind::Short)
        );
        assert_eq!(
            config.classify_hold(Duration::from_millis(499)),
            Some(PressKind::Short)
        );
        assert_eq!(
            config.classify_hold(Duration::from_millis(500)),
            Some(PressKind::Long)
        );
    }

    #[test]
    fn long_hold_on_down_is_a_plain_press() {
        let config = LongPressConfig::default();
        let held = Duration::from_secs(1);
        assert_eq!(
            config.input_for(Button::Select, held),
            Some(Input::LongPress(Button::Select))
        );
        assert_eq!(
            config.input_for(Button::Down, held),
            Some(Input::Press(Button::Down))
        );
        assert_eq!(config.input_for(Button::Back, Duration::ZERO), None);
    }
}
