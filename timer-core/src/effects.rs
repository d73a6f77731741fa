//! Host actions requested by a transition.
//!
//! Transitions never touch the display, the motor, or the tick source. They
//! return an [`Effects`] value and the host performs each flagged action once.

/// Independent action flags produced by a single transition.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Effects {
    /// Redraw the current screen.
    pub update_display: bool,
    /// Begin delivering one-second ticks.
    pub subscribe_tick: bool,
    /// Stop delivering ticks.
    pub unsubscribe_tick: bool,
    /// Start the repeating completion alert.
    pub start_vibration: bool,
    /// Stop the completion alert.
    pub stop_vibration: bool,
    /// Emit one short acknowledgement pulse.
    pub vibrate_short: bool,
    /// Refill the hourglass animation buffer.
    pub init_hourglass: bool,
    /// Reseed the matrix animation buffer.
    pub init_matrix: bool,
    /// Leave the timer screen.
    pub pop_window: bool,
}

impl Effects {
    /// The no-op result: every flag cleared.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            update_display: false,
            subscribe_tick: false,
            unsubscribe_tick: false,
            start_vibration: false,
            stop_vibration: false,
            vibrate_short: false,
            init_hourglass: false,
            init_matrix: false,
            pop_window: false,
        }
    }

    /// Only a redraw.
    #[must_use]
    pub const fn redraw() -> Self {
        Self {
            update_display: true,
            ..Self::none()
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        !(self.update_display
            || self.subscribe_tick
            || self.unsubscribe_tick
            || self.start_vibration
            || self.stop_vibration
            || self.vibrate_short
            || self.init_hourglass
            || self.init_matrix
            || self.pop_window)
    }
}
