//! Host-side interpretation of [`Effects`].
//!
//! Both the firmware and the emulator run the same executor so effect handling
//! is identical on hardware and host. The executor owns the state that lives
//! outside the timer context: the tick subscription, the completion alert,
//! and the animation buffers.

use core::ops::Add;
use core::time::Duration;

use crate::context::TimerContext;
use crate::display::{AnimationState, HourglassState, MatrixState};
use crate::effects::Effects;
use crate::haptics::{HapticDriver, Pulse, VibrationLoop};
use crate::input::Input;

/// Applies effect descriptors to host state and the haptic driver.
#[derive(Clone, Debug)]
pub struct EffectExecutor<Instant> {
    tick_subscribed: bool,
    vibration: VibrationLoop<Instant>,
    animation: AnimationState,
    matrix_seed: u32,
    redraw_pending: bool,
    exit_requested: bool,
}

impl<Instant> EffectExecutor<Instant>
where
    Instant: Copy + Ord + Add<Duration, Output = Instant>,
{
    #[must_use]
    pub fn new(repeat_interval: Duration) -> Self {
        Self {
            tick_subscribed: false,
            vibration: VibrationLoop::new(repeat_interval),
            animation: AnimationState::default(),
            matrix_seed: 0,
            redraw_pending: true,
            exit_requested: false,
        }
    }

    /// Runs `input` through the context and applies the resulting effects.
    pub fn dispatch<D>(
        &mut self,
        ctx: &mut TimerContext,
        input: Input,
        now: Instant,
        driver: &mut D,
    ) -> Effects
    where
        D: HapticDriver,
    {
        let effects = ctx.handle(input);
        self.apply(effects, now, driver);
        effects
    }

    /// Performs every flagged action exactly once.
    ///
    /// Stops are applied before starts so a transition that carries both leaves
    /// the resource running.
    pub fn apply<D>(&mut self, effects: Effects, now: Instant, driver: &mut D)
    where
        D: HapticDriver,
    {
        if effects.unsubscribe_tick {
            self.tick_subscribed = false;
        }
        if effects.subscribe_tick {
            self.tick_subscribed = true;
        }

        if effects.stop_vibration {
            self.vibration.stop();
            driver.cancel();
        }
        if effects.start_vibration {
            let pulse = self.vibration.start(now);
            driver.pulse(pulse);
        }
        if effects.vibrate_short {
            driver.pulse(Pulse::Short);
        }

        if effects.init_hourglass {
            self.animation.hourglass = HourglassState::new();
        }
        if effects.init_matrix {
            self.matrix_seed = self.matrix_seed.wrapping_add(1);
            self.animation.matrix = MatrixState::new(self.matrix_seed);
        }

        if effects.update_display {
            self.redraw_pending = true;
        }
        if effects.pop_window {
            self.exit_requested = true;
        }
    }

    /// Emits the repeat pulse of the completion alert when it is due.
    pub fn poll_vibration<D>(&mut self, now: Instant, driver: &mut D) -> Option<Pulse>
    where
        D: HapticDriver,
    {
        let pulse = self.vibration.poll(now)?;
        driver.pulse(pulse);
        Some(pulse)
    }

    /// Stops everything the executor started, for teardown.
    pub fn shutdown<D>(&mut self, driver: &mut D)
    where
        D: HapticDriver,
    {
        if self.vibration.stop() {
            driver.cancel();
        }
        self.tick_subscribed = false;
    }

    #[must_use]
    pub const fn tick_subscribed(&self) -> bool {
        self.tick_subscribed
    }

    #[must_use]
    pub const fn vibrating(&self) -> bool {
        self.vibration.is_active()
    }

    #[must_use]
    pub const fn next_pulse_at(&self) -> Option<Instant> {
        self.vibration.next_pulse_at()
    }

    #[must_use]
    pub const fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Returns whether a redraw was requested and clears the request.
    ///
    /// Animation buffers advance once per redraw while a face is visible.
    pub fn take_redraw(&mut self, ctx: &TimerContext) -> bool {
        let pending = core::mem::take(&mut self.redraw_pending);
        if pending && ctx.shows_canvas() {
            self.animation
                .advance(ctx.remaining_seconds, ctx.total_seconds);
        }
        pending
    }

    /// Returns whether the timer screen asked to close and clears the request.
    pub fn take_exit(&mut self) -> bool {
        core::mem::take(&mut self.exit_requested)
    }
}
