//! Timer controller owned by the firmware's controller task.
//!
//! Bundles the context, the persisted settings, and the effect executor so the
//! async task only has to feed inputs and wait on deadlines.

use core::time::Duration;

use timer_core::executor::EffectExecutor;
use timer_core::haptics::{HapticDriver, VibrationConfig};
use timer_core::settings::{SettingsStore, load_settings, save_settings};
use timer_core::{Effects, Input, TimerContext, TimerSettings, TimerState};

use crate::instant::FirmwareInstant;

/// What the controller task should do after an input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    Continue,
    /// The timer screen closed; the runtime parks the controller.
    Exit,
}

pub struct Controller<D, S> {
    ctx: TimerContext,
    settings: TimerSettings,
    executor: EffectExecutor<FirmwareInstant>,
    haptics: D,
    store: S,
    repeat_interval: Duration,
}

impl<D, S> Controller<D, S>
where
    D: HapticDriver,
    S: SettingsStore,
    S::Error: core::fmt::Debug,
{
    /// Loads settings from `store`, falling back to defaults when it fails.
    pub fn new(haptics: D, store: S, vibration: VibrationConfig) -> Self {
        let mut controller = Self {
            ctx: TimerContext::new(),
            settings: TimerSettings::default(),
            executor: EffectExecutor::new(vibration.repeat_interval),
            haptics,
            store,
            repeat_interval: vibration.repeat_interval,
        };
        controller.reopen();
        controller
    }

    /// Starts a fresh session on the selection screen with the stored settings.
    pub fn reopen(&mut self) {
        self.settings = load_settings(&mut self.store).unwrap_or_else(|err| {
            log_store_failure("load", &err);
            TimerSettings::default()
        });
        self.ctx = TimerContext::new();
        self.settings.apply_to_context(&mut self.ctx);
        self.executor = EffectExecutor::new(self.repeat_interval);
    }

    pub fn handle(&mut self, input: Input, now: FirmwareInstant) -> Step {
        let before = self.ctx.state;
        let effects = self
            .executor
            .dispatch(&mut self.ctx, input, now, &mut self.haptics);
        if !effects.is_none() {
            log_transition(input, before, self.ctx.state, effects);
        }

        if self.executor.take_exit() {
            self.shutdown();
            Step::Exit
        } else {
            Step::Continue
        }
    }

    pub fn poll_vibration(&mut self, now: FirmwareInstant) {
        let _ = self.executor.poll_vibration(now, &mut self.haptics);
    }

    /// Stops the alert and persists the display preferences.
    pub fn shutdown(&mut self) {
        self.executor.shutdown(&mut self.haptics);
        self.settings.update_from_context(&self.ctx);
        if let Err(err) = save_settings(&mut self.store, &mut self.settings) {
            log_store_failure("save", &err);
        }
    }

    pub const fn ticking(&self) -> bool {
        self.executor.tick_subscribed()
    }

    pub const fn next_pulse_at(&self) -> Option<FirmwareInstant> {
        self.executor.next_pulse_at()
    }

    pub fn take_redraw(&mut self) -> bool {
        self.executor.take_redraw(&self.ctx)
    }

    pub const fn context(&self) -> &TimerContext {
        &self.ctx
    }

    pub const fn haptics(&self) -> &D {
        &self.haptics
    }

    pub fn haptics_mut(&mut self) -> &mut D {
        &mut self.haptics
    }
}

#[cfg(target_os = "none")]
fn log_transition(input: Input, from: TimerState, to: TimerState, effects: Effects) {
    defmt::info!(
        "{} in {}: -> {} (tick {}/{} vibrate {}/{}/{})",
        defmt::Display2Format(&input),
        from.as_str(),
        to.as_str(),
        effects.subscribe_tick,
        effects.unsubscribe_tick,
        effects.start_vibration,
        effects.stop_vibration,
        effects.vibrate_short
    );
}

#[cfg(not(target_os = "none"))]
fn log_transition(_input: Input, _from: TimerState, _to: TimerState, _effects: Effects) {}

#[cfg(target_os = "none")]
fn log_store_failure<E: core::fmt::Debug>(action: &str, err: &E) {
    defmt::warn!(
        "settings {} failed: {}",
        action,
        defmt::Debug2Format(err)
    );
}

#[cfg(not(target_os = "none"))]
fn log_store_failure<E: core::fmt::Debug>(_action: &str, _err: &E) {}
