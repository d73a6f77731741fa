//! Board wiring for the vibration motor.

#![cfg(target_os = "none")]

use embassy_stm32::gpio::Output;
use embassy_time::Instant;
use timer_core::haptics::{HapticDriver, Pulse, VibrationConfig};

use crate::instant::core_duration_to_embassy;

/// Coin motor switched by a low-side transistor on a push-pull GPIO.
///
/// Pulses are not timed here; the controller task waits on
/// [`VibrationMotor::off_at`] and calls [`VibrationMotor::service`].
pub struct VibrationMotor<'d> {
    pin: Output<'d>,
    config: VibrationConfig,
    off_at: Option<Instant>,
}

impl<'d> VibrationMotor<'d> {
    pub fn new(pin: Output<'d>, config: VibrationConfig) -> Self {
        let mut motor = Self {
            pin,
            config,
            off_at: None,
        };
        motor.pin.set_low();
        motor
    }

    pub fn off_at(&self) -> Option<Instant> {
        self.off_at
    }

    /// Switches the motor off once its pulse has run out.
    pub fn service(&mut self, now: Instant) {
        if self.off_at.is_some_and(|deadline| now >= deadline) {
            self.pin.set_low();
            self.off_at = None;
        }
    }
}

impl HapticDriver for VibrationMotor<'_> {
    fn pulse(&mut self, pulse: Pulse) {
        let length = core_duration_to_embassy(self.config.pulse_length(pulse));
        self.pin.set_high();
        self.off_at = Some(Instant::now() + length);
    }

    fn cancel(&mut self) {
        self.pin.set_low();
        self.off_at = None;
    }
}
