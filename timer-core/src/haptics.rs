//! Vibration motor abstraction and the completion alert schedule.
//!
//! The alert opens with one long pulse and then repeats a short pulse every
//! second until stopped. [`VibrationLoop`] only decides *when* to pulse; the
//! host drives the motor through a [`HapticDriver`].

use core::ops::Add;
use core::time::Duration;

/// Pulse shapes the motor can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pulse {
    Short,
    Long,
}

/// Motor timing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VibrationConfig {
    /// Gap between the start of consecutive alert pulses.
    pub repeat_interval: Duration,
    pub long_pulse: Duration,
    pub short_pulse: Duration,
}

impl VibrationConfig {
    #[must_use]
    pub const fn new(repeat_interval: Duration, long_pulse: Duration, short_pulse: Duration) -> Self {
        Self {
            repeat_interval,
            long_pulse,
            short_pulse,
        }
    }

    /// How long the motor stays on for `pulse`.
    #[must_use]
    pub const fn pulse_length(&self, pulse: Pulse) -> Duration {
        match pulse {
            Pulse::Short => self.short_pulse,
            Pulse::Long => self.long_pulse,
        }
    }
}

impl Default for VibrationConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(1_000),
            Duration::from_millis(500),
            Duration::from_millis(100),
        )
    }
}

/// Drives the vibration motor.
pub trait HapticDriver {
    /// Starts a single pulse. A pulse already in progress is replaced.
    fn pulse(&mut self, pulse: Pulse);

    /// Stops the motor immediately.
    fn cancel(&mut self);
}

/// Haptic driver that performs no hardware interaction.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopHapticDriver;

impl NoopHapticDriver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HapticDriver for NoopHapticDriver {
    fn pulse(&mut self, _: Pulse) {}

    fn cancel(&mut self) {}
}

/// Schedule for the repeating completion alert.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VibrationLoop<Instant> {
    interval: Duration,
    next_pulse: Option<Instant>,
}

impl<Instant> VibrationLoop<Instant>
where
    Instant: Copy + Ord + Add<Duration, Output = Instant>,
{
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_pulse: None,
        }
    }

    /// Arms the loop at `now`, returning the opening pulse.
    pub fn start(&mut self, now: Instant) -> Pulse {
        self.next_pulse = Some(now + self.interval);
        Pulse::Long
    }

    /// Returns the pulse due at `now`, if any, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> Option<Pulse> {
        let due = self.next_pulse?;
        if now < due {
            return None;
        }

        // Skip missed slots instead of bursting to catch up.
        let mut next = due + self.interval;
        while next <= now && !self.interval.is_zero() {
            next = next + self.interval;
        }
        self.next_pulse = Some(next);
        Some(Pulse::Short)
    }

    /// Disarms the loop. Returns `true` if it was running.
    pub fn stop(&mut self) -> bool {
        self.next_pulse.take().is_some()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.next_pulse.is_some()
    }

    /// When the next repeat pulse fires, for hosts that sleep until a deadline.
    #[must_use]
    pub const fn next_pulse_at(&self) -> Option<Instant> {
        self.next_pulse
    }
}

impl<Instant> Default for VibrationLoop<Instant>
where
    Instant: Copy + Ord + Add<Duration, Output = Instant>,
{
    fn default() -> Self {
        Self::new(VibrationConfig::default().repeat_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct MockInstant(u64);

    impl Add<Duration> for MockInstant {
        type Output = Self;

        fn add(self, rhs: Duration) -> Self::Output {
            Self(self.0 + u64::try_from(rhs.as_millis()).unwrap())
        }
    }

    #[test]
    fn loop_opens_long_then_repeats_short() {
        let mut alert = VibrationLoop::new(Duration::from_millis(1_000));
        assert_eq!(alert.poll(MockInstant(0)), None);

        assert_eq!(alert.start(MockInstant(0)), Pulse::Long);
        assert_eq!(alert.next_pulse_at(), Some(MockInstant(1_000)));
        assert_eq!(alert.poll(MockInstant(999)), None);
        assert_eq!(alert.poll(MockInstant(1_000)), Some(Pulse::Short));
        assert_eq!(alert.poll(MockInstant(1_500)), None);
        assert_eq!(alert.poll(MockInstant(2_000)), Some(Pulse::Short));
    }

    #[test]
    fn late_poll_skips_missed_slots() {
        let mut alert = VibrationLoop::new(Duration::from_millis(1_000));
        let _ = alert.start(MockInstant(0));

        assert_eq!(alert.poll(MockInstant(3_400)), Some(Pulse::Short));
        assert_eq!(alert.next_pulse_at(), Some(MockInstant(4_000)));
    }

    #[test]
    fn stop_disarms() {
        let mut alert = VibrationLoop::<MockInstant>::default();
        assert!(!alert.stop());
        let _ = alert.start(MockInstant(10));
        assert!(alert.is_active());
        assert!(alert.stop());
        assert_eq!(alert.poll(MockInstant(5_000)), None);
    }

    #[test]
    fn pulse_lengths_follow_config() {
        let config = VibrationConfig::default();
        assert_eq!(config.pulse_length(Pulse::Long), Duration::from_millis(500));
        assert_eq!(config.pulse_length(Pulse::Short), Duration::from_millis(100));
    }
}
