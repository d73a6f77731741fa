//! Monotonic timestamps shared with `timer-core`.
//!
//! The core schedules with `core::time::Duration`; this wrapper lets embassy's
//! `Instant` take part in that arithmetic.

use core::ops::Add;

use embassy_time::{Duration, Instant};

/// Embassy instant that can be advanced by a `core::time::Duration`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct FirmwareInstant(Instant);

impl FirmwareInstant {
    pub const fn into_embassy(self) -> Instant {
        self.0
    }
}

impl From<Instant> for FirmwareInstant {
    fn from(instant: Instant) -> Self {
        Self(instant)
    }
}

impl Add<core::time::Duration> for FirmwareInstant {
    type Output = FirmwareInstant;

    fn add(self, rhs: core::time::Duration) -> Self::Output {
        Self(self.0 + core_duration_to_embassy(rhs))
    }
}

pub fn core_duration_to_embassy(duration: core::time::Duration) -> Duration {
    let micros = duration.as_micros();
    let micros = u64::try_from(micros).unwrap_or(u64::MAX);
    Duration::from_micros(micros)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_core_durations() {
        let start = FirmwareInstant::from(Instant::from_millis(1_000));
        let later = start + core::time::Duration::from_millis(250);
        assert_eq!(later.into_embassy(), Instant::from_millis(1_250));
        assert!(later > start);
    }

    #[test]
    fn oversized_durations_saturate() {
        let huge = core::time::Duration::from_secs(u64::MAX);
        assert_eq!(core_duration_to_embassy(huge), Duration::from_micros(u64::MAX));
    }
}
