//! Time decomposition, formatting, progress, and wraparound helpers.
//!
//! Everything here is a pure function over plain integers. Signed inputs are
//! accepted where callers may hand in out-of-range values; those are clamped
//! instead of rejected so the state machine never has an error path.

use core::fmt::Write;

use heapless::String;

/// Number of fixed presets (`K`).
pub const PRESET_COUNT: u32 = 4;

/// Preset durations offered on the selection screen, in minutes.
pub const PRESET_MINUTES: [u32; PRESET_COUNT as usize] = [5, 10, 15, 30];

/// Selection index that stands for "custom duration".
pub const CUSTOM_PRESET_INDEX: u32 = PRESET_COUNT;

/// Largest hour value accepted by custom entry.
pub const MAX_CUSTOM_HOURS: u32 = 23;

/// Largest minute value accepted by custom entry.
pub const MAX_CUSTOM_MINUTES: u32 = 59;

/// Capacity of the formatted time buffers.
pub const TIME_TEXT_CAPACITY: usize = 16;

/// Formatted time text.
pub type TimeText = String<TIME_TEXT_CAPACITY>;

const SECONDS_PER_MINUTE: i32 = 60;
const SECONDS_PER_HOUR: i32 = 3_600;

/// Hours, minutes, and seconds broken out of a second count.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TimeComponents {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
}

/// Splits `total_seconds` into components. Negative input clamps to zero.
#[must_use]
pub const fn decompose(total_seconds: i32) -> TimeComponents {
    let total = if total_seconds < 0 { 0 } else { total_seconds };
    TimeComponents {
        hours: total / SECONDS_PER_HOUR,
        minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        seconds: total % SECONDS_PER_MINUTE,
    }
}

/// Combines components into a second count, clamping negative parts to zero.
#[must_use]
pub const fn compose(hours: i32, minutes: i32, seconds: i32) -> i32 {
    let hours = if hours < 0 { 0 } else { hours };
    let minutes = if minutes < 0 { 0 } else { minutes };
    let seconds = if seconds < 0 { 0 } else { seconds };

    hours
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(seconds)
}

/// Formats as `H:MM:SS` when an hour or more remains, `M:SS` otherwise.
#[must_use]
pub fn format_adaptive(total_seconds: i32) -> TimeText {
    let t = decompose(total_seconds);
    let mut text = TimeText::new();
    // The longest rendering ("596523:14:07") fits the buffer.
    let _ = if t.hours > 0 {
        write!(text, "{}:{:02}:{:02}", t.hours, t.minutes, t.seconds)
    } else {
        write!(text, "{}:{:02}", t.minutes, t.seconds)
    };
    text
}

/// Same layout as [`format_adaptive`] with each field in uppercase hexadecimal.
#[must_use]
pub fn format_hex(total_seconds: i32) -> TimeText {
    let t = decompose(total_seconds);
    let mut text = TimeText::new();
    let _ = if t.hours > 0 {
        write!(text, "{:X}:{:02X}:{:02X}", t.hours, t.minutes, t.seconds)
    } else {
        write!(text, "{:X}:{:02X}", t.minutes, t.seconds)
    };
    text
}

/// Label for a selection index: `"5 min"` for presets, `"Custom"` otherwise.
#[must_use]
pub fn format_preset(index: u32) -> TimeText {
    let mut text = TimeText::new();
    match preset_minutes(index) {
        Some(minutes) => {
            let _ = write!(text, "{minutes} min");
        }
        None => {
            let _ = text.push_str("Custom");
        }
    }
    text
}

/// Minutes for a preset index, or `None` for the custom slot and beyond.
#[must_use]
pub fn preset_minutes(index: u32) -> Option<u32> {
    usize::try_from(index)
        .ok()
        .and_then(|index| PRESET_MINUTES.get(index))
        .copied()
}

fn scaled_progress(remaining: i32, total: i32, scale: i32) -> i32 {
    if total <= 0 || scale <= 0 || remaining <= 0 {
        return 0;
    }
    if remaining >= total {
        return scale;
    }

    let scaled = i64::from(remaining) * i64::from(scale) / i64::from(total);
    // remaining < total keeps the quotient below `scale`.
    i32::try_from(scaled).unwrap_or(scale)
}

/// Number of filled blocks out of `blocks` for the remaining fraction.
#[must_use]
pub fn progress_blocks(remaining: i32, total: i32, blocks: i32) -> i32 {
    scaled_progress(remaining, total, blocks)
}

/// Remaining fraction as an arc in degrees, `0..=360`.
#[must_use]
pub fn progress_degrees(remaining: i32, total: i32) -> i32 {
    scaled_progress(remaining, total, 360)
}

/// Remaining fraction in thousandths, `0..=1000`.
#[must_use]
pub fn progress_ratio_fixed_point(remaining: i32, total: i32) -> i32 {
    scaled_progress(remaining, total, 1_000)
}

/// Steps `value` up by one, wrapping to zero past `max`.
#[must_use]
pub const fn wrap_increment(value: u32, max: u32) -> u32 {
    if value >= max { 0 } else { value + 1 }
}

/// Steps `value` down by one, wrapping to `max` below zero.
#[must_use]
pub const fn wrap_decrement(value: u32, max: u32) -> u32 {
    if value == 0 { max } else { value - 1 }
}

/// Normalizes `value` into `min..=max` by whole multiples of the range width.
///
/// An inverted range (`max < min`) yields `min`.
#[must_use]
pub fn wrap_value(value: i32, min: i32, max: i32) -> i32 {
    if max < min {
        return min;
    }

    let width = i64::from(max) - i64::from(min) + 1;
    let offset = (i64::from(value) - i64::from(min)).rem_euclid(width);
    // `offset < width` so the sum lands inside `min..=max`.
    i32::try_from(i64::from(min) + offset).unwrap_or(min)
}
