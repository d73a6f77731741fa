#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

// Shared logic for the countdown timer.
//
// This crate stays portable across MCU firmware and host tooling by avoiding the
// Rust standard library. Transitions only describe host work through
// [`effects::Effects`]; the firmware and emulator crates perform it.

pub mod console;
pub mod context;
pub mod display;
pub mod effects;
pub mod executor;
pub mod haptics;
pub mod input;
pub mod machine;
pub mod settings;
pub mod time;

pub use context::{TimerContext, TimerState};
pub use display::{DISPLAY_MODE_COUNT, DisplayMode};
pub use effects::Effects;
pub use input::{Button, Input};
pub use settings::TimerSettings;
