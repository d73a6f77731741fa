//! Text console shared by the host emulator and debug tooling.
//!
//! [`grammar::parse`] turns a line into a [`ConsoleCommand`]; executing it is
//! left to the host, which owns the timer context and settings store.

pub mod catalog;
pub mod grammar;

pub use grammar::{ConsoleCommand, ConsoleError, parse};
