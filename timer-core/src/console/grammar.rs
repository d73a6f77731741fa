#![allow(clippy::module_name_repetitions)]

//! Parser for console command lines.
//!
//! A line is a command keyword looked up in the [`catalog`](super::catalog)
//! followed by command-specific arguments. Arguments are parsed with `winnow`
//! combinators directly over the `&str` line, so parsing never allocates.

use core::fmt;

use winnow::ascii::{Caseless, digit1, space0, space1};
use winnow::combinator::{alt, eof, opt, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

use super::catalog::{self, CommandSpec, CommandTag};
use crate::display::DisplayMode;
use crate::input::{Button, Input};

/// Structured commands produced by the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand<'a> {
    /// Feed a button press into the timer.
    Input(Input),
    /// Deliver this many one-second ticks.
    Tick(u32),
    Status,
    Modes,
    SetMode { mode: DisplayMode, enabled: bool },
    Default,
    Save,
    Help { topic: Option<&'a str> },
}

/// Errors produced while parsing a console line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleError<'a> {
    /// The line holds only whitespace.
    Empty,
    UnknownCommand(&'a str),
    /// Arguments did not match the command's usage.
    InvalidArguments(&'static CommandSpec),
    /// A mode index past the catalog.
    UnknownMode(usize),
}

impl fmt::Display for ConsoleError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Empty => write!(f, "empty command"),
            ConsoleError::UnknownCommand(name) => {
                write!(f, "unknown command `{name}`; try `help`")
            }
            ConsoleError::InvalidArguments(spec) => write!(f, "usage: {}", spec.usage),
            ConsoleError::UnknownMode(index) => {
                write!(f, "no display mode with index {index}; see `modes`")
            }
        }
    }
}

fn word<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_').parse_next(input)
}

fn end_of_line(input: &mut &str) -> ModalResult<()> {
    (space0, eof).void().parse_next(input)
}

fn long_flag(input: &mut &str) -> ModalResult<bool> {
    opt(preceded(space1, Caseless("long")))
        .map(|flag| flag.is_some())
        .parse_next(input)
}

fn tick_count(input: &mut &str) -> ModalResult<u32> {
    opt(preceded(space1, digit1.parse_to::<u32>()))
        .map(|count| count.unwrap_or(1))
        .parse_next(input)
}

fn mode_toggle(input: &mut &str) -> ModalResult<(usize, bool)> {
    (
        preceded(space1, digit1.parse_to::<usize>()),
        preceded(
            space1,
            alt((Caseless("on").value(true), Caseless("off").value(false))),
        ),
    )
        .parse_next(input)
}

fn help_topic<'a>(input: &mut &'a str) -> ModalResult<Option<&'a str>> {
    opt(preceded(space1, word)).parse_next(input)
}

fn press(button: Button, long: bool) -> ConsoleCommand<'static> {
    if long {
        ConsoleCommand::Input(Input::LongPress(button))
    } else {
        ConsoleCommand::Input(Input::Press(button))
    }
}

fn arguments<'a>(
    spec: &'static CommandSpec,
    input: &mut &'a str,
) -> ModalResult<Result<ConsoleCommand<'a>, ConsoleError<'a>>> {
    let command = match spec.tag {
        CommandTag::Select => press(Button::Select, long_flag.parse_next(input)?),
        CommandTag::Up => press(Button::Up, long_flag.parse_next(input)?),
        CommandTag::Down => press(Button::Down, false),
        CommandTag::Back => press(Button::Back, false),
        CommandTag::Tick => ConsoleCommand::Tick(tick_count.parse_next(input)?),
        CommandTag::Status => ConsoleCommand::Status,
        CommandTag::Modes => ConsoleCommand::Modes,
        CommandTag::Mode => {
            let (index, enabled) = mode_toggle.parse_next(input)?;
            match DisplayMode::from_index(index) {
                Some(mode) => ConsoleCommand::SetMode { mode, enabled },
                None => return Ok(Err(ConsoleError::UnknownMode(index))),
            }
        }
        CommandTag::Default => ConsoleCommand::Default,
        CommandTag::Save => ConsoleCommand::Save,
        CommandTag::Help => ConsoleCommand::Help {
            topic: help_topic.parse_next(input)?,
        },
    };
    end_of_line.parse_next(input)?;
    Ok(Ok(command))
}

/// Parses one console line.
///
/// # Errors
///
/// Returns a [`ConsoleError`] describing why the line was rejected.
pub fn parse(line: &str) -> Result<ConsoleCommand<'_>, ConsoleError<'_>> {
    let mut input = line.trim();
    if input.is_empty() {
        return Err(ConsoleError::Empty);
    }

    let keyword = word
        .parse_next(&mut input)
        .map_err(|_| ConsoleError::UnknownCommand(line.trim()))?;
    let spec = catalog::find(keyword).ok_or(ConsoleError::UnknownCommand(keyword))?;

    arguments(spec, &mut input).map_err(|_| ConsoleError::InvalidArguments(spec))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_with_and_without_long() {
        assert_eq!(
            parse("select"),
            Ok(ConsoleCommand::Input(Input::Press(Button::Select)))
        );
        assert_eq!(
            parse("  SELECT   long "),
            Ok(ConsoleCommand::Input(Input::LongPress(Button::Select)))
        );
        assert_eq!(
            parse("up long"),
            Ok(ConsoleCommand::Input(Input::LongPress(Button::Up)))
        );
        assert_eq!(
            parse("back"),
            Ok(ConsoleCommand::Input(Input::Press(Button::Back)))
        );
    }

    #[test]
    fn long_is_rejected_where_unsupported() {
        let Err(ConsoleError::InvalidArguments(spec)) = parse("down long") else {
            panic!("expected usage error");
        };
        assert_eq!(spec.name, "down");
    }

    #[test]
    fn tick_defaults_to_one() {
        assert_eq!(parse("tick"), Ok(ConsoleCommand::Tick(1)));
        assert_eq!(parse("tick 300"), Ok(ConsoleCommand::Tick(300)));
        assert!(matches!(
            parse("tick lots"),
            Err(ConsoleError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse("tick 99999999999"),
            Err(ConsoleError::InvalidArguments(_))
        ));
    }

    #[test]
    fn mode_toggle_checks_index() {
        assert_eq!(
            parse("mode 9 off"),
            Ok(ConsoleCommand::SetMode {
                mode: DisplayMode::Matrix,
                enabled: false
            })
        );
        assert_eq!(
            parse("mode 0 ON"),
            Ok(ConsoleCommand::SetMode {
                mode: DisplayMode::Text,
                enabled: true
            })
        );
        assert_eq!(parse("mode 15 on"), Err(ConsoleError::UnknownMode(15)));
        assert!(matches!(
            parse("mode 3"),
            Err(ConsoleError::InvalidArguments(_))
        ));
    }

    #[test]
    fn help_takes_optional_topic() {
        assert_eq!(parse("help"), Ok(ConsoleCommand::Help { topic: None }));
        assert_eq!(
            parse("help tick"),
            Ok(ConsoleCommand::Help {
                topic: Some("tick")
            })
        );
    }

    #[test]
    fn unknown_and_empty_lines() {
        assert_eq!(parse("   "), Err(ConsoleError::Empty));
        assert_eq!(parse("reboot now"), Err(ConsoleError::UnknownCommand("reboot")));
        assert_eq!(parse("?"), Err(ConsoleError::UnknownCommand("?")));
        assert!(matches!(
            parse("status please"),
            Err(ConsoleError::InvalidArguments(_))
        ));
    }
}
