//! Command table shared by the parser and the `help` output.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandTag {
    Select,
    Up,
    Down,
    Back,
    Tick,
    Status,
    Modes,
    Mode,
    Default,
    Save,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub tag: CommandTag,
    pub usage: &'static str,
    pub summary: &'static str,
}

const COMMANDS: [CommandSpec; 11] = [
    CommandSpec {
        name: "select",
        tag: CommandTag::Select,
        usage: "select [long]",
        summary: "press Select (long: cycle display mode)",
    },
    CommandSpec {
        name: "up",
        tag: CommandTag::Up,
        usage: "up [long]",
        summary: "press Up (long: toggle the time label)",
    },
    CommandSpec {
        name: "down",
        tag: CommandTag::Down,
        usage: "down",
        summary: "press Down",
    },
    CommandSpec {
        name: "back",
        tag: CommandTag::Back,
        usage: "back",
        summary: "press Back",
    },
    CommandSpec {
        name: "tick",
        tag: CommandTag::Tick,
        usage: "tick [count]",
        summary: "advance the clock by whole seconds (default 1)",
    },
    CommandSpec {
        name: "status",
        tag: CommandTag::Status,
        usage: "status",
        summary: "show the timer context",
    },
    CommandSpec {
        name: "modes",
        tag: CommandTag::Modes,
        usage: "modes",
        summary: "list display modes and whether each is enabled",
    },
    CommandSpec {
        name: "mode",
        tag: CommandTag::Mode,
        usage: "mode <index> on|off",
        summary: "enable or disable a display mode",
    },
    CommandSpec {
        name: "default",
        tag: CommandTag::Default,
        usage: "default",
        summary: "remember the selected duration as the default",
    },
    CommandSpec {
        name: "save",
        tag: CommandTag::Save,
        usage: "save",
        summary: "write settings to storage",
    },
    CommandSpec {
        name: "help",
        tag: CommandTag::Help,
        usage: "help [command]",
        summary: "list commands or describe one",
    },
];

/// All commands in display order.
#[must_use]
pub fn commands() -> &'static [CommandSpec] {
    &COMMANDS
}

/// Case-insensitive lookup by command name.
#[must_use]
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Renders `help` output: one line per command, or the usage of `topic`.
#[cfg(feature = "alloc")]
#[must_use]
pub fn help_text(topic: Option<&str>) -> alloc::vec::Vec<alloc::string::String> {
    use alloc::format;

    match topic {
        Some(name) => match find(name) {
            Some(spec) => alloc::vec![format!("{} - {}", spec.usage, spec.summary)],
            None => alloc::vec![format!("no help for `{name}`")],
        },
        None => COMMANDS
            .iter()
            .map(|spec| format!("{:<20} {}", spec.usage, spec.summary))
            .collect(),
    }
}
