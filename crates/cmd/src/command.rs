//! Command descriptors and command lists.
//!
//! Responsibilities:
//! - Define the static table of known commands with their capability flags.
//! - Represent parsed commands and ordered command lists.
//!
//! Does NOT handle:
//! - Parsing textual specifications (see `parse` module).
//! - Executing commands (see `queue` module and its handlers).
//!
//! Invariants:
//! - `COMMANDS` is sorted by name and names/aliases are unique.
//! - A `Command` always points at an entry of `COMMANDS`.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Capability flags carried by a command definition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CmdFlags: u32 {
        /// The command is safe to run on behalf of a read-only client.
        const READONLY = 1 << 0;
    }
}

/// Static descriptor for one known command.
#[derive(Debug)]
pub struct CommandSpec {
    /// Canonical command name.
    pub name: &'static str,
    /// Short alias, if any.
    pub alias: Option<&'static str>,
    /// Capability flags.
    pub flags: CmdFlags,
}

const fn spec(name: &'static str, alias: Option<&'static str>, flags: CmdFlags) -> CommandSpec {
    CommandSpec { name, alias, flags }
}

/// Every command the engine can name. Sorted by canonical name.
///
/// Only `bind-key` and `unbind-key` are interpreted by this repository; the
/// rest exist so that binding specifications naming them parse and carry the
/// correct read-only capability for dispatch-time enforcement.
pub static COMMANDS: &[CommandSpec] = &[
    spec("bind-key", Some("bind"), CmdFlags::empty()),
    spec("break-pane", Some("breakp"), CmdFlags::empty()),
    spec("choose-buffer", None, CmdFlags::READONLY),
    spec("choose-client", None, CmdFlags::READONLY),
    spec("choose-tree", None, CmdFlags::READONLY),
    spec("choose-window", None, CmdFlags::READONLY),
    spec("clock-mode", None, CmdFlags::READONLY),
    spec("command-prompt", None, CmdFlags::empty()),
    spec("confirm-before", Some("confirm"), CmdFlags::empty()),
    spec("copy-mode", None, CmdFlags::READONLY),
    spec("delete-buffer", Some("deleteb"), CmdFlags::empty()),
    spec("detach-client", Some("detach"), CmdFlags::READONLY),
    spec("display-message", Some("display"), CmdFlags::READONLY),
    spec("display-panes", Some("displayp"), CmdFlags::READONLY),
    spec("if-shell", Some("if"), CmdFlags::empty()),
    spec("last-pane", Some("lastp"), CmdFlags::empty()),
    spec("last-window", Some("last"), CmdFlags::empty()),
    spec("list-buffers", Some("lsb"), CmdFlags::READONLY),
    spec("list-keys", Some("lsk"), CmdFlags::READONLY),
    spec("new-window", Some("neww"), CmdFlags::empty()),
    spec("next-layout", Some("nextl"), CmdFlags::empty()),
    spec("next-window", Some("next"), CmdFlags::empty()),
    spec("paste-buffer", Some("pasteb"), CmdFlags::empty()),
    spec("previous-window", Some("prev"), CmdFlags::empty()),
    spec("refresh-client", Some("refresh"), CmdFlags::READONLY),
    spec("resize-pane", Some("resizep"), CmdFlags::empty()),
    spec("rotate-window", Some("rotatew"), CmdFlags::empty()),
    spec("select-layout", Some("selectl"), CmdFlags::empty()),
    spec("select-pane", Some("selectp"), CmdFlags::empty()),
    spec("select-window", Some("selectw"), CmdFlags::empty()),
    spec("send-keys", Some("send"), CmdFlags::empty()),
    spec("send-prefix", None, CmdFlags::empty()),
    spec("show-messages", Some("showmsgs"), CmdFlags::READONLY),
    spec("split-window", Some("splitw"), CmdFlags::empty()),
    spec("suspend-client", Some("suspendc"), CmdFlags::empty()),
    spec("swap-pane", Some("swapp"), CmdFlags::empty()),
    spec("switch-client", Some("switchc"), CmdFlags::READONLY),
    spec("unbind-key", Some("unbind"), CmdFlags::empty()),
];

/// Look up a command by canonical name or alias.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS
        .iter()
        .find(|entry| entry.name == name || entry.alias == Some(name))
}

/// One parsed command: a descriptor plus its argument vector.
#[derive(Debug, Clone)]
pub struct Command {
    spec: &'static CommandSpec,
    args: Vec<String>,
}

impl Command {
    pub(crate) fn new(spec: &'static CommandSpec, args: Vec<String>) -> Self {
        Self { spec, args }
    }

    /// Canonical name of the command.
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Argument vector, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the command carries the read-only capability.
    pub fn is_read_only(&self) -> bool {
        self.spec.flags.contains(CmdFlags::READONLY)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec.name)?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}

/// An owned, ordered sequence of commands.
///
/// A binding exclusively owns its command list; dispatch and the queue only
/// ever borrow it.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<Command>,
}

impl CommandList {
    pub(crate) fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// True only if every command in the list is read-only.
    pub fn all_read_only(&self) -> bool {
        self.commands.iter().all(Command::is_read_only)
    }
}

impl fmt::Display for CommandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " ; ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Quote an argument for display if it would not re-parse as one word.
fn quote_arg(arg: &str) -> String {
    let needs_quoting = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'' || c == '\\' || c == ';');
    if !needs_quoting {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
