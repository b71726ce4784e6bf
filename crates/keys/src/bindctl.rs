//! The `bind-key` and `unbind-key` command handlers.
//!
//! Responsibilities:
//! - Interpret `bind-key`/`unbind-key` argument vectors against the registry,
//!   so that the defaults loader and user configuration both define bindings
//!   through the same command path.
//!
//! Does NOT handle:
//! - Any other command: everything else is accepted and ignored, because the
//!   commands a binding runs are opaque to this engine.
//!
//! Invariants:
//! - The bound command portion goes through the same two-level parse the
//!   original specification text did (`mux_cmd::parse_words`).

use mux_cmd::{Command, CommandError, CommandHandler, MouseEvent};

use crate::key::parse_key;
use crate::table::KeyBindings;

const BIND_USAGE: &str = "bind-key [-nr] [-T key-table] key command [arguments]";
const UNBIND_USAGE: &str = "unbind-key [-an] [-T key-table] key";

/// Accumulated option state for the bind/unbind argument vectors.
#[derive(Debug, Default)]
struct Options {
    table: Option<String>,
    root: bool,
    repeat: bool,
    all: bool,
    /// Index of the first non-option argument.
    next: usize,
}

impl Options {
    /// The table the operation targets: `-T` wins, then `-n` (root), then
    /// the prefix table.
    fn table_name(&self) -> &str {
        match &self.table {
            Some(name) => name,
            None if self.root => "root",
            None => "prefix",
        }
    }
}

fn parse_options(
    args: &[String],
    accept: &str,
    usage: &'static str,
) -> Result<Options, CommandError> {
    let mut options = Options::default();
    let mut i = 0;
    'args: while i < args.len() {
        let arg = &args[i];
        if arg == "--" {
            i += 1;
            break;
        }
        let Some(flags) = arg.strip_prefix('-') else {
            break;
        };
        if flags.is_empty() {
            // A bare "-" is a key, not an option.
            break;
        }
        for (pos, flag) in flags.char_indices() {
            if !accept.contains(flag) {
                return Err(CommandError::Usage(usage));
            }
            match flag {
                'n' => options.root = true,
                'r' => options.repeat = true,
                'a' => options.all = true,
                'T' => {
                    let attached = &flags[pos + 1..];
                    if attached.is_empty() {
                        i += 1;
                        let value = args.get(i).ok_or(CommandError::Usage(usage))?;
                        options.table = Some(value.clone());
                    } else {
                        options.table = Some(attached.to_string());
                    }
                    i += 1;
                    continue 'args;
                }
                _ => unreachable!("accept list is checked above"),
            }
        }
        i += 1;
    }
    options.next = i;
    Ok(options)
}

/// `CommandHandler` over the registry for the binding-control commands.
#[derive(Debug)]
pub struct BindingCommands<'a> {
    registry: &'a mut KeyBindings,
}

impl<'a> BindingCommands<'a> {
    pub fn new(registry: &'a mut KeyBindings) -> Self {
        Self { registry }
    }

    fn bind(&mut self, args: &[String]) -> Result<(), CommandError> {
        let options = parse_options(args, "nrT", BIND_USAGE)?;
        let rest = &args[options.next..];

        let (key_name, command_words) = rest.split_first().ok_or(CommandError::Usage(BIND_USAGE))?;
        if command_words.is_empty() {
            return Err(CommandError::Usage(BIND_USAGE));
        }
        let key = parse_key(key_name).map_err(|err| CommandError::Failed(err.to_string()))?;
        let cmdlist =
            mux_cmd::parse_words(command_words).map_err(|err| CommandError::Failed(err.to_string()))?;

        self.registry
            .add_binding(options.table_name(), key, options.repeat, cmdlist);
        Ok(())
    }

    fn unbind(&mut self, args: &[String]) -> Result<(), CommandError> {
        let options = parse_options(args, "anT", UNBIND_USAGE)?;
        let rest = &args[options.next..];

        if options.all {
            if !rest.is_empty() {
                return Err(CommandError::Usage(UNBIND_USAGE));
            }
            // Removing every binding removes the table with it.
            self.registry.remove_table(options.table_name());
            return Ok(());
        }

        let key_name = rest.first().ok_or(CommandError::Usage(UNBIND_USAGE))?;
        let key = parse_key(key_name).map_err(|err| CommandError::Failed(err.to_string()))?;
        self.registry.remove_binding(options.table_name(), key);
        Ok(())
    }
}

impl CommandHandler for BindingCommands<'_> {
    fn execute(&mut self, command: &Command, _: Option<&MouseEvent>) -> Result<(), CommandError> {
        match command.name() {
            "bind-key" => self.bind(command.args()),
            "unbind-key" => self.unbind(command.args()),
            // Not ours; the engine never interprets bound commands itself.
            _ => Ok(()),
        }
    }
}
