//! Command model, parser, and queue for the mux key-binding engine.
//!
//! This crate provides the command-side collaborators that the key-binding
//! engine consumes: a table of known commands with capability flags, a parser
//! from textual binding specifications into command lists, and the queue that
//! runs a command list against a handler.

pub mod command;
pub mod parse;
pub mod queue;

pub use command::{CmdFlags, Command, CommandList, CommandSpec};
pub use parse::{ParseError, parse, parse_words};
pub use queue::{CommandError, CommandHandler, CommandQueue, MouseEvent, NullHandler};
