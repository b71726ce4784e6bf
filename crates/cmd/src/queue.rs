//! Command queue and handler contract.
//!
//! Responsibilities:
//! - Accept command lists for execution and run them through a handler.
//! - Record user-visible errors reported against the queue's client.
//!
//! Does NOT handle:
//! - Deciding whether a list may run (dispatch-time policy lives in the keys
//!   crate).
//! - Interpreting any particular command (handlers own that).
//!
//! Invariants:
//! - `run` never propagates handler failures to the caller; they surface as
//!   reported errors on the queue.
//! - The queue borrows command lists; ownership stays with the caller.

use thiserror::Error;

use crate::command::{Command, CommandList};

/// Mouse payload forwarded with a dispatch that originated from a pointer
/// action. Opaque to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Column, zero-based.
    pub x: u32,
    /// Row, zero-based.
    pub y: u32,
    /// Raw button/wheel state.
    pub button: u16,
}

/// Errors a command handler may report for a single command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The argument vector did not match the command's usage
    #[error("usage: {0}")]
    Usage(&'static str),

    /// The command was understood but could not be carried out
    #[error("{0}")]
    Failed(String),
}

/// Executes individual commands on behalf of a queue.
///
/// Implementors interpret the commands they own and return `Ok(())` for
/// commands outside their concern.
pub trait CommandHandler {
    fn execute(
        &mut self,
        command: &Command,
        mouse: Option<&MouseEvent>,
    ) -> Result<(), CommandError>;
}

/// A handler that executes nothing. Useful for queues whose commands are all
/// interpreted elsewhere.
#[derive(Debug, Default)]
pub struct NullHandler;

impl CommandHandler for NullHandler {
    fn execute(&mut self, _: &Command, _: Option<&MouseEvent>) -> Result<(), CommandError> {
        Ok(())
    }
}

/// The execution facility a client (or the startup loader) submits command
/// lists to.
#[derive(Debug)]
pub struct CommandQueue {
    client_name: Option<String>,
    runs: usize,
    errors: Vec<String>,
}

impl CommandQueue {
    /// Create a queue, optionally tied to a client identity.
    pub fn new(client_name: Option<&str>) -> Self {
        Self {
            client_name: client_name.map(str::to_string),
            runs: 0,
            errors: Vec::new(),
        }
    }

    /// Run a command list. Handler failures are reported on the queue, never
    /// returned; the caller gets no result to interpret.
    pub fn run(
        &mut self,
        cmdlist: &CommandList,
        mouse: Option<&MouseEvent>,
        handler: &mut dyn CommandHandler,
    ) {
        self.runs += 1;
        for command in cmdlist.iter() {
            if let Err(err) = handler.execute(command, mouse) {
                self.error(&format!("{}: {}", command.name(), err));
            }
        }
    }

    /// Report a user-visible error against this queue's client.
    pub fn error(&mut self, message: &str) {
        tracing::warn!(
            client = self.client_name.as_deref().unwrap_or("<none>"),
            message,
            "command error"
        );
        self.errors.push(message.to_string());
    }

    /// Number of command lists submitted so far.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Errors reported so far, oldest first.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
