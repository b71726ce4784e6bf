//! Dispatch of a resolved binding to a client's command queue.
//!
//! Responsibilities:
//! - Enforce read-only clients: a list with any non-read-only command is
//!   refused outright.
//! - Submit accepted lists, with the optional mouse payload, to the client's
//!   queue.
//!
//! Does NOT handle:
//! - Resolving which binding a key event hits (the input layer's job).
//! - Waiting for or interpreting command results (the queue's contract).

use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;
use mux_cmd::{CommandHandler, CommandQueue, MouseEvent};

use crate::table::KeyBinding;

bitflags! {
    /// Client state bits consulted at dispatch time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClientFlags: u32 {
        /// The client may only issue read-only commands.
        const READONLY = 1 << 0;
    }
}

/// The requesting client: its mode flags and its command queue.
#[derive(Debug)]
pub struct Client {
    pub flags: ClientFlags,
    pub queue: Rc<RefCell<CommandQueue>>,
}

impl Client {
    pub fn new(flags: ClientFlags, queue: Rc<RefCell<CommandQueue>>) -> Self {
        Self { flags, queue }
    }

    pub fn is_read_only(&self) -> bool {
        self.flags.contains(ClientFlags::READONLY)
    }
}

/// Hand a binding's command list to the client's queue.
///
/// A read-only client is refused unless every command in the list is
/// read-only; the refusal is reported on the client's queue and nothing runs.
/// The binding keeps ownership of its command list throughout.
pub fn dispatch(
    binding: &KeyBinding,
    client: &Client,
    mouse: Option<&MouseEvent>,
    handler: &mut dyn CommandHandler,
) {
    if !binding.command_list().all_read_only() && client.is_read_only() {
        tracing::warn!(key = %binding.key(), "refusing dispatch for read-only client");
        client.queue.borrow_mut().error("client is read-only");
        return;
    }

    client.queue.borrow_mut().run(binding.command_list(), mouse, handler);
}
