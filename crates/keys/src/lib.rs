//! Key tables, bindings, and dispatch for the mux key-binding engine.
//!
//! This crate maintains named, independently switchable tables of keyboard
//! and mouse bindings, resolves dispatch-time read-only policy, and loads the
//! built-in default bindings through the same command path user configuration
//! uses.

pub mod bindctl;
pub mod defaults;
pub mod dispatch;
pub mod key;
pub mod table;

pub use bindctl::BindingCommands;
pub use defaults::{DEFAULT_BINDINGS, LoadError, load_bindings, load_default_bindings};
pub use dispatch::{Client, ClientFlags, dispatch};
pub use key::{KeyCode, KeyModifiers, KeyParseError, parse_key};
pub use table::{KeyBinding, KeyBindings, KeyTable};
