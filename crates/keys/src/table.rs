//! Key tables and the table registry.
//!
//! Responsibilities:
//! - Maintain named key tables, each a sorted, unique-keyed set of bindings.
//! - Enforce the table lifecycle: created on demand, shared by handle,
//!   removed from the registry the moment a remove empties it.
//!
//! Does NOT handle:
//! - Resolving key events to bindings (the input layer's job).
//! - Running a binding's commands (see `dispatch`).
//!
//! Invariants:
//! - At most one table per name; at most one binding per key within a table.
//! - The registry's map entry is the one reference the registry holds; other
//!   subsystems may hold further `Rc` clones, and the table is destroyed when
//!   the last one drops.
//! - A table never sits in the registry with an empty binding set after a
//!   remove operation.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use mux_cmd::CommandList;

use crate::key::KeyCode;

/// One binding: a key code mapped to an owned command list.
#[derive(Debug)]
pub struct KeyBinding {
    key: KeyCode,
    can_repeat: bool,
    cmdlist: CommandList,
}

impl KeyBinding {
    fn new(key: KeyCode, can_repeat: bool, cmdlist: CommandList) -> Self {
        Self {
            key,
            can_repeat,
            cmdlist,
        }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    /// Whether the bound action is eligible for key-repeat.
    pub fn can_repeat(&self) -> bool {
        self.can_repeat
    }

    /// The commands to run when the binding fires. The binding owns the
    /// list; callers only ever borrow it.
    pub fn command_list(&self) -> &CommandList {
        &self.cmdlist
    }
}

/// A named collection of key bindings, handed out as `Rc<KeyTable>`.
#[derive(Debug)]
pub struct KeyTable {
    name: String,
    bindings: RefCell<BTreeMap<KeyCode, Rc<KeyBinding>>>,
}

impl KeyTable {
    fn new(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            bindings: RefCell::new(BTreeMap::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the binding for a key.
    pub fn binding(&self, key: KeyCode) -> Option<Rc<KeyBinding>> {
        self.bindings.borrow().get(&key).cloned()
    }

    /// All bindings, in ascending key order.
    pub fn bindings(&self) -> Vec<Rc<KeyBinding>> {
        self.bindings.borrow().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

/// The process-wide set of key tables, keyed by name.
///
/// Owned by the host and passed by reference to every operation; there is no
/// ambient global instance.
#[derive(Debug, Default)]
pub struct KeyBindings {
    tables: BTreeMap<String, Rc<KeyTable>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a table by name, creating it when `create` is set.
    ///
    /// Returns the same table identity on every call while the table lives.
    pub fn get_table(&mut self, name: &str, create: bool) -> Option<Rc<KeyTable>> {
        if let Some(table) = self.tables.get(name) {
            return Some(Rc::clone(table));
        }
        if !create {
            return None;
        }

        tracing::debug!(table = name, "creating key table");
        let table = KeyTable::new(name);
        self.tables.insert(name.to_string(), Rc::clone(&table));
        Some(table)
    }

    /// Drop the registry's reference to a table. The table itself lives on
    /// until every other holder drops its handle.
    pub fn remove_table(&mut self, name: &str) {
        if self.tables.remove(name).is_some() {
            tracing::debug!(table = name, "removed key table");
        }
    }

    /// Bind `key` in the named table, creating the table if needed.
    ///
    /// Replace semantics: an existing binding for the key is destroyed along
    /// with its command list. Never fails.
    pub fn add_binding(&mut self, table_name: &str, key: KeyCode, can_repeat: bool, cmdlist: CommandList) {
        let table = self
            .get_table(table_name, true)
            .expect("create-if-missing always yields a table");

        tracing::debug!(table = table_name, key = %key, "adding key binding");
        let binding = Rc::new(KeyBinding::new(key, can_repeat, cmdlist));
        table.bindings.borrow_mut().insert(key, binding);
    }

    /// Remove the binding for `key` in the named table. No-op if either the
    /// table or the binding is absent.
    ///
    /// Removing the last binding also removes the table from the registry:
    /// tables exist only to hold bindings.
    pub fn remove_binding(&mut self, table_name: &str, key: KeyCode) {
        let Some(table) = self.get_table(table_name, false) else {
            return;
        };
        if table.bindings.borrow_mut().remove(&key).is_none() {
            return;
        }
        tracing::debug!(table = table_name, key = %key, "removed key binding");

        if table.is_empty() {
            self.remove_table(table_name);
        }
    }

    /// Tables in lexical name order.
    pub fn tables(&self) -> impl Iterator<Item = &Rc<KeyTable>> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
