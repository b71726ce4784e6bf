//! Property tests for the registry invariants: no empty table is ever
//! registered, bindings stay unique and sorted, and the registry agrees with
//! a simple model under arbitrary operation sequences.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use mux_keys::{KeyBindings, KeyCode};

const TABLES: &[&str] = &["prefix", "root", "copy-mode"];

#[derive(Debug, Clone)]
enum Op {
    Add { table: usize, key: u8 },
    Remove { table: usize, key: u8 },
    RemoveTable { table: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..TABLES.len(), any::<u8>()).prop_map(|(table, key)| Op::Add { table, key }),
        (0..TABLES.len(), any::<u8>()).prop_map(|(table, key)| Op::Remove { table, key }),
        (0..TABLES.len()).prop_map(|table| Op::RemoveTable { table }),
    ]
}

fn key_for(byte: u8) -> KeyCode {
    // Printable ASCII keeps failure output readable.
    let c = (b'!' + byte % 94) as char;
    KeyCode::from_char(c)
}

proptest! {
    #[test]
    fn registry_matches_model_and_never_holds_an_empty_table(
        ops in proptest::collection::vec(op_strategy(), 0..64)
    ) {
        let mut registry = KeyBindings::new();
        let mut model: BTreeMap<&str, BTreeSet<KeyCode>> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Add { table, key } => {
                    let name = TABLES[table];
                    let key = key_for(key);
                    registry.add_binding(name, key, false, mux_cmd::parse("new-window").unwrap());
                    model.entry(name).or_default().insert(key);
                }
                Op::Remove { table, key } => {
                    let name = TABLES[table];
                    let key = key_for(key);
                    registry.remove_binding(name, key);
                    if let Some(keys) = model.get_mut(name) {
                        keys.remove(&key);
                        if keys.is_empty() {
                            model.remove(name);
                        }
                    }
                }
                Op::RemoveTable { table } => {
                    let name = TABLES[table];
                    registry.remove_table(name);
                    model.remove(name);
                }
            }
        }

        prop_assert_eq!(registry.len(), model.len());
        for table in registry.tables() {
            let expected = model.get(table.name());
            prop_assert!(expected.is_some(), "unexpected table {}", table.name());

            prop_assert!(!table.is_empty());
            let keys: Vec<KeyCode> = table.bindings().iter().map(|b| b.key()).collect();
            for pair in keys.windows(2) {
                prop_assert!(pair[0] < pair[1], "bindings out of order");
            }
            let expected: Vec<KeyCode> = expected.unwrap().iter().copied().collect();
            prop_assert_eq!(keys, expected);
        }
    }
}
