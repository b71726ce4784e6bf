//! Table and binding lifecycle behavior through the public API.

use std::rc::Rc;

use mux_cmd::CommandList;
use mux_keys::{KeyBindings, KeyCode, parse_key};

fn cmdlist(spec: &str) -> CommandList {
    mux_cmd::parse(spec).unwrap()
}

#[test]
fn lookup_is_absent_until_created_then_identity_is_stable() {
    let mut registry = KeyBindings::new();
    assert!(registry.get_table("prefix", false).is_none());

    let created = registry.get_table("prefix", true).unwrap();
    let looked_up = registry.get_table("prefix", false).unwrap();
    let looked_up_again = registry.get_table("prefix", true).unwrap();
    assert!(Rc::ptr_eq(&created, &looked_up));
    assert!(Rc::ptr_eq(&created, &looked_up_again));
}

#[test]
fn add_then_lookup_yields_exactly_what_was_bound() {
    let mut registry = KeyBindings::new();
    let key = parse_key("C-b").unwrap();
    registry.add_binding("prefix", key, true, cmdlist("send-prefix"));

    let table = registry.get_table("prefix", false).unwrap();
    let binding = table.binding(key).unwrap();
    assert_eq!(binding.key(), key);
    assert!(binding.can_repeat());
    assert_eq!(binding.command_list().to_string(), "send-prefix");
}

#[test]
fn rebinding_a_key_discards_the_prior_command_list() {
    let mut registry = KeyBindings::new();
    let key = parse_key("x").unwrap();
    registry.add_binding("prefix", key, false, cmdlist("new-window"));
    registry.add_binding("prefix", key, false, cmdlist("detach-client"));

    let table = registry.get_table("prefix", false).unwrap();
    assert_eq!(table.len(), 1);
    let binding = table.binding(key).unwrap();
    assert_eq!(binding.command_list().to_string(), "detach-client");
}

#[test]
fn add_then_remove_restores_the_prior_binding_set() {
    let mut registry = KeyBindings::new();
    let d = parse_key("d").unwrap();
    let c = parse_key("c").unwrap();
    registry.add_binding("prefix", d, false, cmdlist("detach-client"));

    let before: Vec<KeyCode> = registry
        .get_table("prefix", false)
        .unwrap()
        .bindings()
        .iter()
        .map(|b| b.key())
        .collect();

    registry.add_binding("prefix", c, false, cmdlist("new-window"));
    registry.remove_binding("prefix", c);

    let after: Vec<KeyCode> = registry
        .get_table("prefix", false)
        .unwrap()
        .bindings()
        .iter()
        .map(|b| b.key())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn removing_the_last_binding_removes_the_table() {
    let mut registry = KeyBindings::new();
    let key = parse_key("d").unwrap();
    registry.add_binding("prefix", key, false, cmdlist("detach-client"));
    registry.remove_binding("prefix", key);

    assert!(registry.get_table("prefix", false).is_none());
}

#[test]
fn removing_a_non_last_binding_leaves_the_rest_untouched() {
    let mut registry = KeyBindings::new();
    for name in ["a", "b", "c"] {
        registry.add_binding("prefix", parse_key(name).unwrap(), false, cmdlist("new-window"));
    }
    registry.remove_binding("prefix", parse_key("b").unwrap());

    let table = registry.get_table("prefix", false).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.binding(parse_key("a").unwrap()).is_some());
    assert!(table.binding(parse_key("c").unwrap()).is_some());
}

#[test]
fn explicit_table_removal_spares_other_tables() {
    let mut registry = KeyBindings::new();
    let key = parse_key("q").unwrap();
    registry.add_binding("prefix", key, false, cmdlist("display-panes"));
    registry.add_binding("root", key, false, cmdlist("display-panes"));

    registry.remove_table("prefix");

    assert!(registry.get_table("prefix", false).is_none());
    assert!(registry.get_table("root", false).is_some());
}
