//! Read-only enforcement and queue submission at dispatch time.

use std::cell::RefCell;
use std::rc::Rc;

use mux_cmd::{Command, CommandError, CommandHandler, CommandQueue, MouseEvent};
use mux_keys::{Client, ClientFlags, KeyBinding, KeyBindings, dispatch, parse_key};

/// Handler standing in for the rest of the command system.
#[derive(Debug, Default)]
struct Recorder {
    executed: Vec<String>,
    saw_mouse: bool,
}

impl CommandHandler for Recorder {
    fn execute(&mut self, command: &Command, mouse: Option<&MouseEvent>) -> Result<(), CommandError> {
        self.executed.push(command.name().to_string());
        if mouse.is_some() {
            self.saw_mouse = true;
        }
        Ok(())
    }
}

fn binding_for(spec: &str) -> (KeyBindings, Rc<KeyBinding>) {
    let mut registry = KeyBindings::new();
    let key = parse_key("x").unwrap();
    registry.add_binding("prefix", key, false, mux_cmd::parse(spec).unwrap());
    let binding = registry
        .get_table("prefix", false)
        .unwrap()
        .binding(key)
        .unwrap();
    (registry, binding)
}

fn client(flags: ClientFlags) -> Client {
    Client::new(flags, Rc::new(RefCell::new(CommandQueue::new(Some("client0")))))
}

#[test]
fn read_only_client_is_refused_a_mutating_list() {
    let (_registry, binding) = binding_for("new-window");
    let client = client(ClientFlags::READONLY);
    let mut handler = Recorder::default();

    dispatch(&binding, &client, None, &mut handler);

    let queue = client.queue.borrow();
    assert_eq!(queue.errors(), ["client is read-only"]);
    assert_eq!(queue.runs(), 0);
    assert!(handler.executed.is_empty());
}

#[test]
fn one_mutating_command_poisons_the_whole_list() {
    let (_registry, binding) = binding_for("list-keys ; new-window");
    let client = client(ClientFlags::READONLY);
    let mut handler = Recorder::default();

    dispatch(&binding, &client, None, &mut handler);

    assert_eq!(client.queue.borrow().runs(), 0);
    assert!(handler.executed.is_empty());
}

#[test]
fn read_only_client_may_run_an_all_read_only_list() {
    let (_registry, binding) = binding_for("copy-mode ; list-keys");
    let client = client(ClientFlags::READONLY);
    let mut handler = Recorder::default();

    dispatch(&binding, &client, None, &mut handler);

    let queue = client.queue.borrow();
    assert!(queue.errors().is_empty());
    assert_eq!(queue.runs(), 1);
    assert_eq!(handler.executed, ["copy-mode", "list-keys"]);
}

#[test]
fn unrestricted_client_runs_anything() {
    let (_registry, binding) = binding_for("new-window ; split-window -h");
    let client = client(ClientFlags::empty());
    let mut handler = Recorder::default();

    dispatch(&binding, &client, None, &mut handler);

    assert_eq!(client.queue.borrow().runs(), 1);
    assert_eq!(handler.executed, ["new-window", "split-window"]);
}

#[test]
fn mouse_payload_reaches_the_handler() {
    let (_registry, binding) = binding_for("select-pane -t =");
    let client = client(ClientFlags::empty());
    let mut handler = Recorder::default();
    let mouse = MouseEvent { x: 4, y: 2, button: 0 };

    dispatch(&binding, &client, Some(&mouse), &mut handler);

    assert!(handler.saw_mouse);
}

#[test]
fn refusal_does_not_consume_the_binding() {
    let (_registry, binding) = binding_for("new-window");
    let client = client(ClientFlags::READONLY);
    let mut handler = Recorder::default();

    dispatch(&binding, &client, None, &mut handler);
    // The binding still owns its command list and can dispatch later.
    let unrestricted = self::client(ClientFlags::empty());
    dispatch(&binding, &unrestricted, None, &mut handler);

    assert_eq!(unrestricted.queue.borrow().runs(), 1);
    assert_eq!(handler.executed, ["new-window"]);
}
