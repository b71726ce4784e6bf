//! The compiled-in default key bindings and their loader.
//!
//! The defaults are plain binding specifications run through the ordinary
//! command path (parser, queue, `bind-key` handler) rather than fed to the
//! registry directly, so defaults and user configuration are defined by
//! literally the same syntax and code.

use thiserror::Error;

use mux_cmd::{CommandQueue, ParseError};

use crate::bindctl::BindingCommands;
use crate::table::KeyBindings;

/// The default binding set: prefix-table bindings, repeatable pane
/// navigation/resize bindings, and root-table mouse bindings.
pub const DEFAULT_BINDINGS: &[&str] = &[
    "bind C-b send-prefix",
    "bind C-o rotate-window",
    "bind C-z suspend-client",
    "bind Space next-layout",
    "bind ! break-pane",
    r#"bind '"' split-window"#,
    "bind '#' list-buffers",
    r#"bind-key -- '$' command-prompt -I '#S' "rename-session '%%'""#,
    "bind-key -- % split-window -h",
    r#"bind-key -- & confirm-before -p "kill-window #W? (y/n)" kill-window"#,
    r#"bind-key -- "'" command-prompt -p index "select-window -t ':%%'""#,
    "bind-key -- ( switch-client -p",
    "bind-key -- ) switch-client -n",
    r#"bind-key -- , command-prompt -I '#W' "rename-window '%%'""#,
    "bind-key -- - delete-buffer",
    r#"bind-key -- . command-prompt "move-window -t '%%'""#,
    "bind-key -- 0 select-window -t :=0",
    "bind-key -- 1 select-window -t :=1",
    "bind-key -- 2 select-window -t :=2",
    "bind-key -- 3 select-window -t :=3",
    "bind-key -- 4 select-window -t :=4",
    "bind-key -- 5 select-window -t :=5",
    "bind-key -- 6 select-window -t :=6",
    "bind-key -- 7 select-window -t :=7",
    "bind-key -- 8 select-window -t :=8",
    "bind-key -- 9 select-window -t :=9",
    "bind : command-prompt",
    r"bind \; last-pane",
    "bind = choose-buffer",
    "bind ? list-keys",
    "bind D choose-client",
    "bind-key -- L switch-client -l",
    "bind-key -- M select-pane -M",
    "bind [ copy-mode",
    "bind ] paste-buffer",
    "bind c new-window",
    "bind d detach-client",
    r#"bind-key -- f command-prompt "find-window '%%'""#,
    "bind i display-message",
    "bind l last-window",
    "bind-key -- m select-pane -m",
    "bind n next-window",
    "bind-key -- o select-pane -t :.+",
    "bind p previous-window",
    "bind q display-panes",
    "bind r refresh-client",
    "bind s choose-tree",
    "bind t clock-mode",
    "bind w choose-window",
    r#"bind-key -- x confirm-before -p "kill-pane #P? (y/n)" kill-pane"#,
    "bind-key -- z resize-pane -Z",
    "bind-key -- { swap-pane -U",
    "bind-key -- } swap-pane -D",
    "bind-key -- '~' show-messages",
    "bind-key -- PPage copy-mode -u",
    "bind-key -r -- Up select-pane -U",
    "bind-key -r -- Down select-pane -D",
    "bind-key -r -- Left select-pane -L",
    "bind-key -r -- Right select-pane -R",
    "bind M-1 select-layout even-horizontal",
    "bind M-2 select-layout even-vertical",
    "bind M-3 select-layout main-horizontal",
    "bind M-4 select-layout main-vertical",
    "bind M-5 select-layout tiled",
    "bind-key -- M-n next-window -a",
    "bind-key -- M-o rotate-window -D",
    "bind-key -- M-p previous-window -a",
    "bind-key -r -- M-Up resize-pane -U 5",
    "bind-key -r -- M-Down resize-pane -D 5",
    "bind-key -r -- M-Left resize-pane -L 5",
    "bind-key -r -- M-Right resize-pane -R 5",
    "bind-key -r -- C-Up resize-pane -U",
    "bind-key -r -- C-Down resize-pane -D",
    "bind-key -r -- C-Left resize-pane -L",
    "bind-key -r -- C-Right resize-pane -R",
    r"bind-key -n -- MouseDown1Pane select-pane -t =\; send-keys -M",
    "bind-key -n -- MouseDrag1Border resize-pane -M",
    "bind-key -n -- MouseDown1Status select-window -t =",
    "bind-key -n -- WheelDownStatus next-window",
    "bind-key -n -- WheelUpStatus previous-window",
    r##"bind-key -n -- MouseDrag1Pane if -F -t = '#{mouse_any_flag}' 'if -F -t = "#{pane_in_mode}" "copy-mode -M" "send-keys -M"' 'copy-mode -M'"##,
    r#"bind-key -n -- MouseDown3Pane if-shell -F -t = '#{mouse_any_flag}' 'select-pane -t =; send-keys -M' 'select-pane -m -t ='"#,
    r##"bind-key -n -- WheelUpPane if-shell -F -t = '#{mouse_any_flag}' 'send-keys -M' 'if -F -t = "#{pane_in_mode}" "send-keys -M" "copy-mode -e -t ="'"##,
];

/// A binding specification that failed to parse during a bulk load.
#[derive(Debug, Error)]
#[error("key binding {index} ('{spec}') failed to parse: {source}")]
pub struct LoadError {
    /// Position of the offending specification in the input list.
    pub index: usize,
    /// The specification text.
    pub spec: String,
    /// The underlying parse failure.
    #[source]
    pub source: ParseError,
}

/// Run a list of binding specifications through the command path.
///
/// One command queue, tied to no client, serves the whole load and is
/// destroyed afterwards. Parsing stops at the first bad specification;
/// handler-level problems (an unknown key, say) are reported on the queue
/// like any runtime command error.
pub fn load_bindings(registry: &mut KeyBindings, specs: &[&str]) -> Result<(), LoadError> {
    let mut queue = CommandQueue::new(None);
    for (index, spec) in specs.iter().enumerate() {
        let cmdlist = mux_cmd::parse(spec).map_err(|source| LoadError {
            index,
            spec: (*spec).to_string(),
            source,
        })?;
        let mut handler = BindingCommands::new(registry);
        queue.run(&cmdlist, None, &mut handler);
        // The parsed list is dropped here; the binding built its own.
    }
    Ok(())
}

/// Populate the registry with the default bindings.
///
/// The defaults are compile-time constants: a parse failure is a build
/// defect, not a runtime condition, and the process must not continue with a
/// partial default table set.
///
/// # Panics
///
/// Panics if any default specification fails to parse.
pub fn load_default_bindings(registry: &mut KeyBindings) {
    if let Err(err) = load_bindings(registry, DEFAULT_BINDINGS) {
        panic!("bad default key binding: {}", err);
    }
    tracing::debug!(
        tables = registry.len(),
        "loaded default key bindings"
    );
}
