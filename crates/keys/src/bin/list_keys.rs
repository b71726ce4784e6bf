//! Print the default key bindings as re-parseable `bind-key` lines.
//!
//! Responsibilities:
//! - Load the built-in defaults into a fresh registry and list every binding
//!   in table order, then key order.
//!
//! Does NOT handle:
//! - A live server's tables; this is the compiled-in default set only.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mux_cmd::CommandList;
use mux_keys::{KeyBinding, KeyBindings, KeyTable, load_default_bindings};

/// List the built-in default key bindings.
#[derive(Debug, Parser)]
#[command(
    name = "list-keys",
    about = "List the default key bindings as bind-key commands"
)]
struct Args {
    /// Only list bindings from this key table.
    #[arg(short = 'T', long = "table")]
    table: Option<String>,
}

/// Quote key names that would not re-parse as one word.
fn quote_key(name: String) -> String {
    match name.as_str() {
        ";" => "';'".to_string(),
        "\"" => "'\"'".to_string(),
        "'" => "\"'\"".to_string(),
        _ => name,
    }
}

/// Render a command list with escaped separators, so the listed line binds
/// the whole list again instead of splitting at the first `;`.
fn format_command_list(cmdlist: &CommandList) -> String {
    cmdlist
        .iter()
        .map(|command| command.to_string())
        .collect::<Vec<_>>()
        .join(r" \; ")
}

fn format_binding(table: &KeyTable, binding: &KeyBinding) -> String {
    let repeat = if binding.can_repeat() { "-r " } else { "" };
    format!(
        "bind-key {}-T {} {} {}",
        repeat,
        table.name(),
        quote_key(binding.key().to_string()),
        format_command_list(binding.command_list())
    )
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut registry = KeyBindings::new();
    load_default_bindings(&mut registry);

    if let Some(name) = &args.table
        && registry.get_table(name, false).is_none()
    {
        anyhow::bail!("no such key table: {}", name);
    }

    for table in registry.tables() {
        if let Some(name) = &args.table
            && table.name() != name
        {
            continue;
        }
        for binding in table.bindings() {
            println!("{}", format_binding(table, &binding));
        }
    }

    Ok(())
}
