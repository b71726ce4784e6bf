//! Parsing of textual binding specifications into command lists.
//!
//! Responsibilities:
//! - Tokenize a specification line (single quotes, double quotes, backslash
//!   escapes).
//! - Split token streams into commands on unescaped `;` separators and
//!   resolve command names through the static command table.
//!
//! Does NOT handle:
//! - Interpreting command arguments (handlers own their argument syntax).
//! - Configuration files or comments; input is one specification per call.
//!
//! Invariants:
//! - A `;` produced by quoting or escaping never separates commands at this
//!   level; it survives into the argument text, where `parse_words` (the
//!   second level of the two-level parse) treats it as the separator for the
//!   nested command list.

use thiserror::Error;

use crate::command::{Command, CommandList, lookup};

/// Errors from parsing a binding specification.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The specification contained no command
    #[error("empty command")]
    Empty,

    /// The command name is not in the command table
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The unrecognized command word
        name: String,
    },

    /// A quote was opened but never closed
    #[error("unterminated quote: '{input}'")]
    UnterminatedQuote {
        /// The offending input line
        input: String,
    },

    /// The input ended in a bare backslash
    #[error("trailing escape: '{input}'")]
    TrailingEscape {
        /// The offending input line
        input: String,
    },
}

/// One word of input. `literal` records that quoting or escaping produced it,
/// which exempts it from separator handling.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    literal: bool,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            None => break,
            // An unquoted separator ends a word even with no space around it.
            Some(';') => {
                chars.next();
                tokens.push(Token {
                    text: ";".to_string(),
                    literal: false,
                });
                continue;
            }
            Some(_) => {}
        }

        let mut text = String::new();
        let mut literal = false;
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == ';' {
                break;
            }
            chars.next();
            match c {
                '\'' => {
                    literal = true;
                    loop {
                        match chars.next() {
                            Some('\'') => break,
                            Some(ch) => text.push(ch),
                            None => {
                                return Err(ParseError::UnterminatedQuote {
                                    input: input.to_string(),
                                });
                            }
                        }
                    }
                }
                '"' => {
                    literal = true;
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some('\\') => match chars.next() {
                                Some(ch) => text.push(ch),
                                None => {
                                    return Err(ParseError::UnterminatedQuote {
                                        input: input.to_string(),
                                    });
                                }
                            },
                            Some(ch) => text.push(ch),
                            None => {
                                return Err(ParseError::UnterminatedQuote {
                                    input: input.to_string(),
                                });
                            }
                        }
                    }
                }
                '\\' => {
                    literal = true;
                    match chars.next() {
                        Some(ch) => text.push(ch),
                        None => {
                            return Err(ParseError::TrailingEscape {
                                input: input.to_string(),
                            });
                        }
                    }
                }
                _ => text.push(c),
            }
        }
        tokens.push(Token { text, literal });
    }

    Ok(tokens)
}

fn build_command(words: &[String]) -> Result<Command, ParseError> {
    let (name, args) = words.split_first().ok_or(ParseError::Empty)?;
    let spec = lookup(name).ok_or_else(|| ParseError::UnknownCommand {
        name: name.clone(),
    })?;
    Ok(Command::new(spec, args.to_vec()))
}

/// Parse one specification line into a command list.
pub fn parse(input: &str) -> Result<CommandList, ParseError> {
    let tokens = tokenize(input)?;

    let mut commands = Vec::new();
    let mut words: Vec<String> = Vec::new();
    for token in tokens {
        if token.text == ";" && !token.literal {
            if !words.is_empty() {
                commands.push(build_command(&words)?);
                words.clear();
            }
        } else {
            words.push(token.text);
        }
    }
    if !words.is_empty() {
        commands.push(build_command(&words)?);
    }

    if commands.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(CommandList::new(commands))
}

/// Build a command list from pre-tokenized words.
///
/// This is the second level of the two-level parse: `bind-key` receives the
/// bound command as already-tokenized arguments, where a word ending in `;`
/// (an escaped separator at the outer level) terminates a command with the
/// `;` stripped. A word ending in `\;` keeps a literal `;` instead.
pub fn parse_words(words: &[String]) -> Result<CommandList, ParseError> {
    let mut commands = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for word in words {
        if let Some(stripped) = word.strip_suffix(';') {
            if let Some(unescaped) = stripped.strip_suffix('\\') {
                current.push(format!("{};", unescaped));
                continue;
            }
            if !stripped.is_empty() {
                current.push(stripped.to_string());
            }
            if !current.is_empty() {
                commands.push(build_command(&current)?);
                current.clear();
            }
            continue;
        }
        current.push(word.clone());
    }
    if !current.is_empty() {
        commands.push(build_command(&current)?);
    }

    if commands.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(CommandList::new(commands))
}
