//! Key codes: a single ordered value per key or mouse event.
//!
//! Responsibilities:
//! - Encode a base key (character, named key, or mouse event) plus modifier
//!   bits into one totally ordered value.
//! - Parse key names like `C-b`, `M-Up`, `PPage`, `MouseDown1Pane` and render
//!   them back in canonical form.
//!
//! Invariants:
//! - Equality and ordering are by the raw encoded value; the encoding is the
//!   uniqueness key within a key table.
//! - Parsing the `Display` form of any key yields the same key.

use std::fmt;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Modifier bits, stored above the 32-bit base key region.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct KeyModifiers: u64 {
        const CTRL = 1 << 32;
        const META = 1 << 33;
        const SHIFT = 1 << 34;
    }
}

const BASE_MASK: u64 = 0xffff_ffff;
const NAMED_BASE: u64 = 0x1000_0000;
const MOUSE_BASE: u64 = 0x2000_0000;

const fn named(offset: u64) -> u64 {
    NAMED_BASE + offset
}

/// Named keys. Canonical names first; aliases map to the same code and are
/// accepted on input only.
const NAMED_KEYS: &[(&str, u64)] = &[
    ("Up", named(0)),
    ("Down", named(1)),
    ("Left", named(2)),
    ("Right", named(3)),
    ("Home", named(4)),
    ("End", named(5)),
    ("PPage", named(6)),
    ("NPage", named(7)),
    ("BTab", named(8)),
    ("BSpace", named(9)),
    ("IC", named(10)),
    ("DC", named(11)),
    ("F1", named(32)),
    ("F2", named(33)),
    ("F3", named(34)),
    ("F4", named(35)),
    ("F5", named(36)),
    ("F6", named(37)),
    ("F7", named(38)),
    ("F8", named(39)),
    ("F9", named(40)),
    ("F10", named(41)),
    ("F11", named(42)),
    ("F12", named(43)),
    // Character keys that read better by name.
    ("Tab", 0x09),
    ("Enter", 0x0d),
    ("Escape", 0x1b),
    ("Space", 0x20),
    // Aliases.
    ("PageUp", named(6)),
    ("PgUp", named(6)),
    ("PageDown", named(7)),
    ("PgDn", named(7)),
    ("Insert", named(10)),
    ("Delete", named(11)),
];

const MOUSE_EVENTS: &[&str] = &[
    "MouseDown1",
    "MouseDown2",
    "MouseDown3",
    "MouseUp1",
    "MouseUp2",
    "MouseUp3",
    "MouseDrag1",
    "MouseDrag2",
    "MouseDrag3",
    "WheelUp",
    "WheelDown",
];

const MOUSE_LOCATIONS: &[&str] = &["Pane", "Status", "Border"];

/// Errors from parsing a key name.
#[derive(Debug, Error, PartialEq)]
pub enum KeyParseError {
    /// The key name was empty
    #[error("empty key name")]
    Empty,

    /// The key name is not a character, named key, or mouse event
    #[error("unknown key: '{name}'")]
    UnknownKey {
        /// The unrecognized key name
        name: String,
    },
}

/// An encoded key or mouse event plus modifier state.
///
/// The low 32 bits hold the base key (Unicode scalar, named key, or mouse
/// event); modifier bits sit above them, so the whole value orders and
/// compares as one integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCode(u64);

impl KeyCode {
    /// The key for a plain character, no modifiers.
    pub fn from_char(c: char) -> Self {
        Self(c as u64)
    }

    /// Base key with the modifier region cleared.
    pub fn base(self) -> u64 {
        self.0 & BASE_MASK
    }

    /// Modifier bits of this key.
    pub fn modifiers(self) -> KeyModifiers {
        KeyModifiers::from_bits_truncate(self.0)
    }

    /// This key with the given modifiers added.
    pub fn with_modifiers(self, modifiers: KeyModifiers) -> Self {
        Self(self.0 | modifiers.bits())
    }

    /// Whether this key encodes a mouse event rather than a keystroke.
    pub fn is_mouse(self) -> bool {
        let base = self.base();
        (MOUSE_BASE..MOUSE_BASE + (MOUSE_EVENTS.len() * MOUSE_LOCATIONS.len()) as u64)
            .contains(&base)
    }
}

fn lookup_named(name: &str) -> Option<u64> {
    NAMED_KEYS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}

fn lookup_mouse(name: &str) -> Option<u64> {
    for (e, event) in MOUSE_EVENTS.iter().enumerate() {
        // The split point may fall inside a multi-byte character; that can
        // never be a mouse name, so skip rather than slice.
        let Some((head, tail)) = name.split_at_checked(event.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(event) {
            continue;
        }
        for (l, location) in MOUSE_LOCATIONS.iter().enumerate() {
            if tail.eq_ignore_ascii_case(location) {
                return Some(MOUSE_BASE + (e * MOUSE_LOCATIONS.len() + l) as u64);
            }
        }
    }
    None
}

/// Parse a key name: optional `C-`/`M-`/`S-` prefixes, then a single
/// character, a named key, or a mouse event name. Named and mouse keys match
/// case-insensitively; character keys are case-sensitive.
pub fn parse_key(input: &str) -> Result<KeyCode, KeyParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let mut modifiers = KeyModifiers::empty();
    let mut rest = input;
    loop {
        let bytes = rest.as_bytes();
        if bytes.len() > 2 && bytes[1] == b'-' {
            let flag = match bytes[0] {
                b'C' | b'c' => Some(KeyModifiers::CTRL),
                b'M' | b'm' => Some(KeyModifiers::META),
                b'S' | b's' => Some(KeyModifiers::SHIFT),
                _ => None,
            };
            if let Some(flag) = flag {
                modifiers |= flag;
                rest = &rest[2..];
                continue;
            }
        }
        break;
    }

    let mut chars = rest.chars();
    let base = match (chars.next(), chars.next()) {
        (Some(c), None) => c as u64,
        _ => lookup_named(rest)
            .or_else(|| lookup_mouse(rest))
            .ok_or_else(|| KeyParseError::UnknownKey {
                name: input.to_string(),
            })?,
    };

    Ok(KeyCode(base | modifiers.bits()))
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.modifiers();
        if modifiers.contains(KeyModifiers::CTRL) {
            write!(f, "C-")?;
        }
        if modifiers.contains(KeyModifiers::META) {
            write!(f, "M-")?;
        }
        if modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "S-")?;
        }

        let base = self.base();
        if self.is_mouse() {
            let index = (base - MOUSE_BASE) as usize;
            let event = MOUSE_EVENTS[index / MOUSE_LOCATIONS.len()];
            let location = MOUSE_LOCATIONS[index % MOUSE_LOCATIONS.len()];
            return write!(f, "{}{}", event, location);
        }
        if let Some((name, _)) = NAMED_KEYS.iter().find(|&&(_, code)| code == base) {
            return write!(f, "{}", name);
        }
        match char::from_u32(base as u32) {
            Some(c) if !c.is_control() => write!(f, "{}", c),
            _ => write!(f, "0x{:x}", base),
        }
    }
}

// Debug in terms of the canonical key name keeps test failures readable.
impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyCode({})", self)
    }
}
