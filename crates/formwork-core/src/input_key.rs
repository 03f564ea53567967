//! Abstract input key event, independent of terminal library.
//!
//! Components only ever see [`InputKey`]; the terminal layer converts
//! crossterm events at its boundary. Keys also have a textual chord form
//! (`"enter"`, `"shift+tab"`, `"ctrl+c"`, `"?"`) used by key-binding
//! configuration and help text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Abstract input key event, independent of terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InputKey {
    // Character keys
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+a, Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    /// Up arrow key
    Up,
    /// Down arrow key
    Down,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,

    // Action keys
    /// Enter/Return key
    Enter,
    /// Escape key
    Esc,
    /// Tab key
    Tab,
    /// Shift+Tab (BackTab)
    BackTab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,

    // Function keys
    /// Function key (F1-F12)
    F(u8),
}

impl FromStr for InputKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chord = s.trim();
        let key = match chord.to_ascii_lowercase().as_str() {
            "up" => InputKey::Up,
            "down" => InputKey::Down,
            "left" => InputKey::Left,
            "right" => InputKey::Right,
            "home" => InputKey::Home,
            "end" => InputKey::End,
            "pgup" | "pageup" => InputKey::PageUp,
            "pgdown" | "pagedown" => InputKey::PageDown,
            "enter" | "return" => InputKey::Enter,
            "esc" | "escape" => InputKey::Esc,
            "tab" => InputKey::Tab,
            "shift+tab" | "backtab" => InputKey::BackTab,
            "backspace" => InputKey::Backspace,
            "delete" | "del" => InputKey::Delete,
            "space" => InputKey::Char(' '),
            lower => {
                if let Some(rest) = lower.strip_prefix("ctrl+") {
                    let mut chars = rest.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => InputKey::CharCtrl(c),
                        _ => return Err(Error::invalid_key(chord)),
                    }
                } else if let Some(n) = lower
                    .strip_prefix('f')
                    .and_then(|n| n.parse::<u8>().ok())
                    .filter(|n| (1..=12).contains(n))
                {
                    InputKey::F(n)
                } else {
                    // Single characters keep their original case
                    let mut chars = chord.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => InputKey::Char(c),
                        _ => return Err(Error::invalid_key(chord)),
                    }
                }
            }
        };
        Ok(key)
    }
}

impl TryFrom<String> for InputKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InputKey> for String {
    fn from(key: InputKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKey::Char(' ') => write!(f, "space"),
            InputKey::Char(c) => write!(f, "{c}"),
            InputKey::CharCtrl(c) => write!(f, "ctrl+{c}"),
            InputKey::Up => write!(f, "up"),
            InputKey::Down => write!(f, "down"),
            InputKey::Left => write!(f, "left"),
            InputKey::Right => write!(f, "right"),
            InputKey::Home => write!(f, "home"),
            InputKey::End => write!(f, "end"),
            InputKey::PageUp => write!(f, "pgup"),
            InputKey::PageDown => write!(f, "pgdown"),
            InputKey::Enter => write!(f, "enter"),
            InputKey::Esc => write!(f, "esc"),
            InputKey::Tab => write!(f, "tab"),
            InputKey::BackTab => write!(f, "shift+tab"),
            InputKey::Backspace => write!(f, "backspace"),
            InputKey::Delete => write!(f, "delete"),
            InputKey::F(n) => write!(f, "f{n}"),
        }
    }
}
