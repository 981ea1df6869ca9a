//! Core key types: KeyCode and its legacy numeric mapping

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// A key code representing the logical key behind an input event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyCode {
    /// A character key (normalized to lowercase)
    Char(char),

    // Named keys
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Modifiers pressed on their own
    Shift,
    Ctrl,
    Alt,
    Meta,

    /// Primary pointer button. Click events report it where key events report
    /// a key, which makes it the "no real key" code `1`.
    PrimaryButton,

    /// Any other legacy key code
    Other(u32),
}

impl KeyCode {
    /// Build a key from a typed character
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => KeyCode::Space,
            '\n' | '\r' => KeyCode::Enter,
            '\t' => KeyCode::Tab,
            c => KeyCode::Char(c.to_ascii_lowercase()),
        }
    }

    /// Legacy numeric key code (`KeyboardEvent.which`).
    ///
    /// Only letters and digits have one among characters; other characters
    /// report 0, the code for an unidentified key.
    pub fn which(self) -> u32 {
        match self {
            KeyCode::PrimaryButton => 1,
            KeyCode::Backspace => 8,
            KeyCode::Tab => 9,
            KeyCode::Enter => 13,
            KeyCode::Shift => 16,
            KeyCode::Ctrl => 17,
            KeyCode::Alt => 18,
            KeyCode::Escape => 27,
            KeyCode::Space => 32,
            KeyCode::PageUp => 33,
            KeyCode::PageDown => 34,
            KeyCode::End => 35,
            KeyCode::Home => 36,
            KeyCode::Left => 37,
            KeyCode::Up => 38,
            KeyCode::Right => 39,
            KeyCode::Down => 40,
            KeyCode::Delete => 46,
            KeyCode::Meta => 91,
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as u32,
            KeyCode::Char(_) => 0,
            KeyCode::Other(code) => code,
        }
    }

    /// Inverse of [`KeyCode::which`]
    pub fn from_which(code: u32) -> Self {
        match code {
            1 => KeyCode::PrimaryButton,
            8 => KeyCode::Backspace,
            9 => KeyCode::Tab,
            13 => KeyCode::Enter,
            16 => KeyCode::Shift,
            17 => KeyCode::Ctrl,
            18 => KeyCode::Alt,
            27 => KeyCode::Escape,
            32 => KeyCode::Space,
            33 => KeyCode::PageUp,
            34 => KeyCode::PageDown,
            35 => KeyCode::End,
            36 => KeyCode::Home,
            37 => KeyCode::Left,
            38 => KeyCode::Up,
            39 => KeyCode::Right,
            40 => KeyCode::Down,
            46 => KeyCode::Delete,
            91 => KeyCode::Meta,
            48..=57 | 65..=90 => char::from_u32(code)
                .map(|c| KeyCode::Char(c.to_ascii_lowercase()))
                .unwrap_or(KeyCode::Other(code)),
            other => KeyCode::Other(other),
        }
    }

    /// Whether the key inserts visible content when typed
    pub fn is_printable(self) -> bool {
        matches!(self, KeyCode::Char(_) | KeyCode::Space)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Escape => write!(f, "Escape"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::Delete => write!(f, "Delete"),
            KeyCode::Space => write!(f, "Space"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Shift => write!(f, "Shift"),
            KeyCode::Ctrl => write!(f, "Ctrl"),
            KeyCode::Alt => write!(f, "Alt"),
            KeyCode::Meta => write!(f, "Meta"),
            KeyCode::PrimaryButton => write!(f, "PrimaryButton"),
            KeyCode::Other(code) => write!(f, "Key{}", code),
        }
    }
}

/// Parse a key name like "enter", "left", "a" or a numeric code like "13"
impl FromStr for KeyCode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeyCode::from_char(c));
        }
        if let Ok(code) = trimmed.parse::<u32>() {
            return Ok(KeyCode::from_which(code));
        }
        if let Some(code) = trimmed.strip_prefix("Key").and_then(|n| n.parse::<u32>().ok()) {
            return Ok(KeyCode::Other(code));
        }

        let key = match trimmed.to_ascii_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "escape" | "esc" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Space,
            "up" | "arrowup" => KeyCode::Up,
            "down" | "arrowdown" => KeyCode::Down,
            "left" | "arrowleft" => KeyCode::Left,
            "right" | "arrowright" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "shift" => KeyCode::Shift,
            "ctrl" | "control" => KeyCode::Ctrl,
            "alt" | "option" => KeyCode::Alt,
            "meta" | "cmd" | "command" | "super" => KeyCode::Meta,
            "primarybutton" | "click" => KeyCode::PrimaryButton,
            _ => return Err(EditorError::InvalidKey(trimmed.to_string())),
        };
        Ok(key)
    }
}

impl TryFrom<String> for KeyCode {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCode> for String {
    fn from(key: KeyCode) -> Self {
        match key {
            KeyCode::Char(c) => c.to_string(),
            other => other.to_string(),
        }
    }
}
