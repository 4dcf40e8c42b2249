// UniLang Key Events
// Input events delivered by the host keyboard surface

use std::fmt;
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

/// Keys the host intercepts before they reach the matcher.
///
/// These never go through `Matcher::add_char`; the engine answers them with
/// `Action::Passthrough` so the host can apply its own editing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SpecialKey {
    /// Delete the character before the cursor
    #[strum(to_string = "backspace", serialize = "delete")]
    Backspace,
    /// Line break
    Enter,
    /// Editor action key (Android KEYCODE_DONE), applied as a line break
    Done,
}

impl SpecialKey {
    /// Map a control character to the special key it represents
    pub fn from_control_char(ch: char) -> Option<Self> {
        match ch {
            '\u{0008}' | '\u{007F}' => Some(SpecialKey::Backspace),
            '\n' | '\r' => Some(SpecialKey::Enter),
            _ => None,
        }
    }
}

/// A single event from the host keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// An ordinary character key
    Char(char),
    /// A key handled by the host itself
    Special(SpecialKey),
}

impl KeyEvent {
    /// Returns the character for `Char` events
    pub fn as_char(self) -> Option<char> {
        match self {
            KeyEvent::Char(ch) => Some(ch),
            KeyEvent::Special(_) => None,
        }
    }

    /// Returns true for special-key events
    pub fn is_special(self) -> bool {
        matches!(self, KeyEvent::Special(_))
    }
}

impl From<char> for KeyEvent {
    fn from(ch: char) -> Self {
        match SpecialKey::from_control_char(ch) {
            Some(key) => KeyEvent::Special(key),
            None => KeyEvent::Char(ch),
        }
    }
}

impl From<SpecialKey> for KeyEvent {
    fn from(key: SpecialKey) -> Self {
        KeyEvent::Special(key)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Char(ch) => write!(f, "{:?}", ch),
            KeyEvent::Special(key) => write!(f, "<{}>", key),
        }
    }
}

/// Parse a typed stream into key events.
///
/// Special keys are written as tags, e.g. `"\\alp<backspace>ha"`. A `<` that
/// does not open a known tag is an ordinary character. Control characters
/// (`\n`, `\x08`, `\x7f`) map to their special keys.
pub fn parse_event_stream(input: &str) -> Vec<KeyEvent> {
    let mut events = Vec::with_capacity(input.len());
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(end) = rest.find('>') {
                if let Ok(key) = SpecialKey::from_str(&rest[1..end]) {
                    events.push(KeyEvent::Special(key));
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }
        events.push(KeyEvent::from(ch));
        rest = &rest[ch.len_utf8()..];
    }

    events
}
