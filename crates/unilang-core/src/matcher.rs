// UniLang Pattern Matcher
// Incremental recognizer for trigger-prefixed shortcut candidates

use smallvec::SmallVec;

/// Signal returned for every character fed to the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSignal {
    /// The character is part of a shortcut candidate
    Continue,
    /// The character is ordinary text
    Reject,
}

impl MatchSignal {
    pub fn is_continue(self) -> bool {
        matches!(self, MatchSignal::Continue)
    }
}

/// Per-session shortcut candidate buffer.
///
/// The buffer is either empty or holds the trigger character followed by
/// letters, digits and underscores. Nothing else is ever appended.
#[derive(Debug, Clone)]
pub struct Matcher {
    buffer: SmallVec<[char; 32]>,
    trigger: char,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_trigger(Self::DEFAULT_TRIGGER)
    }
}

impl Matcher {
    pub const DEFAULT_TRIGGER: char = '\\';

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trigger(trigger: char) -> Self {
        Self {
            buffer: SmallVec::new(),
            trigger,
        }
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    /// Feed one character.
    ///
    /// A trigger always starts a fresh candidate. On `Reject` with a
    /// candidate in progress the buffer is left as it was; clearing it is up
    /// to the caller.
    pub fn add_char(&mut self, ch: char) -> MatchSignal {
        if ch == self.trigger {
            self.buffer.clear();
            self.buffer.push(ch);
            return MatchSignal::Continue;
        }

        if self.buffer.is_empty() {
            return MatchSignal::Reject;
        }

        if is_pattern_char(ch) {
            self.buffer.push(ch);
            return MatchSignal::Continue;
        }

        MatchSignal::Reject
    }

    /// Current candidate text, e.g. `\alp`
    pub fn current_pattern(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Candidate length in Unicode scalar values
    pub fn pattern_length(&self) -> usize {
        self.buffer.len()
    }

    /// True once the buffer holds the trigger plus at least one character.
    /// A lone trigger is never a pattern.
    pub fn has_pattern(&self) -> bool {
        self.buffer.len() >= 2 && self.buffer[0] == self.trigger
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Drop the last buffered character, mirroring a backspace in the host text
    pub fn remove_last_char(&mut self) -> Option<char> {
        self.buffer.pop()
    }
}

/// Characters allowed after the trigger
pub fn is_pattern_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A trigger cannot be a pattern character or whitespace, or candidates
/// could never end.
pub fn is_valid_trigger(ch: char) -> bool {
    !is_pattern_char(ch) && !ch.is_whitespace()
}
