use std::fmt;

use crate::SpecialKey;

/// Edit the host applies to its text surface after one key event.
///
/// Actions are applied in the order the engine emits them. The engine relies
/// on every `CommitChar` actually landing in the host text: a later
/// `DeleteAndInsert` removes exactly the characters committed for the
/// current shortcut candidate.
///
/// `DeleteAndInsert::count` is the length of the whole matched pattern. Its
/// last character belongs to the event being processed and was never
/// committed, so the host text loses `count - 1` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Type the character as ordinary text
    CommitChar(char),
    /// Replace the `count`-character pattern ending with this event by `text`
    DeleteAndInsert { count: usize, text: String },
    /// A special key the host handles on its own
    Passthrough(SpecialKey),
}

impl Action {
    /// Returns true if this action replaces previously committed text
    pub fn is_replacement(&self) -> bool {
        matches!(self, Action::DeleteAndInsert { .. })
    }

    /// Returns true if this action types a single character
    pub fn is_commit(&self) -> bool {
        matches!(self, Action::CommitChar(_))
    }

    /// Number of characters this action removes from the host text
    pub fn deleted_count(&self) -> usize {
        match self {
            Action::DeleteAndInsert { count, .. } => count.saturating_sub(1),
            Action::Passthrough(SpecialKey::Backspace) => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CommitChar(ch) => write!(f, "commit {:?}", ch),
            Action::DeleteAndInsert { count, text } => {
                write!(f, "replace {} with {:?}", count, text)
            }
            Action::Passthrough(key) => write!(f, "passthrough <{}>", key),
        }
    }
}
