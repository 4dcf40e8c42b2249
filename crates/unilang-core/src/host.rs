// UniLang Host Surface
// Applies engine actions to a text surface owned by the host keyboard

use crate::{Action, SpecialKey};

/// A text surface the host keyboard edits.
///
/// Platform shells implement the primitive edits on top of their input
/// connection; `apply` maps engine actions onto them. Counts are in Unicode
/// scalar values.
pub trait TextSurface {
    /// Insert text at the cursor
    fn commit_text(&mut self, text: &str);

    /// Delete `count` characters before the cursor
    fn delete_before(&mut self, count: usize);

    /// Handle a special key the engine passed through
    fn send_special(&mut self, key: SpecialKey);

    fn apply(&mut self, action: &Action) {
        match action {
            Action::CommitChar(ch) => {
                let mut buf = [0u8; 4];
                self.commit_text(ch.encode_utf8(&mut buf));
            }
            Action::DeleteAndInsert { text, .. } => {
                self.delete_before(action.deleted_count());
                self.commit_text(text);
            }
            Action::Passthrough(key) => self.send_special(*key),
        }
    }

    fn apply_all<'a, I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = &'a Action>,
    {
        for action in actions {
            self.apply(action);
        }
    }
}

/// In-memory text surface with the cursor fixed at the end.
///
/// Used by the command line tool and as the mock host in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl TextSurface for TextBuffer {
    fn commit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_before(&mut self, count: usize) {
        for _ in 0..count {
            if self.text.pop().is_none() {
                break;
            }
        }
    }

    fn send_special(&mut self, key: SpecialKey) {
        match key {
            SpecialKey::Backspace => self.delete_before(1),
            SpecialKey::Enter | SpecialKey::Done => self.text.push('\n'),
        }
    }
}
