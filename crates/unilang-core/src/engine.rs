// UniLang Shortcut Engine
// Per-session event processing: matcher state + dictionary lookups -> edit actions
//
// Every character that extends a shortcut candidate is committed to the host
// as plain text first. When the candidate matches a dictionary key, the
// engine reports the matcher's buffer length and the host deletes the
// committed part of it (all but the completing key) before inserting the
// replacement. The matcher must only ever hold characters that were
// committed, or the host deletes unrelated text.

use std::sync::Arc;

use crate::matcher::{MatchSignal, Matcher};
use crate::{Action, Dictionary, KeyEvent, SpecialKey};

/// Configuration for an engine session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Character that starts every shortcut
    pub trigger: char,
    /// When false every character is committed unchanged
    pub enabled: bool,
    /// Backspace also removes the last candidate character
    pub rollback_on_delete: bool,
    /// Enter/Done drop the candidate in progress
    pub reset_on_enter: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trigger: Matcher::DEFAULT_TRIGGER,
            enabled: true,
            rollback_on_delete: false,
            reset_on_enter: false,
        }
    }
}

/// One input session.
///
/// Created when the host starts an input session, `restart()`ed when the
/// host restarts it, dropped when it ends. The dictionary is shared and
/// read-only; the matcher belongs to this session alone.
#[derive(Debug, Clone)]
pub struct Engine {
    dictionary: Arc<Dictionary>,
    matcher: Matcher,
    config: EngineConfig,
}

impl Engine {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self::with_config(dictionary, EngineConfig::default())
    }

    pub fn with_config(dictionary: Arc<Dictionary>, config: EngineConfig) -> Self {
        if !dictionary.is_loaded() {
            log::debug!("Shortcuts dictionary not loaded, session runs in passthrough");
        }
        Self {
            dictionary,
            matcher: Matcher::with_trigger(config.trigger),
            config,
        }
    }

    /// Process one key event from the host
    pub fn process_event(&mut self, event: KeyEvent) -> Action {
        let action = match event {
            KeyEvent::Char(ch) => self.process_char(ch),
            KeyEvent::Special(key) => self.process_special(key),
        };
        log::trace!("{} -> {}", event, action);
        action
    }

    /// Process one typed character
    pub fn process_char(&mut self, ch: char) -> Action {
        if !self.config.enabled {
            return Action::CommitChar(ch);
        }

        let signal = self.matcher.add_char(ch);

        if signal.is_continue() && self.matcher.has_pattern() {
            let pattern = self.matcher.current_pattern();
            return match self.dictionary.lookup(&pattern) {
                Some(replacement) => {
                    let action = Action::DeleteAndInsert {
                        count: self.matcher.pattern_length(),
                        text: replacement.to_string(),
                    };
                    log::debug!("Shortcut {} -> {}", pattern, replacement);
                    self.matcher.reset();
                    action
                }
                None => Action::CommitChar(ch),
            };
        }

        if signal == MatchSignal::Reject {
            self.matcher.reset();
        }
        Action::CommitChar(ch)
    }

    /// Special keys always pass through to the host
    pub fn process_special(&mut self, key: SpecialKey) -> Action {
        match key {
            SpecialKey::Backspace if self.config.rollback_on_delete => {
                self.matcher.remove_last_char();
            }
            SpecialKey::Enter | SpecialKey::Done if self.config.reset_on_enter => {
                self.matcher.reset();
            }
            _ => {}
        }
        Action::Passthrough(key)
    }

    /// Process a sequence of events, collecting the actions in order
    pub fn process_all<I, E>(&mut self, events: I) -> Vec<Action>
    where
        I: IntoIterator<Item = E>,
        E: Into<KeyEvent>,
    {
        events
            .into_iter()
            .map(|event| self.process_event(event.into()))
            .collect()
    }

    /// Session restart: drop any candidate in progress
    pub fn restart(&mut self) {
        self.matcher.reset();
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Turn shortcut expansion on or off. Either way the current candidate
    /// is dropped.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        self.matcher.reset();
        log::debug!("Shortcut expansion {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Flip the enabled state, returning the new value
    pub fn toggle_enabled(&mut self) -> bool {
        self.set_enabled(!self.config.enabled);
        self.config.enabled
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}
