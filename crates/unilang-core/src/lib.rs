// UniLang Core Library
// Shortcut detection and replacement for keyboard input

pub mod action;
pub mod dictionary;
pub mod engine;
pub mod host;
pub mod key;
pub mod matcher;

#[cfg(feature = "settings")]
pub mod settings;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use action::Action;
pub use dictionary::{Dictionary, LoadError, COMMENT_CATEGORY, DEFAULT_SOURCE_NAME};
pub use engine::{Engine, EngineConfig};
pub use host::{TextBuffer, TextSurface};
pub use key::{parse_event_stream, KeyEvent, SpecialKey};
pub use matcher::{MatchSignal, Matcher};

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError};
