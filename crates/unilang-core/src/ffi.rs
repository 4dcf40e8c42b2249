//! C ABI for the platform keyboard shells.
//!
//! The shells own the keyboard view and the OS input connection; they hand
//! each key to `unilang_engine_process_*` and apply the returned action to
//! their text field.
//!
//! Ownership rules:
//! - A dictionary handle is an `Arc<Dictionary>`. Engines keep their own
//!   reference, so the handle can be released as soon as sessions exist.
//! - An engine handle is one input session; free it when the session ends.
//! - `UnilangAction::text` is owned by the caller and must be released with
//!   `unilang_string_free(text, text_len)`. It holds `text_len` UTF-8 bytes
//!   followed by a NUL; replacements may contain NUL themselves, so hosts
//!   should read it by length.

use std::ffi::c_char;
use std::ptr;
use std::sync::Arc;

use crate::matcher::is_valid_trigger;
use crate::{Action, Dictionary, Engine, EngineConfig, SpecialKey};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnilangActionKind {
    /// Commit `codepoint` as text
    CommitChar = 0,
    /// Delete `delete_count` characters, then insert `text`. The key that
    /// completed the pattern is not committed.
    DeleteAndInsert = 1,
    /// Apply the special key `codepoint` (see `UNILANG_KEY_*`) natively
    Passthrough = 2,
    /// The event was not understood and changed nothing
    Ignored = 3,
}

pub const UNILANG_KEY_BACKSPACE: u32 = 0;
pub const UNILANG_KEY_ENTER: u32 = 1;
pub const UNILANG_KEY_DONE: u32 = 2;

#[repr(C)]
#[derive(Debug)]
pub struct UnilangAction {
    pub kind: UnilangActionKind,
    pub codepoint: u32,
    /// Characters to delete before the cursor
    pub delete_count: usize,
    /// Full length of the matched pattern, including the completing key
    pub pattern_length: usize,
    pub text: *mut c_char,
    /// Length of `text` in bytes, excluding the trailing NUL
    pub text_len: usize,
}

impl UnilangAction {
    fn ignored() -> Self {
        Self {
            kind: UnilangActionKind::Ignored,
            codepoint: 0,
            delete_count: 0,
            pattern_length: 0,
            text: ptr::null_mut(),
            text_len: 0,
        }
    }

    fn from_action(action: Action) -> Self {
        let delete_count = action.deleted_count();
        match action {
            Action::CommitChar(ch) => Self {
                kind: UnilangActionKind::CommitChar,
                codepoint: ch as u32,
                delete_count: 0,
                pattern_length: 0,
                text: ptr::null_mut(),
                text_len: 0,
            },
            Action::DeleteAndInsert { count, text } => Self {
                kind: UnilangActionKind::DeleteAndInsert,
                codepoint: 0,
                delete_count,
                pattern_length: count,
                text_len: text.len(),
                text: into_owned_text(text),
            },
            Action::Passthrough(key) => Self {
                kind: UnilangActionKind::Passthrough,
                codepoint: special_key_code(key),
                delete_count: 0,
                pattern_length: 0,
                text: ptr::null_mut(),
                text_len: 0,
            },
        }
    }
}

fn special_key_code(key: SpecialKey) -> u32 {
    match key {
        SpecialKey::Backspace => UNILANG_KEY_BACKSPACE,
        SpecialKey::Enter => UNILANG_KEY_ENTER,
        SpecialKey::Done => UNILANG_KEY_DONE,
    }
}

fn special_key_from_code(code: u32) -> Option<SpecialKey> {
    match code {
        UNILANG_KEY_BACKSPACE => Some(SpecialKey::Backspace),
        UNILANG_KEY_ENTER => Some(SpecialKey::Enter),
        UNILANG_KEY_DONE => Some(SpecialKey::Done),
        _ => None,
    }
}

fn into_owned_text(text: String) -> *mut c_char {
    let mut bytes = text.into_bytes();
    bytes.push(0);
    Box::into_raw(bytes.into_boxed_slice()).cast::<c_char>()
}

fn into_handle(dictionary: Dictionary) -> *const Dictionary {
    Arc::into_raw(Arc::new(dictionary))
}

/// Build a dictionary from a UTF-8 shortcuts document.
///
/// Never returns null: a document that fails to load yields an empty,
/// unloaded dictionary.
///
/// # Safety
/// `json` must point to `len` readable bytes, or be null.
#[no_mangle]
pub unsafe extern "C" fn unilang_dictionary_from_json(
    json: *const u8,
    len: usize,
) -> *const Dictionary {
    if json.is_null() {
        return into_handle(Dictionary::empty());
    }
    let bytes = std::slice::from_raw_parts(json, len);
    match std::str::from_utf8(bytes) {
        Ok(source) => into_handle(Dictionary::build(source)),
        Err(e) => {
            log::warn!("Shortcuts document is not UTF-8: {}", e);
            into_handle(Dictionary::empty())
        }
    }
}

/// The shortcuts document compiled into the library
#[cfg(feature = "bundled-shortcuts")]
#[no_mangle]
pub extern "C" fn unilang_dictionary_bundled() -> *const Dictionary {
    into_handle(Dictionary::bundled())
}

/// # Safety
/// `dictionary` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_dictionary_is_loaded(dictionary: *const Dictionary) -> bool {
    dictionary.as_ref().is_some_and(Dictionary::is_loaded)
}

/// # Safety
/// `dictionary` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_dictionary_count(dictionary: *const Dictionary) -> usize {
    dictionary.as_ref().map_or(0, Dictionary::count)
}

/// Release the caller's reference to a dictionary.
///
/// # Safety
/// `dictionary` must be a handle returned by this library and not yet
/// released, or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_dictionary_release(dictionary: *const Dictionary) {
    if !dictionary.is_null() {
        drop(Arc::from_raw(dictionary));
    }
}

/// Start an input session. A `trigger` of 0 selects the default trigger.
///
/// Returns null if `dictionary` is null or `trigger` is not a character
/// usable as a trigger (letters, digits, `_` and whitespace are not).
///
/// # Safety
/// `dictionary` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_engine_new(
    dictionary: *const Dictionary,
    trigger: u32,
) -> *mut Engine {
    if dictionary.is_null() {
        return ptr::null_mut();
    }

    let mut config = EngineConfig::default();
    if trigger != 0 {
        match char::from_u32(trigger) {
            Some(ch) if is_valid_trigger(ch) => config.trigger = ch,
            _ => {
                log::warn!("Rejected trigger codepoint {:#x}", trigger);
                return ptr::null_mut();
            }
        }
    }

    Arc::increment_strong_count(dictionary);
    let dictionary = Arc::from_raw(dictionary);
    Box::into_raw(Box::new(Engine::with_config(dictionary, config)))
}

/// # Safety
/// `engine` must be a live engine handle or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_engine_process_char(
    engine: *mut Engine,
    codepoint: u32,
) -> UnilangAction {
    let (Some(engine), Some(ch)) = (engine.as_mut(), char::from_u32(codepoint)) else {
        return UnilangAction::ignored();
    };
    UnilangAction::from_action(engine.process_char(ch))
}

/// # Safety
/// `engine` must be a live engine handle or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_engine_process_special(
    engine: *mut Engine,
    key: u32,
) -> UnilangAction {
    let (Some(engine), Some(key)) = (engine.as_mut(), special_key_from_code(key)) else {
        return UnilangAction::ignored();
    };
    UnilangAction::from_action(engine.process_special(key))
}

/// Session restart: forget any shortcut being typed.
///
/// # Safety
/// `engine` must be a live engine handle or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_engine_restart(engine: *mut Engine) {
    if let Some(engine) = engine.as_mut() {
        engine.restart();
    }
}

/// # Safety
/// `engine` must be a live engine handle or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_engine_set_enabled(engine: *mut Engine, enabled: bool) {
    if let Some(engine) = engine.as_mut() {
        engine.set_enabled(enabled);
    }
}

/// End the session.
///
/// # Safety
/// `engine` must be a handle returned by `unilang_engine_new` and not yet
/// freed, or null.
#[no_mangle]
pub unsafe extern "C" fn unilang_engine_free(engine: *mut Engine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// # Safety
/// `text` and `text_len` must come from the same `UnilangAction` and the
/// text must not yet be freed, or `text` must be null.
#[no_mangle]
pub unsafe extern "C" fn unilang_string_free(text: *mut c_char, text_len: usize) {
    if !text.is_null() {
        let bytes = ptr::slice_from_raw_parts_mut(text.cast::<u8>(), text_len + 1);
        drop(Box::from_raw(bytes));
    }
}
