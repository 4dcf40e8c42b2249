// UniLang Settings Module
// User-configurable toggles for shortcut expansion

#![cfg(feature = "settings")]

use std::path::{Path, PathBuf};

use crate::engine::EngineConfig;
use crate::matcher::{is_valid_trigger, Matcher};

/// Settings that control shortcut expansion.
///
/// Loaded from a TOML file (default: ~/.config/unilang/settings.toml):
///
/// ```toml
/// [general]
/// enabled = true
/// trigger_key = "\\"
///
/// [matcher]
/// rollback_on_delete = false
/// reset_on_enter = false
///
/// [dictionary]
/// path = "/home/me/shortcuts.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    enabled: bool,
    trigger_key: char,
    rollback_on_delete: bool,
    reset_on_enter: bool,

    /// Shortcuts document to load instead of the bundled one
    dictionary_path: Option<PathBuf>,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    general: Option<GeneralSettings>,

    #[serde(default)]
    matcher: Option<MatcherSettings>,

    #[serde(default)]
    dictionary: Option<DictionarySettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct GeneralSettings {
    #[serde(default)]
    enabled: Option<toml::Value>,
    #[serde(default)]
    trigger_key: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct MatcherSettings {
    #[serde(default)]
    rollback_on_delete: Option<toml::Value>,
    #[serde(default)]
    reset_on_enter: Option<toml::Value>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct DictionarySettings {
    #[serde(default)]
    path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with every option at its default
    pub fn new() -> Self {
        Self {
            enabled: true,
            trigger_key: Matcher::DEFAULT_TRIGGER,
            rollback_on_delete: false,
            reset_on_enter: false,
            dictionary_path: None,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(general) = toml_settings.general {
            if let Some(value) = general.enabled {
                settings.enabled = parse_bool_value(&value)?;
            }
            if let Some(trigger) = general.trigger_key {
                settings.trigger_key = parse_trigger(&trigger)?;
            }
        }

        if let Some(matcher) = toml_settings.matcher {
            if let Some(value) = matcher.rollback_on_delete {
                settings.rollback_on_delete = parse_bool_value(&value)?;
            }
            if let Some(value) = matcher.reset_on_enter {
                settings.reset_on_enter = parse_bool_value(&value)?;
            }
        }

        if let Some(dictionary) = toml_settings.dictionary {
            settings.dictionary_path = dictionary.path;
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unilang").join("settings.toml"))
    }

    /// Load from default location (~/.config/unilang/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn trigger_key(&self) -> char {
        self.trigger_key
    }

    pub fn set_trigger_key(&mut self, trigger: char) {
        self.trigger_key = trigger;
    }

    pub fn rollback_on_delete(&self) -> bool {
        self.rollback_on_delete
    }

    pub fn reset_on_enter(&self) -> bool {
        self.reset_on_enter
    }

    /// Shortcuts document configured by the user, if any
    pub fn dictionary_path(&self) -> Option<&Path> {
        self.dictionary_path.as_deref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Engine configuration for a new session
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            trigger: self.trigger_key,
            enabled: self.enabled,
            rollback_on_delete: self.rollback_on_delete,
            reset_on_enter: self.reset_on_enter,
        }
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

/// The trigger must be exactly one character accepted by
/// `matcher::is_valid_trigger`.
pub fn parse_trigger(value: &str) -> Result<char, SettingsError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if is_valid_trigger(ch) => Ok(ch),
        _ => Err(SettingsError::InvalidValue(format!(
            "Trigger key must be a single non-alphanumeric character, got '{}'",
            value
        ))),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# UniLang Settings
# Place this file at: ~/.config/unilang/settings.toml

[general]
# Turn shortcut expansion on or off
enabled = true
# Character that starts every shortcut
trigger_key = "\\"

[matcher]
# Backspace also removes the last character of a shortcut being typed
rollback_on_delete = false
# Enter drops a shortcut being typed
reset_on_enter = false

[dictionary]
# Optional shortcuts document (the bundled shortcuts.json is used otherwise)
# path = "/home/me/.config/unilang/shortcuts.json"
"#
}
