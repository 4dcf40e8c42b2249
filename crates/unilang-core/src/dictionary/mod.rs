// UniLang Shortcuts Dictionary
// Immutable pattern -> replacement mapping built from a categorized document

mod source;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;

pub use source::COMMENT_CATEGORY;

/// Default name of the shortcuts document
pub const DEFAULT_SOURCE_NAME: &str = "shortcuts.json";

#[cfg(feature = "bundled-shortcuts")]
const BUNDLED_SOURCE: &str = include_str!("../../assets/shortcuts.json");

/// Reasons a dictionary source could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing top-level `shortcuts` field")]
    MissingShortcuts,

    #[error("Category '{0}' is not an object of shortcuts")]
    InvalidCategory(String),

    #[error("Replacement for '{shortcut}' in category '{category}' is not a string")]
    InvalidReplacement { category: String, shortcut: String },
}

/// Shortcut pattern -> replacement text.
///
/// Built once and never mutated afterwards, so a single instance can be
/// shared between sessions behind an `Arc`. A dictionary that failed to load
/// is empty and reports `is_loaded() == false`; lookups simply miss.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: IndexMap<String, String>,
    loaded: bool,
}

impl Dictionary {
    /// An unloaded, empty dictionary
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a shortcuts document, degrading to an empty dictionary on
    /// any failure
    pub fn build(source: &str) -> Self {
        Self::try_build(source).unwrap_or_else(|e| {
            log::warn!("Failed to load shortcuts: {}", e);
            Self::empty()
        })
    }

    /// Build from a shortcuts document, reporting why it failed
    pub fn try_build(source: &str) -> Result<Self, LoadError> {
        let entries = source::parse_source(source)?;
        log::debug!("Loaded {} shortcuts", entries.len());
        Ok(Self {
            entries,
            loaded: true,
        })
    }

    /// Load a shortcuts document from disk, degrading to an empty dictionary
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::try_from_path(path).unwrap_or_else(|e| {
            log::warn!("Failed to load shortcuts from {}: {}", path.display(), e);
            Self::empty()
        })
    }

    pub fn try_from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = fs::read_to_string(&path)?;
        Self::try_build(&content)
    }

    /// The shortcuts document compiled into the library
    #[cfg(feature = "bundled-shortcuts")]
    pub fn bundled() -> Self {
        Self::build(BUNDLED_SOURCE)
    }

    /// Build a loaded dictionary directly from pairs, last write wins
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            loaded: true,
        }
    }

    /// Exact-match lookup. Prefixes never match.
    pub fn lookup(&self, pattern: &str) -> Option<&str> {
        self.entries.get(pattern).map(String::as_str)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys the matcher can never produce with the given trigger.
    ///
    /// A reachable key is the trigger followed by one or more letters, digits
    /// or underscores. Anything else stays in the dictionary but will never
    /// expand.
    pub fn unreachable_patterns(&self, trigger: char) -> Vec<&str> {
        let shape = format!(
            r"^{}[\p{{Alphabetic}}\p{{Nd}}\p{{Nl}}\p{{No}}_]+$",
            regex::escape(&trigger.to_string())
        );
        let shape = match Regex::new(&shape) {
            Ok(re) => re,
            Err(e) => {
                log::warn!("Cannot check shortcut keys for trigger {:?}: {}", trigger, e);
                return Vec::new();
            }
        };

        self.entries
            .keys()
            .map(String::as_str)
            .filter(|key| !shape.is_match(key))
            .collect()
    }

    /// Keys that can never expand because a shorter key matches first.
    ///
    /// Replacement happens as soon as the typed candidate equals a key, so
    /// with `\in` present `\infty` is replaced at `\in`. Returns
    /// `(shadowed, shadowing)` pairs.
    pub fn shadowed_patterns(&self) -> Vec<(&str, &str)> {
        self.entries
            .keys()
            .filter_map(|key| {
                key.char_indices()
                    .skip(2)
                    .map(|(idx, _)| &key[..idx])
                    .find(|prefix| self.entries.contains_key(*prefix))
                    .map(|prefix| (key.as_str(), prefix))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_exact_match_only() {
        let dict = Dictionary::from_entries([("\\alpha", "α")]);
        assert_eq!(dict.lookup("\\al"), None);
        assert_eq!(dict.lookup("\\alpha"), Some("α"));
        assert_eq!(dict.lookup("\\alphab"), None);
        assert_eq!(dict.lookup("alpha"), None);
    }

    #[test]
    fn test_comment_category_excluded() {
        let dict = Dictionary::build(
            r#"{"shortcuts": {"greek": {"\\alpha": "α"}, "_comment": {"\\x": "y"}}}"#,
        );
        assert!(dict.is_loaded());
        assert_eq!(dict.count(), 1);
        assert_eq!(dict.lookup("\\x"), None);
        assert_eq!(dict.lookup("\\alpha"), Some("α"));
    }

    #[test]
    fn test_duplicate_key_last_category_wins() {
        let dict = Dictionary::build(
            r#"{"shortcuts": {"first": {"\\a": "1"}, "second": {"\\a": "2"}}}"#,
        );
        assert_eq!(dict.count(), 1);
        assert_eq!(dict.lookup("\\a"), Some("2"));

        let dict = Dictionary::build(
            r#"{"shortcuts": {"second": {"\\a": "2"}, "first": {"\\a": "1"}}}"#,
        );
        assert_eq!(dict.lookup("\\a"), Some("1"));
    }

    #[test]
    fn test_build_failure_degrades_to_empty() {
        for source in ["", "[]", "{}", r#"{"shortcuts": {"greek": 3}}"#] {
            let dict = Dictionary::build(source);
            assert!(!dict.is_loaded(), "source {:?} should not load", source);
            assert_eq!(dict.count(), 0);
            assert_eq!(dict.lookup("\\alpha"), None);
        }
    }

    #[test]
    fn test_empty_document_is_loaded() {
        let dict = Dictionary::build(r#"{"shortcuts": {}}"#);
        assert!(dict.is_loaded());
        assert!(dict.is_empty());
        assert!(!Dictionary::empty().is_loaded());
    }

    #[test]
    fn test_try_build_reports_reason() {
        let err = Dictionary::try_build(r#"{"version": 2}"#).unwrap_err();
        assert!(matches!(err, LoadError::MissingShortcuts));
        assert_eq!(err.to_string(), "Missing top-level `shortcuts` field");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"shortcuts": {{"arrows": {{"\\to": "→"}}}}}}"#).unwrap();

        let dict = Dictionary::from_path(file.path());
        assert!(dict.is_loaded());
        assert_eq!(dict.lookup("\\to"), Some("→"));
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SOURCE_NAME);

        assert!(matches!(
            Dictionary::try_from_path(&path),
            Err(LoadError::Io(_))
        ));
        let dict = Dictionary::from_path(&path);
        assert!(!dict.is_loaded());
        assert_eq!(dict.count(), 0);
    }

    #[test]
    fn test_iter_in_source_order() {
        let dict = Dictionary::build(
            r#"{"shortcuts": {"b": {"\\z": "1", "\\y": "2"}, "a": {"\\x": "3"}}}"#,
        );
        let keys: Vec<&str> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["\\z", "\\y", "\\x"]);
        assert_eq!((&dict).into_iter().count(), 3);
    }

    #[test]
    fn test_unreachable_patterns() {
        let dict = Dictionary::from_entries([
            ("\\alpha", "α"),
            ("\\R2", "ℝ²"),
            ("\\a_b", "x"),
            ("\\", "lone"),
            ("\\not-in", "∉"),
            ("^2", "²"),
        ]);
        assert_eq!(
            dict.unreachable_patterns('\\'),
            vec!["\\", "\\not-in", "^2"]
        );
        assert_eq!(
            dict.unreachable_patterns('^'),
            vec!["\\alpha", "\\R2", "\\a_b", "\\", "\\not-in"]
        );
    }

    #[cfg(feature = "bundled-shortcuts")]
    #[test]
    fn test_bundled_dictionary() {
        let dict = Dictionary::bundled();
        assert!(dict.is_loaded());
        assert!(dict.count() > 50);
        assert_eq!(dict.lookup("\\alpha"), Some("α"));
        assert_eq!(dict.lookup("\\infty"), Some("∞"));
        assert!(dict.unreachable_patterns('\\').is_empty());
        assert!(dict.shadowed_patterns().is_empty());
    }

    #[test]
    fn test_shadowed_patterns() {
        let dict = Dictionary::from_entries([
            ("\\in", "∈"),
            ("\\infty", "∞"),
            ("\\int", "∫"),
            ("\\pi", "π"),
        ]);
        assert_eq!(
            dict.shadowed_patterns(),
            vec![("\\infty", "\\in"), ("\\int", "\\in")]
        );
    }
}
