// UniLang Dictionary Source
// Parses the categorized shortcuts document with Serde

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::LoadError;

/// Category name that is ignored wholesale
pub const COMMENT_CATEGORY: &str = "_comment";

/// Root of a shortcuts document.
///
/// Only `shortcuts` is required. Other top-level fields (version, notes)
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
struct SourceDocument {
    shortcuts: Option<IndexMap<String, Value>>,
}

/// Flatten a shortcuts document into pattern -> replacement pairs.
///
/// Pairs come out in document order: categories as they appear, pairs
/// within a category as they appear. Later duplicates overwrite earlier
/// ones but keep the earlier position.
pub(crate) fn parse_source(source: &str) -> Result<IndexMap<String, String>, LoadError> {
    let document: SourceDocument = serde_json::from_str(source)?;
    let shortcuts = document.shortcuts.ok_or(LoadError::MissingShortcuts)?;

    let mut entries = IndexMap::new();
    for (category, value) in shortcuts {
        if category == COMMENT_CATEGORY {
            continue;
        }

        let Value::Object(pairs) = value else {
            return Err(LoadError::InvalidCategory(category));
        };

        let before = entries.len();
        for (shortcut, replacement) in pairs {
            let Value::String(replacement) = replacement else {
                return Err(LoadError::InvalidReplacement { category, shortcut });
            };
            if let Some(previous) = entries.insert(shortcut.clone(), replacement) {
                log::debug!(
                    "Shortcut {} redefined in category {} (was {:?})",
                    shortcut,
                    category,
                    previous
                );
            }
        }
        log::trace!("Category {}: {} new shortcuts", category, entries.len() - before);
    }

    Ok(entries)
}
