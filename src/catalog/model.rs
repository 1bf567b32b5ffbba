/*!
 * String catalog document model.
 *
 * The catalog is held as an order-preserving JSON tree so that every field
 * the tools do not understand (plural variations, substitutions, device
 * variations, `version`, ...) survives a load/save cycle untouched. Typed,
 * read-only views are built on demand for the fields the operations use.
 */

use log::debug;
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::path::Path;

use super::state::State;
use crate::errors::CatalogError;

/// Source language assumed when the document does not declare one
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Language whose localization is used as a fallback source text
pub const FALLBACK_SOURCE_LANGUAGE: &str = "en";

const SOURCE_LANGUAGE: &str = "sourceLanguage";
const STRINGS: &str = "strings";
const COMMENT: &str = "comment";
const EXTRACTION_STATE: &str = "extractionState";
const LOCALIZATIONS: &str = "localizations";
const STRING_UNIT: &str = "stringUnit";

/// A whole string catalog document
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    // @field: Top-level document object, key order preserved
    root: Map<String, Value>,
}

impl Catalog {
    /// Parse a catalog from its JSON text. `path` is only used for diagnostics.
    pub fn parse(content: &str, path: &Path) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(value)
    }

    /// Build a catalog from an already parsed JSON document, checking its shape
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(root) = value else {
            return Err(CatalogError::InvalidStructure(
                "document root must be an object".to_string(),
            ));
        };

        if let Some(strings) = root.get(STRINGS) {
            let strings = strings.as_object().ok_or_else(|| {
                CatalogError::InvalidStructure(format!("'{}' must be an object", STRINGS))
            })?;

            for (key, entry) in strings {
                let entry = entry.as_object().ok_or_else(|| {
                    CatalogError::InvalidStructure(format!("entry '{}' must be an object", key))
                })?;

                if entry.get(LOCALIZATIONS).is_some_and(|l| !l.is_object()) {
                    return Err(CatalogError::InvalidStructure(format!(
                        "'{}' of entry '{}' must be an object",
                        LOCALIZATIONS, key
                    )));
                }
            }
        }

        Ok(Self { root })
    }

    /// Load a catalog from disk
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&content, path)?;
        debug!("Loaded {} entries from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Serialize with 2-space indentation, unescaped non-ASCII text and a
    /// trailing newline
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let mut json = serde_json::to_string_pretty(&self.root)?;
        json.push('\n');
        Ok(json)
    }

    /// The raw document tree
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Declared source language, `"en"` when absent
    pub fn source_language(&self) -> &str {
        self.root
            .get(SOURCE_LANGUAGE)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SOURCE_LANGUAGE)
    }

    fn strings(&self) -> Option<&Map<String, Value>> {
        self.root.get(STRINGS).and_then(Value::as_object)
    }

    fn strings_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.root.get_mut(STRINGS).and_then(Value::as_object_mut)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.strings().map_or(0, Map::len)
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry exists for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.strings().is_some_and(|strings| strings.contains_key(key))
    }

    /// Entry keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings()
            .into_iter()
            .flat_map(|strings| strings.keys())
            .map(String::as_str)
    }

    /// Views over every entry, in document order
    pub fn entries(&self) -> impl Iterator<Item = EntryView<'_>> {
        self.strings()
            .into_iter()
            .flat_map(|strings| strings.iter())
            .filter_map(|(key, value)| EntryView::new(key, value))
    }

    /// View over a single entry
    pub fn entry<'a>(&'a self, key: &'a str) -> Option<EntryView<'a>> {
        self.strings()?
            .get(key)
            .and_then(|value| EntryView::new(key, value))
    }

    /// Store a translated localization for `language` on entry `key`,
    /// replacing whatever localization was there. The `localizations`
    /// object is created when the entry has none.
    ///
    /// Returns `false` when the entry does not exist.
    pub fn set_translated(&mut self, key: &str, language: &str, text: &str) -> bool {
        let Some(entry) = self
            .strings_mut()
            .and_then(|strings| strings.get_mut(key))
            .and_then(Value::as_object_mut)
        else {
            return false;
        };

        let Some(localizations) = entry
            .entry(LOCALIZATIONS)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
        else {
            return false;
        };

        localizations.insert(
            language.to_string(),
            json!({
                "stringUnit": {
                    "state": State::Translated.as_str(),
                    "value": text,
                }
            }),
        );
        true
    }

    /// Remove every entry matching `predicate`. Remaining entries keep their
    /// order; removed keys are returned in the order they were encountered.
    pub fn remove_entries_where<F>(&mut self, mut predicate: F) -> Vec<String>
    where
        F: FnMut(&EntryView<'_>) -> bool,
    {
        let removed: Vec<String> = self
            .entries()
            .filter(|entry| predicate(entry))
            .map(|entry| entry.key().to_string())
            .collect();

        if removed.is_empty() {
            return removed;
        }

        let doomed: HashSet<&str> = removed.iter().map(String::as_str).collect();
        if let Some(strings) = self.strings_mut() {
            strings.retain(|key, _| !doomed.contains(key.as_str()));
        }

        removed
    }
}

/// Read-only view over one catalog entry
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    key: &'a str,
    fields: &'a Map<String, Value>,
    extraction_state: State,
}

impl<'a> EntryView<'a> {
    fn new(key: &'a str, value: &'a Value) -> Option<Self> {
        let fields = value.as_object()?;
        let extraction_state = State::from(fields.get(EXTRACTION_STATE).and_then(Value::as_str));
        Some(Self {
            key,
            fields,
            extraction_state,
        })
    }

    /// Entry key, which is also the source text
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Developer comment, if any
    pub fn comment(&self) -> Option<&'a str> {
        self.fields.get(COMMENT).and_then(Value::as_str)
    }

    /// Normalized `extractionState`
    pub fn extraction_state(&self) -> State {
        self.extraction_state
    }

    /// Whether the entry is no longer referenced by the application
    pub fn is_stale(&self) -> bool {
        self.extraction_state == State::Stale
    }

    fn localizations_map(&self) -> Option<&'a Map<String, Value>> {
        self.fields.get(LOCALIZATIONS).and_then(Value::as_object)
    }

    /// Every localization present on the entry, in document order
    pub fn localizations(self) -> impl Iterator<Item = LocalizationView<'a>> {
        self.localizations_map()
            .into_iter()
            .flat_map(|map| map.iter())
            .map(|(language, raw)| LocalizationView::new(language, raw))
    }

    /// Localization for one language
    pub fn localization(&self, language: &str) -> Option<LocalizationView<'a>> {
        let (language, raw) = self.localizations_map()?.get_key_value(language)?;
        Some(LocalizationView::new(language, raw))
    }

    /// Whether a localization exists for `language`, whatever its state
    pub fn has_localization(&self, language: &str) -> bool {
        self.localizations_map()
            .is_some_and(|map| map.contains_key(language))
    }

    /// Source text for display: the value of the first language in
    /// `preference` that has a localization, or the key itself. A
    /// localization without a value also yields the key.
    pub fn resolve_source_value(&self, preference: &[&str]) -> &'a str {
        preference
            .iter()
            .find_map(|language| self.localization(language))
            .and_then(|localization| localization.value())
            .unwrap_or(self.key)
    }
}

/// Read-only view over one localization of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizationView<'a> {
    language: &'a str,
    state: State,
    value: Option<&'a str>,
}

impl<'a> LocalizationView<'a> {
    fn new(language: &'a str, raw: &'a Value) -> Self {
        let unit = raw.get(STRING_UNIT);
        Self {
            language,
            state: State::from(unit.and_then(|u| u.get("state")).and_then(Value::as_str)),
            value: unit.and_then(|u| u.get("value")).and_then(Value::as_str),
        }
    }

    /// Language code
    pub fn language(&self) -> &'a str {
        self.language
    }

    /// Normalized `stringUnit.state`
    pub fn state(&self) -> State {
        self.state
    }

    /// `stringUnit.value`, if present
    pub fn value(&self) -> Option<&'a str> {
        self.value
    }

    /// Whether the translation is confirmed as final
    pub fn is_translated(&self) -> bool {
        self.state == State::Translated
    }
}
