/*!
 * Merging known translations into a catalog.
 *
 * Existing translations in the `translated` state are never overwritten, so
 * running the same merge twice changes nothing the second time.
 */

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{Catalog, State};

/// Translations to inject: entry key -> language code -> translated text
pub type TranslationTable = BTreeMap<String, BTreeMap<String, String>>;

/// One thing that happened while merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// A localization was created for a language the entry did not have
    Added {
        key: String,
        language: String,
        value: String,
    },
    /// A localization that was not yet translated was replaced
    Updated {
        key: String,
        language: String,
        value: String,
    },
    /// The table names a key the catalog does not contain
    MissingKey { key: String },
}

impl MergeEvent {
    /// Whether this event changed the catalog
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::MissingKey { .. })
    }
}

impl fmt::Display for MergeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { key, language, value } => {
                write!(f, "Added {}: '{}' -> '{}'", language, key, value)
            }
            Self::Updated { key, language, value } => {
                write!(f, "Updated {}: '{}' -> '{}'", language, key, value)
            }
            Self::MissingKey { key } => write!(f, "Key not found in file: '{}'", key),
        }
    }
}

/// Result of a merge run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Events in the order they happened
    pub events: Vec<MergeEvent>,
}

impl MergeOutcome {
    /// Number of localizations added or updated
    pub fn changed(&self) -> usize {
        self.events.iter().filter(|e| e.is_change()).count()
    }

    /// Keys from the table that were not found in the catalog
    pub fn missing_keys(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MergeEvent::MissingKey { key } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Merge `table` into `catalog`.
///
/// For every key and language in the table: a missing key is reported and
/// skipped, a missing language is added, an existing localization whose
/// state is not `translated` is replaced, and a translated one is left alone.
pub fn merge_translations(catalog: &mut Catalog, table: &TranslationTable) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for (key, translations) in table {
        if !catalog.contains_key(key) {
            warn!("Key not found in file: '{}'", key);
            outcome.events.push(MergeEvent::MissingKey { key: key.clone() });
            continue;
        }

        for (language, text) in translations {
            let existing = catalog
                .entry(key)
                .and_then(|entry| entry.localization(language))
                .map(|localization| localization.state());

            let event = match existing {
                Some(State::Translated) => {
                    debug!("Keeping existing {} translation for '{}'", language, key);
                    continue;
                }
                Some(_) => MergeEvent::Updated {
                    key: key.clone(),
                    language: language.clone(),
                    value: text.clone(),
                },
                None => MergeEvent::Added {
                    key: key.clone(),
                    language: language.clone(),
                    value: text.clone(),
                },
            };

            catalog.set_translated(key, language, text);
            debug!("{}", event);
            outcome.events.push(event);
        }
    }

    outcome
}
