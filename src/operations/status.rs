/*!
 * Localization status report.
 *
 * Classifies every entry of a catalog as stale, as carrying unreviewed
 * (`new`) translations, and/or as missing translations for some target
 * languages. The catalog is only read.
 */

use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::catalog::{Catalog, EntryView, FALLBACK_SOURCE_LANGUAGE, State};

const RULE_WIDTH: usize = 80;

/// An entry flagged as no longer used by the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleString {
    pub comment: String,
    pub source_value: String,
}

/// An entry with at least one translation still in the `new` state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewString {
    pub comment: String,
    /// Language -> current (unreviewed) value
    pub languages: BTreeMap<String, String>,
    pub source_value: String,
}

/// An entry lacking a localization for one or more target languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTranslation {
    pub comment: String,
    /// Sorted target languages with no localization at all
    pub missing_languages: Vec<String>,
    pub source_value: String,
}

/// Outcome of analyzing a catalog. All buckets are ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub target_languages: BTreeSet<String>,
    pub stale: BTreeMap<String, StaleString>,
    pub new: BTreeMap<String, NewString>,
    pub missing: BTreeMap<String, MissingTranslation>,
}

impl StatusReport {
    /// Analyze `catalog` against `target_languages`
    pub fn analyze(catalog: &Catalog, target_languages: &BTreeSet<String>) -> Self {
        let source_language = catalog.source_language();
        let mut report = Self {
            target_languages: target_languages.clone(),
            ..Self::default()
        };

        for entry in catalog.entries() {
            let key = entry.key().to_string();
            let comment = entry.comment().unwrap_or_default().to_string();

            if entry.is_stale() {
                let source_value = entry
                    .resolve_source_value(&[source_language, FALLBACK_SOURCE_LANGUAGE])
                    .to_string();
                report.stale.insert(key, StaleString { comment, source_value });
                continue;
            }

            let new_languages = unreviewed_languages(entry);
            if !new_languages.is_empty() {
                let source_value = entry
                    .resolve_source_value(&[FALLBACK_SOURCE_LANGUAGE])
                    .to_string();
                report.new.insert(
                    key.clone(),
                    NewString {
                        comment: comment.clone(),
                        languages: new_languages,
                        source_value,
                    },
                );
            }

            let missing_languages: Vec<String> = target_languages
                .iter()
                .filter(|language| !entry.has_localization(language))
                .cloned()
                .collect();
            if !missing_languages.is_empty() {
                let source_value = entry
                    .resolve_source_value(&[FALLBACK_SOURCE_LANGUAGE, source_language])
                    .to_string();
                report.missing.insert(
                    key,
                    MissingTranslation {
                        comment,
                        missing_languages,
                        source_value,
                    },
                );
            }
        }

        debug!(
            "Analyzed {} entries: {} stale, {} new, {} missing translations",
            catalog.len(),
            report.stale.len(),
            report.new.len(),
            report.missing.len()
        );

        report
    }

    /// Whether nothing in the catalog needs attention
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.new.is_empty() && self.missing.is_empty()
    }

    fn languages_label(&self) -> String {
        self.target_languages
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn unreviewed_languages(entry: EntryView<'_>) -> BTreeMap<String, String> {
    entry
        .localizations()
        .filter(|localization| localization.state() == State::New)
        .map(|localization| {
            (
                localization.language().to_string(),
                localization.value().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn write_heading(f: &mut fmt::Formatter<'_>, title: &str, subtitle: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f)?;
    writeln!(f, "{}", rule)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", subtitle)?;
    writeln!(f, "{}", rule)
}

fn write_item(f: &mut fmt::Formatter<'_>, index: usize, key: &str, comment: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}. \"{}\"", index, key)?;
    if !comment.is_empty() {
        writeln!(f, "   Comment: {}", comment)?;
    }
    Ok(())
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;
        writeln!(f, "LOCALIZATION STATUS REPORT")?;
        writeln!(f, "Checking for languages: {}", self.languages_label())?;
        writeln!(f, "{}", rule)?;

        write_heading(
            f,
            &format!("STALE STRINGS ({} total)", self.stale.len()),
            "These strings may no longer be needed in the codebase.",
        )?;
        if self.stale.is_empty() {
            writeln!(f)?;
            writeln!(f, "   No stale strings found.")?;
        }
        for (index, (key, info)) in self.stale.iter().enumerate() {
            write_item(f, index + 1, key, &info.comment)?;
        }

        write_heading(
            f,
            &format!("NEW STRINGS / MISSING TRANSLATIONS ({} total)", self.missing.len()),
            "These strings need translations added for non-English languages.",
        )?;
        if self.missing.is_empty() {
            writeln!(f)?;
            writeln!(f, "   All strings have translations for {}.", self.languages_label())?;
        }
        for (index, (key, info)) in self.missing.iter().enumerate() {
            write_item(f, index + 1, key, &info.comment)?;
            writeln!(f, "   Missing: {}", info.missing_languages.join(", "))?;
        }

        write_heading(
            f,
            &format!("UNREVIEWED TRANSLATIONS ({} total)", self.new.len()),
            "These strings have translations in the 'new' state awaiting review.",
        )?;
        if self.new.is_empty() {
            writeln!(f)?;
            writeln!(f, "   No unreviewed translations found.")?;
        }
        for (index, (key, info)) in self.new.iter().enumerate() {
            write_item(f, index + 1, key, &info.comment)?;
            for (language, value) in &info.languages {
                writeln!(f, "   {}: {}", language, value)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total STALE strings: {}", self.stale.len())?;
        writeln!(f, "Total strings needing translations: {}", self.missing.len())?;
        writeln!(f, "Total strings with unreviewed translations: {}", self.new.len())
    }
}
