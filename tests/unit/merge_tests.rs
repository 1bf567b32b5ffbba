/*!
 * Tests for merging translations into a catalog
 */

use serde_json::json;
use std::collections::BTreeMap;
use xcstrings_tools::app_config::Config;
use xcstrings_tools::catalog::{Catalog, State};
use xcstrings_tools::operations::{MergeEvent, TranslationTable, merge_translations};
use crate::common;

fn table(triples: &[(&str, &str, &str)]) -> TranslationTable {
    let mut table = TranslationTable::new();
    for (key, language, text) in triples {
        table
            .entry(key.to_string())
            .or_insert_with(BTreeMap::new)
            .insert(language.to_string(), text.to_string());
    }
    table
}

/// A missing language is added as translated
#[test]
fn test_merge_withMissingLanguage_shouldAddTranslated() {
    let mut catalog = Catalog::from_value(json!({
        "sourceLanguage": "en",
        "strings": { "Hi": {} }
    }))
    .unwrap();

    let outcome = merge_translations(&mut catalog, &table(&[("Hi", "de", "Hallo")]));

    assert_eq!(outcome.changed(), 1);
    assert_eq!(
        outcome.events,
        vec![MergeEvent::Added {
            key: "Hi".to_string(),
            language: "de".to_string(),
            value: "Hallo".to_string(),
        }]
    );
    assert_eq!(
        catalog.as_map()["strings"]["Hi"]["localizations"]["de"],
        json!({ "stringUnit": { "state": "translated", "value": "Hallo" } })
    );
}

/// Untranslated localizations are replaced, translated ones are kept
#[test]
fn test_merge_withDefaultTable_shouldUpdateOnlyUnfinished() {
    let mut catalog = common::sample_catalog();
    let config = Config::default();

    let outcome = merge_translations(&mut catalog, &config.translations);

    assert_eq!(outcome.changed(), 3);
    let languages: Vec<(&str, bool)> = outcome
        .events
        .iter()
        .map(|event| match event {
            MergeEvent::Added { language, .. } => (language.as_str(), true),
            MergeEvent::Updated { language, .. } => (language.as_str(), false),
            MergeEvent::MissingKey { key } => panic!("unexpected missing key {}", key),
        })
        .collect();
    assert_eq!(languages, vec![("es", false), ("fr", true), ("pt-BR", true)]);

    let entry = catalog.entry("Here is your English text. Have fun coding!").unwrap();
    assert_eq!(entry.localization("de").unwrap().value(), Some("Schon übersetzt"));
    assert_eq!(entry.localization("es").unwrap().state(), State::Translated);
    assert_eq!(
        entry.localization("es").unwrap().value(),
        Some("Aquí está tu texto en inglés. ¡Diviértete programando!")
    );

    let order: Vec<_> = entry.localizations().map(|l| l.language()).collect();
    assert_eq!(order, vec!["de", "es", "fr", "pt-BR"]);
}

/// Running the same merge twice changes nothing the second time
#[test]
fn test_merge_runTwice_shouldBeIdempotent() {
    let mut catalog = common::sample_catalog();
    let config = Config::default();

    merge_translations(&mut catalog, &config.translations);
    let after_first = catalog.clone();
    let second = merge_translations(&mut catalog, &config.translations);

    assert_eq!(second.changed(), 0);
    assert!(second.events.is_empty());
    assert_eq!(catalog, after_first);
}

/// Keys absent from the catalog are reported and skipped
#[test]
fn test_merge_withUnknownKey_shouldWarnWithoutMutation() {
    let mut catalog = common::sample_catalog();
    let before = catalog.clone();

    let outcome = merge_translations(&mut catalog, &table(&[("Nope", "de", "Nein")]));

    assert_eq!(outcome.changed(), 0);
    assert_eq!(outcome.missing_keys(), vec!["Nope"]);
    assert_eq!(catalog, before);
}

/// A `new` translation counts as unfinished and gets replaced
#[test]
fn test_merge_withNewState_shouldUpdate() {
    let mut catalog = common::sample_catalog();

    let outcome = merge_translations(&mut catalog, &table(&[("Hi", "fr", "Coucou")]));

    assert!(matches!(outcome.events.as_slice(), [MergeEvent::Updated { .. }]));
    let localization = catalog.entry("Hi").unwrap().localization("fr").unwrap();
    assert!(localization.is_translated());
    assert_eq!(localization.value(), Some("Coucou"));
}

/// Events render the lines printed by the CLI
#[test]
fn test_mergeEvent_display_shouldDescribeChange() {
    let added = MergeEvent::Added {
        key: "Hi".to_string(),
        language: "de".to_string(),
        value: "Hallo".to_string(),
    };
    let missing = MergeEvent::MissingKey { key: "Nope".to_string() };

    assert_eq!(added.to_string(), "Added de: 'Hi' -> 'Hallo'");
    assert_eq!(missing.to_string(), "Key not found in file: 'Nope'");
    assert!(added.is_change());
    assert!(!missing.is_change());
}
