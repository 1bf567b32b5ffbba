/*!
 * Integration tests for catalog maintenance through the controller
 */

use anyhow::Result;
use std::fs;
use xcstrings_tools::app_config::Config;
use xcstrings_tools::app_controller::Controller;
use xcstrings_tools::catalog::Catalog;
use crate::common;

/// Merge, report and prune in sequence against one file on disk
#[test]
fn test_full_workflow_withSampleCatalog_shouldConverge() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_catalog(temp_dir.path(), "Localizable.xcstrings")?;
    let languages = controller.target_languages(None)?;

    let merged = controller.merge_file(&path, false)?;
    assert_eq!(merged.changed(), 3);
    assert_eq!(controller.merge_file(&path, false)?.changed(), 0);

    let report = controller.status_file(&path, &languages)?;
    assert!(!report.missing.contains_key("Here is your English text. Have fun coding!"));
    assert_eq!(report.stale.len(), 2);

    let removed = controller.prune_file(&path, false)?;
    assert_eq!(removed, vec!["Hello", "Old label"]);
    assert!(controller.prune_file(&path, false)?.is_empty());

    let report = controller.status_file(&path, &languages)?;
    assert!(report.stale.is_empty());

    let catalog = Catalog::load(&path)?;
    assert_eq!(
        catalog.keys().collect::<Vec<_>>(),
        vec!["Hi", "Here is your English text. Have fun coding!", "%lld items"]
    );
    Ok(())
}

/// Saved files use the persisted format: 2-space indent, raw UTF-8, trailing newline
#[test]
fn test_merge_file_withChanges_shouldWriteCanonicalJson() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_catalog(temp_dir.path(), "Localizable.xcstrings")?;

    controller.merge_file(&path, false)?;
    let text = fs::read_to_string(&path)?;

    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n  \"sourceLanguage\": \"en\",\n"));
    assert!(text.contains("Aqui está seu texto em inglês. Divirta-se programando!"));
    assert!(!text.contains("\\u00"));
    assert_eq!(Catalog::parse(&text, &path)?.to_json_string()?, text);
    Ok(())
}

/// Status reports never touch the file
#[test]
fn test_status_file_shouldLeaveBytesUnchanged() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "Compact.xcstrings",
        r#"{"strings":{"Hi":{"extractionState":"stale"}}}"#,
    )?;
    let before = fs::read(&path)?;

    let report = controller.status_file(&path, &controller.target_languages(Some("de"))?)?;

    assert_eq!(report.stale.len(), 1);
    assert_eq!(fs::read(&path)?, before);
    Ok(())
}

/// A parse failure aborts without modifying the file
#[test]
fn test_prune_file_withMalformedCatalog_shouldFailAndKeepFile() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "Broken.xcstrings", "{ \"strings\": [")?;

    assert!(controller.prune_file(&path, false).is_err());
    assert_eq!(fs::read_to_string(&path)?, "{ \"strings\": [");
    Ok(())
}

/// Every catalog under a directory is found
#[test]
fn test_resolve_catalogs_withDirectory_shouldFindAllCatalogs() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let module = temp_dir.path().join("Module");
    fs::create_dir_all(&module)?;
    let first = common::create_sample_catalog(temp_dir.path(), "Localizable.xcstrings")?;
    let second = common::create_sample_catalog(&module, "Module.xcstrings")?;

    let catalogs = controller.resolve_catalogs(temp_dir.path())?;
    assert_eq!(catalogs, vec![first, second]);

    for catalog in &catalogs {
        assert_eq!(controller.prune_file(catalog, false)?.len(), 2);
    }
    Ok(())
}

/// One malformed catalog in a directory aborts the run before any file is written
#[test]
fn test_prune_files_withOneMalformedCatalog_shouldLeaveEveryFileUnchanged() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let valid = common::create_sample_catalog(temp_dir.path(), "A.xcstrings")?;
    common::create_test_file(temp_dir.path(), "B.xcstrings", "{ \"strings\": [")?;

    let catalogs = controller.resolve_catalogs(temp_dir.path())?;
    assert_eq!(catalogs.len(), 2);

    assert!(controller.prune_files(&catalogs, false).is_err());
    assert!(controller.merge_files(&catalogs, false).is_err());
    assert_eq!(fs::read_to_string(&valid)?, common::sample_catalog_text());
    Ok(())
}

/// Every catalog in the set is transformed and reported in path order
#[test]
fn test_merge_files_withTwoCatalogs_shouldWriteBoth() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_sample_catalog(temp_dir.path(), "A.xcstrings")?;
    let second = common::create_sample_catalog(temp_dir.path(), "B.xcstrings")?;

    let results = controller.merge_files(&[first.clone(), second.clone()], false)?;

    let counts: Vec<_> = results.iter().map(|(path, outcome)| (path.clone(), outcome.changed())).collect();
    assert_eq!(counts, vec![(first.clone(), 3), (second.clone(), 3)]);
    assert_ne!(fs::read_to_string(&first)?, common::sample_catalog_text());
    assert_eq!(fs::read_to_string(&first)?, fs::read_to_string(&second)?);
    Ok(())
}
