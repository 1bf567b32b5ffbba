use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::catalog::Catalog;
use crate::errors::{AppError, CatalogError};
use crate::file_utils::{CATALOG_EXTENSION, FileManager};
use crate::language_utils;
use crate::operations::{MergeOutcome, StatusReport, merge_translations, prune_stale};

// @module: Application controller for catalog maintenance

/// Main application controller: runs one operation against a set of catalog
/// files. Every call loads the files fresh and, for mutating operations,
/// writes them back only after every transform succeeded.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;

        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Catalog used when `status-report` is given no path
    pub fn default_catalog_path(&self) -> &Path {
        &self.config.catalog_path
    }

    /// Resolve a command-line path to the catalogs to process: the file
    /// itself, or every `.xcstrings` file beneath a directory in path order.
    pub fn resolve_catalogs(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if FileManager::file_exists(path) {
            return Ok(vec![path.to_path_buf()]);
        }

        if FileManager::dir_exists(path) {
            let files = FileManager::find_files(path, CATALOG_EXTENSION)?;
            if files.is_empty() {
                return Err(AppError::Usage(format!(
                    "No .{} files found in: {}",
                    CATALOG_EXTENSION,
                    path.display()
                ))
                .into());
            }
            debug!("Found {} catalog(s) under {:?}", files.len(), path);
            return Ok(files);
        }

        Err(AppError::from(CatalogError::NotFound(path.to_path_buf())).into())
    }

    /// Target languages for a status report: the comma-separated override
    /// when given, the configured set otherwise
    pub fn target_languages(&self, override_list: Option<&str>) -> Result<BTreeSet<String>> {
        let Some(raw) = override_list else {
            return Ok(self.config.target_languages.clone());
        };

        let languages = language_utils::parse_language_list(raw);
        if languages.is_empty() {
            return Err(AppError::Usage("--languages needs at least one language code".to_string()).into());
        }

        for language in &languages {
            language_utils::validate_language_code(language)
                .map_err(|e| AppError::Usage(e.to_string()))?;
            if let Ok(name) = language_utils::get_language_name(language) {
                debug!("Checking language {} ({})", language, name);
            }
        }

        Ok(languages)
    }

    /// Merge the configured translations into one catalog
    pub fn merge_file(&self, path: &Path, dry_run: bool) -> Result<MergeOutcome> {
        let mut results = self.merge_files(&[path.to_path_buf()], dry_run)?;
        Ok(results.pop().map(|(_, outcome)| outcome).unwrap_or_default())
    }

    /// Merge the configured translations into every catalog in `paths`.
    /// Nothing is written unless every catalog loaded and merged cleanly.
    pub fn merge_files(&self, paths: &[PathBuf], dry_run: bool) -> Result<Vec<(PathBuf, MergeOutcome)>> {
        Self::apply_all(
            paths,
            dry_run,
            |catalog| merge_translations(catalog, &self.config.translations),
            |outcome| outcome.changed() > 0,
        )
    }

    /// Analyze one catalog without modifying it
    pub fn status_file(&self, path: &Path, target_languages: &BTreeSet<String>) -> Result<StatusReport> {
        let catalog = Self::load(path)?;
        Ok(StatusReport::analyze(&catalog, target_languages))
    }

    /// Remove stale entries from one catalog, returning the removed keys
    pub fn prune_file(&self, path: &Path, dry_run: bool) -> Result<Vec<String>> {
        let mut results = self.prune_files(&[path.to_path_buf()], dry_run)?;
        Ok(results.pop().map(|(_, removed)| removed).unwrap_or_default())
    }

    /// Remove stale entries from every catalog in `paths`.
    /// Nothing is written unless every catalog loaded and pruned cleanly.
    pub fn prune_files(&self, paths: &[PathBuf], dry_run: bool) -> Result<Vec<(PathBuf, Vec<String>)>> {
        Self::apply_all(paths, dry_run, prune_stale, |removed| !removed.is_empty())
    }

    // @method: Load and transform every catalog, then write the changed ones
    fn apply_all<T, F, C>(
        paths: &[PathBuf],
        dry_run: bool,
        mut transform: F,
        changed: C,
    ) -> Result<Vec<(PathBuf, T)>>
    where
        F: FnMut(&mut Catalog) -> T,
        C: Fn(&T) -> bool,
    {
        let mut staged = Vec::with_capacity(paths.len());
        for path in paths {
            let mut catalog = Self::load(path)?;
            let result = transform(&mut catalog);
            let pending = if changed(&result) && !dry_run {
                Some(catalog.to_json_string().map_err(AppError::from)?)
            } else {
                None
            };
            staged.push((path.clone(), result, pending, catalog.len()));
        }

        let mut results = Vec::with_capacity(staged.len());
        for (path, result, pending, entries) in staged {
            if let Some(json) = pending {
                Self::save(&json, &path, entries)?;
            }
            results.push((path, result));
        }

        Ok(results)
    }

    fn load(path: &Path) -> Result<Catalog> {
        Ok(Catalog::load(path).map_err(AppError::from)?)
    }

    fn save(json: &str, path: &Path, entries: usize) -> Result<()> {
        FileManager::write_atomic(path, json)
            .with_context(|| format!("Failed to save catalog: {:?}", path))?;
        info!("Saved {} entries to {:?}", entries, path);
        Ok(())
    }
}
