/*!
 * Application configuration module.
 *
 * Handles the application configuration including loading, validating and
 * defaulting configuration settings.
 */

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::language_utils;
use crate::operations::TranslationTable;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Catalog used by `status-report` when no path is given
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Languages every entry is expected to have
    #[serde(default = "default_target_languages")]
    pub target_languages: BTreeSet<String>,

    /// Translations injected by `merge-translations`
    #[serde(default = "default_translations")]
    pub translations: TranslationTable,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("YourApp").join("Localizable.xcstrings")
}

fn default_target_languages() -> BTreeSet<String> {
    ["de", "es", "fr", "pt-BR"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_translations() -> TranslationTable {
    let translations = [
        ("de", "Hier ist dein englischer Text. Viel Spaß beim Coden!"),
        ("es", "Aquí está tu texto en inglés. ¡Diviértete programando!"),
        ("fr", "Voici ton texte en anglais. Amuse-toi bien en codant !"),
        ("pt-BR", "Aqui está seu texto em inglês. Divirta-se programando!"),
    ]
    .into_iter()
    .map(|(language, text)| (language.to_string(), text.to_string()))
    .collect::<BTreeMap<_, _>>();

    let mut table = TranslationTable::new();
    table.insert("Here is your English text. Have fun coding!".to_string(), translations);
    table
}

impl Config {
    /// Load a configuration file, falling back to defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }

        for language in &self.target_languages {
            language_utils::validate_language_code(language)?;
        }

        for (key, translations) in &self.translations {
            if key.is_empty() {
                return Err(anyhow!("Translation keys must not be empty"));
            }
            for language in translations.keys() {
                language_utils::validate_language_code(language)
                    .with_context(|| format!("Invalid language for translation of '{}'", key))?;
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: default_catalog_path(),
            target_languages: default_target_languages(),
            translations: default_translations(),
            log_level: LogLevel::default(),
        }
    }
}
