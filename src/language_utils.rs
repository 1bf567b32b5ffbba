/*!
 * Language utilities for catalog language identifiers.
 *
 * String catalogs key localizations by locale identifiers such as `de`,
 * `pt-BR` or `zh-Hans`. The primary subtag is an ISO 639-1 (2-letter) or
 * ISO 639-3 (3-letter) code; the remaining subtags name a script or region.
 */

use anyhow::{Result, anyhow};
use isolang::Language;
use std::collections::BTreeSet;

/// Kind of ISO code used as the primary subtag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Primary language subtag of a locale identifier (`pt` for `pt-BR`)
pub fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Validate a locale identifier such as `de`, `pt-BR` or `zh-Hans`
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let code = code.trim();
    let mut subtags = code.split(['-', '_']);
    let primary = subtags.next().unwrap_or_default().to_lowercase();

    let code_type = match primary.len() {
        2 if Language::from_639_1(&primary).is_some() => LanguageCodeType::Part1,
        3 if Language::from_639_3(&primary).is_some() => LanguageCodeType::Part3,
        _ => return Err(anyhow!("Invalid language code: {}", code)),
    };

    // Script and region subtags: 2-8 alphanumerics (Hans, BR, 419)
    for subtag in subtags {
        let valid_length = (2..=8).contains(&subtag.len());
        if !valid_length || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow!("Invalid subtag '{}' in language code: {}", subtag, code));
        }
    }

    Ok(code_type)
}

/// Get the English language name for a locale identifier's primary subtag
pub fn get_language_name(code: &str) -> Result<String> {
    let primary = primary_subtag(code.trim()).to_lowercase();
    let lang = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Parse a comma-separated language list (`de, es,pt-BR`).
///
/// Whitespace around each code is trimmed and empty items are dropped.
/// Codes keep their case since catalogs match them exactly.
pub fn parse_language_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}
