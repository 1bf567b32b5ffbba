/*!
 * Normalized translation and extraction states.
 *
 * String catalogs spell states as free-form strings ("translated", "NEW",
 * "stale", "needs_review", ...). They are folded into a closed enumeration
 * once, when a view over the document is built, so the operations never
 * compare raw strings.
 */

use std::fmt;

/// State of a localization unit or of an entry's extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum State {
    /// Translation confirmed as final
    Translated,
    /// Translation present but not yet reviewed
    New,
    /// Entry no longer referenced by the application
    Stale,
    /// Anything else, including a missing state
    #[default]
    Other,
}

impl State {
    /// Parse a raw state string, ignoring ASCII case
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("translated") {
            Self::Translated
        } else if raw.eq_ignore_ascii_case("new") {
            Self::New
        } else if raw.eq_ignore_ascii_case("stale") {
            Self::Stale
        } else {
            Self::Other
        }
    }

    /// Canonical spelling used when writing a state back to the catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translated => "translated",
            Self::New => "new",
            Self::Stale => "stale",
            Self::Other => "other",
        }
    }
}

impl From<Option<&str>> for State {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
