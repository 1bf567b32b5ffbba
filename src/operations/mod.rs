/*!
 * Catalog operations.
 *
 * - `merge`: inject known translations without overwriting finished ones
 * - `status`: report stale entries, unreviewed and missing translations
 * - `prune`: drop stale entries
 */

pub mod merge;
pub mod prune;
pub mod status;

pub use merge::{MergeEvent, MergeOutcome, TranslationTable, merge_translations};
pub use prune::prune_stale;
pub use status::{MissingTranslation, NewString, StaleString, StatusReport};
