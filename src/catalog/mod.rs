/*!
 * String catalog (`.xcstrings`) document handling.
 *
 * - `model`: the order-preserving document and its typed views
 * - `state`: normalized translation/extraction states
 */

pub mod model;
pub mod state;

pub use model::{
    Catalog, DEFAULT_SOURCE_LANGUAGE, EntryView, FALLBACK_SOURCE_LANGUAGE, LocalizationView,
};
pub use state::State;
