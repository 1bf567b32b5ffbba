/*!
 * Removal of stale entries.
 */

use log::debug;

use crate::catalog::Catalog;

/// Remove every stale entry from `catalog`.
///
/// Returns the removed keys in the order they appeared in the document.
/// Running it again on the result removes nothing.
pub fn prune_stale(catalog: &mut Catalog) -> Vec<String> {
    let removed = catalog.remove_entries_where(|entry| entry.is_stale());

    for key in &removed {
        debug!("Removed stale entry '{}'", key);
    }

    removed
}
