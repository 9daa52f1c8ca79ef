//! Render-boundary checkbox diffing.
//!
//! Table widgets report the full set of checked rows after every click (row
//! or header checkbox). This module turns "previously checked vs now checked"
//! into per-row toggles for the selection store.

use crate::model::record::RecordKey;
use crate::selection::store::SelectionStore;
use serde::Serialize;
use std::collections::HashSet;

/// One row whose checked status changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowToggle<Id> {
    pub id: Id,
    pub selected: bool,
}

/// Emits one toggle per id in `page_ids` whose checked status differs between
/// `previously_checked` and `now_checked`, in page order.
///
/// Ids that are not part of the page are ignored.
pub fn derive_toggles<Id: RecordKey>(
    page_ids: &[Id],
    previously_checked: &HashSet<Id>,
    now_checked: &HashSet<Id>,
) -> Vec<RowToggle<Id>> {
    page_ids
        .iter()
        .filter_map(|id| {
            let was_checked = previously_checked.contains(id);
            let is_checked = now_checked.contains(id);
            (was_checked != is_checked).then(|| RowToggle {
                id: id.clone(),
                selected: is_checked,
            })
        })
        .collect()
}

/// Applies toggles to the store in order.
pub fn apply_toggles<Id: RecordKey>(store: &mut SelectionStore<Id>, toggles: &[RowToggle<Id>]) {
    for toggle in toggles {
        store.toggle_row_selection(toggle.id.clone(), toggle.selected);
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_toggles, derive_toggles, RowToggle};
    use crate::selection::store::SelectionStore;
    use std::collections::HashSet;

    #[test]
    fn header_checkbox_selects_every_unchecked_row() {
        let page = [1_i64, 2, 3];
        let before: HashSet<i64> = [2].into_iter().collect();
        let after: HashSet<i64> = page.iter().copied().collect();

        let toggles = derive_toggles(&page, &before, &after);
        assert_eq!(
            toggles,
            vec![
                RowToggle { id: 1, selected: true },
                RowToggle { id: 3, selected: true },
            ]
        );
    }

    #[test]
    fn ids_outside_page_are_ignored() {
        let page = [1_i64, 2];
        let before = HashSet::new();
        let after: HashSet<i64> = [2, 99].into_iter().collect();

        let toggles = derive_toggles(&page, &before, &after);
        assert_eq!(toggles, vec![RowToggle { id: 2, selected: true }]);
    }

    #[test]
    fn unchanged_selection_yields_no_toggles() {
        let page = [1_i64, 2];
        let checked: HashSet<i64> = [1].into_iter().collect();
        assert!(derive_toggles(&page, &checked, &checked).is_empty());
    }

    #[test]
    fn apply_toggles_updates_store() {
        let mut store = SelectionStore::<i64>::new();
        apply_toggles(
            &mut store,
            &[
                RowToggle { id: 4, selected: true },
                RowToggle { id: 5, selected: true },
                RowToggle { id: 4, selected: false },
            ],
        );
        assert_eq!(store.selected_count(), 1);
        assert_eq!(store.override_for(&5), Some(true));
    }
}
