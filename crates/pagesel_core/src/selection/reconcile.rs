//! Page-window reconciliation.
//!
//! Maps (page records, page number, page size, selection store) to the
//! records of that page that are currently selected. Pure and O(page size);
//! safe to call any number of times for the same page.
//!
//! Per record, in order:
//! 1. explicit select → selected;
//! 2. explicit deselect → not selected;
//! 3. active bulk rule → selected iff its global index is in `0..count`
//!    (pages before the rule's anchor are never covered);
//! 4. otherwise not selected.

use crate::model::page::{PageNumber, PageSize};
use crate::model::record::{Identified, RecordKey};
use crate::selection::store::SelectionStore;

/// Whether the record `id` rendered at zero-based `position` on `page` is
/// selected.
pub fn is_selected<Id: RecordKey>(
    id: &Id,
    position: usize,
    page: PageNumber,
    page_size: PageSize,
    store: &SelectionStore<Id>,
) -> bool {
    if let Some(explicit) = store.override_for(id) {
        return explicit;
    }
    store
        .bulk_rule()
        .is_some_and(|rule| rule.covers(page, page_size, position))
}

/// Returns the selected subset of `records`, preserving page order.
pub fn selected_on_page<'a, R: Identified>(
    records: &'a [R],
    page: PageNumber,
    page_size: PageSize,
    store: &SelectionStore<R::Id>,
) -> Vec<&'a R> {
    records
        .iter()
        .enumerate()
        .filter(|(position, record)| {
            is_selected(&record.record_id(), *position, page, page_size, store)
        })
        .map(|(_, record)| record)
        .collect()
}

/// Same as [`selected_on_page`] but yields ids only.
pub fn selected_ids_on_page<R: Identified>(
    records: &[R],
    page: PageNumber,
    page_size: PageSize,
    store: &SelectionStore<R::Id>,
) -> Vec<R::Id> {
    selected_on_page(records, page, page_size, store)
        .into_iter()
        .map(Identified::record_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_selected, selected_ids_on_page};
    use crate::model::page::{BulkCount, PageNumber, PageSize};
    use crate::selection::store::SelectionStore;

    #[test]
    fn no_rule_and_no_override_is_unselected() {
        let store = SelectionStore::<i64>::new();
        let size = PageSize::new(4).unwrap();
        assert!(!is_selected(&1, 0, PageNumber::FIRST, size, &store));
    }

    #[test]
    fn explicit_deselect_beats_bulk_rule() {
        let mut store = SelectionStore::<i64>::new();
        store.set_bulk_selection(BulkCount::new(4).unwrap(), PageNumber::FIRST);
        store.toggle_row_selection(11, false);

        let size = PageSize::new(4).unwrap();
        let ids = selected_ids_on_page(&[10_i64, 11, 12, 13], PageNumber::FIRST, size, &store);
        assert_eq!(ids, vec![10, 12, 13]);
    }
}
