//! Selection store and its two mutators.
//!
//! # Responsibility
//! - Own override sets and the optional bulk rule for one table instance.
//! - Keep override sets disjoint across every mutation.
//!
//! # Invariants
//! - `deselected_ids` only grows while a bulk rule is active.
//! - `set_bulk_selection` replaces the rule and clears both override sets in
//!   one `&mut self` call, so no reader can observe a half-applied change.

use crate::model::page::{BulkCount, PageNumber, PageSize};
use crate::model::record::RecordKey;
use serde::Serialize;
use std::collections::HashSet;

/// "Treat the first `count` records, counting from the first record of
/// `starting_page`, as selected by default."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkRule {
    pub count: BulkCount,
    pub starting_page: PageNumber,
}

impl BulkRule {
    pub fn new(count: BulkCount, starting_page: PageNumber) -> Self {
        Self {
            count,
            starting_page,
        }
    }

    /// Zero-based index of a rendered row relative to the rule's first record.
    ///
    /// Returns `None` when `page` precedes `starting_page` or the index does
    /// not fit in `u64`. Both cases mean the rule does not reach the row.
    pub fn global_index(&self, page: PageNumber, page_size: PageSize, position: usize) -> Option<u64> {
        if page < self.starting_page {
            return None;
        }
        let page_offset = u64::from(page.get() - self.starting_page.get());
        let position = u64::try_from(position).ok()?;
        page_offset
            .checked_mul(u64::from(page_size.get()))?
            .checked_add(position)
    }

    /// Whether the row at `position` on `page` falls inside the bulk window.
    pub fn covers(&self, page: PageNumber, page_size: PageSize, position: usize) -> bool {
        self.global_index(page, page_size, position)
            .is_some_and(|index| index < self.count.get())
    }
}

/// Selection state for one paginated table.
///
/// Holds identifiers and counts only. Create one per table; instances are
/// fully independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStore<Id: RecordKey> {
    selected_ids: HashSet<Id>,
    deselected_ids: HashSet<Id>,
    bulk_rule: Option<BulkRule>,
}

impl<Id: RecordKey> Default for SelectionStore<Id> {
    fn default() -> Self {
        Self {
            selected_ids: HashSet::new(),
            deselected_ids: HashSet::new(),
            bulk_rule: None,
        }
    }
}

impl<Id: RecordKey> SelectionStore<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids explicitly selected regardless of the bulk rule.
    pub fn selected_ids(&self) -> &HashSet<Id> {
        &self.selected_ids
    }

    /// Ids explicitly excluded from an active bulk rule.
    pub fn deselected_ids(&self) -> &HashSet<Id> {
        &self.deselected_ids
    }

    pub fn bulk_rule(&self) -> Option<BulkRule> {
        self.bulk_rule
    }

    /// Bulk count, `0` when no rule is active.
    pub fn bulk_count(&self) -> u64 {
        self.bulk_rule.map_or(0, |rule| rule.count.get())
    }

    pub fn is_bulk_active(&self) -> bool {
        self.bulk_rule.is_some()
    }

    /// Returns the individual override for `id`, if any.
    ///
    /// `Some(true)` for an explicit select, `Some(false)` for an explicit
    /// deselect.
    pub fn override_for(&self, id: &Id) -> Option<bool> {
        if self.selected_ids.contains(id) {
            Some(true)
        } else if self.deselected_ids.contains(id) {
            Some(false)
        } else {
            None
        }
    }

    /// Records a per-row checkbox change.
    ///
    /// # Contract
    /// - Selecting adds an explicit select and cancels any deselect override.
    /// - Deselecting drops the explicit select; a deselect override is only
    ///   recorded while a bulk rule is active, since without one absence
    ///   from `selected_ids` already means "not selected".
    /// - Repeating the value already in effect leaves the sets unchanged.
    pub fn toggle_row_selection(&mut self, id: Id, want_selected: bool) {
        if want_selected {
            self.deselected_ids.remove(&id);
            self.selected_ids.insert(id);
        } else {
            self.selected_ids.remove(&id);
            if self.is_bulk_active() {
                self.deselected_ids.insert(id);
            }
        }
    }

    /// Declares a new bulk rule anchored at `starting_page`.
    ///
    /// Replaces any previous rule and clears both override sets, since
    /// overrides were relative to the previous bulk extent.
    pub fn set_bulk_selection(&mut self, count: BulkCount, starting_page: PageNumber) {
        self.bulk_rule = Some(BulkRule::new(count, starting_page));
        self.selected_ids.clear();
        self.deselected_ids.clear();
    }

    /// Drops the bulk rule and every override.
    pub fn clear(&mut self) {
        self.bulk_rule = None;
        self.selected_ids.clear();
        self.deselected_ids.clear();
    }

    /// True when nothing is selected or overridden.
    pub fn is_empty(&self) -> bool {
        self.bulk_rule.is_none() && self.selected_ids.is_empty() && self.deselected_ids.is_empty()
    }

    /// Total selected records across the whole dataset, for display.
    ///
    /// With a bulk rule this is `count - |deselected_ids|` (floored at zero).
    /// Explicit selections made outside the bulk window after the rule was
    /// declared are not added, so the figure can undercount in that case.
    pub fn selected_count(&self) -> u64 {
        match self.bulk_rule {
            Some(rule) => rule.count.get().saturating_sub(len_u64(&self.deselected_ids)),
            None => len_u64(&self.selected_ids),
        }
    }

    /// Deterministic, serializable view of the store.
    pub fn snapshot(&self) -> SelectionSnapshot<Id>
    where
        Id: Ord,
    {
        let mut selected_ids: Vec<Id> = self.selected_ids.iter().cloned().collect();
        selected_ids.sort();
        let mut deselected_ids: Vec<Id> = self.deselected_ids.iter().cloned().collect();
        deselected_ids.sort();

        SelectionSnapshot {
            selected_ids,
            deselected_ids,
            bulk_rule: self.bulk_rule,
            selected_count: self.selected_count(),
        }
    }
}

/// Sorted copy of a store's state, for diagnostics and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot<Id> {
    pub selected_ids: Vec<Id>,
    pub deselected_ids: Vec<Id>,
    pub bulk_rule: Option<BulkRule>,
    pub selected_count: u64,
}

fn len_u64<T>(set: &HashSet<T>) -> u64 {
    u64::try_from(set.len()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{BulkRule, SelectionStore};
    use crate::model::page::{BulkCount, PageNumber, PageSize};

    fn page(value: u32) -> PageNumber {
        PageNumber::new(value).unwrap()
    }

    fn count(value: u64) -> BulkCount {
        BulkCount::new(value).unwrap()
    }

    #[test]
    fn bulk_rule_ignores_pages_before_anchor() {
        let rule = BulkRule::new(count(100), page(3));
        let size = PageSize::new(12).unwrap();
        assert_eq!(rule.global_index(page(2), size, 0), None);
        assert!(!rule.covers(page(1), size, 11));
        assert_eq!(rule.global_index(page(4), size, 5), Some(17));
    }

    #[test]
    fn bulk_rule_overflow_is_out_of_range() {
        let rule = BulkRule::new(count(u64::MAX), PageNumber::FIRST);
        let size = PageSize::new(u32::MAX).unwrap();
        assert!(rule.covers(page(u32::MAX), size, 0));
        assert!(!rule.covers(page(u32::MAX), size, usize::MAX));
    }

    #[test]
    fn deselect_without_bulk_rule_records_nothing() {
        let mut store = SelectionStore::<i64>::new();
        store.toggle_row_selection(7, true);
        store.toggle_row_selection(7, false);
        store.toggle_row_selection(8, false);

        assert!(store.selected_ids().is_empty());
        assert!(store.deselected_ids().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn reselect_cancels_deselect_override() {
        let mut store = SelectionStore::<i64>::new();
        store.set_bulk_selection(count(5), PageNumber::FIRST);
        store.toggle_row_selection(3, false);
        assert_eq!(store.override_for(&3), Some(false));

        store.toggle_row_selection(3, true);
        assert_eq!(store.override_for(&3), Some(true));
        assert!(store.deselected_ids().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = SelectionStore::<i64>::new();
        store.set_bulk_selection(count(5), page(2));
        store.toggle_row_selection(1, false);
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.bulk_count(), 0);
        assert_eq!(store.selected_count(), 0);
    }

    #[test]
    fn selected_count_floors_at_zero() {
        let mut store = SelectionStore::<i64>::new();
        store.set_bulk_selection(count(2), PageNumber::FIRST);
        for id in 0..5 {
            store.toggle_row_selection(id, false);
        }
        assert_eq!(store.selected_count(), 0);
    }

    #[test]
    fn snapshot_is_sorted() {
        let mut store = SelectionStore::<i64>::new();
        for id in [9, 2, 5] {
            store.toggle_row_selection(id, true);
        }
        let snapshot = store.snapshot();
        assert_eq!(snapshot.selected_ids, vec![2, 5, 9]);
        assert_eq!(snapshot.selected_count, 3);
        assert_eq!(snapshot.bulk_rule, None);
    }
}
