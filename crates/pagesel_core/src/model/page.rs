//! Page and bulk-count value types.
//!
//! # Invariants
//! - `PageNumber` is 1-based.
//! - `PageSize` and `BulkCount` are strictly positive.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::{NonZeroU32, NonZeroU64};

/// Default records per page, matching the remote listing's page limit.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// First page of any listing.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for `0`.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Converts a widget's 0-based page event index into a page number.
    pub fn from_zero_based(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(Self::new)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// 0-based index as reported by paginator widgets.
    pub fn zero_based(self) -> u32 {
        self.0.get() - 1
    }

    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    pub fn previous(self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl Display for PageNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed records-per-page for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Returns `None` for `0`.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Zero-based global offset of the first record on `page`.
    ///
    /// Returns `None` when the offset does not fit in `u64`.
    pub fn first_index(self, page: PageNumber) -> Option<u64> {
        u64::from(page.zero_based()).checked_mul(u64::from(self.get()))
    }

    /// Number of pages needed for `total` records (at least one).
    pub fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.get())).max(1)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN))
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated positive number of records for a bulk selection rule.
///
/// Only constructible from a positive value, so the selection store never
/// sees a zero or negative count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulkCount(NonZeroU64);

impl BulkCount {
    /// Returns `None` for `0`.
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl Display for BulkCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
