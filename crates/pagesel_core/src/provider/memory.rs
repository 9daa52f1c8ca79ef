//! In-memory page provider for tests and embedding.

use super::{FetchedPage, PageProvider, PageRequest, ProviderError, ProviderResult};
use crate::model::page::PageNumber;
use crate::model::record::Identified;
use std::collections::HashSet;

/// Slices an owned record list into pages.
///
/// Pages listed via [`MemoryPageProvider::failing_on`] fail with
/// `ProviderError::Network`, which lets callers exercise load-error paths.
#[derive(Debug, Clone)]
pub struct MemoryPageProvider<R> {
    records: Vec<R>,
    failing_pages: HashSet<PageNumber>,
}

impl<R: Identified + Clone> MemoryPageProvider<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            failing_pages: HashSet::new(),
        }
    }

    /// Makes every fetch of `page` fail.
    pub fn failing_on(mut self, page: PageNumber) -> Self {
        self.failing_pages.insert(page);
        self
    }
}

impl<R: Identified + Clone> PageProvider for MemoryPageProvider<R> {
    type Record = R;

    fn fetch_page(&self, request: PageRequest) -> ProviderResult<FetchedPage<R>> {
        if self.failing_pages.contains(&request.page) {
            return Err(ProviderError::Network(format!(
                "page {} unavailable",
                request.page
            )));
        }

        let offset = request.offset()?;
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.records.len());
        let end = start
            .saturating_add(request.page_size.get() as usize)
            .min(self.records.len());

        Ok(FetchedPage {
            records: self.records[start..end].to_vec(),
            total_count: self.records.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryPageProvider;
    use crate::model::page::{PageNumber, PageSize};
    use crate::provider::{PageProvider, PageRequest, ProviderError};

    #[test]
    fn slices_pages_and_reports_total() {
        let provider = MemoryPageProvider::new((1_i64..=30).collect());
        let size = PageSize::new(12).unwrap();

        let third = provider
            .fetch_page(PageRequest::new(PageNumber::new(3).unwrap(), size))
            .unwrap();
        assert_eq!(third.records, (25..=30).collect::<Vec<i64>>());
        assert_eq!(third.total_count, 30);
        assert_eq!(third.total_pages(size), 3);

        let beyond = provider
            .fetch_page(PageRequest::new(PageNumber::new(9).unwrap(), size))
            .unwrap();
        assert!(beyond.records.is_empty());
    }

    #[test]
    fn failing_page_reports_network_error() {
        let page = PageNumber::new(2).unwrap();
        let provider = MemoryPageProvider::new(vec![1_i64, 2, 3]).failing_on(page);
        let err = provider
            .fetch_page(PageRequest::new(page, PageSize::new(2).unwrap()))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
