//! Page providers: the only I/O boundary of a table session.
//!
//! # Responsibility
//! - Fetch exactly one page of records per request plus the total count.
//! - Report failures as `ProviderError` without touching selection state.
//!
//! # Invariants
//! - Page numbers are 1-based; `offset = (page - 1) * page_size`.
//! - Providers do not cache pages.

use crate::model::page::{PageNumber, PageSize};
use crate::model::record::Identified;
use crate::repo::artwork_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;
pub mod local;
pub mod memory;

pub use http::{HttpPageProvider, DEFAULT_API_BASE_URL};
pub use local::RepositoryPageProvider;
pub use memory::MemoryPageProvider;

/// Message shown to users for any page load failure.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load data. Please check the network.";

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Page fetch failure.
#[derive(Debug)]
pub enum ProviderError {
    /// Transport failed before a response arrived.
    Network(String),
    /// Server answered with a non-success status.
    HttpStatus(u16),
    /// Response body did not match the listing shape.
    Decode(String),
    /// Local storage failed.
    Storage(RepoError),
    /// Requested page starts beyond addressable offsets.
    OffsetOverflow { page: PageNumber, page_size: PageSize },
}

impl ProviderError {
    /// Message suitable for the table's error placeholder.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILURE_MESSAGE
    }

    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::HttpStatus(_) => "http_status",
            Self::Decode(_) => "decode",
            Self::Storage(_) => "storage",
            Self::OffsetOverflow { .. } => "offset_overflow",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::HttpStatus(status) => write!(f, "HTTP error! status: {status}"),
            Self::Decode(message) => write!(f, "invalid listing response: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::OffsetOverflow { page, page_size } => {
                write!(f, "page {page} with size {page_size} is out of range")
            }
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProviderError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// One page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: PageNumber,
    pub page_size: PageSize,
}

impl PageRequest {
    pub fn new(page: PageNumber, page_size: PageSize) -> Self {
        Self { page, page_size }
    }

    /// Zero-based global index of the page's first record.
    pub fn offset(&self) -> ProviderResult<u64> {
        self.page_size
            .first_index(self.page)
            .ok_or(ProviderError::OffsetOverflow {
                page: self.page,
                page_size: self.page_size,
            })
    }
}

/// Records of one page plus the dataset's total record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage<R> {
    pub records: Vec<R>,
    pub total_count: u64,
}

impl<R> FetchedPage<R> {
    pub fn total_pages(&self, page_size: PageSize) -> u64 {
        page_size.total_pages(self.total_count)
    }
}

/// Source of page windows for a table session.
pub trait PageProvider {
    type Record: Identified;

    fn fetch_page(&self, request: PageRequest) -> ProviderResult<FetchedPage<Self::Record>>;
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, ProviderError, LOAD_FAILURE_MESSAGE};
    use crate::model::page::{PageNumber, PageSize};

    #[test]
    fn offset_is_first_record_index() {
        let request = PageRequest::new(PageNumber::new(4).unwrap(), PageSize::new(12).unwrap());
        assert_eq!(request.offset().unwrap(), 36);
    }

    #[test]
    fn http_status_error_keeps_status_and_user_message() {
        let err = ProviderError::HttpStatus(503);
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(err.user_message(), LOAD_FAILURE_MESSAGE);
        assert_eq!(err.code(), "http_status");
    }
}
