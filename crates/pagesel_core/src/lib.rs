//! Persistent cross-page row selection for server-paginated tables.
//! This crate is the single source of truth for selection invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod repo;
pub mod selection;
pub mod service;

pub use config::{ConfigError, SessionConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::page::{BulkCount, PageNumber, PageSize, DEFAULT_PAGE_SIZE};
pub use model::record::{Artwork, ArtworkId, Identified, RecordKey};
pub use provider::{
    FetchedPage, HttpPageProvider, MemoryPageProvider, PageProvider, PageRequest, ProviderError,
    ProviderResult, RepositoryPageProvider,
};
pub use repo::artwork_repo::{
    seed_synthetic_artworks, ArtworkRepository, RepoError, RepoResult, SqliteArtworkRepository,
};
pub use selection::diff::{apply_toggles, derive_toggles, RowToggle};
pub use selection::input::{parse_bulk_count, BulkInputError, BULK_INPUT_MESSAGE};
pub use selection::reconcile::{is_selected, selected_ids_on_page, selected_on_page};
pub use selection::store::{BulkRule, SelectionSnapshot, SelectionStore};
pub use service::table_session::{
    LoadOutcome, LoadState, PageTicket, RecordIdOf, SessionError, SessionResult, TableSession,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
