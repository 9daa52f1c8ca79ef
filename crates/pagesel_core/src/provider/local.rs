//! Page provider over a local artwork repository.

use super::{FetchedPage, PageProvider, PageRequest, ProviderResult};
use crate::model::record::Artwork;
use crate::repo::artwork_repo::ArtworkRepository;
use log::debug;

/// Serves `LIMIT/OFFSET` windows from an [`ArtworkRepository`].
pub struct RepositoryPageProvider<R: ArtworkRepository> {
    repo: R,
}

impl<R: ArtworkRepository> RepositoryPageProvider<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }
}

impl<R: ArtworkRepository> PageProvider for RepositoryPageProvider<R> {
    type Record = Artwork;

    fn fetch_page(&self, request: PageRequest) -> ProviderResult<FetchedPage<Artwork>> {
        let offset = request.offset()?;
        let total_count = self.repo.count_artworks()?;
        let records = self.repo.list_artworks(request.page_size.get(), offset)?;
        debug!(
            "event=local_fetch module=provider status=ok page={} records={} total={}",
            request.page,
            records.len(),
            total_count
        );
        Ok(FetchedPage {
            records,
            total_count,
        })
    }
}
