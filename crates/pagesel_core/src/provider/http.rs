//! Remote listing provider over HTTP.
//!
//! Requests `GET {base}?page={n}&limit={size}&fields=...` and decodes the
//! `{ data, pagination }` envelope. Blocking: callers that need concurrency
//! run fetches off their UI thread and complete them through the session's
//! ticketed load API.

use super::{FetchedPage, PageProvider, PageRequest, ProviderError, ProviderResult};
use crate::model::record::{Artwork, ARTWORK_FIELDS};
use log::{info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Public artworks listing of the Art Institute of Chicago.
pub const DEFAULT_API_BASE_URL: &str = "https://api.artic.edu/api/v1/artworks";

/// Listing envelope returned by the remote API.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingResponse {
    pub data: Vec<Artwork>,
    pub pagination: ListingPagination,
}

/// Pagination block of the listing envelope. Only `total` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPagination {
    pub total: u64,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

/// Blocking HTTP page provider.
pub struct HttpPageProvider {
    base_url: String,
    client: Client,
}

impl HttpPageProvider {
    /// Builds a provider with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pagesel/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ProviderError::Network(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Full request URL for one page.
    pub fn page_url(&self, request: &PageRequest) -> String {
        let base = self.base_url.trim_end_matches('/');
        let separator = if base.contains('?') { '&' } else { '?' };
        format!(
            "{base}{separator}page={}&limit={}&fields={}",
            request.page,
            request.page_size,
            ARTWORK_FIELDS.join(",")
        )
    }
}

impl PageProvider for HttpPageProvider {
    type Record = Artwork;

    fn fetch_page(&self, request: PageRequest) -> ProviderResult<FetchedPage<Artwork>> {
        let started_at = Instant::now();
        let url = self.page_url(&request);

        let response = self.client.get(&url).send().map_err(|err| {
            let err = ProviderError::Network(err.to_string());
            warn!(
                "event=http_fetch module=provider status=error page={} error_code={} duration_ms={}",
                request.page,
                err.code(),
                started_at.elapsed().as_millis()
            );
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = ProviderError::HttpStatus(status.as_u16());
            warn!(
                "event=http_fetch module=provider status=error page={} error_code={} http_status={} duration_ms={}",
                request.page,
                err.code(),
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(err);
        }

        let body = response
            .bytes()
            .map_err(|err| ProviderError::Network(err.to_string()))?;
        let page = decode_listing(&body)?;

        info!(
            "event=http_fetch module=provider status=ok page={} records={} total={} duration_ms={}",
            request.page,
            page.records.len(),
            page.total_count,
            started_at.elapsed().as_millis()
        );
        Ok(page)
    }
}

/// Decodes a listing response body into one fetched page.
pub fn decode_listing(body: &[u8]) -> ProviderResult<FetchedPage<Artwork>> {
    let response: ListingResponse =
        serde_json::from_slice(body).map_err(|err| ProviderError::Decode(err.to_string()))?;
    Ok(FetchedPage {
        records: response.data,
        total_count: response.pagination.total,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_listing, HttpPageProvider, DEFAULT_API_BASE_URL};
    use crate::model::page::{PageNumber, PageSize};
    use crate::provider::{PageRequest, ProviderError};
    use std::time::Duration;

    #[test]
    fn page_url_carries_page_limit_and_fields() {
        let provider = HttpPageProvider::new(DEFAULT_API_BASE_URL, Duration::from_secs(1)).unwrap();
        let request = PageRequest::new(PageNumber::new(3).unwrap(), PageSize::new(12).unwrap());
        assert_eq!(
            provider.page_url(&request),
            "https://api.artic.edu/api/v1/artworks?page=3&limit=12\
             &fields=id,title,place_of_origin,artist_display,inscriptions,date_start,date_end"
        );
    }

    #[test]
    fn page_url_appends_to_existing_query() {
        let provider =
            HttpPageProvider::new("http://localhost/list?q=x", Duration::from_secs(1)).unwrap();
        let request = PageRequest::new(PageNumber::FIRST, PageSize::new(5).unwrap());
        assert!(provider
            .page_url(&request)
            .starts_with("http://localhost/list?q=x&page=1&limit=5"));
    }

    #[test]
    fn decode_listing_reads_records_and_total() {
        let body = br#"{
            "pagination": {"total": 129884, "limit": 2, "offset": 0, "total_pages": 64942, "current_page": 1},
            "data": [
                {"id": 4, "title": "Priest and Boy", "place_of_origin": "France", "artist_display": "Lawrence Carmichael Earle", "inscriptions": null, "date_start": 1880, "date_end": 1880, "image_id": "x"},
                {"id": 9, "title": null}
            ],
            "config": {"iiif_url": "https://www.artic.edu/iiif/2"}
        }"#;

        let page = decode_listing(body).unwrap();
        assert_eq!(page.total_count, 129_884);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].id, 4);
        assert_eq!(page.records[0].place_of_origin.as_deref(), Some("France"));
        assert_eq!(page.records[1].title, None);
        assert_eq!(page.records[1].date_start, None);
    }

    #[test]
    fn decode_listing_rejects_missing_pagination() {
        let err = decode_listing(br#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
