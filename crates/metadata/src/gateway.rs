//! Request-level orchestration over the two catalogs.
//!
//! Only malformed client input is reported as an error. Upstream failures are
//! logged and answered with an empty result of the same shape, flagged as
//! degraded so it is not cached.

use std::sync::Arc;

use metasearch_core::error::ApiError;
use metasearch_core::meta::{MetaDetailResponse, MetaPreviewsResponse};
use metasearch_core::request::{parse_meta_id, parse_search_extra};
use metasearch_core::types::MediaKind;
use tracing::{error, warn};

use crate::MetadataError;
use crate::provider::CatalogProvider;

/// A response body, and whether it stands in for a failed upstream call.
#[derive(Debug)]
pub struct Answer<T> {
    pub body: T,
    pub degraded: bool,
}

impl<T> Answer<T> {
    fn fresh(body: T) -> Self {
        Self {
            body,
            degraded: false,
        }
    }

    fn fallback(body: T) -> Self {
        Self {
            body,
            degraded: true,
        }
    }
}

#[derive(Clone)]
pub struct Gateway {
    movies: Arc<dyn CatalogProvider>,
    series: Arc<dyn CatalogProvider>,
}

impl Gateway {
    pub fn new(movies: Arc<dyn CatalogProvider>, series: Arc<dyn CatalogProvider>) -> Self {
        Self { movies, series }
    }

    fn catalog(&self, kind: MediaKind) -> &dyn CatalogProvider {
        match kind {
            MediaKind::Movie => self.movies.as_ref(),
            MediaKind::Series => self.series.as_ref(),
        }
    }

    /// Search `kind` with a raw `search=<term>.json` catalog extra.
    pub async fn search(
        &self,
        kind: MediaKind,
        raw_extra: &str,
    ) -> Result<Answer<MetaPreviewsResponse>, ApiError> {
        let query = parse_search_extra(raw_extra)?;
        let catalog = self.catalog(kind);

        match catalog.search(query).await {
            Ok(metas) => Ok(Answer::fresh(MetaPreviewsResponse { metas })),
            Err(e) => {
                error!(provider = %catalog.provider(), query, error = %e, "search failed");
                Ok(Answer::fallback(MetaPreviewsResponse::default()))
            }
        }
    }

    /// Fetch the detail record for a raw `<provider>:<n>.json` id.
    pub async fn detail(
        &self,
        kind: MediaKind,
        raw_id: &str,
    ) -> Result<Answer<MetaDetailResponse>, ApiError> {
        let catalog = self.catalog(kind);
        let id = parse_meta_id(raw_id, catalog.provider())?;

        match catalog.detail(id).await {
            Ok(Some(meta)) => Ok(Answer::fresh(MetaDetailResponse { meta: Some(meta) })),
            Ok(None) | Err(MetadataError::NotFound) => {
                warn!(provider = %catalog.provider(), id, "record not found");
                Ok(Answer::fresh(MetaDetailResponse::default()))
            }
            Err(e) => {
                error!(provider = %catalog.provider(), id, error = %e, "detail lookup failed");
                Ok(Answer::fallback(MetaDetailResponse::default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metasearch_core::meta::{MetaDetail, MetaPreview};
    use metasearch_core::types::Provider;
    use std::sync::Mutex;

    /// Canned provider that records the queries it receives.
    struct FakeCatalog {
        provider: Provider,
        kind: MediaKind,
        fail: bool,
        seen: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn new(provider: Provider, kind: MediaKind, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                provider,
                kind,
                fail,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl CatalogProvider for FakeCatalog {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn search(&self, query: &str) -> Result<Vec<MetaPreview>, MetadataError> {
            self.seen.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(MetadataError::Network("timed out".into()));
            }
            Ok(vec![MetaPreview::new(
                self.provider.meta_id(1),
                self.kind,
                query.to_string(),
            )])
        }

        async fn detail(&self, id: u64) -> Result<Option<MetaDetail>, MetadataError> {
            self.seen.lock().unwrap().push(id.to_string());
            match (self.fail, id) {
                (true, _) => Err(MetadataError::Provider("TMDB returned 500".into())),
                (false, 404) => Err(MetadataError::NotFound),
                (false, 0) => Ok(None),
                (false, _) => Ok(Some(MetaDetail::new(MetaPreview::new(
                    self.provider.meta_id(id),
                    self.kind,
                    "Found".into(),
                )))),
            }
        }
    }

    fn gateway(fail: bool) -> (Gateway, Arc<FakeCatalog>, Arc<FakeCatalog>) {
        let movies = FakeCatalog::new(Provider::Tmdb, MediaKind::Movie, fail);
        let series = FakeCatalog::new(Provider::Tvdb, MediaKind::Series, fail);
        (Gateway::new(movies.clone(), series.clone()), movies, series)
    }

    #[tokio::test]
    async fn search_dispatches_on_kind_with_unwrapped_query() {
        let (gw, movies, series) = gateway(false);

        let resp = gw.search(MediaKind::Series, "search=lost.json").await.unwrap();
        assert!(!resp.degraded);
        assert_eq!(resp.body.metas[0].id, "tvdb:1");
        assert_eq!(series.seen.lock().unwrap().as_slice(), ["lost"]);
        assert!(movies.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failures_degrade_to_empty_shapes() {
        let (gw, _, _) = gateway(true);

        let resp = gw.search(MediaKind::Movie, "search=batman.json").await.unwrap();
        assert!(resp.degraded);
        assert!(resp.body.metas.is_empty());

        let resp = gw.detail(MediaKind::Movie, "tmdb:268.json").await.unwrap();
        assert!(resp.degraded);
        assert_eq!(resp.body.meta, None);
    }

    #[tokio::test]
    async fn not_found_degrades_to_null_meta() {
        let (gw, _, _) = gateway(false);
        for raw_id in ["tmdb:404.json", "tmdb:0.json"] {
            let resp = gw.detail(MediaKind::Movie, raw_id).await.unwrap();
            assert_eq!(resp.body.meta, None);
            assert!(!resp.degraded, "a missing record is a real answer");
        }
    }

    #[tokio::test]
    async fn malformed_input_is_rejected_before_upstream() {
        let (gw, movies, series) = gateway(false);

        let err = gw.search(MediaKind::Movie, "batman").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = gw.detail(MediaKind::Series, "tmdb:268.json").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        assert!(movies.seen.lock().unwrap().is_empty());
        assert!(series.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn detail_is_idempotent() {
        let (gw, _, _) = gateway(false);
        let first =
            serde_json::to_string(&gw.detail(MediaKind::Series, "tvdb:7.json").await.unwrap().body)
                .unwrap();
        let second =
            serde_json::to_string(&gw.detail(MediaKind::Series, "tvdb:7.json").await.unwrap().body)
                .unwrap();
        assert_eq!(first, second);
        assert!(first.contains(r#""id":"tvdb:7""#));
    }
}
