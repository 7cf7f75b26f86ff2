use metasearch_core::meta::{MetaDetail, MetaPreview};
use metasearch_core::types::Provider;

use crate::MetadataError;

/// An upstream catalog that can search and fetch records, already normalized
/// into canonical entities.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    fn provider(&self) -> Provider;

    /// Search the catalog by free-text query, in upstream order.
    async fn search(&self, query: &str) -> Result<Vec<MetaPreview>, MetadataError>;

    /// Fetch the full record for a provider id.
    ///
    /// `Ok(None)` means the upstream answered but had no usable record.
    async fn detail(&self, id: u64) -> Result<Option<MetaDetail>, MetadataError>;
}

/// Obtains a fresh bearer token from an upstream login endpoint.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self) -> Result<String, MetadataError>;
}
