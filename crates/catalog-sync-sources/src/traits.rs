use async_trait::async_trait;
use catalog_sync_models::CatalogSummary;

use crate::error::SourceError;

/// Common surface of the three catalog adapters. Each wraps plain HTTP GETs
/// and maps payloads into `CatalogSummary`; none of them retries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<Vec<CatalogSummary>, SourceError>;

    /// `id` is the source-local identifier without the namespace prefix.
    /// `Ok(None)` means the catalog answered "no such record".
    async fn fetch_details(&self, id: &str) -> Result<Option<CatalogSummary>, SourceError>;
}
