//! Tag registry listing.

use crate::error::Result;

use super::CatalogService;

impl CatalogService {
    /// Every placeholder name ever registered, sorted.
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.store.list_tags().await?)
    }
}
