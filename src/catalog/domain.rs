pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::catalog::dto::CatalogItemDto;
use crate::core::library::{AssetId, LibraryResult};

// CatalogService owns the descriptive side of an asset. Adding an item registers a new
// copy with the asset registry, which hands out the asset id.
#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_asset(&self, item: &CatalogItemDto) -> LibraryResult<CatalogItemDto>;
    async fn update_asset(&self, item: &CatalogItemDto) -> LibraryResult<CatalogItemDto>;
    async fn find_asset_by_id(&self, asset_id: AssetId) -> LibraryResult<CatalogItemDto>;
    async fn find_asset_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<CatalogItemDto>>;
}
