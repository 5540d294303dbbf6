pub mod memory_catalog_repository;

use async_trait::async_trait;
use crate::catalog::domain::model::CatalogItemEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub trait CatalogRepository: Repository<CatalogItemEntity> {
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<CatalogItemEntity>>;
}
