use std::sync::Arc;
use crate::assets::domain::AssetRegistry;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::catalog::repository::CatalogRepository;
use crate::catalog::repository::memory_catalog_repository::MemoryCatalogRepository;
use crate::core::domain::Configuration;

pub fn create_catalog_repository() -> Arc<dyn CatalogRepository> {
    Arc::new(MemoryCatalogRepository::new())
}

pub fn create_catalog_service(config: &Configuration, asset_registry: Arc<dyn AssetRegistry>) -> Arc<dyn CatalogService> {
    Arc::new(CatalogServiceImpl::new(config, create_catalog_repository(), asset_registry))
}
