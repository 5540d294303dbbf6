use std::sync::Arc;
use crate::assets::domain::AssetRegistry;
use crate::assets::domain::service::AssetRegistryImpl;
use crate::assets::repository::AssetRepository;
use crate::assets::repository::memory_asset_repository::MemoryAssetRepository;
use crate::core::domain::Configuration;

pub fn create_asset_repository() -> Arc<dyn AssetRepository> {
    Arc::new(MemoryAssetRepository::new())
}

pub fn create_asset_registry(config: &Configuration) -> Arc<dyn AssetRegistry> {
    Arc::new(AssetRegistryImpl::new(config, create_asset_repository()))
}
