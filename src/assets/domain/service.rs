use std::sync::Arc;
use async_trait::async_trait;
use crate::assets::domain::AssetRegistry;
use crate::assets::domain::model::AssetEntity;
use crate::assets::dto::AssetDto;
use crate::assets::repository::AssetRepository;
use crate::core::domain::Configuration;
use crate::core::library::{AssetId, AssetKind, AssetStatus, LibraryResult};

pub(crate) struct AssetRegistryImpl {
    asset_repository: Arc<dyn AssetRepository>,
}

impl AssetRegistryImpl {
    pub(crate) fn new(_config: &Configuration, asset_repository: Arc<dyn AssetRepository>) -> Self {
        Self {
            asset_repository,
        }
    }
}

#[async_trait]
impl AssetRegistry for AssetRegistryImpl {
    fn next_id(&self) -> AssetId {
        self.asset_repository.next_id()
    }

    async fn register(&self, asset_id: AssetId, kind: AssetKind) -> LibraryResult<AssetDto> {
        let asset = AssetEntity::new(asset_id, kind);
        self.asset_repository.create(&asset).await?;
        Ok(AssetDto::from(&asset))
    }

    async fn get(&self, asset_id: AssetId) -> LibraryResult<AssetDto> {
        self.asset_repository.get(asset_id).await.map(|a| AssetDto::from(&a))
    }

    async fn get_status(&self, asset_id: AssetId) -> LibraryResult<AssetStatus> {
        self.asset_repository.get(asset_id).await.map(|a| a.asset_status)
    }

    async fn set_status(&self, asset_id: AssetId, status: AssetStatus) -> LibraryResult<AssetDto> {
        let mut asset = self.asset_repository.get(asset_id).await?;
        asset.asset_status = status;
        self.asset_repository.update(&asset).await?;
        self.get(asset_id).await
    }
}

impl From<&AssetEntity> for AssetDto {
    fn from(other: &AssetEntity) -> AssetDto {
        AssetDto {
            asset_id: other.asset_id,
            version: other.version,
            kind: other.kind,
            asset_status: other.asset_status,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
