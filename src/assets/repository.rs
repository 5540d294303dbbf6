pub mod memory_asset_repository;

use crate::assets::domain::model::AssetEntity;
use crate::core::library::AssetId;
use crate::core::repository::Repository;

pub trait AssetRepository: Repository<AssetEntity> {
    // allocates a fresh asset id, ids are never reused
    fn next_id(&self) -> AssetId;
}
