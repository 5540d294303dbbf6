use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::assets::domain::model::AssetEntity;
use crate::assets::repository::AssetRepository;
use crate::core::library::{AssetId, LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::memory::{read_lock, write_lock, Sequence};

#[derive(Debug)]
pub(crate) struct MemoryAssetRepository {
    assets: RwLock<HashMap<AssetId, AssetEntity>>,
    sequence: Sequence,
}

impl MemoryAssetRepository {
    pub(crate) fn new() -> Self {
        Self {
            assets: RwLock::new(HashMap::new()),
            sequence: Sequence::new(),
        }
    }
}

#[async_trait]
impl Repository<AssetEntity> for MemoryAssetRepository {
    async fn create(&self, entity: &AssetEntity) -> LibraryResult<usize> {
        let mut assets = write_lock(&self.assets)?;
        if assets.contains_key(&entity.asset_id) {
            return Err(LibraryError::validation(format!("asset {} already exists",
                                                        entity.asset_id).as_str(), Some("409".to_string())));
        }
        assets.insert(entity.asset_id, entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &AssetEntity) -> LibraryResult<usize> {
        let mut assets = write_lock(&self.assets)?;
        let existing = assets.get_mut(&entity.asset_id).ok_or_else(||
            LibraryError::not_found(format!("asset not found for {}", entity.asset_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LibraryError::concurrency_conflict(format!("asset {} was modified, version {} != {}",
                                                                  entity.asset_id, existing.version, entity.version).as_str()));
        }
        *existing = entity.clone();
        existing.version = entity.version + 1;
        existing.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn get(&self, id: AssetId) -> LibraryResult<AssetEntity> {
        read_lock(&self.assets)?.get(&id).cloned().ok_or_else(||
            LibraryError::not_found(format!("asset not found for {}", id).as_str()))
    }
}

impl AssetRepository for MemoryAssetRepository {
    fn next_id(&self) -> AssetId {
        self.sequence.next_id()
    }
}
