use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::catalog::domain::model::CatalogItemEntity;
use crate::catalog::repository::CatalogRepository;
use crate::core::library::{AssetId, LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::memory::{read_lock, write_lock};

#[derive(Debug)]
pub(crate) struct MemoryCatalogRepository {
    items: RwLock<HashMap<AssetId, CatalogItemEntity>>,
}

impl MemoryCatalogRepository {
    pub(crate) fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Repository<CatalogItemEntity> for MemoryCatalogRepository {
    async fn create(&self, entity: &CatalogItemEntity) -> LibraryResult<usize> {
        let mut items = write_lock(&self.items)?;
        if items.contains_key(&entity.asset_id) {
            return Err(LibraryError::validation(format!("catalog item {} already exists",
                                                        entity.asset_id).as_str(), Some("409".to_string())));
        }
        items.insert(entity.asset_id, entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &CatalogItemEntity) -> LibraryResult<usize> {
        let mut items = write_lock(&self.items)?;
        let existing = items.get_mut(&entity.asset_id).ok_or_else(||
            LibraryError::not_found(format!("catalog item not found for {}", entity.asset_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LibraryError::concurrency_conflict(format!("catalog item {} was modified, version {} != {}",
                                                                  entity.asset_id, existing.version, entity.version).as_str()));
        }
        *existing = entity.clone();
        existing.version = entity.version + 1;
        existing.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn get(&self, id: AssetId) -> LibraryResult<CatalogItemEntity> {
        read_lock(&self.items)?.get(&id).cloned().ok_or_else(||
            LibraryError::not_found(format!("catalog item not found for {}", id).as_str()))
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<Vec<CatalogItemEntity>> {
        let mut records: Vec<CatalogItemEntity> = read_lock(&self.items)?.values()
            .filter(|i| i.isbn.as_deref() == Some(isbn))
            .cloned()
            .collect();
        records.sort_by_key(|i| i.asset_id);
        Ok(records)
    }
}
