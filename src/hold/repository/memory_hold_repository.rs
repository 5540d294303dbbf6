use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::core::library::{AssetId, HoldId, LibraryCardId, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::hold::domain::model::HoldEntity;
use crate::hold::repository::HoldRepository;
use crate::utils::memory::{paginate, read_lock, write_lock, Sequence};

fn queue_order(records: &mut [HoldEntity]) {
    records.sort_by_key(|h| (h.hold_at, h.hold_id));
}

#[derive(Debug)]
pub(crate) struct MemoryHoldRepository {
    holds: RwLock<HashMap<HoldId, HoldEntity>>,
    sequence: Sequence,
}

impl MemoryHoldRepository {
    pub(crate) fn new() -> Self {
        Self {
            holds: RwLock::new(HashMap::new()),
            sequence: Sequence::new(),
        }
    }
}

#[async_trait]
impl Repository<HoldEntity> for MemoryHoldRepository {
    async fn create(&self, entity: &HoldEntity) -> LibraryResult<usize> {
        let mut holds = write_lock(&self.holds)?;
        if holds.contains_key(&entity.hold_id) {
            return Err(LibraryError::validation(format!("hold {} already exists",
                                                        entity.hold_id).as_str(), Some("409".to_string())));
        }
        holds.insert(entity.hold_id, entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &HoldEntity) -> LibraryResult<usize> {
        let mut holds = write_lock(&self.holds)?;
        let existing = holds.get_mut(&entity.hold_id).ok_or_else(||
            LibraryError::not_found(format!("hold not found for {}", entity.hold_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LibraryError::concurrency_conflict(format!("hold {} was modified, version {} != {}",
                                                                  entity.hold_id, existing.version, entity.version).as_str()));
        }
        *existing = entity.clone();
        existing.version = entity.version + 1;
        existing.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn get(&self, id: HoldId) -> LibraryResult<HoldEntity> {
        read_lock(&self.holds)?.get(&id).cloned().ok_or_else(||
            LibraryError::not_found(format!("hold not found for {}", id).as_str()))
    }
}

#[async_trait]
impl HoldRepository for MemoryHoldRepository {
    fn next_id(&self) -> HoldId {
        self.sequence.next_id()
    }

    async fn create_pending(&self, entity: &HoldEntity, claim_expires_at: NaiveDateTime) -> LibraryResult<HoldEntity> {
        let mut holds = write_lock(&self.holds)?;
        let mut others = holds.values().filter(|h| h.asset_id == entity.asset_id && h.is_pending());
        if others.clone().any(|h| h.library_card_id == entity.library_card_id) {
            return Err(LibraryError::duplicate_hold(format!("card {} already holds asset {}",
                                                            entity.library_card_id, entity.asset_id).as_str()));
        }
        let mut hold = entity.clone();
        if others.next().is_none() {
            hold.mark_first(claim_expires_at);
        }
        holds.insert(hold.hold_id, hold.clone());
        Ok(hold)
    }

    async fn find_pending(&self, asset_id: AssetId) -> LibraryResult<Vec<HoldEntity>> {
        let mut records: Vec<HoldEntity> = read_lock(&self.holds)?.values()
            .filter(|h| h.asset_id == asset_id && h.is_pending())
            .cloned()
            .collect();
        queue_order(&mut records);
        Ok(records)
    }

    async fn find_pending_by_card(&self, asset_id: AssetId,
                                  library_card_id: LibraryCardId) -> LibraryResult<Option<HoldEntity>> {
        Ok(read_lock(&self.holds)?.values()
            .find(|h| h.asset_id == asset_id && h.library_card_id == library_card_id && h.is_pending())
            .cloned())
    }

    async fn query_expired(&self, now: NaiveDateTime,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<HoldEntity>> {
        let mut records: Vec<HoldEntity> = read_lock(&self.holds)?.values()
            .filter(|h| h.is_pending() && h.expires_at.map_or(false, |expires| expires <= now))
            .cloned()
            .collect();
        records.sort_by_key(|h| (h.expires_at, h.hold_id));
        paginate(page, page_size, records)
    }
}
