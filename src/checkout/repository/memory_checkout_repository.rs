use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::checkout::domain::model::CheckoutEntity;
use crate::checkout::repository::CheckoutRepository;
use crate::core::library::{AssetId, CheckoutId, LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::{paginate, read_lock, write_lock, Sequence};

#[derive(Debug, Default)]
struct CheckoutTable {
    records: HashMap<CheckoutId, CheckoutEntity>,
    by_asset: HashMap<AssetId, Vec<CheckoutId>>,
}

impl CheckoutTable {
    fn for_asset(&self, asset_id: AssetId) -> impl Iterator<Item=&CheckoutEntity> {
        self.by_asset.get(&asset_id).into_iter().flatten().filter_map(|id| self.records.get(id))
    }

    fn insert(&mut self, entity: &CheckoutEntity) {
        self.records.insert(entity.checkout_id, entity.clone());
        self.by_asset.entry(entity.asset_id).or_default().push(entity.checkout_id);
    }
}

fn newest_first(records: &mut [CheckoutEntity]) {
    records.sort_by_key(|c| Reverse((c.checkout_at, c.checkout_id)));
}

#[derive(Debug)]
pub(crate) struct MemoryCheckoutRepository {
    table: RwLock<CheckoutTable>,
    sequence: Sequence,
}

impl MemoryCheckoutRepository {
    pub(crate) fn new() -> Self {
        Self {
            table: RwLock::new(CheckoutTable::default()),
            sequence: Sequence::new(),
        }
    }
}

#[async_trait]
impl Repository<CheckoutEntity> for MemoryCheckoutRepository {
    async fn create(&self, entity: &CheckoutEntity) -> LibraryResult<usize> {
        let mut table = write_lock(&self.table)?;
        if table.records.contains_key(&entity.checkout_id) {
            return Err(LibraryError::validation(format!("checkout {} already exists",
                                                        entity.checkout_id).as_str(), Some("409".to_string())));
        }
        table.insert(entity);
        Ok(1)
    }

    async fn update(&self, entity: &CheckoutEntity) -> LibraryResult<usize> {
        let mut table = write_lock(&self.table)?;
        let existing = table.records.get_mut(&entity.checkout_id).ok_or_else(||
            LibraryError::not_found(format!("checkout not found for {}", entity.checkout_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LibraryError::concurrency_conflict(format!("checkout {} was modified, version {} != {}",
                                                                  entity.checkout_id, existing.version, entity.version).as_str()));
        }
        *existing = entity.clone();
        existing.version = entity.version + 1;
        existing.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn get(&self, id: CheckoutId) -> LibraryResult<CheckoutEntity> {
        read_lock(&self.table)?.records.get(&id).cloned().ok_or_else(||
            LibraryError::not_found(format!("checkout not found for {}", id).as_str()))
    }
}

#[async_trait]
impl CheckoutRepository for MemoryCheckoutRepository {
    fn next_id(&self) -> CheckoutId {
        self.sequence.next_id()
    }

    async fn create_open(&self, entity: &CheckoutEntity) -> LibraryResult<usize> {
        let mut table = write_lock(&self.table)?;
        if let Some(open) = table.for_asset(entity.asset_id).find(|c| c.is_open()) {
            return Err(LibraryError::already_checked_out(format!("asset {} is already checked out to {}",
                                                                 open.asset_id, open.library_card_id).as_str()));
        }
        table.insert(entity);
        Ok(1)
    }

    async fn find_open(&self, asset_id: AssetId) -> LibraryResult<Option<CheckoutEntity>> {
        let table = read_lock(&self.table)?;
        let mut open: Vec<CheckoutEntity> = table.for_asset(asset_id).filter(|c| c.is_open()).cloned().collect();
        newest_first(&mut open);
        Ok(open.into_iter().next())
    }

    async fn find_by_asset(&self, asset_id: AssetId) -> LibraryResult<Vec<CheckoutEntity>> {
        let mut records: Vec<CheckoutEntity> = read_lock(&self.table)?.for_asset(asset_id).cloned().collect();
        newest_first(&mut records);
        Ok(records)
    }

    async fn query_overdue(&self, now: NaiveDateTime,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<CheckoutEntity>> {
        let mut records: Vec<CheckoutEntity> = read_lock(&self.table)?.records.values()
            .filter(|c| c.is_open() && c.due_at <= now)
            .cloned()
            .collect();
        records.sort_by_key(|c| (c.due_at, c.checkout_id));
        paginate(page, page_size, records)
    }
}
