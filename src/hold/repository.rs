pub mod memory_hold_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::library::{AssetId, HoldId, LibraryCardId, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::hold::domain::model::HoldEntity;


#[async_trait]
pub trait HoldRepository: Repository<HoldEntity> {
    fn next_id(&self) -> HoldId;

    // rejects a second pending hold for the same card, marks the hold first when the queue
    // was empty and inserts it, as a single step
    async fn create_pending(&self, entity: &HoldEntity, claim_expires_at: NaiveDateTime) -> LibraryResult<HoldEntity>;

    // queue order
    async fn find_pending(&self, asset_id: AssetId) -> LibraryResult<Vec<HoldEntity>>;

    async fn find_pending_by_card(&self, asset_id: AssetId,
                                  library_card_id: LibraryCardId) -> LibraryResult<Option<HoldEntity>>;

    async fn query_expired(&self, now: NaiveDateTime,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<HoldEntity>>;
}
