pub mod memory_checkout_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::checkout::domain::model::CheckoutEntity;
use crate::core::library::{AssetId, CheckoutId, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;


#[async_trait]
pub trait CheckoutRepository: Repository<CheckoutEntity> {
    fn next_id(&self) -> CheckoutId;

    // inserts an open checkout unless the asset already has one, as a single step
    async fn create_open(&self, entity: &CheckoutEntity) -> LibraryResult<usize>;

    async fn find_open(&self, asset_id: AssetId) -> LibraryResult<Option<CheckoutEntity>>;

    // newest first
    async fn find_by_asset(&self, asset_id: AssetId) -> LibraryResult<Vec<CheckoutEntity>>;

    async fn query_overdue(&self, now: NaiveDateTime,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<CheckoutEntity>>;
}
