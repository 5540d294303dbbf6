use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::checkout::dto::CheckoutDto;
use crate::core::library::{AssetId, LibraryCardId, LibraryResult, PaginatedResult};

pub mod model;
pub mod service;

// CheckoutLedger is the append-only record of loans. Records are closed, never removed,
// and at most one record per asset is open at any time.
#[async_trait]
pub trait CheckoutLedger: Sync + Send {
    async fn open_checkout(&self, asset_id: AssetId, library_card_id: LibraryCardId,
                           at: NaiveDateTime) -> LibraryResult<CheckoutDto>;
    async fn close_checkout(&self, asset_id: AssetId, at: NaiveDateTime) -> LibraryResult<CheckoutDto>;
    async fn close_as_lost(&self, asset_id: AssetId, at: NaiveDateTime) -> LibraryResult<Option<CheckoutDto>>;
    async fn history(&self, asset_id: AssetId, page: Option<&str>,
                     page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>>;
    async fn latest(&self, asset_id: AssetId) -> LibraryResult<Option<CheckoutDto>>;
    async fn current_holder(&self, asset_id: AssetId) -> LibraryResult<Option<LibraryCardId>>;
    async fn is_checked_out(&self, asset_id: AssetId) -> LibraryResult<bool>;
    async fn query_overdue(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>>;
}
