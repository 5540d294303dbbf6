use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::library::{AssetId, HoldId, LibraryCardId, LibraryResult, PaginatedResult};
use crate::hold::dto::{HoldDto, PlacedHold};

pub mod model;
pub mod service;

// HoldQueue keeps the FIFO of reservations per asset, ordered by (hold_at, hold_id).
// Holds leave the pending state exactly once, by cancel or by fulfill.
#[async_trait]
pub trait HoldQueue: Sync + Send {
    async fn place_hold(&self, asset_id: AssetId, library_card_id: LibraryCardId,
                        at: NaiveDateTime) -> LibraryResult<PlacedHold>;
    async fn cancel_hold(&self, hold_id: HoldId, at: NaiveDateTime) -> LibraryResult<HoldDto>;
    async fn next_pending(&self, asset_id: AssetId) -> LibraryResult<Option<HoldDto>>;
    async fn fulfill(&self, hold_id: HoldId, at: NaiveDateTime) -> LibraryResult<HoldDto>;
    async fn find_pending(&self, asset_id: AssetId, library_card_id: LibraryCardId) -> LibraryResult<Option<HoldDto>>;
    async fn pending_count(&self, asset_id: AssetId) -> LibraryResult<usize>;
    async fn pending(&self, asset_id: AssetId) -> LibraryResult<Vec<HoldDto>>;
    async fn get(&self, hold_id: HoldId) -> LibraryResult<HoldDto>;
    async fn query_expired(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LibraryResult<PaginatedResult<HoldDto>>;
}
