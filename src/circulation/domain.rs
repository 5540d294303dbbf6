use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::assets::dto::AssetDto;
use crate::checkout::dto::CheckoutDto;
use crate::circulation::dto::{AssetDetailDto, CheckoutSummaryDto};
use crate::core::library::{AssetId, AssetStatus, HoldId, LibraryCardId, LibraryResult, PaginatedResult};
use crate::hold::dto::{HoldDto, PlacedHold};

pub mod locks;
pub mod service;

// CirculationService is the only writer of asset status. Commands for one asset are
// serialized; queries read committed state without taking the asset lock.
#[async_trait]
pub trait CirculationService: Sync + Send {
    async fn check_out_item(&self, asset_id: AssetId, library_card_id: LibraryCardId) -> LibraryResult<CheckoutDto>;
    async fn check_in_item(&self, asset_id: AssetId) -> LibraryResult<CheckoutDto>;
    async fn place_hold(&self, asset_id: AssetId, library_card_id: LibraryCardId) -> LibraryResult<PlacedHold>;
    async fn cancel_hold(&self, hold_id: HoldId) -> LibraryResult<HoldDto>;
    async fn mark_lost(&self, asset_id: AssetId) -> LibraryResult<AssetDto>;
    async fn mark_found(&self, asset_id: AssetId) -> LibraryResult<AssetDto>;

    async fn is_checked_out(&self, asset_id: AssetId) -> LibraryResult<bool>;
    async fn get_current_checkout_patron(&self, asset_id: AssetId) -> LibraryResult<Option<String>>;
    async fn get_latest_checkout(&self, asset_id: AssetId) -> LibraryResult<Option<CheckoutDto>>;
    async fn get_checkout_history(&self, asset_id: AssetId, page: Option<&str>,
                                  page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>>;
    async fn get_current_holds(&self, asset_id: AssetId) -> LibraryResult<Vec<HoldDto>>;
    async fn get_current_hold_patron_name(&self, hold_id: HoldId) -> LibraryResult<String>;
    async fn get_current_hold_placed(&self, hold_id: HoldId) -> LibraryResult<NaiveDateTime>;
    async fn pending_count(&self, asset_id: AssetId) -> LibraryResult<usize>;
    async fn get_status(&self, asset_id: AssetId) -> LibraryResult<AssetStatus>;
    async fn get_asset_detail(&self, asset_id: AssetId) -> LibraryResult<AssetDetailDto>;
    async fn get_checkout_summary(&self, asset_id: AssetId) -> LibraryResult<CheckoutSummaryDto>;
}
