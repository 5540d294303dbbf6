use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::catalog::dto::CatalogItemDto;
use crate::checkout::dto::CheckoutDto;
use crate::core::library::{AssetId, AssetStatus, HoldId, LibraryCardId};
use crate::utils::date::serializer;

// HoldSummaryDto is one row of the hold list on the detail view
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldSummaryDto {
    pub hold_id: HoldId,
    pub library_card_id: LibraryCardId,
    pub patron_name: String,
    #[serde(with = "serializer")]
    pub hold_placed: NaiveDateTime,
}

// AssetDetailDto composes catalog metadata with the circulation state of the copy
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AssetDetailDto {
    pub item: CatalogItemDto,
    pub asset_status: AssetStatus,
    pub latest_checkout: Option<CheckoutDto>,
    pub current_patron: Option<String>,
    pub checkout_history: Vec<CheckoutDto>,
    pub holds: Vec<HoldSummaryDto>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutSummaryDto {
    pub asset_id: AssetId,
    pub title: String,
    pub image_url: Option<String>,
    pub is_checked_out: bool,
    pub hold_count: usize,
}
