use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, HoldId, HoldStatus, LibraryCardId};
use crate::utils::date::{opt_serializer, serializer};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldDto {
    pub hold_id: HoldId,
    pub version: i64,
    pub branch_id: String,
    pub asset_id: AssetId,
    pub library_card_id: LibraryCardId,
    pub hold_status: HoldStatus,
    pub first_hold: bool,
    #[serde(with = "serializer")]
    pub hold_at: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub expires_at: Option<NaiveDateTime>,
    #[serde(with = "opt_serializer")]
    pub canceled_at: Option<NaiveDateTime>,
    #[serde(with = "opt_serializer")]
    pub fulfilled_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl Identifiable for HoldDto {
    fn id(&self) -> i64 {
        self.hold_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// PlacedHold tells the caller whether the new hold was the only pending one when it was placed
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PlacedHold {
    pub hold: HoldDto,
    pub is_first: bool,
}
