use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, CheckoutId, CheckoutStatus, LibraryCardId};
use crate::utils::date::{opt_serializer, serializer};

// CheckoutDto is the checkout record as handed to views and collaborators.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutDto {
    pub checkout_id: CheckoutId,
    pub version: i64,
    pub branch_id: String,
    pub asset_id: AssetId,
    pub library_card_id: LibraryCardId,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub checkout_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub returned_at: Option<NaiveDateTime>,
    #[serde(with = "opt_serializer")]
    pub lost_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CheckoutDto {
    pub fn is_open(&self) -> bool {
        self.checkout_status == CheckoutStatus::CheckedOut
    }
}

impl Identifiable for CheckoutDto {
    fn id(&self) -> i64 {
        self.checkout_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
