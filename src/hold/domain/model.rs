use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, HoldId, HoldStatus, LibraryCardId};
use crate::utils::date::{opt_serializer, serializer};

// HoldEntity abstracts a patron's place in the queue for an asset
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldEntity {
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

impl HoldEntity {
    pub fn new(hold_id: HoldId, branch_id: &str, asset_id: AssetId, library_card_id: LibraryCardId,
               hold_at: NaiveDateTime) -> Self {
        Self {
            hold_id,
            version: 0,
            branch_id: branch_id.to_string(),
            asset_id,
            library_card_id,
            hold_status: HoldStatus::Pending,
            first_hold: false,
            hold_at,
            expires_at: None,
            canceled_at: None,
            fulfilled_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // the first claimant gets a window to pick the item up
    pub fn mark_first(&mut self, claim_expires_at: NaiveDateTime) {
        self.first_hold = true;
        self.expires_at = Some(claim_expires_at);
    }

    pub fn is_pending(&self) -> bool {
        self.hold_status == HoldStatus::Pending
    }
}

impl Identifiable for HoldEntity {
    fn id(&self) -> i64 {
        self.hold_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
