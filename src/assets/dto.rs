use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::assets::domain::Asset;
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, AssetKind, AssetStatus};
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AssetDto {
    pub asset_id: AssetId,
    pub version: i64,
    pub kind: AssetKind,
    pub asset_status: AssetStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl Identifiable for AssetDto {
    fn id(&self) -> i64 {
        self.asset_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Asset for AssetDto {
    fn kind(&self) -> AssetKind {
        self.kind
    }

    fn status(&self) -> AssetStatus {
        self.asset_status
    }
}
