use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::assets::domain::Asset;
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, AssetKind, AssetStatus};
use crate::utils::date::serializer;

// AssetEntity abstracts a physical copy of a book or video; there can be many copies
// of the same title, each with its own identifier and status.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AssetEntity {
    pub asset_id: AssetId,
    pub version: i64,
    pub kind: AssetKind,
    pub asset_status: AssetStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl AssetEntity {
    pub fn new(asset_id: AssetId, kind: AssetKind) -> Self {
        Self {
            asset_id,
            version: 0,
            kind,
            asset_status: AssetStatus::Available,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for AssetEntity {
    fn id(&self) -> i64 {
        self.asset_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Asset for AssetEntity {
    fn kind(&self) -> AssetKind {
        self.kind
    }

    fn status(&self) -> AssetStatus {
        self.asset_status
    }
}

#[cfg(test)]
mod tests {
    use crate::assets::domain::Asset;
    use crate::assets::domain::model::AssetEntity;
    use crate::core::library::{AssetKind, AssetStatus};

    #[tokio::test]
    async fn test_should_build_asset() {
        let asset = AssetEntity::new(7, AssetKind::Video);
        assert_eq!(7, asset.asset_id);
        assert_eq!(AssetKind::Video, asset.kind());
        assert_eq!(AssetStatus::Available, asset.status());
    }
}
