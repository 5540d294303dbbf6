use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, AssetKind};
use crate::utils::date::serializer;

// CatalogItemEntity abstracts the descriptive record of a book or video copy; the
// circulation status of the copy lives in the asset registry.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CatalogItemEntity {
    pub asset_id: AssetId,
    pub version: i64,
    pub kind: AssetKind,
    pub title: String,
    pub author_or_director: String,
    pub isbn: Option<String>,
    pub year: i32,
    pub cost: f64,
    pub image_url: Option<String>,
    pub number_of_copies: i32,
    pub branch_id: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CatalogItemEntity {
    pub fn new(asset_id: AssetId, kind: AssetKind, title: &str, author_or_director: &str, branch_id: &str) -> Self {
        Self {
            asset_id,
            version: 0,
            kind,
            title: title.to_string(),
            author_or_director: author_or_director.to_string(),
            isbn: None,
            year: 0,
            cost: 0.0,
            image_url: None,
            number_of_copies: 1,
            branch_id: branch_id.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for CatalogItemEntity {
    fn id(&self) -> i64 {
        self.asset_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::domain::model::CatalogItemEntity;
    use crate::core::library::AssetKind;

    #[tokio::test]
    async fn test_should_build_catalog_item() {
        let item = CatalogItemEntity::new(3, AssetKind::Video, "Metropolis", "Fritz Lang", "main");
        assert_eq!(3, item.asset_id);
        assert_eq!("Fritz Lang", item.author_or_director.as_str());
        assert_eq!(None, item.isbn);
        assert_eq!(1, item.number_of_copies);
    }
}
