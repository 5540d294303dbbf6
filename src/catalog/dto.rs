use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, AssetKind};
use crate::utils::date::serializer;

// CatalogItemDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItemDto {
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

impl CatalogItemDto {
    pub fn new_book(title: &str, author: &str, isbn: &str, year: i32) -> CatalogItemDto {
        let mut item = Self::new(AssetKind::Book, title, author, year);
        item.isbn = Some(isbn.to_string());
        item
    }

    pub fn new_video(title: &str, director: &str, year: i32) -> CatalogItemDto {
        Self::new(AssetKind::Video, title, director, year)
    }

    fn new(kind: AssetKind, title: &str, author_or_director: &str, year: i32) -> CatalogItemDto {
        CatalogItemDto {
            asset_id: 0,
            version: 0,
            kind,
            title: title.to_string(),
            author_or_director: author_or_director.to_string(),
            isbn: None,
            year,
            cost: 0.0,
            image_url: None,
            number_of_copies: 1,
            branch_id: "".to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for CatalogItemDto {
    fn id(&self) -> i64 {
        self.asset_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
