use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LibraryCardId;
use crate::utils::date::serializer;

// PatronEntity abstracts the library member behind a card
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronEntity {
    pub library_card_id: LibraryCardId,
    pub version: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PatronEntity {
    pub fn new(library_card_id: LibraryCardId, first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            library_card_id,
            version: 0,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for PatronEntity {
    fn id(&self) -> i64 {
        self.library_card_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}
