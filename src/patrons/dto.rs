use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::LibraryCardId;
use crate::patrons::Patron;
use crate::utils::date::serializer;


// Patron abstracts library member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronDto {
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

impl Identifiable for PatronDto {
    fn id(&self) -> i64 {
        self.library_card_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Patron for PatronDto {
    fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    fn email(&self) -> &str {
        self.email.as_str()
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
