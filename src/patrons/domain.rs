pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::{LibraryCardId, LibraryResult};
use crate::patrons::dto::PatronDto;

// PatronService resolves library cards to the members holding them.
#[async_trait]
pub trait PatronService: Sync + Send {
    async fn add_patron(&self, first_name: &str, last_name: &str, email: &str) -> LibraryResult<PatronDto>;
    async fn update_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto>;
    async fn find_patron_by_card(&self, library_card_id: LibraryCardId) -> LibraryResult<PatronDto>;
    async fn find_patron_by_email(&self, email: &str) -> LibraryResult<Vec<PatronDto>>;
}
