pub mod memory_patron_repository;

use async_trait::async_trait;
use crate::core::library::{LibraryCardId, LibraryResult};
use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;

#[async_trait]
pub trait PatronRepository: Repository<PatronEntity> {
    fn next_id(&self) -> LibraryCardId;
    async fn find_by_email(&self, email: &str) -> LibraryResult<Vec<PatronEntity>>;
}
