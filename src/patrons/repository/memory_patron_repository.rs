use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::library::{LibraryCardId, LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::repository::PatronRepository;
use crate::utils::memory::{read_lock, write_lock, Sequence};

#[derive(Debug)]
pub(crate) struct MemoryPatronRepository {
    patrons: RwLock<HashMap<LibraryCardId, PatronEntity>>,
    sequence: Sequence,
}

impl MemoryPatronRepository {
    pub(crate) fn new() -> Self {
        Self {
            patrons: RwLock::new(HashMap::new()),
            sequence: Sequence::new(),
        }
    }
}

#[async_trait]
impl Repository<PatronEntity> for MemoryPatronRepository {
    async fn create(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        let mut patrons = write_lock(&self.patrons)?;
        if patrons.contains_key(&entity.library_card_id) {
            return Err(LibraryError::validation(format!("library card {} already issued",
                                                        entity.library_card_id).as_str(), Some("409".to_string())));
        }
        patrons.insert(entity.library_card_id, entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &PatronEntity) -> LibraryResult<usize> {
        let mut patrons = write_lock(&self.patrons)?;
        let existing = patrons.get_mut(&entity.library_card_id).ok_or_else(||
            LibraryError::not_found(format!("patron not found for card {}", entity.library_card_id).as_str()))?;
        if existing.version != entity.version {
            return Err(LibraryError::concurrency_conflict(format!("patron {} was modified, version {} != {}",
                                                                  entity.library_card_id, existing.version, entity.version).as_str()));
        }
        *existing = entity.clone();
        existing.version = entity.version + 1;
        existing.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn get(&self, id: LibraryCardId) -> LibraryResult<PatronEntity> {
        read_lock(&self.patrons)?.get(&id).cloned().ok_or_else(||
            LibraryError::not_found(format!("patron not found for card {}", id).as_str()))
    }
}

#[async_trait]
impl PatronRepository for MemoryPatronRepository {
    fn next_id(&self) -> LibraryCardId {
        self.sequence.next_id()
    }

    async fn find_by_email(&self, email: &str) -> LibraryResult<Vec<PatronEntity>> {
        let mut records: Vec<PatronEntity> = read_lock(&self.patrons)?.values()
            .filter(|p| p.email == email)
            .cloned()
            .collect();
        records.sort_by_key(|p| p.library_card_id);
        Ok(records)
    }
}
