use std::sync::Arc;
use async_trait::async_trait;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryCardId, LibraryError, LibraryResult};
use crate::patrons::domain::PatronService;
use crate::patrons::domain::model::PatronEntity;
use crate::patrons::dto::PatronDto;
use crate::patrons::repository::PatronRepository;

pub(crate) struct PatronServiceImpl {
    patron_repository: Arc<dyn PatronRepository>,
}

impl PatronServiceImpl {
    pub(crate) fn new(_config: &Configuration, patron_repository: Arc<dyn PatronRepository>) -> Self {
        PatronServiceImpl {
            patron_repository,
        }
    }
}

#[async_trait]
impl PatronService for PatronServiceImpl {
    async fn add_patron(&self, first_name: &str, last_name: &str, email: &str) -> LibraryResult<PatronDto> {
        if email.trim().is_empty() {
            return Err(LibraryError::validation("patron email is required", Some("400".to_string())));
        }
        let patron = PatronEntity::new(self.patron_repository.next_id(), first_name, last_name, email);
        self.patron_repository.create(&patron).await?;
        Ok(PatronDto::from(&patron))
    }

    async fn update_patron(&self, patron: &PatronDto) -> LibraryResult<PatronDto> {
        self.patron_repository.update(&PatronEntity::from(patron)).await?;
        self.find_patron_by_card(patron.library_card_id).await
    }

    async fn find_patron_by_card(&self, library_card_id: LibraryCardId) -> LibraryResult<PatronDto> {
        self.patron_repository.get(library_card_id).await.map(|p| PatronDto::from(&p))
    }

    async fn find_patron_by_email(&self, email: &str) -> LibraryResult<Vec<PatronDto>> {
        let res = self.patron_repository.find_by_email(email).await?;
        Ok(res.iter().map(PatronDto::from).collect())
    }
}

impl From<&PatronEntity> for PatronDto {
    fn from(other: &PatronEntity) -> Self {
        Self {
            library_card_id: other.library_card_id,
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            email: other.email.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&PatronDto> for PatronEntity {
    fn from(other: &PatronDto) -> Self {
        Self {
            library_card_id: other.library_card_id,
            version: other.version,
            first_name: other.first_name.to_string(),
            last_name: other.last_name.to_string(),
            email: other.email.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
