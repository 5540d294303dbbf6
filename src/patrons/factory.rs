use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::patrons::domain::PatronService;
use crate::patrons::domain::service::PatronServiceImpl;
use crate::patrons::repository::PatronRepository;
use crate::patrons::repository::memory_patron_repository::MemoryPatronRepository;

pub fn create_patron_repository() -> Arc<dyn PatronRepository> {
    Arc::new(MemoryPatronRepository::new())
}

pub fn create_patron_service(config: &Configuration) -> Arc<dyn PatronService> {
    Arc::new(PatronServiceImpl::new(config, create_patron_repository()))
}
