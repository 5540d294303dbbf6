use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::hold::domain::HoldQueue;
use crate::hold::domain::service::HoldQueueImpl;
use crate::hold::repository::HoldRepository;
use crate::hold::repository::memory_hold_repository::MemoryHoldRepository;

pub fn create_hold_repository() -> Arc<dyn HoldRepository> {
    Arc::new(MemoryHoldRepository::new())
}

pub fn create_hold_queue(config: &Configuration) -> Arc<dyn HoldQueue> {
    Arc::new(HoldQueueImpl::new(config, create_hold_repository()))
}
