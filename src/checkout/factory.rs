use std::sync::Arc;
use crate::checkout::domain::CheckoutLedger;
use crate::checkout::domain::service::CheckoutLedgerImpl;
use crate::checkout::repository::CheckoutRepository;
use crate::checkout::repository::memory_checkout_repository::MemoryCheckoutRepository;
use crate::core::domain::Configuration;

pub fn create_checkout_repository() -> Arc<dyn CheckoutRepository> {
    Arc::new(MemoryCheckoutRepository::new())
}

pub fn create_checkout_ledger(config: &Configuration) -> Arc<dyn CheckoutLedger> {
    Arc::new(CheckoutLedgerImpl::new(config, create_checkout_repository()))
}
