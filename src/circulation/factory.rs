use std::sync::Arc;
use crate::assets::factory::create_asset_registry;
use crate::catalog::domain::CatalogService;
use crate::catalog::factory::create_catalog_service;
use crate::checkout::factory::create_checkout_ledger;
use crate::circulation::domain::CirculationService;
use crate::circulation::domain::service::CirculationServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::gateway::dispatcher::NotificationDispatcher;
use crate::gateway::events::NotificationGateway;
use crate::gateway::factory::create_gateway;
use crate::hold::factory::create_hold_queue;
use crate::patrons::domain::PatronService;
use crate::patrons::factory::create_patron_service;

// LibraryServices is the wired set of services a boundary layer talks to; the catalog
// and the circulation engine share one asset registry.
#[derive(Clone)]
pub struct LibraryServices {
    pub catalog_service: Arc<dyn CatalogService>,
    pub patron_service: Arc<dyn PatronService>,
    pub circulation_service: Arc<dyn CirculationService>,
}

pub async fn create_library_services(config: &Configuration) -> LibraryResult<LibraryServices> {
    config.validate()?;
    let gateway = create_gateway(config).await?;
    Ok(create_library_services_with_gateway(config, gateway))
}

// must be called from within a tokio runtime, the notification dispatcher is spawned here
pub fn create_library_services_with_gateway(config: &Configuration,
                                            gateway: Arc<dyn NotificationGateway>) -> LibraryServices {
    let asset_registry = create_asset_registry(config);
    let catalog_service = create_catalog_service(config, asset_registry.clone());
    let patron_service = create_patron_service(config);
    let dispatcher = NotificationDispatcher::start(gateway, config);
    let circulation_service: Arc<dyn CirculationService> = Arc::new(CirculationServiceImpl::new(
        config, asset_registry, create_checkout_ledger(config), create_hold_queue(config),
        catalog_service.clone(), patron_service.clone(), dispatcher));
    LibraryServices {
        catalog_service,
        patron_service,
        circulation_service,
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::dto::CatalogItemDto;
    use crate::circulation::factory::create_library_services;
    use crate::core::domain::Configuration;
    use crate::core::library::{AssetStatus, LibraryError};

    #[tokio::test]
    async fn test_should_share_registry_between_catalog_and_circulation() {
        let services = create_library_services(&Configuration::new("test")).await.expect("should create services");
        let video = services.catalog_service.add_asset(&CatalogItemDto::new_video("Alien", "Ridley Scott", 1979))
            .await.expect("should add video");
        let status = services.circulation_service.get_status(video.asset_id).await.expect("should get status");
        assert_eq!(AssetStatus::Available, status);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_config() {
        let mut config = Configuration::new("test");
        config.book_loan_days = 0;
        let res = create_library_services(&config).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }
}
