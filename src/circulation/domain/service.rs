use std::sync::Arc;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info, warn};
use crate::assets::domain::AssetRegistry;
use crate::assets::dto::AssetDto;
use crate::catalog::domain::CatalogService;
use crate::checkout::domain::CheckoutLedger;
use crate::checkout::dto::CheckoutDto;
use crate::circulation::domain::CirculationService;
use crate::circulation::domain::locks::AssetLocks;
use crate::circulation::dto::{AssetDetailDto, CheckoutSummaryDto, HoldSummaryDto};
use crate::core::domain::Configuration;
use crate::core::library::{AssetId, AssetStatus, HoldId, LibraryCardId, LibraryError, LibraryResult, PaginatedResult};
use crate::gateway::dispatcher::NotificationDispatcher;
use crate::gateway::events::Notification;
use crate::hold::domain::HoldQueue;
use crate::hold::dto::{HoldDto, PlacedHold};
use crate::patrons::domain::PatronService;
use crate::patrons::dto::PatronDto;
use crate::patrons::Patron;

const HISTORY_PAGE_SIZE: usize = 100;

pub(crate) struct CirculationServiceImpl {
    claim_window_hours: i64,
    asset_registry: Arc<dyn AssetRegistry>,
    checkout_ledger: Arc<dyn CheckoutLedger>,
    hold_queue: Arc<dyn HoldQueue>,
    catalog_service: Arc<dyn CatalogService>,
    patron_service: Arc<dyn PatronService>,
    dispatcher: NotificationDispatcher,
    locks: AssetLocks,
}

impl CirculationServiceImpl {
    pub(crate) fn new(config: &Configuration, asset_registry: Arc<dyn AssetRegistry>,
                      checkout_ledger: Arc<dyn CheckoutLedger>, hold_queue: Arc<dyn HoldQueue>,
                      catalog_service: Arc<dyn CatalogService>, patron_service: Arc<dyn PatronService>,
                      dispatcher: NotificationDispatcher) -> Self {
        Self {
            claim_window_hours: config.claim_window_hours,
            asset_registry,
            checkout_ledger,
            hold_queue,
            catalog_service,
            patron_service,
            dispatcher,
            locks: AssetLocks::new(config.lock_timeout_ms),
        }
    }

    async fn find_patron(&self, library_card_id: LibraryCardId) -> LibraryResult<PatronDto> {
        self.patron_service.find_patron_by_card(library_card_id).await
    }

    // runs after the transition committed, so lookup failures are only logged
    async fn log_next_claimant(&self, asset_id: AssetId) {
        match self.hold_queue.next_pending(asset_id).await {
            Ok(Some(next)) => info!(asset_id, hold_id = next.hold_id, library_card_id = next.library_card_id,
                "asset available for next claimant"),
            Ok(None) => {}
            Err(err) => warn!(asset_id, "could not read hold queue: {}", err),
        }
    }

    async fn send_claim_notification(&self, patron: &PatronDto, placed: &PlacedHold) {
        let title = match self.catalog_service.find_asset_by_id(placed.hold.asset_id).await {
            Ok(item) => item.title,
            Err(err) => {
                warn!(asset_id = placed.hold.asset_id, "no catalog entry for held asset: {}", err);
                format!("#{}", placed.hold.asset_id)
            }
        };
        let notification = claim_notification(patron, title.as_str(), self.claim_window_hours);
        if !self.dispatcher.enqueue(notification) {
            warn!(hold_id = placed.hold.hold_id, "claim notification was not queued");
        }
    }

    async fn hold_summary(&self, hold: &HoldDto) -> LibraryResult<HoldSummaryDto> {
        let patron = self.find_patron(hold.library_card_id).await?;
        Ok(HoldSummaryDto {
            hold_id: hold.hold_id,
            library_card_id: hold.library_card_id,
            patron_name: patron.display_name(),
            hold_placed: hold.hold_at,
        })
    }

    async fn full_history(&self, asset_id: AssetId) -> LibraryResult<Vec<CheckoutDto>> {
        let mut records = vec![];
        let mut page: Option<String> = None;
        loop {
            let res = self.checkout_ledger.history(asset_id, page.as_deref(), HISTORY_PAGE_SIZE).await?;
            records.extend(res.records);
            match res.next_page {
                Some(next) => page = Some(next),
                None => return Ok(records),
            }
        }
    }
}

pub(crate) fn claim_notification(patron: &dyn Patron, title: &str, claim_window_hours: i64) -> Notification {
    let body = format!("You have placed hold on the asset: '{}' from our library. Now you have to come to us \
                        and take the item in {} hours time. If you will not take the item up to this time you \
                        will not be able to borrow it.", title, claim_window_hours);
    Notification::new(patron.first_name(), patron.email(), "Place hold on the book", body.as_str())
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl CirculationService for CirculationServiceImpl {
    async fn check_out_item(&self, asset_id: AssetId, library_card_id: LibraryCardId) -> LibraryResult<CheckoutDto> {
        self.asset_registry.get(asset_id).await?;
        self.find_patron(library_card_id).await?;
        let _guard = self.locks.acquire(asset_id).await?;

        let status = self.asset_registry.get_status(asset_id).await?;
        if status == AssetStatus::CheckedOut {
            warn!(asset_id, library_card_id, "checkout rejected, asset already checked out");
            return Err(LibraryError::already_checked_out(format!("asset {} is already checked out",
                                                                 asset_id).as_str()));
        }
        let at = now();
        let checkout = self.checkout_ledger.open_checkout(asset_id, library_card_id, at).await?;
        self.asset_registry.set_status(asset_id, AssetStatus::CheckedOut).await?;
        if let Some(hold) = self.hold_queue.find_pending(asset_id, library_card_id).await? {
            self.hold_queue.fulfill(hold.hold_id, at).await?;
            info!(asset_id, library_card_id, hold_id = hold.hold_id, "hold fulfilled by checkout");
        }
        info!(asset_id, library_card_id, checkout_id = checkout.checkout_id, previous = %status, "asset checked out");
        Ok(checkout)
    }

    async fn check_in_item(&self, asset_id: AssetId) -> LibraryResult<CheckoutDto> {
        self.asset_registry.get(asset_id).await?;
        let checkout = {
            let _guard = self.locks.acquire(asset_id).await?;
            let status = self.asset_registry.get_status(asset_id).await?;
            if status != AssetStatus::CheckedOut {
                warn!(asset_id, status = %status, "check-in rejected, asset not checked out");
                return Err(LibraryError::not_checked_out(format!("asset {} is not checked out",
                                                                 asset_id).as_str()));
            }
            let checkout = self.checkout_ledger.close_checkout(asset_id, now()).await?;
            self.asset_registry.set_status(asset_id, AssetStatus::Available).await?;
            info!(asset_id, checkout_id = checkout.checkout_id, "asset checked in");
            checkout
        };
        self.log_next_claimant(asset_id).await;
        Ok(checkout)
    }

    async fn place_hold(&self, asset_id: AssetId, library_card_id: LibraryCardId) -> LibraryResult<PlacedHold> {
        self.asset_registry.get(asset_id).await?;
        let patron = self.find_patron(library_card_id).await?;
        let placed = {
            let _guard = self.locks.acquire(asset_id).await?;
            match self.hold_queue.place_hold(asset_id, library_card_id, now()).await {
                Ok(placed) => placed,
                Err(err) => {
                    warn!(asset_id, library_card_id, "hold rejected: {}", err);
                    return Err(err);
                }
            }
        };
        info!(asset_id, library_card_id, hold_id = placed.hold.hold_id, is_first = placed.is_first, "hold placed");
        if placed.is_first {
            self.send_claim_notification(&patron, &placed).await;
        }
        Ok(placed)
    }

    async fn cancel_hold(&self, hold_id: HoldId) -> LibraryResult<HoldDto> {
        let hold = self.hold_queue.get(hold_id).await?;
        let _guard = self.locks.acquire(hold.asset_id).await?;
        match self.hold_queue.cancel_hold(hold_id, now()).await {
            Ok(canceled) => {
                info!(asset_id = canceled.asset_id, hold_id, "hold cancelled");
                Ok(canceled)
            }
            Err(err) => {
                warn!(asset_id = hold.asset_id, hold_id, "hold cancel rejected: {}", err);
                Err(err)
            }
        }
    }

    async fn mark_lost(&self, asset_id: AssetId) -> LibraryResult<AssetDto> {
        self.asset_registry.get(asset_id).await?;
        let _guard = self.locks.acquire(asset_id).await?;
        let status = self.asset_registry.get_status(asset_id).await?;
        if status == AssetStatus::Lost {
            debug!(asset_id, "asset already lost");
            return self.asset_registry.get(asset_id).await;
        }
        if let Some(closed) = self.checkout_ledger.close_as_lost(asset_id, now()).await? {
            info!(asset_id, checkout_id = closed.checkout_id, library_card_id = closed.library_card_id,
                "open checkout closed as lost");
        }
        let lost = self.asset_registry.set_status(asset_id, AssetStatus::Lost).await?;
        info!(asset_id, previous = %status, "asset marked lost");
        Ok(lost)
    }

    async fn mark_found(&self, asset_id: AssetId) -> LibraryResult<AssetDto> {
        self.asset_registry.get(asset_id).await?;
        let found = {
            let _guard = self.locks.acquire(asset_id).await?;
            let status = self.asset_registry.get_status(asset_id).await?;
            if status != AssetStatus::Lost {
                warn!(asset_id, status = %status, "mark found rejected, asset not lost");
                return Err(LibraryError::not_lost(format!("asset {} is not lost", asset_id).as_str()));
            }
            let found = self.asset_registry.set_status(asset_id, AssetStatus::Available).await?;
            info!(asset_id, "asset marked found");
            found
        };
        self.log_next_claimant(asset_id).await;
        Ok(found)
    }

    async fn is_checked_out(&self, asset_id: AssetId) -> LibraryResult<bool> {
        self.asset_registry.get(asset_id).await?;
        self.checkout_ledger.is_checked_out(asset_id).await
    }

    async fn get_current_checkout_patron(&self, asset_id: AssetId) -> LibraryResult<Option<String>> {
        self.asset_registry.get(asset_id).await?;
        match self.checkout_ledger.current_holder(asset_id).await? {
            Some(library_card_id) => Ok(Some(self.find_patron(library_card_id).await?.display_name())),
            None => Ok(None),
        }
    }

    async fn get_latest_checkout(&self, asset_id: AssetId) -> LibraryResult<Option<CheckoutDto>> {
        self.asset_registry.get(asset_id).await?;
        self.checkout_ledger.latest(asset_id).await
    }

    async fn get_checkout_history(&self, asset_id: AssetId, page: Option<&str>,
                                  page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>> {
        self.asset_registry.get(asset_id).await?;
        self.checkout_ledger.history(asset_id, page, page_size).await
    }

    async fn get_current_holds(&self, asset_id: AssetId) -> LibraryResult<Vec<HoldDto>> {
        self.asset_registry.get(asset_id).await?;
        self.hold_queue.pending(asset_id).await
    }

    async fn get_current_hold_patron_name(&self, hold_id: HoldId) -> LibraryResult<String> {
        let hold = self.hold_queue.get(hold_id).await?;
        Ok(self.find_patron(hold.library_card_id).await?.display_name())
    }

    async fn get_current_hold_placed(&self, hold_id: HoldId) -> LibraryResult<NaiveDateTime> {
        Ok(self.hold_queue.get(hold_id).await?.hold_at)
    }

    async fn pending_count(&self, asset_id: AssetId) -> LibraryResult<usize> {
        self.asset_registry.get(asset_id).await?;
        self.hold_queue.pending_count(asset_id).await
    }

    async fn get_status(&self, asset_id: AssetId) -> LibraryResult<AssetStatus> {
        self.asset_registry.get_status(asset_id).await
    }

    async fn get_asset_detail(&self, asset_id: AssetId) -> LibraryResult<AssetDetailDto> {
        let asset = self.asset_registry.get(asset_id).await?;
        let item = self.catalog_service.find_asset_by_id(asset_id).await?;
        let latest_checkout = self.checkout_ledger.latest(asset_id).await?;
        let current_patron = self.get_current_checkout_patron(asset_id).await?;
        let checkout_history = self.full_history(asset_id).await?;
        let mut holds = vec![];
        for hold in self.hold_queue.pending(asset_id).await? {
            holds.push(self.hold_summary(&hold).await?);
        }
        Ok(AssetDetailDto {
            item,
            asset_status: asset.asset_status,
            latest_checkout,
            current_patron,
            checkout_history,
            holds,
        })
    }

    async fn get_checkout_summary(&self, asset_id: AssetId) -> LibraryResult<CheckoutSummaryDto> {
        self.asset_registry.get(asset_id).await?;
        let item = self.catalog_service.find_asset_by_id(asset_id).await?;
        Ok(CheckoutSummaryDto {
            asset_id,
            title: item.title,
            image_url: item.image_url,
            is_checked_out: self.checkout_ledger.is_checked_out(asset_id).await?,
            hold_count: self.hold_queue.pending_count(asset_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::task::JoinSet;
    use crate::catalog::dto::CatalogItemDto;
    use crate::circulation::domain::CirculationService;
    use crate::circulation::domain::service::CirculationServiceImpl;
    use crate::circulation::factory::{create_library_services_with_gateway, LibraryServices};
    use crate::core::domain::Configuration;
    use crate::core::library::{AssetId, AssetStatus, CheckoutStatus, HoldStatus, LibraryCardId, LibraryError};
    use crate::gateway::dispatcher::NotificationDispatcher;
    use crate::gateway::memory::publisher::MemoryNotificationGateway;
    use crate::assets::factory::create_asset_registry;
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::factory::create_checkout_ledger;
    use crate::catalog::domain::CatalogService;
    use crate::hold::domain::HoldQueue;
    use crate::hold::factory::create_hold_queue;
    use crate::patrons::domain::PatronService;
    use crate::patrons::factory::create_patron_service;

    struct Fixture {
        services: LibraryServices,
        gateway: Arc<MemoryNotificationGateway>,
    }

    impl Fixture {
        fn new() -> Self {
            let gateway = Arc::new(MemoryNotificationGateway::new());
            let services = create_library_services_with_gateway(&Configuration::new("test"), gateway.clone());
            Self { services, gateway }
        }

        async fn book(&self, title: &str) -> AssetId {
            self.services.catalog_service.add_asset(&CatalogItemDto::new_book(title, "Author", "isbn", 2001))
                .await.expect("should add book").asset_id
        }

        async fn patron(&self, first_name: &str) -> LibraryCardId {
            let email = format!("{}@example.org", first_name.to_lowercase());
            self.services.patron_service.add_patron(first_name, "Reader", email.as_str())
                .await.expect("should add patron").library_card_id
        }

        fn circulation(&self) -> Arc<dyn CirculationService> {
            self.services.circulation_service.clone()
        }

        async fn wait_for_notifications(&self, count: usize) {
            for _ in 0..100 {
                if self.gateway.delivered().len() >= count {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        }
    }

    // the engine wired by hand, keeping handles to its collaborators
    struct Engine {
        svc: CirculationServiceImpl,
        hold_queue: Arc<dyn HoldQueue>,
        catalog_service: Arc<dyn CatalogService>,
        patron_service: Arc<dyn PatronService>,
    }

    impl Engine {
        fn new(config: &Configuration) -> Self {
            let asset_registry = create_asset_registry(config);
            let catalog_service = create_catalog_service(config, asset_registry.clone());
            let patron_service = create_patron_service(config);
            let hold_queue = create_hold_queue(config);
            let dispatcher = NotificationDispatcher::start(Arc::new(MemoryNotificationGateway::new()), config);
            let svc = CirculationServiceImpl::new(config, asset_registry, create_checkout_ledger(config),
                                                  hold_queue.clone(), catalog_service.clone(),
                                                  patron_service.clone(), dispatcher);
            Self { svc, hold_queue, catalog_service, patron_service }
        }

        async fn book(&self, title: &str) -> AssetId {
            self.catalog_service.add_asset(&CatalogItemDto::new_book(title, "Author", "isbn", 2001))
                .await.expect("should add book").asset_id
        }

        async fn patron(&self, first_name: &str) -> LibraryCardId {
            let email = format!("{}@example.org", first_name.to_lowercase());
            self.patron_service.add_patron(first_name, "Reader", email.as_str())
                .await.expect("should add patron").library_card_id
        }
    }

    #[tokio::test]
    async fn test_should_checkout_and_checkin() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let patron = fixture.patron("Ann").await;

        let checkout = circulation.check_out_item(asset, patron).await.expect("should checkout");
        assert_eq!(AssetStatus::CheckedOut, circulation.get_status(asset).await.expect("should get status"));
        assert!(circulation.is_checked_out(asset).await.expect("should check"));
        assert_eq!(Some("Ann Reader".to_string()),
                   circulation.get_current_checkout_patron(asset).await.expect("should get patron"));

        let returned = circulation.check_in_item(asset).await.expect("should checkin");
        assert_eq!(checkout.checkout_id, returned.checkout_id);
        assert_eq!(CheckoutStatus::Returned, returned.checkout_status);
        assert_eq!(AssetStatus::Available, circulation.get_status(asset).await.expect("should get status"));
        assert_eq!(None, circulation.get_current_checkout_patron(asset).await.expect("should get patron"));

        let history = circulation.get_checkout_history(asset, None, 10).await.expect("should get history");
        assert_eq!(1, history.records.len());
        assert!(!history.records[0].is_open());
    }

    #[tokio::test]
    async fn test_should_reject_second_checkout() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let first = fixture.patron("Ann").await;
        let second = fixture.patron("Bob").await;

        circulation.check_out_item(asset, first).await.expect("should checkout");
        let res = circulation.check_out_item(asset, first).await;
        assert!(matches!(res, Err(LibraryError::AlreadyCheckedOut { .. })));
        let res = circulation.check_out_item(asset, second).await;
        assert!(matches!(res, Err(LibraryError::AlreadyCheckedOut { .. })));
        assert_eq!(AssetStatus::CheckedOut, circulation.get_status(asset).await.expect("should get status"));
        assert_eq!(Some("Ann Reader".to_string()),
                   circulation.get_current_checkout_patron(asset).await.expect("should get patron"));
    }

    #[tokio::test]
    async fn test_should_reject_unknown_references_without_changes() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let patron = fixture.patron("Ann").await;

        assert!(matches!(circulation.check_out_item(404, patron).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(circulation.check_out_item(asset, 404).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(circulation.place_hold(asset, 404).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(circulation.cancel_hold(404).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(circulation.mark_lost(404).await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(circulation.get_current_hold_patron_name(404).await, Err(LibraryError::NotFound { .. })));
        assert_eq!(AssetStatus::Available, circulation.get_status(asset).await.expect("should get status"));
        assert_eq!(0, circulation.pending_count(asset).await.expect("should count"));
        assert_eq!(None, circulation.get_latest_checkout(asset).await.expect("should get latest"));
    }

    #[tokio::test]
    async fn test_should_reject_checkin_of_available_asset() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let res = circulation.check_in_item(asset).await;
        assert!(matches!(res, Err(LibraryError::NotCheckedOut { .. })));
        assert_eq!(AssetStatus::Available, circulation.get_status(asset).await.expect("should get status"));
    }

    #[tokio::test]
    async fn test_should_queue_holds_in_order() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let mut placed = vec![];
        for name in ["Ann", "Bob", "Cid", "Dee"] {
            let patron = fixture.patron(name).await;
            placed.push(circulation.place_hold(asset, patron).await.expect("should place hold"));
        }
        assert_eq!(4, circulation.pending_count(asset).await.expect("should count"));
        assert_eq!(vec![true, false, false, false], placed.iter().map(|p| p.is_first).collect::<Vec<bool>>());

        let holds = circulation.get_current_holds(asset).await.expect("should get holds");
        assert_eq!(placed[0].hold.hold_id, holds[0].hold_id);
        assert_eq!("Ann Reader", circulation.get_current_hold_patron_name(holds[0].hold_id)
            .await.expect("should get name").as_str());
        assert_eq!(placed[0].hold.hold_at, circulation.get_current_hold_placed(holds[0].hold_id)
            .await.expect("should get placed"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_hold() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let patron = fixture.patron("Ann").await;
        circulation.place_hold(asset, patron).await.expect("should place hold");
        let res = circulation.place_hold(asset, patron).await;
        assert!(matches!(res, Err(LibraryError::DuplicateHold { .. })));
        assert_eq!(1, circulation.pending_count(asset).await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_notify_only_first_holder() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let first = fixture.patron("Ann").await;
        let second = fixture.patron("Bob").await;
        circulation.place_hold(asset, first).await.expect("should place hold");
        circulation.place_hold(asset, second).await.expect("should place hold");

        fixture.wait_for_notifications(1).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        let delivered = fixture.gateway.delivered();
        assert_eq!(1, delivered.len());
        assert_eq!("Ann", delivered[0].recipient_name.as_str());
        assert_eq!("ann@example.org", delivered[0].recipient_address.as_str());
        assert_eq!("Place hold on the book", delivered[0].subject.as_str());
        assert_eq!("You have placed hold on the asset: 'Dune' from our library. Now you have to come to us and \
                    take the item in 24 hours time. If you will not take the item up to this time you will not \
                    be able to borrow it.", delivered[0].body.as_str());
    }

    #[tokio::test]
    async fn test_should_keep_transition_when_delivery_fails() {
        let fixture = Fixture::new();
        fixture.gateway.fail_next(10);
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let patron = fixture.patron("Ann").await;
        let placed = circulation.place_hold(asset, patron).await.expect("should place hold");
        assert!(placed.is_first);
        assert_eq!(1, circulation.pending_count(asset).await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_cancel_hold() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let patron = fixture.patron("Ann").await;
        let placed = circulation.place_hold(asset, patron).await.expect("should place hold");
        let canceled = circulation.cancel_hold(placed.hold.hold_id).await.expect("should cancel");
        assert_eq!(HoldStatus::Cancelled, canceled.hold_status);
        assert_eq!(0, circulation.pending_count(asset).await.expect("should count"));
        let res = circulation.cancel_hold(placed.hold.hold_id).await;
        assert!(matches!(res, Err(LibraryError::NotPending { .. })));

        // a fresh hold is first again
        let again = circulation.place_hold(asset, patron).await.expect("should place hold");
        assert!(again.is_first);
    }

    #[tokio::test]
    async fn test_should_fulfill_hold_on_checkout() {
        let engine = Engine::new(&Configuration::new("test"));
        let circulation = &engine.svc;
        let asset = engine.book("Dune").await;
        let first = engine.patron("Ann").await;
        let second = engine.patron("Bob").await;
        let front = circulation.place_hold(asset, first).await.expect("should place hold");
        circulation.place_hold(asset, second).await.expect("should place hold");

        let checkout = circulation.check_out_item(asset, first).await.expect("should checkout");
        let fulfilled = engine.hold_queue.get(front.hold.hold_id).await.expect("should get hold");
        assert_eq!(HoldStatus::Fulfilled, fulfilled.hold_status);
        assert_eq!(Some(checkout.checkout_at), fulfilled.fulfilled_at);
        assert_eq!(None, fulfilled.canceled_at);

        let holds = circulation.get_current_holds(asset).await.expect("should get holds");
        assert_eq!(1, holds.len());
        assert_eq!(second, holds[0].library_card_id);
        // fulfilled holds stay readable
        let placed_at = circulation.get_current_hold_placed(front.hold.hold_id).await.expect("should get placed");
        assert_eq!(front.hold.hold_at, placed_at);
    }

    #[tokio::test]
    async fn test_should_reject_hold_when_claim_window_is_out_of_range() {
        let mut config = Configuration::new("test");
        config.claim_window_hours = i64::MAX / 1000;
        let engine = Engine::new(&config);
        let asset = engine.book("Dune").await;
        let patron = engine.patron("Ann").await;

        let res = engine.svc.place_hold(asset, patron).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        // the hold store stays usable
        assert_eq!(0, engine.svc.pending_count(asset).await.expect("should count"));
        assert!(engine.svc.get_current_holds(asset).await.expect("should get holds").is_empty());
        engine.svc.check_out_item(asset, patron).await.expect("should checkout");
    }

    #[tokio::test]
    async fn test_should_run_hold_scenario() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let first = fixture.patron("Ann").await;
        let second = fixture.patron("Bob").await;

        circulation.check_out_item(asset, first).await.expect("should checkout");
        assert_eq!(Some("Ann Reader".to_string()),
                   circulation.get_current_checkout_patron(asset).await.expect("should get patron"));
        let placed = circulation.place_hold(asset, second).await.expect("should place hold");
        assert!(placed.is_first);
        circulation.check_in_item(asset).await.expect("should checkin");
        assert_eq!(AssetStatus::Available, circulation.get_status(asset).await.expect("should get status"));
        circulation.check_out_item(asset, second).await.expect("should checkout");
        assert_eq!(0, circulation.pending_count(asset).await.expect("should count"));
        assert_eq!(2, circulation.get_checkout_history(asset, None, 10).await.expect("should get history").records.len());
    }

    #[tokio::test]
    async fn test_should_keep_holds_through_lost_and_found() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let patron = fixture.patron("Ann").await;
        circulation.place_hold(asset, patron).await.expect("should place hold");

        let lost = circulation.mark_lost(asset).await.expect("should mark lost");
        assert_eq!(AssetStatus::Lost, lost.asset_status);
        assert_eq!(1, circulation.pending_count(asset).await.expect("should count"));
        // already lost is a no-op
        let again = circulation.mark_lost(asset).await.expect("should be no-op");
        assert_eq!(lost.version, again.version);

        let found = circulation.mark_found(asset).await.expect("should mark found");
        assert_eq!(AssetStatus::Available, found.asset_status);
        assert_eq!(1, circulation.pending_count(asset).await.expect("should count"));
        let res = circulation.mark_found(asset).await;
        assert!(matches!(res, Err(LibraryError::NotLost { .. })));
    }

    #[tokio::test]
    async fn test_should_close_open_checkout_when_lost() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let patron = fixture.patron("Ann").await;
        circulation.check_out_item(asset, patron).await.expect("should checkout");

        circulation.mark_lost(asset).await.expect("should mark lost");
        assert!(!circulation.is_checked_out(asset).await.expect("should check"));
        let latest = circulation.get_latest_checkout(asset).await.expect("should get latest").expect("should exist");
        assert_eq!(CheckoutStatus::Lost, latest.checkout_status);
        assert_eq!(None, latest.returned_at);
        let res = circulation.check_in_item(asset).await;
        assert!(matches!(res, Err(LibraryError::NotCheckedOut { .. })));

        circulation.mark_found(asset).await.expect("should mark found");
        assert!(!circulation.is_checked_out(asset).await.expect("should check"));
        let latest = circulation.get_latest_checkout(asset).await.expect("should get latest").expect("should exist");
        assert_eq!(CheckoutStatus::Lost, latest.checkout_status);
    }

    #[tokio::test]
    async fn test_should_compose_asset_detail() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let first = fixture.patron("Ann").await;
        let second = fixture.patron("Bob").await;
        circulation.check_out_item(asset, first).await.expect("should checkout");
        circulation.place_hold(asset, second).await.expect("should place hold");

        let detail = circulation.get_asset_detail(asset).await.expect("should get detail");
        assert_eq!("Dune", detail.item.title.as_str());
        assert_eq!(AssetStatus::CheckedOut, detail.asset_status);
        assert_eq!(Some("Ann Reader".to_string()), detail.current_patron);
        assert_eq!(1, detail.checkout_history.len());
        assert_eq!(detail.latest_checkout.as_ref(), detail.checkout_history.first());
        assert_eq!(1, detail.holds.len());
        assert_eq!("Bob Reader", detail.holds[0].patron_name.as_str());

        let summary = circulation.get_checkout_summary(asset).await.expect("should get summary");
        assert_eq!("Dune", summary.title.as_str());
        assert!(summary.is_checked_out);
        assert_eq!(1, summary.hold_count);
    }

    #[tokio::test]
    async fn test_should_fail_with_conflict_when_lock_is_busy() {
        let mut config = Configuration::new("test");
        config.lock_timeout_ms = 20;
        let engine = Engine::new(&config);
        let svc = &engine.svc;
        let asset = engine.book("Dune").await;
        let patron = engine.patron("Ann").await;

        let guard = svc.locks.acquire(asset).await.expect("should lock");
        let res = svc.check_out_item(asset, patron).await;
        assert!(matches!(res, Err(LibraryError::ConcurrencyConflict { retryable: true, .. })));
        assert_eq!(AssetStatus::Available, svc.get_status(asset).await.expect("should get status"));
        assert_eq!(None, svc.get_latest_checkout(asset).await.expect("should get latest"));
        drop(guard);
        svc.check_out_item(asset, patron).await.expect("should checkout after release");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_should_allow_one_checkout_under_contention() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let other = fixture.book("Emma").await;
        let mut patrons = vec![];
        for i in 0..16 {
            patrons.push(fixture.patron(format!("P{}", i).as_str()).await);
        }
        let mut tasks = JoinSet::new();
        for patron in patrons {
            let circulation = circulation.clone();
            tasks.spawn(async move {
                let first = circulation.check_out_item(asset, patron).await.is_ok();
                let second = circulation.check_out_item(other, patron).await.is_ok();
                (first, second)
            });
        }
        let (mut first_wins, mut second_wins) = (0, 0);
        while let Some(res) = tasks.join_next().await {
            let (first, second) = res.expect("task should finish");
            first_wins += usize::from(first);
            second_wins += usize::from(second);
        }
        assert_eq!(1, first_wins);
        assert_eq!(1, second_wins);
        for asset_id in [asset, other] {
            let history = circulation.get_checkout_history(asset_id, None, 100).await.expect("should get history");
            assert_eq!(1, history.records.iter().filter(|c| c.is_open()).count());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_should_mark_exactly_one_first_hold_under_contention() {
        let fixture = Fixture::new();
        let circulation = fixture.circulation();
        let asset = fixture.book("Dune").await;
        let mut patrons = vec![];
        for i in 0..16 {
            patrons.push(fixture.patron(format!("H{}", i).as_str()).await);
        }
        let mut tasks = JoinSet::new();
        for patron in patrons.clone() {
            let circulation = circulation.clone();
            tasks.spawn(async move { circulation.place_hold(asset, patron).await });
        }
        let mut firsts = vec![];
        while let Some(res) = tasks.join_next().await {
            let placed = res.expect("task should finish").expect("should place hold");
            if placed.is_first {
                firsts.push(placed.hold);
            }
        }
        assert_eq!(1, firsts.len());
        assert_eq!(patrons.len(), circulation.pending_count(asset).await.expect("should count"));
        let holds = circulation.get_current_holds(asset).await.expect("should get holds");
        assert_eq!(firsts[0].hold_id, holds[0].hold_id);

        // the front holder checking out leaves everyone else queued
        circulation.check_out_item(asset, firsts[0].library_card_id).await.expect("should checkout");
        assert_eq!(patrons.len() - 1, circulation.pending_count(asset).await.expect("should count"));
        fixture.wait_for_notifications(1).await;
        assert_eq!(1, fixture.gateway.delivered().len());
    }
}
