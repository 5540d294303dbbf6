pub mod cancel_hold_cmd;
pub mod check_in_item_cmd;
pub mod check_out_item_cmd;
pub mod get_asset_detail_cmd;
pub mod mark_found_cmd;
pub mod mark_lost_cmd;
pub mod place_hold_cmd;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;
    use crate::catalog::dto::CatalogItemDto;
    use crate::circulation::factory::{create_library_services_with_gateway, LibraryServices};
    use crate::core::domain::Configuration;
    use crate::core::library::{AssetId, LibraryCardId};
    use crate::gateway::memory::publisher::MemoryNotificationGateway;

    pub(crate) fn services() -> LibraryServices {
        create_library_services_with_gateway(&Configuration::new("test"), Arc::new(MemoryNotificationGateway::new()))
    }

    pub(crate) async fn add_book(services: &LibraryServices, title: &str) -> AssetId {
        services.catalog_service.add_asset(&CatalogItemDto::new_book(title, "Author", "isbn", 1999))
            .await.expect("should add book").asset_id
    }

    pub(crate) async fn add_patron(services: &LibraryServices, first_name: &str) -> LibraryCardId {
        services.patron_service.add_patron(first_name, "Reader", "reader@example.org")
            .await.expect("should add patron").library_card_id
    }
}
