use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{AssetId, LibraryCardId, LibraryError};
use crate::hold::dto::HoldDto;

pub struct PlaceHoldCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl PlaceHoldCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceHoldCommandRequest {
    asset_id: AssetId,
    library_card_id: LibraryCardId,
}

impl PlaceHoldCommandRequest {
    pub fn new(asset_id: AssetId, library_card_id: LibraryCardId) -> Self {
        Self {
            asset_id,
            library_card_id,
        }
    }
}

// placed is false when the card already holds the asset; the caller re-renders instead of failing
#[derive(Debug, Serialize)]
pub struct PlaceHoldCommandResponse {
    pub placed: bool,
    pub is_first: bool,
    pub hold: Option<HoldDto>,
}

impl PlaceHoldCommandResponse {
    pub fn new(placed: bool, is_first: bool, hold: Option<HoldDto>) -> Self {
        Self {
            placed,
            is_first,
            hold,
        }
    }
}

#[async_trait]
impl Command<PlaceHoldCommandRequest, PlaceHoldCommandResponse> for PlaceHoldCommand {
    async fn execute(&self, req: PlaceHoldCommandRequest) -> Result<PlaceHoldCommandResponse, CommandError> {
        match self.circulation_service.place_hold(req.asset_id, req.library_card_id).await {
            Ok(placed) => Ok(PlaceHoldCommandResponse::new(true, placed.is_first, Some(placed.hold))),
            Err(LibraryError::DuplicateHold { .. }) => Ok(PlaceHoldCommandResponse::new(false, false, None)),
            Err(err) => Err(CommandError::from(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::circulation::command::fixtures::{add_book, add_patron, services};
    use crate::circulation::command::place_hold_cmd::{PlaceHoldCommand, PlaceHoldCommandRequest};
    use crate::core::command::{Command, CommandError};

    #[tokio::test]
    async fn test_should_run_place_hold() {
        let services = services();
        let asset = add_book(&services, "Dune").await;
        let patron = add_patron(&services, "Ann").await;
        let cmd = PlaceHoldCommand::new(services.circulation_service.clone());
        let res = cmd.execute(PlaceHoldCommandRequest::new(asset, patron)).await.expect("should place hold");
        assert!(res.placed);
        assert!(res.is_first);
        assert!(res.hold.is_some());

        let res = cmd.execute(PlaceHoldCommandRequest::new(asset, patron)).await.expect("should not fail");
        assert!(!res.placed);
        assert_eq!(None, res.hold);
        assert_eq!(1, services.circulation_service.pending_count(asset).await.expect("should count"));
    }

    #[tokio::test]
    async fn test_should_fail_place_hold_for_unknown_asset() {
        let services = services();
        let patron = add_patron(&services, "Ann").await;
        let cmd = PlaceHoldCommand::new(services.circulation_service.clone());
        let err = cmd.execute(PlaceHoldCommandRequest::new(77, patron)).await.expect_err("should fail");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
