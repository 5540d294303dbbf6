use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::dto::CheckoutDto;
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::{AssetId, LibraryCardId};

pub struct CheckOutItemCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl CheckOutItemCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckOutItemCommandRequest {
    asset_id: AssetId,
    library_card_id: LibraryCardId,
}

impl CheckOutItemCommandRequest {
    pub fn new(asset_id: AssetId, library_card_id: LibraryCardId) -> Self {
        Self {
            asset_id,
            library_card_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct CheckOutItemCommandResponse {
    pub checkout: CheckoutDto,
}

impl CheckOutItemCommandResponse {
    pub fn new(checkout: CheckoutDto) -> Self {
        Self {
            checkout,
        }
    }
}

#[async_trait]
impl Command<CheckOutItemCommandRequest, CheckOutItemCommandResponse> for CheckOutItemCommand {
    async fn execute(&self, req: CheckOutItemCommandRequest) -> Result<CheckOutItemCommandResponse, CommandError> {
        self.circulation_service.check_out_item(req.asset_id, req.library_card_id)
            .await.map_err(CommandError::from).map(CheckOutItemCommandResponse::new)
    }
}
