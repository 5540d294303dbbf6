use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::dto::CheckoutDto;
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::AssetId;

pub struct CheckInItemCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl CheckInItemCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckInItemCommandRequest {
    asset_id: AssetId,
}

impl CheckInItemCommandRequest {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckInItemCommandResponse {
    pub checkout: CheckoutDto,
}

impl CheckInItemCommandResponse {
    pub fn new(checkout: CheckoutDto) -> Self {
        Self {
            checkout,
        }
    }
}

#[async_trait]
impl Command<CheckInItemCommandRequest, CheckInItemCommandResponse> for CheckInItemCommand {
    async fn execute(&self, req: CheckInItemCommandRequest) -> Result<CheckInItemCommandResponse, CommandError> {
        self.circulation_service.check_in_item(req.asset_id)
            .await.map_err(CommandError::from).map(CheckInItemCommandResponse::new)
    }
}
