use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::assets::dto::AssetDto;
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::AssetId;

pub struct MarkFoundCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl MarkFoundCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkFoundCommandRequest {
    asset_id: AssetId,
}

impl MarkFoundCommandRequest {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkFoundCommandResponse {
    pub asset: AssetDto,
}

impl MarkFoundCommandResponse {
    pub fn new(asset: AssetDto) -> Self {
        Self {
            asset,
        }
    }
}

#[async_trait]
impl Command<MarkFoundCommandRequest, MarkFoundCommandResponse> for MarkFoundCommand {
    async fn execute(&self, req: MarkFoundCommandRequest) -> Result<MarkFoundCommandResponse, CommandError> {
        self.circulation_service.mark_found(req.asset_id)
            .await.map_err(CommandError::from).map(MarkFoundCommandResponse::new)
    }
}
