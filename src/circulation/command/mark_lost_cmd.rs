use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::assets::dto::AssetDto;
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::AssetId;

pub struct MarkLostCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl MarkLostCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkLostCommandRequest {
    asset_id: AssetId,
}

impl MarkLostCommandRequest {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkLostCommandResponse {
    pub asset: AssetDto,
}

impl MarkLostCommandResponse {
    pub fn new(asset: AssetDto) -> Self {
        Self {
            asset,
        }
    }
}

#[async_trait]
impl Command<MarkLostCommandRequest, MarkLostCommandResponse> for MarkLostCommand {
    async fn execute(&self, req: MarkLostCommandRequest) -> Result<MarkLostCommandResponse, CommandError> {
        self.circulation_service.mark_lost(req.asset_id)
            .await.map_err(CommandError::from).map(MarkLostCommandResponse::new)
    }
}
