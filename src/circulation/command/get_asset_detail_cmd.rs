use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::AssetDetailDto;
use crate::core::command::{Command, CommandError};
use crate::core::library::AssetId;

pub struct GetAssetDetailCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl GetAssetDetailCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetAssetDetailCommandRequest {
    asset_id: AssetId,
}

impl GetAssetDetailCommandRequest {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetAssetDetailCommandResponse {
    pub detail: AssetDetailDto,
}

impl GetAssetDetailCommandResponse {
    pub fn new(detail: AssetDetailDto) -> Self {
        Self {
            detail,
        }
    }
}

#[async_trait]
impl Command<GetAssetDetailCommandRequest, GetAssetDetailCommandResponse> for GetAssetDetailCommand {
    async fn execute(&self, req: GetAssetDetailCommandRequest) -> Result<GetAssetDetailCommandResponse, CommandError> {
        self.circulation_service.get_asset_detail(req.asset_id)
            .await.map_err(CommandError::from).map(GetAssetDetailCommandResponse::new)
    }
}
