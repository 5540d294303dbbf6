use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::core::command::{Command, CommandError};
use crate::core::library::HoldId;
use crate::hold::dto::HoldDto;

pub struct CancelHoldCommand {
    circulation_service: Arc<dyn CirculationService>,
}

impl CancelHoldCommand {
    pub fn new(circulation_service: Arc<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CancelHoldCommandRequest {
    hold_id: HoldId,
}

impl CancelHoldCommandRequest {
    pub fn new(hold_id: HoldId) -> Self {
        Self {
            hold_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelHoldCommandResponse {
    pub hold: HoldDto,
}

impl CancelHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            hold,
        }
    }
}

#[async_trait]
impl Command<CancelHoldCommandRequest, CancelHoldCommandResponse> for CancelHoldCommand {
    async fn execute(&self, req: CancelHoldCommandRequest) -> Result<CancelHoldCommandResponse, CommandError> {
        self.circulation_service.cancel_hold(req.hold_id)
            .await.map_err(CommandError::from).map(CancelHoldCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::circulation::command::cancel_hold_cmd::{CancelHoldCommand, CancelHoldCommandRequest};
    use crate::circulation::command::fixtures::{add_book, add_patron, services};
    use crate::core::command::{Command, CommandError};
    use crate::core::library::HoldStatus;

    #[tokio::test]
    async fn test_should_run_cancel_hold() {
        let services = services();
        let asset = add_book(&services, "Dune").await;
        let patron = add_patron(&services, "Ann").await;
        let placed = services.circulation_service.place_hold(asset, patron).await.expect("should place hold");
        let cmd = CancelHoldCommand::new(services.circulation_service.clone());
        let res = cmd.execute(CancelHoldCommandRequest::new(placed.hold.hold_id)).await.expect("should cancel");
        assert_eq!(HoldStatus::Cancelled, res.hold.hold_status);

        let err = cmd.execute(CancelHoldCommandRequest::new(placed.hold.hold_id)).await.expect_err("should fail");
        assert!(matches!(err, CommandError::InvalidTransition { ref reason_code, .. } if reason_code == "NotPending"));
    }
}
