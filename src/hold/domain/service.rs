use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::domain::Configuration;
use crate::core::library::{AssetId, HoldId, HoldStatus, LibraryCardId, LibraryError, LibraryResult, PaginatedResult};
use crate::hold::domain::HoldQueue;
use crate::hold::domain::model::HoldEntity;
use crate::hold::dto::{HoldDto, PlacedHold};
use crate::hold::repository::HoldRepository;
use crate::utils::date::add_hours;

pub(crate) struct HoldQueueImpl {
    branch_id: String,
    claim_window_hours: i64,
    hold_repository: Arc<dyn HoldRepository>,
}

impl HoldQueueImpl {
    pub(crate) fn new(config: &Configuration, hold_repository: Arc<dyn HoldRepository>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            claim_window_hours: config.claim_window_hours,
            hold_repository,
        }
    }

    async fn find_pending_by_id(&self, hold_id: HoldId) -> LibraryResult<HoldEntity> {
        let hold = self.hold_repository.get(hold_id).await?;
        if !hold.is_pending() {
            return Err(LibraryError::not_pending(format!("hold {} is {}",
                                                         hold_id, hold.hold_status).as_str()));
        }
        Ok(hold)
    }

    async fn transition(&self, hold: HoldEntity) -> LibraryResult<HoldDto> {
        self.hold_repository.update(&hold).await?;
        self.hold_repository.get(hold.hold_id).await.map(|h| HoldDto::from(&h))
    }
}

#[async_trait]
impl HoldQueue for HoldQueueImpl {
    async fn place_hold(&self, asset_id: AssetId, library_card_id: LibraryCardId,
                        at: NaiveDateTime) -> LibraryResult<PlacedHold> {
        let claim_expires_at = add_hours(at, self.claim_window_hours)?;
        let hold = HoldEntity::new(self.hold_repository.next_id(), self.branch_id.as_str(),
                                   asset_id, library_card_id, at);
        let hold = self.hold_repository.create_pending(&hold, claim_expires_at).await?;
        Ok(PlacedHold { is_first: hold.first_hold, hold: HoldDto::from(&hold) })
    }

    async fn cancel_hold(&self, hold_id: HoldId, at: NaiveDateTime) -> LibraryResult<HoldDto> {
        let mut hold = self.find_pending_by_id(hold_id).await?;
        hold.hold_status = HoldStatus::Cancelled;
        hold.canceled_at = Some(at);
        self.transition(hold).await
    }

    async fn next_pending(&self, asset_id: AssetId) -> LibraryResult<Option<HoldDto>> {
        let pending = self.hold_repository.find_pending(asset_id).await?;
        Ok(pending.first().map(HoldDto::from))
    }

    async fn fulfill(&self, hold_id: HoldId, at: NaiveDateTime) -> LibraryResult<HoldDto> {
        let mut hold = self.find_pending_by_id(hold_id).await?;
        hold.hold_status = HoldStatus::Fulfilled;
        hold.fulfilled_at = Some(at);
        self.transition(hold).await
    }

    async fn find_pending(&self, asset_id: AssetId, library_card_id: LibraryCardId) -> LibraryResult<Option<HoldDto>> {
        let hold = self.hold_repository.find_pending_by_card(asset_id, library_card_id).await?;
        Ok(hold.as_ref().map(HoldDto::from))
    }

    async fn pending_count(&self, asset_id: AssetId) -> LibraryResult<usize> {
        Ok(self.hold_repository.find_pending(asset_id).await?.len())
    }

    async fn pending(&self, asset_id: AssetId) -> LibraryResult<Vec<HoldDto>> {
        let pending = self.hold_repository.find_pending(asset_id).await?;
        Ok(pending.iter().map(HoldDto::from).collect())
    }

    async fn get(&self, hold_id: HoldId) -> LibraryResult<HoldDto> {
        self.hold_repository.get(hold_id).await.map(|h| HoldDto::from(&h))
    }

    async fn query_expired(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LibraryResult<PaginatedResult<HoldDto>> {
        let res = self.hold_repository.query_expired(now, page, page_size).await?;
        let records = res.records.iter().map(HoldDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}

impl From<&HoldEntity> for HoldDto {
    fn from(other: &HoldEntity) -> HoldDto {
        HoldDto {
            hold_id: other.hold_id,
            version: other.version,
            branch_id: other.branch_id.to_string(),
            asset_id: other.asset_id,
            library_card_id: other.library_card_id,
            hold_status: other.hold_status,
            first_hold: other.first_hold,
            hold_at: other.hold_at,
            expires_at: other.expires_at,
            canceled_at: other.canceled_at,
            fulfilled_at: other.fulfilled_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
