use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::checkout::domain::CheckoutLedger;
use crate::checkout::domain::model::CheckoutEntity;
use crate::checkout::dto::CheckoutDto;
use crate::checkout::repository::CheckoutRepository;
use crate::core::domain::Configuration;
use crate::core::library::{AssetId, CheckoutStatus, LibraryCardId, LibraryError, LibraryResult, PaginatedResult};
use crate::utils::date::add_days;
use crate::utils::memory::paginate;

pub(crate) struct CheckoutLedgerImpl {
    branch_id: String,
    book_loan_days: i64,
    checkout_repository: Arc<dyn CheckoutRepository>,
}

impl CheckoutLedgerImpl {
    pub(crate) fn new(config: &Configuration, checkout_repository: Arc<dyn CheckoutRepository>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_loan_days: config.book_loan_days,
            checkout_repository,
        }
    }

    async fn find_open(&self, asset_id: AssetId) -> LibraryResult<CheckoutEntity> {
        self.checkout_repository.find_open(asset_id).await?.ok_or_else(||
            LibraryError::not_checked_out(format!("asset {} is not checked out", asset_id).as_str()))
    }
}

#[async_trait]
impl CheckoutLedger for CheckoutLedgerImpl {
    async fn open_checkout(&self, asset_id: AssetId, library_card_id: LibraryCardId,
                           at: NaiveDateTime) -> LibraryResult<CheckoutDto> {
        let due_at = add_days(at, self.book_loan_days)?;
        let checkout = CheckoutEntity::new(self.checkout_repository.next_id(), self.branch_id.as_str(),
                                           asset_id, library_card_id, at, due_at);
        self.checkout_repository.create_open(&checkout).await?;
        Ok(CheckoutDto::from(&checkout))
    }

    async fn close_checkout(&self, asset_id: AssetId, at: NaiveDateTime) -> LibraryResult<CheckoutDto> {
        let mut existing = self.find_open(asset_id).await?;
        existing.checkout_status = CheckoutStatus::Returned;
        existing.returned_at = Some(at);
        self.checkout_repository.update(&existing).await?;
        self.checkout_repository.get(existing.checkout_id).await.map(|c| CheckoutDto::from(&c))
    }

    async fn close_as_lost(&self, asset_id: AssetId, at: NaiveDateTime) -> LibraryResult<Option<CheckoutDto>> {
        match self.checkout_repository.find_open(asset_id).await? {
            Some(mut existing) => {
                existing.checkout_status = CheckoutStatus::Lost;
                existing.lost_at = Some(at);
                self.checkout_repository.update(&existing).await?;
                let closed = self.checkout_repository.get(existing.checkout_id).await?;
                Ok(Some(CheckoutDto::from(&closed)))
            }
            None => Ok(None),
        }
    }

    async fn history(&self, asset_id: AssetId, page: Option<&str>,
                     page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>> {
        let records: Vec<CheckoutDto> = self.checkout_repository.find_by_asset(asset_id).await?
            .iter().map(CheckoutDto::from).collect();
        paginate(page, page_size, records)
    }

    async fn latest(&self, asset_id: AssetId) -> LibraryResult<Option<CheckoutDto>> {
        let records = self.checkout_repository.find_by_asset(asset_id).await?;
        Ok(records.first().map(CheckoutDto::from))
    }

    async fn current_holder(&self, asset_id: AssetId) -> LibraryResult<Option<LibraryCardId>> {
        Ok(self.checkout_repository.find_open(asset_id).await?.map(|c| c.library_card_id))
    }

    async fn is_checked_out(&self, asset_id: AssetId) -> LibraryResult<bool> {
        Ok(self.checkout_repository.find_open(asset_id).await?.is_some())
    }

    async fn query_overdue(&self, now: NaiveDateTime, page: Option<&str>,
                           page_size: usize) -> LibraryResult<PaginatedResult<CheckoutDto>> {
        let res = self.checkout_repository.query_overdue(now, page, page_size).await?;
        let records = res.records.iter().map(CheckoutDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}

impl From<&CheckoutEntity> for CheckoutDto {
    fn from(other: &CheckoutEntity) -> CheckoutDto {
        CheckoutDto {
            checkout_id: other.checkout_id,
            version: other.version,
            branch_id: other.branch_id.to_string(),
            asset_id: other.asset_id,
            library_card_id: other.library_card_id,
            checkout_status: other.checkout_status,
            checkout_at: other.checkout_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
            lost_at: other.lost_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
