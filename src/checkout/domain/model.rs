use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{AssetId, CheckoutId, CheckoutStatus, LibraryCardId};
use crate::utils::date::{opt_serializer, serializer};

// CheckoutEntity abstracts one loan of a copy to a library card.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutEntity {
    pub checkout_id: CheckoutId,
    pub version: i64,
    pub branch_id: String,
    pub asset_id: AssetId,
    pub library_card_id: LibraryCardId,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub checkout_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub returned_at: Option<NaiveDateTime>,
    #[serde(with = "opt_serializer")]
    pub lost_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CheckoutEntity {
    pub fn new(checkout_id: CheckoutId, branch_id: &str, asset_id: AssetId, library_card_id: LibraryCardId,
               checkout_at: NaiveDateTime, due_at: NaiveDateTime) -> Self {
        Self {
            checkout_id,
            version: 0,
            branch_id: branch_id.to_string(),
            asset_id,
            library_card_id,
            checkout_status: CheckoutStatus::CheckedOut,
            checkout_at,
            due_at,
            returned_at: None,
            lost_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.checkout_status == CheckoutStatus::CheckedOut
    }
}

impl Identifiable for CheckoutEntity {
    fn id(&self) -> i64 {
        self.checkout_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::checkout::domain::model::CheckoutEntity;
    use crate::core::library::CheckoutStatus;

    #[tokio::test]
    async fn test_should_build_checkout() {
        let now = Utc::now().naive_utc();
        let checkout = CheckoutEntity::new(1, "test", 10, 100, now, now + Duration::days(15));
        assert_eq!(10, checkout.asset_id);
        assert_eq!(100, checkout.library_card_id);
        assert_eq!(CheckoutStatus::CheckedOut, checkout.checkout_status);
        assert_eq!(now + Duration::days(15), checkout.due_at);
        assert!(checkout.is_open());
    }
}
