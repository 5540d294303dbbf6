use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::LibraryResult;
use crate::utils::date::serializer;

// Notification is an email-shaped message handed to the gateway; delivery is at-least-once,
// so consumers de-duplicate on notification_id.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: String,
    pub recipient_name: String,
    pub recipient_address: String,
    pub subject: String,
    pub body: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl Notification {
    pub fn new(recipient_name: &str, recipient_address: &str, subject: &str, body: &str) -> Self {
        Self {
            notification_id: Uuid::new_v4().to_string(),
            recipient_name: recipient_name.to_string(),
            recipient_address: recipient_address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[async_trait]
pub trait NotificationGateway: Sync + Send {
    async fn publish(&self, notification: &Notification) -> LibraryResult<()>;
}
