use async_trait::async_trait;
use tracing::info;
use crate::core::library::LibraryResult;
use crate::gateway::events::{Notification, NotificationGateway};

// LogNotificationGateway writes notifications to the log instead of delivering them,
// which is what local and staging branches run with.
#[derive(Debug, Default)]
pub struct LogNotificationGateway {}

impl LogNotificationGateway {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NotificationGateway for LogNotificationGateway {
    async fn publish(&self, notification: &Notification) -> LibraryResult<()> {
        info!(notification_id = notification.notification_id.as_str(),
              recipient = notification.recipient_address.as_str(),
              subject = notification.subject.as_str(),
              "notification {}", notification.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::gateway::events::{Notification, NotificationGateway};
    use crate::gateway::logs::publisher::LogNotificationGateway;

    #[tokio::test]
    async fn test_should_publish_to_logs() {
        let publisher = LogNotificationGateway::new();
        let notification = Notification::new("Ann", "ann@example.org", "subject", "body");
        publisher.publish(&notification).await.expect("should publish");
    }
}
