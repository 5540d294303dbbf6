use std::sync::Arc;
use std::time::Duration;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, warn};
use crate::core::domain::Configuration;
use crate::gateway::events::{Notification, NotificationGateway};

// NotificationDispatcher decouples circulation commands from delivery: commands enqueue
// after their state change and return, a background task drains the queue into the gateway.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<Notification>,
}

impl NotificationDispatcher {
    /// Spawns the delivery task on the current tokio runtime.
    pub fn start(gateway: Arc<dyn NotificationGateway>, config: &Configuration) -> Self {
        let (sender, receiver) = mpsc::channel(config.notification_buffer.max(1));
        let max_attempts = config.notification_max_attempts.max(1);
        let retry_ms = config.notification_retry_ms;
        tokio::spawn(deliver_all(receiver, gateway, max_attempts, retry_ms));
        Self { sender }
    }

    /// Queues a notification without waiting; returns false when it had to be dropped.
    pub fn enqueue(&self, notification: Notification) -> bool {
        match self.sender.try_send(notification) {
            Ok(()) => true,
            Err(TrySendError::Full(n)) => {
                warn!(notification_id = n.notification_id.as_str(), "notification queue is full, dropping");
                false
            }
            Err(TrySendError::Closed(n)) => {
                warn!(notification_id = n.notification_id.as_str(), "notification queue is closed, dropping");
                false
            }
        }
    }
}

async fn deliver_all(mut receiver: mpsc::Receiver<Notification>, gateway: Arc<dyn NotificationGateway>,
                     max_attempts: u32, retry_ms: u64) {
    while let Some(notification) = receiver.recv().await {
        deliver(gateway.as_ref(), &notification, max_attempts, retry_ms).await;
    }
    debug!("notification dispatcher stopped");
}

async fn deliver(gateway: &dyn NotificationGateway, notification: &Notification, max_attempts: u32, retry_ms: u64) {
    for attempt in 1..=max_attempts {
        match gateway.publish(notification).await {
            Ok(()) => {
                debug!(notification_id = notification.notification_id.as_str(), attempt, "notification delivered");
                return;
            }
            Err(err) if err.retryable() && attempt < max_attempts => {
                let backoff = backoff_ms(retry_ms, attempt, rand::thread_rng().gen_range(0..=retry_ms / 2));
                warn!(notification_id = notification.notification_id.as_str(), attempt,
                      "notification delivery failed, retrying in {}ms: {}", backoff, err);
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }
            Err(err) => {
                error!(notification_id = notification.notification_id.as_str(), attempt,
                       "notification delivery failed: {}", err);
                return;
            }
        }
    }
}

// linear in the attempt number, saturating instead of wrapping
fn backoff_ms(retry_ms: u64, attempt: u32, jitter: u64) -> u64 {
    retry_ms.saturating_mul(u64::from(attempt)).saturating_add(jitter)
}
