use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::{Notification, NotificationGateway};
use crate::utils::memory::{read_lock, write_lock};

// MemoryNotificationGateway records everything it is asked to deliver. It can be told to
// fail the next n deliveries to exercise the dispatcher retry path.
#[derive(Debug, Default)]
pub struct MemoryNotificationGateway {
    delivered: RwLock<Vec<Notification>>,
    failures: AtomicUsize,
}

impl MemoryNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, times: usize) {
        self.failures.store(times, Ordering::SeqCst);
    }

    pub fn delivered(&self) -> Vec<Notification> {
        read_lock(&self.delivered).map(|d| d.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NotificationGateway for MemoryNotificationGateway {
    async fn publish(&self, notification: &Notification) -> LibraryResult<()> {
        let failing = self.failures.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            if n > 0 { Some(n - 1) } else { None }
        });
        if failing.is_ok() {
            return Err(LibraryError::runtime(format!("delivery failed for {}",
                                                     notification.notification_id).as_str(), None, true));
        }
        write_lock(&self.delivered)?.push(notification.clone());
        Ok(())
    }
}
