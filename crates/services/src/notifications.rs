use std::sync::Arc;

use domains::{Notification, NotificationRepository, Result};
use tracing::info;

/// Read access to the seeded notifications plus the bulk read marker.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn list(&self) -> Result<Vec<Notification>> {
        self.notifications.list().await
    }

    pub async fn unread_count(&self) -> Result<usize> {
        Ok(self
            .notifications
            .list()
            .await?
            .iter()
            .filter(|n| !n.is_read)
            .count())
    }

    /// Returns how many notifications flipped from unread to read.
    pub async fn mark_all_read(&self) -> Result<usize> {
        let marked = self.notifications.mark_all_read().await?;
        if marked > 0 {
            info!(marked, "notifications marked read");
        }
        Ok(marked)
    }
}
