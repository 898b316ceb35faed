use async_trait::async_trait;
use domains::{Notification, NotificationRepository, Result};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl MemoryNotificationRepository {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: RwLock::new(notifications),
        }
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn list(&self) -> Result<Vec<Notification>> {
        Ok(self.notifications.read().await.clone())
    }

    async fn mark_all_read(&self) -> Result<usize> {
        let mut notifications = self.notifications.write().await;
        let mut marked = 0;
        for n in notifications.iter_mut().filter(|n| !n.is_read) {
            n.is_read = true;
            marked += 1;
        }
        Ok(marked)
    }
}
