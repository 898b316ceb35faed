//! # storage-adapters
//!
//! Concrete implementations of the repository ports defined in `domains`.
//! Only the in-memory backend exists; it starts from the fixed data in
//! [`seed`].

pub mod memory;
pub mod seed;

use std::sync::Arc;

pub use memory::{
    MemoryConversationRepository, MemoryNotificationRepository, MemoryPostRepository,
    MemorySiteRepository, MemorySupervisorRepository, MemoryUserRepository,
};

/// One instance of every in-memory store.
#[derive(Clone)]
pub struct MemoryStores {
    pub posts: Arc<MemoryPostRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub conversations: Arc<MemoryConversationRepository>,
    pub notifications: Arc<MemoryNotificationRepository>,
    pub supervisors: Arc<MemorySupervisorRepository>,
    pub site: Arc<MemorySiteRepository>,
}

impl MemoryStores {
    /// Stores populated with the seed data.
    pub fn seeded() -> Self {
        tracing::debug!("seeding in-memory stores");
        Self {
            posts: Arc::new(MemoryPostRepository::new(seed::feed())),
            users: Arc::new(MemoryUserRepository::new(seed::users())),
            conversations: Arc::new(MemoryConversationRepository::new(seed::conversations())),
            notifications: Arc::new(MemoryNotificationRepository::new(seed::notifications())),
            supervisors: Arc::new(MemorySupervisorRepository::new(seed::supervisors())),
            site: Arc::new(MemorySiteRepository::new(
                seed::site_settings(),
                seed::sections(),
            )),
        }
    }
}
