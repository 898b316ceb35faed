//! In-memory adapters. Each store keeps its state behind one
//! `tokio::sync::RwLock`, so every port call is applied atomically.

mod conversations;
mod notifications;
mod posts;
mod site;
mod supervisors;
mod users;

pub use conversations::MemoryConversationRepository;
pub use notifications::MemoryNotificationRepository;
pub use posts::MemoryPostRepository;
pub use site::MemorySiteRepository;
pub use supervisors::MemorySupervisorRepository;
pub use users::MemoryUserRepository;
