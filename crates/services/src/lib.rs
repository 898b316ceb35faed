//! # services
//!
//! Application services for MAZADNET. Each service owns `Arc<dyn Port>`
//! handles injected at startup; nothing here touches global state.

pub mod access;
pub mod feed;
pub mod messaging;
pub mod notifications;
pub mod site;
pub mod supervisors;
pub mod users;

use std::sync::Arc;

use domains::{
    ConversationRepository, NotificationRepository, PostRepository, SiteRepository,
    SupervisorRepository, UserId, UserRepository,
};

pub use access::AccessControl;
pub use feed::{FeedPolicy, FeedService};
pub use messaging::MessagingService;
pub use notifications::NotificationService;
pub use site::SiteService;
pub use supervisors::SupervisorService;
pub use users::UserService;

/// Every store the services need.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub supervisors: Arc<dyn SupervisorRepository>,
    pub site: Arc<dyn SiteRepository>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub admin_user_id: UserId,
    pub feed: FeedPolicy,
    pub timestamp_format: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            admin_user_id: "currentUser".into(),
            feed: FeedPolicy::default(),
            timestamp_format: "%H:%M".into(),
        }
    }
}

/// The assembled service layer, cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub feed: FeedService,
    pub users: UserService,
    pub messaging: MessagingService,
    pub notifications: NotificationService,
    pub supervisors: SupervisorService,
    pub site: SiteService,
}

impl Services {
    pub fn new(repos: Repositories, config: ServiceConfig) -> Self {
        let access = AccessControl::new(repos.supervisors.clone(), config.admin_user_id);
        Self {
            feed: FeedService::new(
                repos.posts,
                repos.users.clone(),
                repos.site.clone(),
                access.clone(),
                config.feed,
            ),
            users: UserService::new(repos.users.clone(), repos.site.clone(), access.clone()),
            messaging: MessagingService::new(
                repos.conversations,
                repos.users.clone(),
                repos.site.clone(),
                config.timestamp_format,
            ),
            notifications: NotificationService::new(repos.notifications),
            supervisors: SupervisorService::new(
                repos.supervisors.clone(),
                repos.users,
                repos.site.clone(),
                access.clone(),
            ),
            site: SiteService::new(repos.site, repos.supervisors, access),
        }
    }
}
