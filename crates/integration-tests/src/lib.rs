//! Shared wiring for the integration tests: seeded in-memory stores behind
//! the real services.

use services::{Repositories, ServiceConfig, Services};
use storage_adapters::MemoryStores;

pub const ADMIN: &str = storage_adapters::seed::ADMIN_ID;

pub fn repositories(stores: MemoryStores) -> Repositories {
    Repositories {
        posts: stores.posts,
        users: stores.users,
        conversations: stores.conversations,
        notifications: stores.notifications,
        supervisors: stores.supervisors,
        site: stores.site,
    }
}

/// Services over freshly seeded stores with the default configuration.
pub fn seeded_services() -> Services {
    seeded_services_with(ServiceConfig::default())
}

pub fn seeded_services_with(config: ServiceConfig) -> Services {
    Services::new(repositories(MemoryStores::seeded()), config)
}

#[cfg(feature = "web-axum")]
pub fn seeded_app() -> axum::Router {
    let state = api_adapters::AppState::new(seeded_services(), ADMIN.into());
    api_adapters::build_router(state)
}
