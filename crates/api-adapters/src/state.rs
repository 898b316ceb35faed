use std::sync::Arc;

use domains::UserId;
use services::Services;

/// Shared by every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    /// Acting user for requests that carry no actor header.
    pub default_actor: UserId,
}

impl AppState {
    pub fn new(services: Services, default_actor: UserId) -> Self {
        Self {
            services: Arc::new(services),
            default_actor,
        }
    }
}
