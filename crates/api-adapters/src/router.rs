//! Axum router construction.

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{conversations, health, notifications, posts, site, supervisors, users};
use crate::state::AppState;

/// Build the complete router with every API route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Feed and posts
        .route("/api/feed", get(posts::feed_handler))
        .route("/api/posts", post(posts::create_post_handler))
        .route(
            "/api/posts/{id}",
            get(posts::thread_handler).delete(posts::delete_post_handler),
        )
        .route("/api/posts/{id}/status", post(posts::toggle_status_handler))
        .route("/api/posts/{id}/bids", post(posts::place_bid_handler))
        .route("/api/posts/{id}/like", post(posts::like_handler))
        .route("/api/posts/{id}/retweet", post(posts::retweet_handler))
        // Users
        .route("/api/users", get(users::list_users_handler))
        .route(
            "/api/users/{id}",
            get(users::get_user_handler).patch(users::update_user_handler),
        )
        .route("/api/users/{id}/ban", post(users::toggle_ban_handler))
        .route("/api/users/{id}/follow", post(users::toggle_follow_handler))
        .route("/api/users/{id}/whatsapp", post(users::toggle_whatsapp_handler))
        .route("/api/users/{id}/posts", get(users::user_posts_handler))
        // Messaging
        .route(
            "/api/conversations",
            get(conversations::list_conversations_handler)
                .post(conversations::open_conversation_handler),
        )
        .route(
            "/api/conversations/{id}/messages",
            post(conversations::send_message_handler),
        )
        // Notifications
        .route(
            "/api/notifications",
            get(notifications::list_notifications_handler),
        )
        .route(
            "/api/notifications/read-all",
            post(notifications::mark_all_read_handler),
        )
        // Supervisors
        .route(
            "/api/supervisors",
            get(supervisors::list_supervisors_handler).post(supervisors::add_supervisor_handler),
        )
        .route(
            "/api/supervisors/{user_id}",
            axum::routing::patch(supervisors::update_permissions_handler)
                .delete(supervisors::remove_supervisor_handler),
        )
        // Site
        .route(
            "/api/site",
            get(site::get_site_handler).patch(site::update_site_handler),
        )
        .route("/api/site/flags/{flag}", post(site::toggle_flag_handler))
        .route(
            "/api/site/sections",
            get(site::list_sections_handler)
                .post(site::add_section_handler)
                .put(site::reorder_sections_handler),
        )
        .route(
            "/api/site/sections/{id}",
            axum::routing::patch(site::update_section_handler).delete(site::delete_section_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_policy())
        .with_state(state)
}

// Important if the UI and API ever live on different origins.
fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
