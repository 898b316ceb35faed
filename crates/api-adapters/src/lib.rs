//! # api-adapters
//!
//! JSON-over-HTTP surface for MAZADNET. Handlers translate requests into
//! service calls and map [`domains::DomainError`] onto status codes; no
//! business rule lives here.

#[cfg(feature = "web-axum")]
pub mod actor;
#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod router;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use router::build_router;
#[cfg(feature = "web-axum")]
pub use state::AppState;

/// Header carrying the id of the user a request acts for.
pub const ACTOR_HEADER: &str = "x-actor-id";
