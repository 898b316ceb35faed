//! MAZADNET domain layer.
//!
//! Entity models, the threaded [`Feed`], store ports, and the shared
//! [`DomainError`]. No I/O lives here.

pub mod errors;
pub mod feed;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use feed::Feed;
pub use models::*;
pub use ports::*;
