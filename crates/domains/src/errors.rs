//! # DomainError
//!
//! Centralized error handling for every MAZADNET store and service.
//! Each variant maps to one class of user-visible failure.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Resource not found (e.g., Post, User, Conversation)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// Input validation failure (e.g., blank post, disabled upload)
    #[error("validation error: {0}")]
    Validation(String),

    /// Bid does not beat the current price, or is not a usable number.
    #[error("invalid bid: {offered} must be greater than the current bid of {current}")]
    InvalidBid { current: f64, offered: f64 },

    /// The acting user lacks the permission for this action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists or is in an incompatible state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Adapter failure (unused by the in-memory stores, kept for real backends)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(kind, id.to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }
}

/// A specialized Result type for domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;
