//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The payload of message-carrying variants is the user-facing message; the
/// API layer renders it into the JSON error envelope verbatim. Every handler
/// maps these onto an envelope; only startup configuration failures are
/// allowed to terminate the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or missing input).
    #[error("{0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested document was not found.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness conflict (e.g. duplicate username).
    #[error("{0}")]
    Conflict(String),

    /// No or unusable credential on a protected route, or a failed login.
    #[error("{0}")]
    Unauthenticated(String),

    /// A credential was presented but failed verification.
    #[error("token is not valid")]
    InvalidToken,

    /// The authenticated identity is not allowed to perform the operation.
    #[error("{0}")]
    Forbidden(String),

    /// An order line requested more units than the product has on hand.
    #[error("insufficient quantity for product {0}")]
    InsufficientStock(String),

    /// Unexpected storage/runtime failure.
    #[error("{0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn insufficient_stock(product: impl Into<String>) -> Self {
        Self::InsufficientStock(product.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
