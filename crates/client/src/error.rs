//! Unified error handling for the storefront client.
//!
//! Expected failure modes (missing token, 4xx/5xx, storage unavailable) are
//! values of [`StoreError`], never panics. State containers guarantee that a
//! failed operation leaves their visible state unchanged; the embedding UI is
//! responsible for notifying the user.

use heartwood_core::ProductId;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur in cart, wishlist, and catalog operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Operation requires an authenticated identity and none is present.
    ///
    /// Raised before any network call is issued, so it is distinct from a
    /// transport error.
    #[error("authentication required: {0}")]
    AuthenticationRequired(&'static str),

    /// Client-side validation rejected the input.
    #[error("invalid cart item: {0}")]
    InvalidItem(String),

    /// No server line item is known for the given product.
    #[error("no cart line item for product {0}")]
    MissingLineItem(ProductId),

    /// HTTP request failed (network-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or stored payload.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Durable client storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// Whether this error originated at the transport/API boundary rather
    /// than from local validation or storage.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
