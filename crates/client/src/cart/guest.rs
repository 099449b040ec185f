//! Guest cart persistence in durable client storage.
//!
//! The cart is stored as a JSON array of [`CartItem`] under a fixed key. It
//! is created lazily on first save and lives until it is cleared or
//! transferred to the server after login.

use rust_decimal::Decimal;
use tracing::warn;

use crate::Result;
use crate::storage::KeyValueStore;

use super::types::{CartItem, CartSnapshot, cart_total};

/// Fixed storage key for the guest cart.
pub const GUEST_CART_KEY: &str = "heartwood_guest_cart";

/// Durable, synchronous cart store for unauthenticated visitors.
#[derive(Debug, Clone)]
pub struct GuestCart<S> {
    store: S,
}

impl<S: KeyValueStore> GuestCart<S> {
    /// Create a guest cart over the given storage backend.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the stored cart.
    ///
    /// Returns an empty snapshot when the entry is absent, malformed, or the
    /// storage backend is unavailable; this never errors to the caller. A
    /// malformed payload is logged and treated as empty rather than crashing
    /// the UI.
    pub fn load(&self) -> CartSnapshot {
        let raw = match self.store.get(GUEST_CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartSnapshot::empty(),
            Err(e) => {
                warn!(error = %e, "guest cart storage unavailable, starting empty");
                return CartSnapshot::empty();
            }
        };

        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => {
                let total = cart_total(&items);
                CartSnapshot { items, total }
            }
            Err(e) => {
                warn!(error = %e, "stored guest cart is malformed, starting empty");
                CartSnapshot::empty()
            }
        }
    }

    /// Serialize and persist `items`, returning the recomputed total.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails. The
    /// previously stored cart is left as-is in that case.
    pub fn save(&self, items: &[CartItem]) -> Result<Decimal> {
        let raw = serde_json::to_string(items)?;
        self.store.set(GUEST_CART_KEY, &raw)?;
        Ok(cart_total(items))
    }

    /// Remove the stored cart. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be written.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(GUEST_CART_KEY)?;
        Ok(())
    }
}
