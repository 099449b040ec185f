//! Wishlist: authenticated-only favorites list.
//!
//! Structurally parallel to the cart but simpler: there is no guest wishlist
//! and no transfer at login. Every operation requires an identity
//! and short-circuits before the network when none is present.

mod remote;
mod state;

use heartwood_core::ProductId;
use rust_decimal::Decimal;
use serde::Deserialize;

pub use remote::{RemoteWishlist, WishlistApi, WishlistPayload};
pub use state::WishlistState;

/// A product referenced by the wishlist.
///
/// Invariant: a product id appears at most once; the server enforces this and
/// the local list mirrors the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WishlistProduct {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
}
