//! Wishlist state container.

use heartwood_core::ProductId;
use tracing::warn;

use crate::error::{Result, StoreError};
use crate::identity::Identity;

use super::WishlistProduct;
use super::remote::WishlistApi;

/// Authenticated-only wishlist facade.
///
/// Holds the in-memory product list mirrored from the server. A failed
/// operation leaves the list unchanged; operations without an identity fail
/// before any network call with [`StoreError::AuthenticationRequired`].
#[derive(Debug)]
pub struct WishlistState<A> {
    api: A,
    identity: Option<Identity>,
    products: Vec<WishlistProduct>,
    loading: bool,
}

impl<A: WishlistApi> WishlistState<A> {
    /// Create an empty, unauthenticated wishlist.
    pub const fn new(api: A) -> Self {
        Self {
            api,
            identity: None,
            products: Vec::new(),
            loading: false,
        }
    }

    /// React to an auth-state transition.
    ///
    /// Login fetches the wishlist; logout resets it to empty. There is no
    /// guest wishlist and nothing to transfer.
    pub async fn on_auth_change(&mut self, identity: Option<Identity>) {
        self.identity = identity;
        if self.identity.is_some() {
            if let Err(e) = self.refresh().await {
                warn!(error = %e, "failed to load wishlist");
            }
        } else {
            self.products.clear();
        }
    }

    /// Re-fetch the wishlist from the server.
    ///
    /// # Errors
    ///
    /// [`StoreError::AuthenticationRequired`] without an identity; gateway
    /// errors otherwise, leaving the current list unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        let identity = self.require_identity()?;
        self.loading = true;
        let result = self.api.fetch(&identity).await;
        self.loading = false;
        self.products = result?;
        Ok(())
    }

    /// Add a product to the wishlist.
    ///
    /// The server response carries the updated list, which replaces the local
    /// one; adding a product that is already present is a server-side no-op.
    ///
    /// # Errors
    ///
    /// [`StoreError::AuthenticationRequired`] without an identity; gateway
    /// errors otherwise.
    pub async fn add_product(&mut self, product: ProductId) -> Result<()> {
        let identity = self.require_identity()?;
        self.loading = true;
        let result = self.api.add(&identity, product).await;
        self.loading = false;
        self.products = result?;
        Ok(())
    }

    /// Remove a product from the wishlist.
    ///
    /// # Errors
    ///
    /// [`StoreError::AuthenticationRequired`] without an identity; gateway
    /// errors otherwise.
    pub async fn remove_product(&mut self, product: ProductId) -> Result<()> {
        let identity = self.require_identity()?;
        self.loading = true;
        let result = self.api.remove(&identity, product).await;
        self.loading = false;
        result?;
        self.products.retain(|p| p.id != product);
        Ok(())
    }

    /// Remove every product from the wishlist.
    ///
    /// # Errors
    ///
    /// [`StoreError::AuthenticationRequired`] without an identity; gateway
    /// errors otherwise.
    pub async fn clear(&mut self) -> Result<()> {
        let identity = self.require_identity()?;
        self.loading = true;
        let result = self.api.clear(&identity).await;
        self.loading = false;
        result?;
        self.products.clear();
        Ok(())
    }

    /// Whether a product is in the wishlist. Linear scan; wishlists are
    /// small.
    #[must_use]
    pub fn is_in_wishlist(&self, product: ProductId) -> bool {
        self.products.iter().any(|p| p.id == product)
    }

    /// Current wishlist contents.
    #[must_use]
    pub fn products(&self) -> &[WishlistProduct] {
        &self.products
    }

    /// Whether a wishlist operation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    fn require_identity(&self) -> Result<Identity> {
        self.identity
            .clone()
            .ok_or(StoreError::AuthenticationRequired(
                "log in to use the wishlist",
            ))
    }
}
