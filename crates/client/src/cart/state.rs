//! Cart facade: the single source of truth the UI depends on.
//!
//! Lifecycle: `Uninitialized -> Loading -> Ready` via [`CartState::initialize`]
//! or [`CartState::on_auth_change`]. Mutations go `Ready -> Ready`; a failed
//! mutation returns an error and leaves `items`/`total` exactly as they were.
//! Mutations never put the facade back into `Loading`; only auth-state
//! reloads toggle the loading flag.
//!
//! Concurrent mutations are not serialized: each authenticated call is an
//! independent mutate-then-refetch round trip, so the final state reflects
//! whichever round trip completes last. Requests carry no timeout beyond the
//! HTTP client's defaults; a hung request leaves the operation pending.

use heartwood_core::ProductId;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::warn;

use crate::error::{Result, StoreError};
use crate::identity::Identity;
use crate::storage::KeyValueStore;

use super::guest::GuestCart;
use super::remote::CartApi;
use super::sync;
use super::types::{CartItem, CartSnapshot, NewCartItem};

/// Backing store selection, chosen once per auth-state change.
#[derive(Debug, Clone)]
pub enum CartBackend {
    /// Unauthenticated: durable local storage.
    Guest,
    /// Authenticated: remote cart resource, cached read-through here.
    Authenticated(Identity),
}

/// Cart state container.
///
/// Owned by the composition root and injected into consuming views. All
/// operations take `&mut self`; the single-threaded UI event loop is the
/// assumed caller.
#[derive(Debug)]
pub struct CartState<S, A> {
    guest: GuestCart<S>,
    api: A,
    backend: CartBackend,
    items: Vec<CartItem>,
    total: Decimal,
    loading: bool,
    /// Set once the guest cart has been transferred (or found empty) for the
    /// current login; reset on logout so the next login edge transfers again.
    reconciled: bool,
    updates: watch::Sender<CartSnapshot>,
}

impl<S, A> CartState<S, A>
where
    S: KeyValueStore,
    A: CartApi,
{
    /// Create an uninitialized facade in guest mode.
    ///
    /// Call [`Self::initialize`] once at application start to perform the
    /// first load.
    pub fn new(store: S, api: A) -> Self {
        let (updates, _) = watch::channel(CartSnapshot::empty());
        Self {
            guest: GuestCart::new(store),
            api,
            backend: CartBackend::Guest,
            items: Vec::new(),
            total: Decimal::ZERO,
            loading: true,
            reconciled: false,
            updates,
        }
    }

    /// First load at application start.
    ///
    /// Starting out already authenticated does not trigger a guest-cart
    /// transfer; only a login observed via [`Self::on_auth_change`] does.
    pub async fn initialize(&mut self, identity: Option<Identity>) {
        self.loading = true;
        match identity {
            Some(identity) => {
                self.reconciled = true;
                self.backend = CartBackend::Authenticated(identity);
                self.reload_remote().await;
            }
            None => {
                self.backend = CartBackend::Guest;
                let snapshot = self.guest.load();
                self.apply(snapshot);
            }
        }
        self.loading = false;
    }

    /// React to an auth-state transition.
    ///
    /// On the anonymous-to-authenticated edge the guest cart is transferred
    /// into the server cart exactly once, then the merged authoritative state
    /// is fetched. Logout switches back to the guest store and re-arms the
    /// transfer for the next login.
    pub async fn on_auth_change(&mut self, identity: Option<Identity>) {
        self.loading = true;
        match identity {
            Some(identity) => {
                let was_guest = matches!(self.backend, CartBackend::Guest);
                if was_guest && !self.reconciled {
                    if let Err(e) =
                        sync::transfer_guest_cart(&self.guest, &self.api, &identity).await
                    {
                        warn!(error = %e, "guest cart transfer failed");
                    }
                    self.reconciled = true;
                }
                self.backend = CartBackend::Authenticated(identity);
                self.reload_remote().await;
            }
            None => {
                self.backend = CartBackend::Guest;
                self.reconciled = false;
                let snapshot = self.guest.load();
                self.apply(snapshot);
            }
        }
        self.loading = false;
    }

    /// Add a product to the cart.
    ///
    /// Guest mode merges by product id (incrementing the quantity of an
    /// existing line) and persists locally; authenticated mode posts to the
    /// server and re-fetches the authoritative cart.
    ///
    /// # Errors
    ///
    /// Fails fast with [`StoreError::InvalidItem`] for a non-positive product
    /// id, and propagates gateway/storage errors without touching state.
    pub async fn add_item(&mut self, item: NewCartItem) -> Result<()> {
        if item.id.as_i64() <= 0 {
            return Err(StoreError::InvalidItem(format!(
                "product id {} is not valid",
                item.id
            )));
        }
        let quantity = item.quantity.unwrap_or(1).max(1);

        if let Some(identity) = self.identity() {
            self.api.add_item(&identity, item.id, quantity).await?;
            let snapshot = self.api.fetch(&identity).await?;
            self.apply(snapshot);
        } else {
            let mut items = self.items.clone();
            if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity += quantity;
            } else {
                items.push(CartItem {
                    id: item.id,
                    line_id: None,
                    name: if item.name.is_empty() {
                        "Unknown".to_string()
                    } else {
                        item.name
                    },
                    price: item.price,
                    image: item.image,
                    quantity,
                    subtotal: None,
                });
            }
            let total = self.guest.save(&items)?;
            self.apply(CartSnapshot { items, total });
        }
        Ok(())
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// In authenticated mode, fails with [`StoreError::MissingLineItem`] when
    /// no server line item is known for the product. Guest removal of an
    /// absent product is a no-op success.
    pub async fn remove_item(&mut self, id: ProductId) -> Result<()> {
        if let Some(identity) = self.identity() {
            let line = self
                .items
                .iter()
                .find(|i| i.id == id)
                .and_then(|i| i.line_id)
                .ok_or(StoreError::MissingLineItem(id))?;
            self.api.remove_item(&identity, line).await?;
            let snapshot = self.api.fetch(&identity).await?;
            self.apply(snapshot);
        } else {
            let items: Vec<CartItem> = self
                .items
                .iter()
                .filter(|i| i.id != id)
                .cloned()
                .collect();
            let total = self.guest.save(&items)?;
            self.apply(CartSnapshot { items, total });
        }
        Ok(())
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// A quantity of zero is interpreted as removal.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::remove_item`]; gateway errors leave the
    /// visible state unchanged.
    pub async fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<()> {
        if quantity < 1 {
            return self.remove_item(id).await;
        }

        if let Some(identity) = self.identity() {
            let line = self
                .items
                .iter()
                .find(|i| i.id == id)
                .and_then(|i| i.line_id)
                .ok_or(StoreError::MissingLineItem(id))?;
            // The update response is a full cart representation
            let snapshot = self.api.update_item(&identity, line, quantity).await?;
            self.apply(snapshot);
        } else {
            let items: Vec<CartItem> = self
                .items
                .iter()
                .map(|i| {
                    let mut item = i.clone();
                    if item.id == id {
                        item.quantity = quantity;
                    }
                    item
                })
                .collect();
            let total = self.guest.save(&items)?;
            self.apply(CartSnapshot { items, total });
        }
        Ok(())
    }

    /// Empty the cart. Idempotent.
    ///
    /// # Errors
    ///
    /// Propagates gateway/storage errors; state is unchanged on failure.
    pub async fn clear(&mut self) -> Result<()> {
        if let Some(identity) = self.identity() {
            let total = self.api.clear(&identity).await?;
            self.apply(CartSnapshot {
                items: Vec::new(),
                total,
            });
        } else {
            self.guest.clear()?;
            self.apply(CartSnapshot::empty());
        }
        Ok(())
    }

    /// Current cart items, in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Current cart total.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Whether an auth-change reload is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Which backing store is currently selected.
    #[must_use]
    pub const fn backend(&self) -> &CartBackend {
        &self.backend
    }

    /// Current items and total as one value.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total,
        }
    }

    /// Subscribe to state changes (for re-render triggers).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.updates.subscribe()
    }

    fn identity(&self) -> Option<Identity> {
        match &self.backend {
            CartBackend::Authenticated(identity) => Some(identity.clone()),
            CartBackend::Guest => None,
        }
    }

    /// Fetch the remote cart; a failed load presents as an empty cart rather
    /// than an error, matching the read path's absorb-and-log policy.
    async fn reload_remote(&mut self) {
        let Some(identity) = self.identity() else {
            return;
        };
        match self.api.fetch(&identity).await {
            Ok(snapshot) => self.apply(snapshot),
            Err(e) => {
                warn!(error = %e, "failed to load remote cart");
                self.apply(CartSnapshot::empty());
            }
        }
    }

    fn apply(&mut self, snapshot: CartSnapshot) {
        self.items.clone_from(&snapshot.items);
        self.total = snapshot.total;
        self.updates.send_replace(snapshot);
    }
}
