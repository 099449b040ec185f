//! In-memory backends for driving the state containers in tests.

#![allow(dead_code)] // not every test file uses every helper

use std::sync::{Arc, Mutex, MutexGuard};

use heartwood_core::{LineItemId, ProductId};
use heartwood_client::cart::{CartApi, CartItem, CartSnapshot, cart_total};
use heartwood_client::wishlist::{WishlistApi, WishlistProduct};
use heartwood_client::{Identity, Result, StoreError};
use rust_decimal::Decimal;

pub fn d(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

/// Route tracing output through the test harness so warnings from
/// absorbed-failure paths show up under `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn identity() -> Identity {
    Identity::new("test-token")
}

// =============================================================================
// FakeCartApi
// =============================================================================

/// Calls observed by the fake cart backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCall {
    Fetch,
    Add(ProductId, u32),
    Update(LineItemId, u32),
    Remove(LineItemId),
    Clear,
}

#[derive(Debug, Default)]
struct FakeCartInner {
    /// Known products: (id, name, price). Adds of unknown products get a
    /// zero price, mirroring a server that knows prices the client doesn't.
    products: Vec<(ProductId, String, Decimal)>,
    lines: Vec<CartItem>,
    next_line_id: i64,
    calls: Vec<CartCall>,
    fail_add: bool,
    fail_update: bool,
    fail_fetch: bool,
}

/// Server-side cart simulation: deduplicates by product id and sums
/// quantities, like the real backend.
#[derive(Debug, Clone, Default)]
pub struct FakeCartApi {
    inner: Arc<Mutex<FakeCartInner>>,
}

impl FakeCartApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, id: ProductId, name: &str, price: Decimal) -> Self {
        self.lock().products.push((id, name.to_string(), price));
        self
    }

    pub fn fail_adds(&self, fail: bool) {
        self.lock().fail_add = fail;
    }

    pub fn fail_updates(&self, fail: bool) {
        self.lock().fail_update = fail;
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.lock().fail_fetch = fail;
    }

    pub fn calls(&self) -> Vec<CartCall> {
        self.lock().calls.clone()
    }

    pub fn add_calls(&self) -> Vec<(ProductId, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                CartCall::Add(id, quantity) => Some((id, quantity)),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, FakeCartInner> {
        self.inner.lock().expect("fake cart lock")
    }

    fn server_error() -> StoreError {
        StoreError::Api {
            status: 500,
            message: "simulated failure".to_string(),
        }
    }

    fn snapshot_locked(inner: &FakeCartInner) -> CartSnapshot {
        CartSnapshot {
            items: inner.lines.clone(),
            total: cart_total(&inner.lines),
        }
    }
}

impl CartApi for FakeCartApi {
    async fn fetch(&self, _identity: &Identity) -> Result<CartSnapshot> {
        let mut inner = self.lock();
        inner.calls.push(CartCall::Fetch);
        if inner.fail_fetch {
            return Err(Self::server_error());
        }
        Ok(Self::snapshot_locked(&inner))
    }

    async fn add_item(&self, _identity: &Identity, product: ProductId, quantity: u32) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(CartCall::Add(product, quantity));
        if inner.fail_add {
            return Err(Self::server_error());
        }

        if let Some(line) = inner.lines.iter_mut().find(|l| l.id == product) {
            line.quantity += quantity;
            return Ok(());
        }

        let (name, price) = inner
            .products
            .iter()
            .find(|(id, _, _)| *id == product)
            .map_or_else(
                || (format!("product-{product}"), Decimal::ZERO),
                |(_, name, price)| (name.clone(), *price),
            );
        inner.next_line_id += 1;
        let line_id = LineItemId::new(inner.next_line_id);
        inner.lines.push(CartItem {
            id: product,
            line_id: Some(line_id),
            name,
            price,
            image: String::new(),
            quantity,
            subtotal: None,
        });
        Ok(())
    }

    async fn update_item(
        &self,
        _identity: &Identity,
        line: LineItemId,
        quantity: u32,
    ) -> Result<CartSnapshot> {
        let mut inner = self.lock();
        inner.calls.push(CartCall::Update(line, quantity));
        if inner.fail_update {
            return Err(Self::server_error());
        }
        if let Some(item) = inner.lines.iter_mut().find(|l| l.line_id == Some(line)) {
            item.quantity = quantity;
        }
        Ok(Self::snapshot_locked(&inner))
    }

    async fn remove_item(&self, _identity: &Identity, line: LineItemId) -> Result<()> {
        let mut inner = self.lock();
        inner.calls.push(CartCall::Remove(line));
        inner.lines.retain(|l| l.line_id != Some(line));
        Ok(())
    }

    async fn clear(&self, _identity: &Identity) -> Result<Decimal> {
        let mut inner = self.lock();
        inner.calls.push(CartCall::Clear);
        inner.lines.clear();
        Ok(Decimal::ZERO)
    }
}

// =============================================================================
// FakeWishlistApi
// =============================================================================

#[derive(Debug, Default)]
struct FakeWishlistInner {
    products: Vec<WishlistProduct>,
    network_calls: usize,
    fail_add: bool,
}

/// Server-side wishlist simulation.
#[derive(Debug, Clone, Default)]
pub struct FakeWishlistApi {
    inner: Arc<Mutex<FakeWishlistInner>>,
}

impl FakeWishlistApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, id: ProductId, name: &str) -> Self {
        self.lock().products.push(WishlistProduct {
            id,
            name: name.to_string(),
            price: None,
            image: None,
        });
        self
    }

    pub fn fail_adds(&self, fail: bool) {
        self.lock().fail_add = fail;
    }

    /// How many calls reached the (fake) network.
    pub fn network_calls(&self) -> usize {
        self.lock().network_calls
    }

    fn lock(&self) -> MutexGuard<'_, FakeWishlistInner> {
        self.inner.lock().expect("fake wishlist lock")
    }
}

impl WishlistApi for FakeWishlistApi {
    async fn fetch(&self, _identity: &Identity) -> Result<Vec<WishlistProduct>> {
        let mut inner = self.lock();
        inner.network_calls += 1;
        Ok(inner.products.clone())
    }

    async fn add(&self, _identity: &Identity, product: ProductId) -> Result<Vec<WishlistProduct>> {
        let mut inner = self.lock();
        inner.network_calls += 1;
        if inner.fail_add {
            return Err(StoreError::Api {
                status: 500,
                message: "simulated failure".to_string(),
            });
        }
        if !inner.products.iter().any(|p| p.id == product) {
            inner.products.push(WishlistProduct {
                id: product,
                name: format!("product-{product}"),
                price: None,
                image: None,
            });
        }
        Ok(inner.products.clone())
    }

    async fn remove(&self, _identity: &Identity, product: ProductId) -> Result<()> {
        let mut inner = self.lock();
        inner.network_calls += 1;
        inner.products.retain(|p| p.id != product);
        Ok(())
    }

    async fn clear(&self, _identity: &Identity) -> Result<()> {
        let mut inner = self.lock();
        inner.network_calls += 1;
        inner.products.clear();
        Ok(())
    }
}
