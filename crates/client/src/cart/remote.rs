//! Authenticated cart gateway over the remote REST resource.
//!
//! Translates facade operations into bearer-authenticated HTTP calls and the
//! server's line-item shape into [`CartItem`]. Errors are converted to
//! [`StoreError`] at this boundary; no retries are attempted.

use heartwood_core::{LineItemId, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};
use crate::identity::Identity;

use super::types::{CartItem, CartSnapshot};

/// Operations the cart facade needs from the remote cart resource.
///
/// [`RemoteCart`] is the production implementation; tests drive the facade
/// with in-memory implementations.
pub trait CartApi {
    /// Fetch the authoritative cart.
    async fn fetch(&self, identity: &Identity) -> Result<CartSnapshot>;

    /// Add `quantity` units of a product. The server deduplicates by product
    /// and sums quantities. The response body is not trusted for item-list
    /// consistency; callers re-fetch afterwards.
    async fn add_item(&self, identity: &Identity, product: ProductId, quantity: u32) -> Result<()>;

    /// Set the quantity of an existing line item. The response body is a full
    /// cart representation, so no re-fetch is required.
    async fn update_item(
        &self,
        identity: &Identity,
        line: LineItemId,
        quantity: u32,
    ) -> Result<CartSnapshot>;

    /// Delete a line item. Callers re-fetch afterwards.
    async fn remove_item(&self, identity: &Identity, line: LineItemId) -> Result<()>;

    /// Delete the whole cart, returning the server-recomputed total.
    async fn clear(&self, identity: &Identity) -> Result<Decimal>;
}

// =============================================================================
// Wire types
// =============================================================================

/// Cart representation returned by the backend.
#[derive(Debug, Deserialize)]
pub struct CartPayload {
    #[serde(default)]
    pub items: Vec<LineItemPayload>,
    /// Cart-level total as reported by the server; adopted verbatim.
    #[serde(default)]
    pub total_price: Option<Decimal>,
}

/// One line item as returned by the backend.
#[derive(Debug, Deserialize)]
pub struct LineItemPayload {
    /// Server-assigned line-item id.
    pub id: LineItemId,
    /// Product id, needed for subsequent facade calls.
    pub product: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub sub_total: Option<Decimal>,
}

impl From<LineItemPayload> for CartItem {
    fn from(line: LineItemPayload) -> Self {
        Self {
            id: line.product,
            line_id: Some(line.id),
            name: line.product_name,
            price: line.product_price,
            image: line.product_image.unwrap_or_default(),
            quantity: line.quantity,
            subtotal: line.sub_total,
        }
    }
}

impl CartPayload {
    /// Convert into the local snapshot shape, trusting the server total.
    #[must_use]
    pub fn into_snapshot(self) -> CartSnapshot {
        CartSnapshot {
            total: self.total_price.unwrap_or_default(),
            items: self.items.into_iter().map(CartItem::from).collect(),
        }
    }
}

// =============================================================================
// RemoteCart
// =============================================================================

/// Reqwest-backed implementation of [`CartApi`].
#[derive(Debug, Clone)]
pub struct RemoteCart {
    client: reqwest::Client,
    base: String,
}

impl RemoteCart {
    /// Create a gateway against the configured backend.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a gateway reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &StorefrontConfig) -> Self {
        Self {
            client,
            base: config.api_base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/cart/", self.base)
    }

    fn line_url(&self, line: LineItemId) -> String {
        format!("{}/cart/item/{line}/", self.base)
    }
}

/// Convert a non-success response into an API error.
async fn api_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    StoreError::Api { status, message }
}

impl CartApi for RemoteCart {
    async fn fetch(&self, identity: &Identity) -> Result<CartSnapshot> {
        let response = self
            .client
            .get(self.collection_url())
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: CartPayload = response.json().await?;
        Ok(payload.into_snapshot())
    }

    async fn add_item(&self, identity: &Identity, product: ProductId, quantity: u32) -> Result<()> {
        let body = serde_json::json!({
            "product_id": product,
            "quantity": quantity,
        });

        let response = self
            .client
            .post(self.collection_url())
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    async fn update_item(
        &self,
        identity: &Identity,
        line: LineItemId,
        quantity: u32,
    ) -> Result<CartSnapshot> {
        let body = serde_json::json!({ "quantity": quantity });

        let response = self
            .client
            .put(self.line_url(line))
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: CartPayload = response.json().await?;
        Ok(payload.into_snapshot())
    }

    async fn remove_item(&self, identity: &Identity, line: LineItemId) -> Result<()> {
        let response = self
            .client
            .delete(self.line_url(line))
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    async fn clear(&self, identity: &Identity) -> Result<Decimal> {
        let response = self
            .client
            .delete(self.collection_url())
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: CartPayload = response.json().await?;
        Ok(payload.total_price.unwrap_or_default())
    }
}
