//! Remote wishlist gateway.

use heartwood_core::ProductId;
use serde::Deserialize;

use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};
use crate::identity::Identity;

use super::WishlistProduct;

/// Operations the wishlist state container needs from the remote resource.
pub trait WishlistApi {
    /// Fetch the full wishlist.
    async fn fetch(&self, identity: &Identity) -> Result<Vec<WishlistProduct>>;

    /// Add a product; the response carries the updated wishlist.
    async fn add(&self, identity: &Identity, product: ProductId) -> Result<Vec<WishlistProduct>>;

    /// Remove a single product.
    async fn remove(&self, identity: &Identity, product: ProductId) -> Result<()>;

    /// Remove every product.
    async fn clear(&self, identity: &Identity) -> Result<()>;
}

/// Wishlist representation returned by the backend.
#[derive(Debug, Deserialize)]
pub struct WishlistPayload {
    #[serde(default)]
    pub products: Vec<WishlistProduct>,
}

/// Reqwest-backed implementation of [`WishlistApi`].
#[derive(Debug, Clone)]
pub struct RemoteWishlist {
    client: reqwest::Client,
    base: String,
}

impl RemoteWishlist {
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
        format!("{}/products/wishlist/", self.base)
    }

    fn product_url(&self, product: ProductId) -> String {
        format!("{}/products/wishlist/{product}/", self.base)
    }
}

async fn api_error(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    StoreError::Api { status, message }
}

impl WishlistApi for RemoteWishlist {
    async fn fetch(&self, identity: &Identity) -> Result<Vec<WishlistProduct>> {
        let response = self
            .client
            .get(self.collection_url())
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let payload: WishlistPayload = response.json().await?;
        Ok(payload.products)
    }

    async fn add(&self, identity: &Identity, product: ProductId) -> Result<Vec<WishlistProduct>> {
        let body = serde_json::json!({ "product_id": product });

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

        let payload: WishlistPayload = response.json().await?;
        Ok(payload.products)
    }

    async fn remove(&self, identity: &Identity, product: ProductId) -> Result<()> {
        let response = self
            .client
            .delete(self.product_url(product))
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }

    async fn clear(&self, identity: &Identity) -> Result<()> {
        let response = self
            .client
            .delete(self.collection_url())
            .header(reqwest::header::AUTHORIZATION, identity.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(())
    }
}
