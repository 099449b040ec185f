//! Read-only product catalog client.
//!
//! Listings are paginated and filterable server-side; responses are cached
//! in-memory with a 5-minute TTL so repeated page views don't refetch.

use std::time::Duration;

use heartwood_core::ProductId;
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};

const CACHE_CAPACITY: u64 = 100;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// A catalog product as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductPage {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Product>,
}

/// Cached client for product listings. No authentication required.
#[derive(Debug, Clone)]
pub struct Catalog {
    client: reqwest::Client,
    base: String,
    cache: Cache<String, ProductPage>,
}

impl Catalog {
    /// Create a catalog client against the configured backend.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            client: reqwest::Client::new(),
            base: config.api_base_url.as_str().trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Fetch one page of products, optionally filtered (e.g. by category or
    /// search term). Filter pairs with empty values are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a
    /// malformed response body.
    pub async fn products(&self, page: u32, filters: &[(&str, &str)]) -> Result<ProductPage> {
        let mut params: Vec<(String, String)> = vec![("page".to_string(), page.to_string())];
        for (key, value) in filters {
            if !value.is_empty() {
                params.push(((*key).to_string(), (*value).to_string()));
            }
        }

        let cache_key = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        if let Some(hit) = self.cache.get(&cache_key).await {
            return Ok(hit);
        }

        let response = self
            .client
            .get(format!("{}/products/products/", self.base))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, message });
        }

        let listing: ProductPage = response.json().await?;
        self.cache.insert(cache_key, listing.clone()).await;
        Ok(listing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_page_parses() {
        let page: ProductPage = serde_json::from_str(
            r#"{
                "count": 2,
                "next": "/api/products/products/?page=2",
                "previous": null,
                "results": [
                    {"id": 7, "name": "Sverre Oak Chair", "price": "2500.00",
                     "image": "/media/products/chair.webp", "category": "seating"},
                    {"id": 3, "name": "Brass Floor Lamp", "price": "120.50"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.next.as_deref(), Some("/api/products/products/?page=2"));
        let chair = page.results.first().unwrap();
        assert_eq!(chair.id, ProductId::new(7));
        assert_eq!(chair.category.as_deref(), Some("seating"));
        assert_eq!(page.results.get(1).unwrap().image, None);
    }
}
