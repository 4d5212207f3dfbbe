//! WooCommerce REST API client
//!
//! The pipeline only needs two operations from the store: paginated reads of a
//! listing endpoint and per-product cross-sell updates. Everything goes through
//! the `StoreApi` trait so the transformation stages can be tested against a
//! scripted double.

use reqwest::Client as HttpClient;
use serde_json::json;

use crate::error::{AppError, AppResult};

const API_VERSION: &str = "wc/v3";

/// Narrow interface to the e-commerce store
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetch one page of a listing endpoint (`products`, `orders`)
    ///
    /// Returns the raw JSON records of that page; an empty vec means the
    /// listing is exhausted.
    async fn fetch_page(
        &self,
        endpoint: &str,
        page: u32,
        per_page: u32,
    ) -> AppResult<Vec<serde_json::Value>>;

    /// Replace one product's cross-sell list
    async fn update_cross_sells(&self, product_id: u64, cross_sell_ids: &[u64]) -> AppResult<()>;
}

/// Production `StoreApi` backed by the WooCommerce REST API
///
/// Credentials ride as query parameters on every request, the same way the
/// store's own integrations authenticate over HTTPS. One client/session is
/// reused serially across all calls in a run.
#[derive(Clone)]
pub struct WooClient {
    http_client: HttpClient,
    base_url: String,
    consumer_key: String,
    consumer_secret: String,
}

impl WooClient {
    pub fn new(base_url: String, consumer_key: String, consumer_secret: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            consumer_key,
            consumer_secret,
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/wp-json/{}/{}",
            self.base_url.trim_end_matches('/'),
            API_VERSION,
            path
        )
    }
}

#[async_trait::async_trait]
impl StoreApi for WooClient {
    async fn fetch_page(
        &self,
        endpoint: &str,
        page: u32,
        per_page: u32,
    ) -> AppResult<Vec<serde_json::Value>> {
        let url = self.endpoint_url(endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("consumer_key", self.consumer_key.as_str()),
                ("consumer_secret", self.consumer_secret.as_str()),
            ])
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(format!(
                "Store API returned status {} for {}: {}",
                status, endpoint, body
            )));
        }

        let payload: serde_json::Value = response.json().await?;
        match payload {
            serde_json::Value::Array(records) => Ok(records),
            other => Err(AppError::Api(format!(
                "Expected a JSON array from {}, got {}",
                endpoint,
                json_type_name(&other)
            ))),
        }
    }

    async fn update_cross_sells(&self, product_id: u64, cross_sell_ids: &[u64]) -> AppResult<()> {
        let url = self.endpoint_url(&format!("products/{}", product_id));

        let response = self
            .http_client
            .put(&url)
            .query(&[
                ("consumer_key", self.consumer_key.as_str()),
                ("consumer_secret", self.consumer_secret.as_str()),
            ])
            .json(&json!({ "cross_sell_ids": cross_sell_ids }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(format!(
                "Store API returned status {} updating product {}: {}",
                status, product_id, body
            )));
        }

        // The store echoes the updated product back; a parseable body is all
        // we check for.
        let _: serde_json::Value = response.json().await?;

        tracing::debug!(
            product_id = product_id,
            cross_sell_count = cross_sell_ids.len(),
            "Cross-sell list updated"
        );

        Ok(())
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a bool",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
