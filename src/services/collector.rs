//! Paginated listing collector
//!
//! One pagination loop serves every listing endpoint: the caller supplies the
//! endpoint name and a projection that turns a raw JSON record into a typed
//! one. Pages are requested from 1 upward until the store returns an empty
//! page. No dedup across pages; the store is trusted not to repeat or skip
//! records. Any transport error or malformed record aborts the whole fetch.

use crate::error::{AppError, AppResult};
use crate::models::{Order, Product, RawOrder, RawProduct};
use crate::services::store_api::StoreApi;

pub async fn collect_all<T, F>(
    api: &dyn StoreApi,
    endpoint: &str,
    per_page: u32,
    project: F,
) -> AppResult<Vec<T>>
where
    F: Fn(serde_json::Value) -> AppResult<T>,
{
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let batch = api.fetch_page(endpoint, page, per_page).await?;
        if batch.is_empty() {
            break;
        }

        tracing::debug!(endpoint = %endpoint, page = page, records = batch.len(), "Page fetched");

        for raw in batch {
            records.push(project(raw)?);
        }
        page += 1;
    }

    tracing::info!(
        endpoint = %endpoint,
        pages = page - 1,
        records = records.len(),
        "Listing fully paginated"
    );

    Ok(records)
}

/// Fetch the complete product catalog
pub async fn fetch_products(api: &dyn StoreApi, per_page: u32) -> AppResult<Vec<Product>> {
    collect_all(api, "products", per_page, |raw| {
        serde_json::from_value::<RawProduct>(raw)
            .map(Product::from)
            .map_err(|e| AppError::Api(format!("Malformed product payload: {}", e)))
    })
    .await
}

/// Fetch the complete order history
pub async fn fetch_orders(api: &dyn StoreApi, per_page: u32) -> AppResult<Vec<Order>> {
    collect_all(api, "orders", per_page, |raw| {
        serde_json::from_value::<RawOrder>(raw)
            .map(Order::from)
            .map_err(|e| AppError::Api(format!("Malformed order payload: {}", e)))
    })
    .await
}
