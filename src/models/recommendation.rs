use serde::{Deserialize, Serialize};

/// One row of the model-output artifact
///
/// Names refer to products by display name; they are resolved back to SKUIDs
/// against a freshly fetched catalog before upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRow {
    #[serde(rename = "Item in cart")]
    pub item_in_cart: String,
    #[serde(rename = "Recommendation")]
    pub recommendation: String,
    #[serde(rename = "Support")]
    pub support: f64,
}

/// The cross-sell list to upload for one source product
///
/// `cross_sell_ids` is ordered strongest-support first and truncated to the
/// configured top-N before this struct is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationGroup {
    /// Resolved SKUID of the "Item in cart"
    pub sku_id: u64,
    /// Resolved recommendation SKUIDs, support-descending
    pub cross_sell_ids: Vec<u64>,
}
