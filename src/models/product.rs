use serde::{Deserialize, Serialize};

/// Product payload as returned by `GET /products`
///
/// Only the fields the pipeline needs; everything else in the API response is
/// ignored at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: u64,
    pub name: String,
}

/// A catalog product
///
/// `item` is the display name uppercased at ingestion so joins against model
/// output (which carries uppercased names) are stable.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Product {
    /// Catalog-assigned product identifier
    pub sku_id: u64,
    /// Display name, uppercased
    pub item: String,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Self {
            sku_id: raw.id,
            item: raw.name.to_uppercase(),
        }
    }
}
