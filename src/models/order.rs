use std::collections::BTreeSet;

use serde::Deserialize;

/// Line item within an order payload
#[derive(Debug, Clone, Deserialize)]
pub struct RawLineItem {
    pub product_id: u64,
}

/// Order payload as returned by `GET /orders`
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    pub id: u64,
    pub line_items: Vec<RawLineItem>,
}

/// An order with the distinct set of products it references
///
/// Duplicate product ids within one order collapse here; an order listing the
/// same product on three lines counts it once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Order identifier
    pub invoice_id: u64,
    /// Distinct referenced product ids
    pub sku_ids: BTreeSet<u64>,
}

impl From<RawOrder> for Order {
    fn from(raw: RawOrder) -> Self {
        Self {
            invoice_id: raw.id,
            sku_ids: raw.line_items.iter().map(|item| item.product_id).collect(),
        }
    }
}

/// One (order, product) pair produced by exploding an order's product set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub invoice_id: u64,
    pub sku_id: u64,
}
