//! Training table builder
//!
//! Turns the fully paginated order and product collections into the flat
//! relation the model trains on: explode each order into one line per distinct
//! product, inner-join against the catalog on SKUID, sort by InvoiceID, then
//! coerce the ids to text for the artifact. Each stage is a pure function over
//! an explicit relation so the stages can be tested in isolation.

use std::collections::HashMap;

use crate::error::AppResult;
use crate::models::{Order, OrderLine, Product, TrainingRow};

/// The built relation plus the rows the join discarded
///
/// `dropped` counts order lines whose SKUID had no catalog match, which
/// happens when a product has been retired or deleted. Losing them is accepted
/// behavior, but the count is surfaced so it never disappears silently.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    pub rows: Vec<TrainingRow>,
    pub dropped: usize,
}

/// Flatten orders into one line per (order, distinct product) pair
///
/// An order with no line items contributes nothing.
pub fn explode_orders(orders: &[Order]) -> Vec<OrderLine> {
    orders
        .iter()
        .flat_map(|order| {
            order.sku_ids.iter().map(|&sku_id| OrderLine {
                invoice_id: order.invoice_id,
                sku_id,
            })
        })
        .collect()
}

/// Inner-join order lines with the catalog on SKUID
///
/// Returns the joined rows (still numeric, unsorted) and the count of lines
/// dropped for lack of a catalog match.
pub fn join_products(lines: &[OrderLine], products: &[Product]) -> (Vec<JoinedLine>, usize) {
    let by_sku: HashMap<u64, &str> = products
        .iter()
        .map(|p| (p.sku_id, p.item.as_str()))
        .collect();

    let mut joined = Vec::with_capacity(lines.len());
    let mut dropped = 0;

    for line in lines {
        match by_sku.get(&line.sku_id) {
            Some(item) => joined.push(JoinedLine {
                invoice_id: line.invoice_id,
                sku_id: line.sku_id,
                item: (*item).to_string(),
            }),
            None => dropped += 1,
        }
    }

    (joined, dropped)
}

/// An order line with its catalog name attached, before text coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedLine {
    pub invoice_id: u64,
    pub sku_id: u64,
    pub item: String,
}

/// Run the full explode → join → sort → coerce pipeline
pub fn build_training_table(orders: &[Order], products: &[Product]) -> TrainingTable {
    let lines = explode_orders(orders);
    let (mut joined, dropped) = join_products(&lines, products);

    // Stable: ties keep their pre-sort relative order.
    joined.sort_by_key(|line| line.invoice_id);

    let rows = joined
        .into_iter()
        .map(|line| TrainingRow {
            invoice_id: line.invoice_id.to_string(),
            sku_id: line.sku_id.to_string(),
            item: line.item,
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(
            dropped = dropped,
            "Order lines dropped at join: no matching catalog product"
        );
    }

    TrainingTable { rows, dropped }
}

/// Serialize the table as the CSV training artifact
pub fn to_csv(table: &TrainingTable) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &table.rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::error::AppError::Storage(format!("flush training csv: {}", e)))
}
