use serde::{Deserialize, Serialize};

/// One row of the exported training table
///
/// Both identifiers are carried as text so the artifact never renders a large
/// id in scientific notation downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingRow {
    #[serde(rename = "InvoiceID")]
    pub invoice_id: String,
    #[serde(rename = "SKUID")]
    pub sku_id: String,
    #[serde(rename = "Item")]
    pub item: String,
}
