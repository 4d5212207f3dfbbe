//! Recommendation publisher
//!
//! Takes the model-output artifact (name, name, support) and a freshly fetched
//! catalog, resolves names back to SKUIDs, keeps the top-N strongest
//! recommendations per source product, and uploads one cross-sell list per
//! product. Uploads run strictly one at a time; a failed upload is recorded
//! and the remaining groups still run, so a partial failure surfaces as an
//! aggregate report instead of a half-finished run with no trace.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::AppResult;
use crate::models::{Product, RecommendationGroup, RecommendationRow};
use crate::services::store_api::StoreApi;

/// Names the model emitted that the current catalog could not resolve
///
/// The catalog may have changed between export and publish, so gaps here are
/// expected operational noise, not errors. An unresolved source name drops the
/// whole row; an unresolved recommendation drops just that entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionGaps {
    pub unresolved_items: usize,
    pub unresolved_recommendations: usize,
}

/// Outcome of one publish run
#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    /// Products whose cross-sell list was updated, in upload order
    pub updated: Vec<u64>,
    /// Products whose update call failed, with the error text
    pub failed: Vec<(u64, String)>,
    pub gaps: ResolutionGaps,
}

/// Parse the model-output CSV artifact
pub fn read_recommendations(bytes: &[u8]) -> AppResult<Vec<RecommendationRow>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();
    for record in reader.deserialize::<RecommendationRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Build the name → SKUID lookup from the current catalog
///
/// Product names are assumed unique; when they are not, the last fetched
/// product wins, matching how the catalog itself resolves the ambiguity.
pub fn build_lookup(products: &[Product]) -> HashMap<String, u64> {
    let mut lookup = HashMap::with_capacity(products.len());
    for product in products {
        if let Some(previous) = lookup.insert(product.item.clone(), product.sku_id) {
            tracing::debug!(
                item = %product.item,
                previous_sku = previous,
                sku = product.sku_id,
                "Duplicate product name in catalog, keeping the later one"
            );
        }
    }
    lookup
}

/// Resolve names, rank, truncate to top-N, and collapse into upload groups
///
/// Rows are sorted by (source SKUID descending, support descending): the first
/// key clusters each source product's rows together, the second ranks its
/// recommendations strongest first. Group order itself carries no meaning.
pub fn resolve_and_group(
    rows: &[RecommendationRow],
    products: &[Product],
    top_n: usize,
) -> (Vec<RecommendationGroup>, ResolutionGaps) {
    let lookup = build_lookup(products);
    let mut gaps = ResolutionGaps::default();

    let mut resolved: Vec<(u64, u64, f64)> = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(&item_sku) = lookup.get(&row.item_in_cart) else {
            gaps.unresolved_items += 1;
            continue;
        };
        let Some(&rec_sku) = lookup.get(&row.recommendation) else {
            gaps.unresolved_recommendations += 1;
            continue;
        };
        resolved.push((item_sku, rec_sku, row.support));
    }

    resolved.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
    });

    let mut groups: Vec<RecommendationGroup> = Vec::new();
    for (item_sku, rec_sku, _) in resolved {
        match groups.last_mut() {
            Some(group) if group.sku_id == item_sku => {
                if group.cross_sell_ids.len() < top_n {
                    group.cross_sell_ids.push(rec_sku);
                }
            }
            _ => {
                // The limit applies to the first entry too.
                let cross_sell_ids = if top_n > 0 { vec![rec_sku] } else { Vec::new() };
                groups.push(RecommendationGroup {
                    sku_id: item_sku,
                    cross_sell_ids,
                });
            }
        }
    }

    if gaps.unresolved_items > 0 || gaps.unresolved_recommendations > 0 {
        tracing::warn!(
            unresolved_items = gaps.unresolved_items,
            unresolved_recommendations = gaps.unresolved_recommendations,
            "Model output references names absent from the current catalog"
        );
    }

    (groups, gaps)
}

/// Upload one cross-sell list per group, sequentially
pub async fn publish(
    api: &dyn StoreApi,
    groups: &[RecommendationGroup],
    gaps: ResolutionGaps,
) -> PublishReport {
    let mut report = PublishReport {
        gaps,
        ..Default::default()
    };

    for group in groups {
        match api.update_cross_sells(group.sku_id, &group.cross_sell_ids).await {
            Ok(()) => report.updated.push(group.sku_id),
            Err(e) => {
                tracing::error!(
                    product_id = group.sku_id,
                    error = %e,
                    "Cross-sell update failed, continuing with remaining products"
                );
                report.failed.push((group.sku_id, e.to_string()));
            }
        }
    }

    if report.failed.is_empty() {
        tracing::info!(updated = report.updated.len(), "All cross-sell lists updated");
    } else {
        tracing::warn!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "Partial publish failure"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::store_api::MockStoreApi;

    fn product(sku_id: u64, item: &str) -> Product {
        Product {
            sku_id,
            item: item.to_string(),
        }
    }

    fn rec(item: &str, recommendation: &str, support: f64) -> RecommendationRow {
        RecommendationRow {
            item_in_cart: item.to_string(),
            recommendation: recommendation.to_string(),
            support,
        }
    }

    #[test]
    fn test_read_recommendations_parses_artifact_headers() {
        let csv = b"Item in cart,Recommendation,Support\nWIDGET,GADGET,0.8\n";
        let rows = read_recommendations(csv).unwrap();
        assert_eq!(rows, vec![rec("WIDGET", "GADGET", 0.8)]);
    }

    #[test]
    fn test_top_n_keeps_strongest_in_order() {
        let products = vec![
            product(1, "A"),
            product(2, "B"),
            product(3, "C"),
            product(4, "D"),
            product(5, "E"),
            product(6, "F"),
        ];
        let rows = vec![
            rec("A", "B", 9.0),
            rec("A", "C", 3.0),
            rec("A", "D", 7.0),
            rec("A", "E", 1.0),
            rec("A", "F", 5.0),
        ];

        let (groups, gaps) = resolve_and_group(&rows, &products, 3);
        assert_eq!(gaps, ResolutionGaps::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].sku_id, 1);
        // Supports 9, 7, 5 → products B, D, F.
        assert_eq!(groups[0].cross_sell_ids, vec![2, 4, 6]);
    }

    #[test]
    fn test_top_n_zero_yields_empty_lists() {
        let products = vec![product(1, "A"), product(2, "B")];
        let rows = vec![rec("A", "B", 0.9)];

        let (groups, gaps) = resolve_and_group(&rows, &products, 0);
        assert_eq!(gaps, ResolutionGaps::default());
        assert!(groups.iter().all(|g| g.cross_sell_ids.is_empty()));
    }

    #[test]
    fn test_groups_cluster_by_source_item() {
        let products = vec![product(1, "A"), product(2, "B"), product(3, "C")];
        let rows = vec![
            rec("A", "B", 0.5),
            rec("B", "C", 0.9),
            rec("A", "C", 0.7),
        ];

        let (groups, _) = resolve_and_group(&rows, &products, 10);
        assert_eq!(groups.len(), 2);
        // Source ids descending: B's group first, then A's.
        assert_eq!(groups[0].sku_id, 2);
        assert_eq!(groups[0].cross_sell_ids, vec![3]);
        assert_eq!(groups[1].sku_id, 1);
        assert_eq!(groups[1].cross_sell_ids, vec![3, 2]);
    }

    #[test]
    fn test_unresolved_names_are_counted_not_fatal() {
        let products = vec![product(1, "A"), product(2, "B")];
        let rows = vec![
            rec("GHOST", "B", 0.9),
            rec("A", "GHOST", 0.8),
            rec("A", "B", 0.7),
        ];

        let (groups, gaps) = resolve_and_group(&rows, &products, 10);
        assert_eq!(gaps.unresolved_items, 1);
        assert_eq!(gaps.unresolved_recommendations, 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].cross_sell_ids, vec![2]);
    }

    #[test]
    fn test_name_collision_last_writer_wins() {
        let products = vec![product(1, "A"), product(9, "A"), product(2, "B")];
        let lookup = build_lookup(&products);
        assert_eq!(lookup.get("A"), Some(&9));
    }

    #[tokio::test]
    async fn test_publish_isolates_per_group_failures() {
        let groups = vec![
            RecommendationGroup {
                sku_id: 2,
                cross_sell_ids: vec![3],
            },
            RecommendationGroup {
                sku_id: 1,
                cross_sell_ids: vec![2, 3],
            },
        ];

        let mut api = MockStoreApi::new();
        api.expect_update_cross_sells()
            .times(2)
            .returning(|product_id, _| {
                if product_id == 2 {
                    Err(AppError::Api("500".to_string()))
                } else {
                    Ok(())
                }
            });

        let report = publish(&api, &groups, ResolutionGaps::default()).await;
        assert_eq!(report.updated, vec![1]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 2);
    }
}
