//! Availability answers computed against a [`Snapshot`].
//!
//! The two query shapes deliberately differ on unknown SKUs:
//! - [`query_by_sku`] omits them from the result;
//! - [`query_cart`] answers them with an explicit zero line.
//!
//! Both shapes are observed by the marketplace partner, so neither is
//! normalized into the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockgate_core::time::{rfc3339_seconds, truncate_to_seconds};

use crate::snapshot::Snapshot;

/// Stock type reported to the partner. Only fit-for-sale stock is tracked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockKind {
    #[serde(rename = "FIT")]
    Fit,
}

impl StockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockKind::Fit => "FIT",
        }
    }
}

/// Available count for one requested SKU at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQueryResult {
    pub sku: String,
    /// Echoed from the request; not checked against any warehouse registry.
    pub warehouse_id: String,
    #[serde(with = "rfc3339_seconds")]
    pub available_at: DateTime<Utc>,
    pub kind: StockKind,
    pub count: u64,
}

/// One line of a cart-availability request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Opaque partner identifier, passed through untouched.
    pub feed_id: JsonValue,
    pub offer_id: String,
    pub requested: u64,
}

/// Answer for one cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineResult {
    pub feed_id: JsonValue,
    pub offer_id: String,
    /// `min(requested, available)`, or 0 when the offer is unknown.
    pub count: u64,
    pub delivery: bool,
}

/// Look up each requested SKU; unknown SKUs are skipped.
///
/// Result order follows `skus`. `now` is truncated to whole seconds.
pub fn query_by_sku<S>(
    snapshot: &Snapshot,
    skus: &[S],
    warehouse_id: &str,
    now: DateTime<Utc>,
) -> Vec<StockQueryResult>
where
    S: AsRef<str>,
{
    let index = snapshot.index();
    let available_at = truncate_to_seconds(now);

    skus.iter()
        .filter_map(|sku| {
            let record = index.get(sku.as_ref())?;
            Some(StockQueryResult {
                sku: sku.as_ref().to_string(),
                warehouse_id: warehouse_id.to_string(),
                available_at,
                kind: StockKind::Fit,
                count: record.count,
            })
        })
        .collect()
}

/// Clamp each requested quantity to what is available.
///
/// Every input line yields exactly one output line, in input order.
pub fn query_cart(snapshot: &Snapshot, lines: &[CartLine]) -> Vec<CartLineResult> {
    let index = snapshot.index();

    lines
        .iter()
        .map(|line| {
            let count = index
                .get(&line.offer_id)
                .map(|record| line.requested.min(record.count))
                .unwrap_or(0);

            CartLineResult {
                feed_id: line.feed_id.clone(),
                offer_id: line.offer_id.clone(),
                count,
                delivery: count > 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::StockRecord;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn sample_snapshot() -> Snapshot {
        Snapshot::new(vec![StockRecord::new("A", 5), StockRecord::new("B", 0)])
    }

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap()
    }

    fn cart_line(feed_id: i64, offer_id: &str, requested: u64) -> CartLine {
        CartLine {
            feed_id: json!(feed_id),
            offer_id: offer_id.to_string(),
            requested,
        }
    }

    #[test]
    fn by_sku_omits_unknown_skus() {
        let results = query_by_sku(&sample_snapshot(), &["A", "B", "C"], "wh-1", test_time());

        let pairs: Vec<(&str, u64)> = results.iter().map(|r| (r.sku.as_str(), r.count)).collect();
        assert_eq!(pairs, vec![("A", 5), ("B", 0)]);
        assert!(results.iter().all(|r| r.warehouse_id == "wh-1"));
        assert!(results.iter().all(|r| r.kind == StockKind::Fit));
    }

    #[test]
    fn by_sku_follows_request_order_and_repeats() {
        let results = query_by_sku(&sample_snapshot(), &["B", "A", "B"], "wh-1", test_time());
        let skus: Vec<&str> = results.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["B", "A", "B"]);
    }

    #[test]
    fn by_sku_truncates_query_time() {
        let now = test_time() + chrono::Duration::milliseconds(999);
        let results = query_by_sku(&sample_snapshot(), &["A"], "wh-1", now);
        assert_eq!(results[0].available_at, test_time());

        let wire = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(wire["available_at"], json!("2024-05-17T09:00:00+00:00"));
        assert_eq!(wire["kind"], json!("FIT"));
    }

    #[test]
    fn cart_clamps_and_zero_fills() {
        let results = query_cart(
            &sample_snapshot(),
            &[cart_line(1, "A", 3), cart_line(2, "C", 1)],
        );

        assert_eq!(
            results,
            vec![
                CartLineResult {
                    feed_id: json!(1),
                    offer_id: "A".to_string(),
                    count: 3,
                    delivery: true,
                },
                CartLineResult {
                    feed_id: json!(2),
                    offer_id: "C".to_string(),
                    count: 0,
                    delivery: false,
                },
            ]
        );
    }

    #[test]
    fn cart_caps_at_available_and_reports_no_delivery_for_empty_stock() {
        let results = query_cart(
            &sample_snapshot(),
            &[cart_line(7, "A", 50), cart_line(8, "B", 2)],
        );

        assert_eq!(results[0].count, 5);
        assert!(results[0].delivery);
        assert_eq!(results[1].count, 0);
        assert!(!results[1].delivery);
    }

    #[test]
    fn cart_passes_feed_id_through_verbatim() {
        let line = CartLine {
            feed_id: json!("feed-42"),
            offer_id: "A".to_string(),
            requested: 1,
        };
        let results = query_cart(&sample_snapshot(), &[line]);
        assert_eq!(results[0].feed_id, json!("feed-42"));
    }

    fn arb_snapshot() -> impl Strategy<Value = HashMap<String, u64>> {
        prop::collection::hash_map("[A-F]{1,2}", 0u64..20, 0..12)
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: by-SKU results are exactly the requested SKUs present in
        /// the snapshot, with their stored counts, in request order.
        #[test]
        fn by_sku_returns_exactly_present_skus(
            stock in arb_snapshot(),
            requested in prop::collection::vec("[A-F]{1,2}", 0..16),
        ) {
            let snapshot = Snapshot::new(
                stock.iter().map(|(sku, count)| StockRecord::new(sku.clone(), *count)).collect(),
            );

            let results = query_by_sku(&snapshot, &requested, "wh", test_time());

            let expected: Vec<(String, u64)> = requested
                .iter()
                .filter_map(|sku| stock.get(sku).map(|c| (sku.clone(), *c)))
                .collect();
            let actual: Vec<(String, u64)> =
                results.into_iter().map(|r| (r.sku, r.count)).collect();

            prop_assert_eq!(actual, expected);
        }

        /// Property: each cart line yields one result with
        /// `count = min(requested, available)` (0 if absent) and
        /// `delivery = count > 0`.
        #[test]
        fn cart_clamps_every_line(
            stock in arb_snapshot(),
            lines in prop::collection::vec(("[A-F]{1,2}", 0u64..30), 0..16),
        ) {
            let snapshot = Snapshot::new(
                stock.iter().map(|(sku, count)| StockRecord::new(sku.clone(), *count)).collect(),
            );
            let cart: Vec<CartLine> = lines
                .iter()
                .enumerate()
                .map(|(i, (sku, requested))| CartLine {
                    feed_id: json!(i),
                    offer_id: sku.clone(),
                    requested: *requested,
                })
                .collect();

            let results = query_cart(&snapshot, &cart);
            prop_assert_eq!(results.len(), cart.len());

            for (line, result) in cart.iter().zip(&results) {
                let expected = stock
                    .get(&line.offer_id)
                    .map(|available| line.requested.min(*available))
                    .unwrap_or(0);
                prop_assert_eq!(&result.feed_id, &line.feed_id);
                prop_assert_eq!(&result.offer_id, &line.offer_id);
                prop_assert_eq!(result.count, expected);
                prop_assert_eq!(result.delivery, expected > 0);
            }
        }
    }
}
