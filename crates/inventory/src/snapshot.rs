use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use stockgate_core::{DomainError, DomainResult};

/// Available count for one SKU, as pushed by the upstream warehouse feed.
///
/// Fields other than `sku` and `count` are kept verbatim so that a snapshot
/// written and read back is identical to what the supplier sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub sku: String,
    pub count: u64,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl StockRecord {
    pub fn new(sku: impl Into<String>, count: u64) -> Self {
        Self {
            sku: sku.into(),
            count,
            extra: Map::new(),
        }
    }
}

/// The single live set of per-SKU stock counts.
///
/// Replaced wholesale; there is no partial update. SKU uniqueness is the
/// producer's responsibility: duplicates are kept as-is and lookups return the
/// first record in scan order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<StockRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<StockRecord>) -> Self {
        Self { records }
    }

    /// Validate a raw upstream payload.
    ///
    /// Accepts a JSON array whose elements each carry a non-empty string `sku`
    /// and a non-negative integer `count`. Anything else is a validation error
    /// naming the offending element.
    pub fn from_json(value: JsonValue) -> DomainResult<Self> {
        let items = match value {
            JsonValue::Array(items) => items,
            JsonValue::Null => return Err(DomainError::validation("snapshot payload is missing")),
            _ => {
                return Err(DomainError::validation(
                    "snapshot must be a JSON array of stock records",
                ));
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            let record: StockRecord = serde_json::from_value(item).map_err(|e| {
                DomainError::validation(format!("stock record at index {idx}: {e}"))
            })?;
            if record.sku.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "stock record at index {idx}: sku cannot be empty"
                )));
            }
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build a SKU index for one query batch.
    pub fn index(&self) -> SkuIndex<'_> {
        let mut by_sku = HashMap::with_capacity(self.records.len());
        for record in &self.records {
            // Keep the first occurrence.
            if let Entry::Vacant(slot) = by_sku.entry(record.sku.as_str()) {
                slot.insert(record);
            }
        }
        SkuIndex { by_sku }
    }
}

/// Borrowed SKU → record map over a [`Snapshot`].
#[derive(Debug)]
pub struct SkuIndex<'a> {
    by_sku: HashMap<&'a str, &'a StockRecord>,
}

impl<'a> SkuIndex<'a> {
    pub fn get(&self, sku: &str) -> Option<&'a StockRecord> {
        self.by_sku.get(sku).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_accepts_records_and_keeps_extra_fields() {
        let snapshot = Snapshot::from_json(json!([
            {"sku": "A", "count": 5, "warehouse": "msk-1"},
            {"sku": "B", "count": 0},
        ]))
        .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.records()[0].extra.get("warehouse"), Some(&json!("msk-1")));

        let back = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(back[0]["warehouse"], json!("msk-1"));
        assert_eq!(back[1], json!({"sku": "B", "count": 0}));
    }

    #[test]
    fn from_json_rejects_non_array() {
        let err = Snapshot::from_json(json!({"sku": "A", "count": 1})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = Snapshot::from_json(JsonValue::Null).unwrap_err();
        assert_eq!(err, DomainError::validation("snapshot payload is missing"));
    }

    #[test]
    fn from_json_rejects_negative_count() {
        let err = Snapshot::from_json(json!([{"sku": "A", "count": -1}])).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("index 0")),
            _ => panic!("Expected Validation error for negative count"),
        }
    }

    #[test]
    fn from_json_rejects_missing_or_empty_sku() {
        let err = Snapshot::from_json(json!([{"sku": "A", "count": 1}, {"count": 1}])).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("index 1")),
            _ => panic!("Expected Validation error for missing sku"),
        }

        let err = Snapshot::from_json(json!([{"sku": "  ", "count": 1}])).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("sku cannot be empty")),
            _ => panic!("Expected Validation error for empty sku"),
        }
    }

    #[test]
    fn empty_array_is_a_valid_snapshot() {
        let snapshot = Snapshot::from_json(json!([])).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn index_keeps_first_duplicate() {
        let snapshot = Snapshot::new(vec![
            StockRecord::new("A", 1),
            StockRecord::new("A", 9),
        ]);

        assert_eq!(snapshot.index().get("A").map(|r| r.count), Some(1));
        assert!(snapshot.index().get("Z").is_none());
    }
}
