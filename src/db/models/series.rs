use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Time-series collections served by the query layer.
///
/// Each one lives in its own `analytics.<name>` table keyed by
/// (token, timestamp) with the record body stored as JSONB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    History,
    Roi,
    Liquidity,
    Providers,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::History,
        Collection::Roi,
        Collection::Liquidity,
        Collection::Providers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::History => "history",
            Collection::Roi => "roi",
            Collection::Liquidity => "liquidity",
            Collection::Providers => "providers",
        }
    }

    /// Fully qualified table name. Safe to interpolate into SQL.
    pub fn table(self) -> &'static str {
        match self {
            Collection::History => "analytics.history",
            Collection::Roi => "analytics.roi",
            Collection::Liquidity => "analytics.liquidity",
            Collection::Providers => "analytics.providers",
        }
    }

    pub fn projection(self) -> Projection {
        match self {
            Collection::History => Projection::Exclude(&["_id", "token", "block"]),
            Collection::Roi => Projection::Include(&["timestamp", "roi"]),
            Collection::Liquidity => {
                Projection::Include(&["timestamp", "bnt", "token_amount", "liquidity_usd"])
            },
            Collection::Providers => Projection::Include(&["timestamp", "providers"]),
        }
    }
}

/// Field projection applied to a stored document before it is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Keep only these fields (those that are present)
    Include(&'static [&'static str]),
    /// Drop these fields, keep everything else
    Exclude(&'static [&'static str]),
}

impl Projection {
    pub fn apply(self, doc: Map<String, Value>) -> Map<String, Value> {
        match self {
            Projection::Include(fields) => {
                doc.into_iter().filter(|(k, _)| fields.contains(&k.as_str())).collect()
            },
            Projection::Exclude(fields) => {
                doc.into_iter().filter(|(k, _)| !fields.contains(&k.as_str())).collect()
            },
        }
    }
}

/// Inclusive time window for a series read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// One stored document from a time-series collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    pub timestamp: DateTime<Utc>,
    pub doc: Map<String, Value>,
}

impl SeriesRecord {
    pub fn new(timestamp: DateTime<Utc>, doc: Value) -> Self {
        let doc = match doc {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { timestamp, doc }
    }

    /// Output document: the stored body with `timestamp` (Unix seconds)
    /// written in, then projected.
    pub fn into_document(self, projection: Projection) -> Value {
        let mut doc = self.doc;
        doc.insert("timestamp".to_string(), Value::from(self.timestamp.timestamp()));
        Value::Object(projection.apply(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_include_keeps_only_present_fields() {
        let record = SeriesRecord::new(
            ts(1_600_000_000),
            json!({ "roi": 1.05, "token": "ENJ", "block": 10_000_000 }),
        );
        let out = record.into_document(Collection::Roi.projection());
        assert_eq!(out, json!({ "roi": 1.05, "timestamp": 1_600_000_000 }));
    }

    #[test]
    fn test_exclude_drops_internal_fields() {
        let record = SeriesRecord::new(
            ts(1_600_000_100),
            json!({ "_id": "abc", "token": "ENJ", "block": 1, "price": 0.12, "volume": 4200.0 }),
        );
        let out = record.into_document(Collection::History.projection());
        assert_eq!(
            out,
            json!({ "price": 0.12, "volume": 4200.0, "timestamp": 1_600_000_100 })
        );
    }

    #[test]
    fn test_stored_timestamp_is_replaced_by_row_timestamp() {
        let record = SeriesRecord::new(ts(42), json!({ "timestamp": "stale", "providers": 7 }));
        let out = record.into_document(Collection::Providers.projection());
        assert_eq!(out, json!({ "providers": 7, "timestamp": 42 }));
    }

    #[test]
    fn test_non_object_document_becomes_empty() {
        let record = SeriesRecord::new(ts(1), json!([1, 2, 3]));
        let out = record.into_document(Collection::Liquidity.projection());
        assert_eq!(out, json!({ "timestamp": 1 }));
    }

    #[test]
    fn test_every_projection_keeps_timestamp() {
        for collection in Collection::ALL {
            let out = SeriesRecord::new(ts(7), json!({})).into_document(collection.projection());
            assert_eq!(out["timestamp"], 7, "{}", collection.name());
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = TimeRange { start: ts(10), end: ts(20) };
        assert!(range.contains(ts(10)));
        assert!(range.contains(ts(20)));
        assert!(!range.contains(ts(21)));
    }
}
