//! Cached provider payload entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One cached payload from a remote content provider.
///
/// At most one row exists per `cache_key`. Rows are created on the first
/// miss, superseded in place on refresh (payload replaced, hit count reset),
/// and never explicitly deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Row identifier.
    pub id: Uuid,

    /// Unique resource description string, e.g. `verse:web:JHN.3.16`.
    pub cache_key: String,

    /// Provider that produced the payload.
    pub provider: String,

    /// Resource category label, for observability.
    pub resource_type: String,

    /// The cached JSON payload.
    pub payload: Value,

    /// Instant after which the payload is stale.
    pub expires_at: DateTime<Utc>,

    /// Number of reads served from this row since the last refresh.
    pub hit_count: i64,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last refresh timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates a fresh entry expiring `ttl` from now.
    #[must_use]
    pub fn new(
        cache_key: impl Into<String>,
        provider: impl Into<String>,
        resource_type: impl Into<String>,
        payload: Value,
        ttl: std::time::Duration,
    ) -> Self {
        let now = Utc::now();
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::seconds(0));
        Self {
            id: Uuid::now_v7(),
            cache_key: cache_key.into(),
            provider: provider.into(),
            resource_type: resource_type.into(),
            payload,
            expires_at: now + ttl,
            hit_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the entry is still fresh at `now`.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Whether the entry is still fresh.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_entry_is_fresh() {
        let entry = CacheEntry::new(
            "verse:web:GEN.1.1",
            "bible-api",
            "verse",
            json!({"reference": "GEN.1.1"}),
            std::time::Duration::from_secs(3600),
        );
        assert!(entry.is_fresh());
        assert_eq!(entry.hit_count, 0);
    }

    #[test]
    fn test_zero_ttl_entry_is_stale() {
        let entry = CacheEntry::new(
            "verse:web:GEN.1.1",
            "bible-api",
            "verse",
            json!(null),
            std::time::Duration::from_secs(0),
        );
        // expires_at == created_at, and freshness requires strictly greater.
        assert!(!entry.is_fresh_at(entry.expires_at));
    }

    #[test]
    fn test_freshness_boundary() {
        let entry = CacheEntry::new(
            "books:web",
            "bible-api",
            "books",
            json!([]),
            std::time::Duration::from_secs(60),
        );
        let just_before = entry.expires_at - Duration::seconds(1);
        let just_after = entry.expires_at + Duration::seconds(1);
        assert!(entry.is_fresh_at(just_before));
        assert!(!entry.is_fresh_at(just_after));
    }
}
