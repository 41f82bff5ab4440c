//! PostgreSQL cache entry repository implementation.

use crate::{pool::DatabasePool, traits::CacheEntryRepository};
use async_trait::async_trait;
use caresphere_core::{CacheEntry, CareResult};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL cache entry repository implementation.
#[derive(Clone)]
pub struct PgCacheEntryRepository {
    pool: Arc<DatabasePool>,
}

impl PgCacheEntryRepository {
    /// Creates a new PostgreSQL cache entry repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a cache entry.
#[derive(Debug, FromRow)]
struct CacheEntryRow {
    id: Uuid,
    cache_key: String,
    provider: String,
    resource_type: String,
    payload: serde_json::Value,
    expires_at: DateTime<Utc>,
    hit_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CacheEntryRow> for CacheEntry {
    fn from(row: CacheEntryRow) -> Self {
        CacheEntry {
            id: row.id,
            cache_key: row.cache_key,
            provider: row.provider,
            resource_type: row.resource_type,
            payload: row.payload,
            expires_at: row.expires_at,
            hit_count: row.hit_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CacheEntryRepository for PgCacheEntryRepository {
    async fn find_by_key(&self, cache_key: &str) -> CareResult<Option<CacheEntry>> {
        debug!("Finding cache entry by key: {}", cache_key);

        let row = sqlx::query_as::<_, CacheEntryRow>(
            r#"
            SELECT id, cache_key, provider, resource_type, payload,
                   expires_at, hit_count, created_at, updated_at
            FROM cache_entries
            WHERE cache_key = $1
            "#,
        )
        .bind(cache_key)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(CacheEntry::from))
    }

    async fn upsert(&self, entry: &CacheEntry) -> CareResult<CacheEntry> {
        debug!("Upserting cache entry: {}", entry.cache_key);

        // A refresh replaces the payload in place and resets the hit counter;
        // created_at keeps the original insertion time.
        let row = sqlx::query_as::<_, CacheEntryRow>(
            r#"
            INSERT INTO cache_entries (id, cache_key, provider, resource_type, payload,
                                       expires_at, hit_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (cache_key) DO UPDATE
            SET provider = EXCLUDED.provider,
                resource_type = EXCLUDED.resource_type,
                payload = EXCLUDED.payload,
                expires_at = EXCLUDED.expires_at,
                hit_count = 0,
                updated_at = EXCLUDED.updated_at
            RETURNING id, cache_key, provider, resource_type, payload,
                      expires_at, hit_count, created_at, updated_at
            "#,
        )
        .bind(entry.id)
        .bind(&entry.cache_key)
        .bind(&entry.provider)
        .bind(&entry.resource_type)
        .bind(&entry.payload)
        .bind(entry.expires_at)
        .bind(entry.hit_count)
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(CacheEntry::from(row))
    }

    async fn increment_hit_count(&self, cache_key: &str) -> CareResult<()> {
        // Does not touch updated_at; that column tracks payload refreshes.
        sqlx::query("UPDATE cache_entries SET hit_count = hit_count + 1 WHERE cache_key = $1")
            .bind(cache_key)
            .execute(self.pool.inner())
            .await?;

        Ok(())
    }
}

impl std::fmt::Debug for PgCacheEntryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCacheEntryRepository").finish_non_exhaustive()
    }
}
