//! PostgreSQL verse-of-day repository implementation.

use crate::{pool::DatabasePool, traits::VerseOfDayRepository};
use async_trait::async_trait;
use caresphere_core::{CareResult, OrganizationId, UserId, VerseOfDay};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL verse-of-day repository implementation.
#[derive(Clone)]
pub struct PgVerseOfDayRepository {
    pool: Arc<DatabasePool>,
}

impl PgVerseOfDayRepository {
    /// Creates a new PostgreSQL verse-of-day repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a verse-of-day entry.
#[derive(Debug, FromRow)]
struct VerseOfDayRow {
    id: Uuid,
    organization_id: Uuid,
    scheduled_date: NaiveDate,
    reference: String,
    translation_id: String,
    verse_text: String,
    is_automatic: bool,
    set_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VerseOfDayRow> for VerseOfDay {
    fn from(row: VerseOfDayRow) -> Self {
        VerseOfDay {
            id: row.id,
            organization_id: OrganizationId::from_uuid(row.organization_id),
            scheduled_date: row.scheduled_date,
            reference: row.reference,
            translation_id: row.translation_id,
            verse_text: row.verse_text,
            is_automatic: row.is_automatic,
            set_by: row.set_by.map(UserId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl VerseOfDayRepository for PgVerseOfDayRepository {
    async fn find_by_org_and_date(
        &self,
        organization_id: OrganizationId,
        date: NaiveDate,
    ) -> CareResult<Option<VerseOfDay>> {
        debug!("Finding verse of day for org {} on {}", organization_id, date);

        let row = sqlx::query_as::<_, VerseOfDayRow>(
            r#"
            SELECT id, organization_id, scheduled_date, reference, translation_id,
                   verse_text, is_automatic, set_by, created_at, updated_at
            FROM verse_of_day
            WHERE organization_id = $1 AND scheduled_date = $2
            "#,
        )
        .bind(organization_id.into_inner())
        .bind(date)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(VerseOfDay::from))
    }

    async fn upsert(&self, verse: &VerseOfDay) -> CareResult<VerseOfDay> {
        debug!(
            "Upserting verse of day for org {} on {}",
            verse.organization_id, verse.scheduled_date
        );

        let row = sqlx::query_as::<_, VerseOfDayRow>(
            r#"
            INSERT INTO verse_of_day (id, organization_id, scheduled_date, reference,
                                      translation_id, verse_text, is_automatic, set_by,
                                      created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (organization_id, scheduled_date) DO UPDATE
            SET reference = EXCLUDED.reference,
                translation_id = EXCLUDED.translation_id,
                verse_text = EXCLUDED.verse_text,
                is_automatic = EXCLUDED.is_automatic,
                set_by = EXCLUDED.set_by,
                updated_at = EXCLUDED.updated_at
            RETURNING id, organization_id, scheduled_date, reference, translation_id,
                      verse_text, is_automatic, set_by, created_at, updated_at
            "#,
        )
        .bind(verse.id)
        .bind(verse.organization_id.into_inner())
        .bind(verse.scheduled_date)
        .bind(&verse.reference)
        .bind(&verse.translation_id)
        .bind(&verse.verse_text)
        .bind(verse.is_automatic)
        .bind(verse.set_by.map(UserId::into_inner))
        .bind(verse.created_at)
        .bind(verse.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(VerseOfDay::from(row))
    }
}

impl std::fmt::Debug for PgVerseOfDayRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgVerseOfDayRepository").finish_non_exhaustive()
    }
}
