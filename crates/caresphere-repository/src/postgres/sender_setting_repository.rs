//! PostgreSQL sender setting repository implementation.

use crate::{pool::DatabasePool, traits::SenderSettingRepository};
use async_trait::async_trait;
use caresphere_core::{CareError, CareResult, SenderSetting, SenderSettingId, SettingScope};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL sender setting repository implementation.
#[derive(Clone)]
pub struct PgSenderSettingRepository {
    pool: Arc<DatabasePool>,
}

impl PgSenderSettingRepository {
    /// Creates a new PostgreSQL sender setting repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a sender setting.
#[derive(Debug, FromRow)]
struct SenderSettingRow {
    id: Uuid,
    scope: String,
    reference_id: Option<Uuid>,
    sender_name: Option<String>,
    sender_email: Option<String>,
    sender_phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SenderSettingRow> for SenderSetting {
    type Error = CareError;

    fn try_from(row: SenderSettingRow) -> Result<Self, Self::Error> {
        let scope = SettingScope::parse(&row.scope)
            .ok_or_else(|| CareError::internal(format!("Invalid scope in database: {}", row.scope)))?;

        Ok(SenderSetting {
            id: SenderSettingId::from(row.id),
            scope,
            reference_id: row.reference_id,
            sender_name: row.sender_name,
            sender_email: row.sender_email,
            sender_phone: row.sender_phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SenderSettingRepository for PgSenderSettingRepository {
    async fn find_by_scope(
        &self,
        scope: SettingScope,
        reference_id: Option<Uuid>,
    ) -> CareResult<Option<SenderSetting>> {
        debug!("Finding sender setting for scope: {}", scope);

        // IS NOT DISTINCT FROM matches the null reference of the GLOBAL row.
        let row = sqlx::query_as::<_, SenderSettingRow>(
            r#"
            SELECT id, scope, reference_id, sender_name, sender_email, sender_phone,
                   created_at, updated_at
            FROM sender_settings
            WHERE scope = $1 AND reference_id IS NOT DISTINCT FROM $2
            "#,
        )
        .bind(scope.as_db_str())
        .bind(reference_id)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(SenderSetting::try_from).transpose()
    }

    async fn upsert(&self, setting: &SenderSetting) -> CareResult<SenderSetting> {
        debug!("Upserting sender setting for scope: {}", setting.scope);

        // The unique index is declared NULLS NOT DISTINCT, so the single
        // GLOBAL row conflicts on its null reference like any other pair.
        let row = sqlx::query_as::<_, SenderSettingRow>(
            r#"
            INSERT INTO sender_settings (id, scope, reference_id, sender_name, sender_email,
                                         sender_phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (scope, reference_id) DO UPDATE
            SET sender_name = EXCLUDED.sender_name,
                sender_email = EXCLUDED.sender_email,
                sender_phone = EXCLUDED.sender_phone,
                updated_at = EXCLUDED.updated_at
            RETURNING id, scope, reference_id, sender_name, sender_email, sender_phone,
                      created_at, updated_at
            "#,
        )
        .bind(setting.id.into_inner())
        .bind(setting.scope.as_db_str())
        .bind(setting.reference_id)
        .bind(&setting.sender_name)
        .bind(&setting.sender_email)
        .bind(&setting.sender_phone)
        .bind(setting.created_at)
        .bind(setting.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        SenderSetting::try_from(row)
    }

    async fn list(&self) -> CareResult<Vec<SenderSetting>> {
        debug!("Listing all sender settings");

        let rows = sqlx::query_as::<_, SenderSettingRow>(
            r#"
            SELECT id, scope, reference_id, sender_name, sender_email, sender_phone,
                   created_at, updated_at
            FROM sender_settings
            ORDER BY scope, created_at
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(SenderSetting::try_from).collect()
    }

    async fn delete(&self, id: SenderSettingId) -> CareResult<bool> {
        debug!("Deleting sender setting: {}", id);

        let result = sqlx::query("DELETE FROM sender_settings WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgSenderSettingRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgSenderSettingRepository").finish_non_exhaustive()
    }
}
