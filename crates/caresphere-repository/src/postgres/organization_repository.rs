//! PostgreSQL organization repository implementation.

use crate::{pool::DatabasePool, traits::OrganizationRepository};
use async_trait::async_trait;
use caresphere_core::{CareResult, Organization, OrganizationId, OrganizationStatus};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL organization repository implementation.
#[derive(Clone)]
pub struct PgOrganizationRepository {
    pool: Arc<DatabasePool>,
}

impl PgOrganizationRepository {
    /// Creates a new PostgreSQL organization repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an organization.
#[derive(Debug, FromRow)]
struct OrganizationRow {
    id: Uuid,
    name: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Organization {
            id: OrganizationId::from_uuid(row.id),
            name: row.name,
            status: OrganizationStatus::parse(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn find_by_id(&self, id: OrganizationId) -> CareResult<Option<Organization>> {
        debug!("Finding organization by id: {}", id);

        let row = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, status, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Organization::from))
    }

    async fn list_active(&self) -> CareResult<Vec<Organization>> {
        debug!("Listing active organizations");

        let rows = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT id, name, status, created_at, updated_at
            FROM organizations
            WHERE status = 'active'
            ORDER BY created_at
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Organization::from).collect())
    }
}

impl std::fmt::Debug for PgOrganizationRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrganizationRepository").finish_non_exhaustive()
    }
}
