//! PostgreSQL member repository implementation.

use crate::{pool::DatabasePool, traits::MemberRepository};
use async_trait::async_trait;
use caresphere_core::{CareResult, Member, MemberId, MemberStatus, OrganizationId};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL member repository implementation.
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: Arc<DatabasePool>,
}

impl PgMemberRepository {
    /// Creates a new PostgreSQL member repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a member.
#[derive(Debug, FromRow)]
struct MemberRow {
    id: Uuid,
    organization_id: Uuid,
    first_name: String,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    birth_date: Option<NaiveDate>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Member {
            id: MemberId::from(row.id),
            organization_id: OrganizationId::from_uuid(row.organization_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
            status: MemberStatus::parse(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn find_active_with_birthday(
        &self,
        organization_id: OrganizationId,
        date: NaiveDate,
    ) -> CareResult<Vec<Member>> {
        debug!("Finding birthday members for org {} on {}", organization_id, date);

        // Month/day matching, so February 29th births only surface in leap
        // years.
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, organization_id, first_name, last_name, email, phone,
                   birth_date, status, created_at, updated_at
            FROM members
            WHERE organization_id = $1
              AND status = 'active'
              AND birth_date IS NOT NULL
              AND EXTRACT(MONTH FROM birth_date) = $2
              AND EXTRACT(DAY FROM birth_date) = $3
            ORDER BY created_at
            "#,
        )
        .bind(organization_id.into_inner())
        .bind(date.month() as i32)
        .bind(date.day() as i32)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }
}

impl std::fmt::Debug for PgMemberRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgMemberRepository").finish_non_exhaustive()
    }
}
