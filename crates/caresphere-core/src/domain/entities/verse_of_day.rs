//! Verse-of-day entity.

use crate::{OrganizationId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization's verse for one calendar day.
///
/// Unique per `(organization_id, scheduled_date)`. Rows are created either
/// automatically, on the first read of a day with no row present, or by an
/// administrator override which always wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseOfDay {
    /// Row identifier.
    pub id: Uuid,

    /// Owning organization.
    pub organization_id: OrganizationId,

    /// The day this verse is scheduled for (date only).
    pub scheduled_date: NaiveDate,

    /// Canonical verse reference, e.g. `JHN.3.16`.
    pub reference: String,

    /// Translation the verse text was taken from.
    pub translation_id: String,

    /// The verse text itself.
    pub verse_text: String,

    /// True when auto-populated from the provider's global verse of the
    /// day; false when set by an administrator.
    pub is_automatic: bool,

    /// Administrator who set the override, when manual.
    pub set_by: Option<UserId>,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl VerseOfDay {
    /// Creates an automatic row derived from the provider's global verse.
    #[must_use]
    pub fn new_automatic(
        organization_id: OrganizationId,
        scheduled_date: NaiveDate,
        reference: impl Into<String>,
        translation_id: impl Into<String>,
        verse_text: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            organization_id,
            scheduled_date,
            reference: reference.into(),
            translation_id: translation_id.into(),
            verse_text: verse_text.into(),
            is_automatic: true,
            set_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an administrator override row.
    #[must_use]
    pub fn new_override(
        organization_id: OrganizationId,
        scheduled_date: NaiveDate,
        reference: impl Into<String>,
        translation_id: impl Into<String>,
        verse_text: impl Into<String>,
        set_by: Option<UserId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            organization_id,
            scheduled_date,
            reference: reference.into(),
            translation_id: translation_id.into(),
            verse_text: verse_text.into(),
            is_automatic: false,
            set_by,
            created_at: now,
            updated_at: now,
        }
    }
}
