//! Member entity (minimal read surface).

use crate::{MemberId, MemberStatus, OrganizationId};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A member of an organization.
///
/// Member CRUD lives elsewhere; the birthday fan-out reads these rows to
/// find who to greet and where to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier.
    pub id: MemberId,

    /// Owning organization.
    pub organization_id: OrganizationId,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: Option<String>,

    /// Email address, if known.
    pub email: Option<String>,

    /// Phone number, if known.
    pub phone: Option<String>,

    /// Date of birth, if known.
    pub birth_date: Option<NaiveDate>,

    /// Lifecycle status.
    pub status: MemberStatus,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new active member.
    #[must_use]
    pub fn new(
        organization_id: OrganizationId,
        first_name: impl Into<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MemberId::new(),
            organization_id,
            first_name: first_name.into(),
            last_name,
            email,
            phone: None,
            birth_date: None,
            status: MemberStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the member's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// Whether the member's birthday falls on `date` (month and day
    /// equality; the birth year is ignored).
    #[must_use]
    pub fn has_birthday_on(&self, date: NaiveDate) -> bool {
        self.birth_date
            .is_some_and(|b| b.month() == date.month() && b.day() == date.day())
    }

    /// Whether the member is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, MemberStatus::Active)
    }
}
