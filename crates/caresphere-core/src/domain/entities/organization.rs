//! Organization entity (minimal read surface).

use crate::{OrganizationId, OrganizationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant organization.
///
/// Organization CRUD lives elsewhere; this service only reads the rows the
/// birthday fan-out and verse-of-day lookups need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier.
    pub id: OrganizationId,

    /// Display name.
    pub name: String,

    /// Lifecycle status.
    pub status: OrganizationStatus,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new active organization.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: OrganizationId::new(),
            name: name.into(),
            status: OrganizationStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the organization is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, OrganizationStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_organization_is_active() {
        let org = Organization::new("First Community Church");
        assert!(org.is_active());
        assert_eq!(org.name, "First Community Church");
    }
}
