//! Sender setting entity.

use crate::{SenderSettingId, SettingScope};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored sender configuration row at one precedence scope.
///
/// Unique per `(scope, reference_id)`; `reference_id` is null only for the
/// GLOBAL scope. Any of the three sender fields may be null; the resolver
/// fills the gaps from static configuration defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderSetting {
    /// Row identifier.
    pub id: SenderSettingId,

    /// Precedence scope of this row.
    pub scope: SettingScope,

    /// The user or organization this row belongs to; null for GLOBAL.
    pub reference_id: Option<Uuid>,

    /// Display name used as the From name.
    pub sender_name: Option<String>,

    /// From address for email sends.
    pub sender_email: Option<String>,

    /// Caller id for SMS and voice sends.
    pub sender_phone: Option<String>,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl SenderSetting {
    /// Creates a new sender setting row.
    #[must_use]
    pub fn new(
        scope: SettingScope,
        reference_id: Option<Uuid>,
        sender_name: Option<String>,
        sender_email: Option<String>,
        sender_phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: SenderSettingId::new(),
            scope,
            reference_id,
            sender_name,
            sender_email,
            sender_phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the scope/reference pairing satisfies the uniqueness
    /// invariant: GLOBAL has no reference, USER and ORGANIZATION must
    /// have one.
    #[must_use]
    pub const fn reference_matches_scope(&self) -> bool {
        self.scope.requires_reference() == self.reference_id.is_some()
    }
}
