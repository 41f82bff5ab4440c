//! Sender setting DTOs.

use caresphere_core::validation::rules;
use caresphere_core::{ResolvedScope, SenderSetting, SenderSettingId, SettingScope};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request to create or replace the setting row for one scope/reference
/// pair. The row is replaced wholesale, so omitted fields clear any
/// previously stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertSenderSettingRequest {
    pub scope: SettingScope,

    /// User or organization the setting belongs to. Must be absent for
    /// the GLOBAL scope.
    pub reference_id: Option<Uuid>,

    #[validate(length(max = 128, message = "Sender name cannot exceed 128 characters"))]
    pub sender_name: Option<String>,

    #[validate(email(message = "Invalid sender email address"))]
    pub sender_email: Option<String>,

    #[validate(custom(function = rules::phone_number, message = "Invalid sender phone number"))]
    pub sender_phone: Option<String>,
}

/// Sender setting response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SenderSettingResponse {
    pub id: SenderSettingId,
    pub scope: SettingScope,
    pub reference_id: Option<Uuid>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub sender_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SenderSetting> for SenderSettingResponse {
    fn from(setting: SenderSetting) -> Self {
        Self {
            id: setting.id,
            scope: setting.scope,
            reference_id: setting.reference_id,
            sender_name: setting.sender_name,
            sender_email: setting.sender_email,
            sender_phone: setting.sender_phone,
            created_at: setting.created_at,
            updated_at: setting.updated_at,
        }
    }
}

/// Fully resolved sender identity for an outbound message.
///
/// Every field is populated: whichever scope won contributes its stored
/// values, and anything it left null is filled from static configuration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolvedSenders {
    /// Row that won the resolution, absent when no row matched and the
    /// environment defaults were used.
    pub sender_id: Option<SenderSettingId>,
    pub default_from: String,
    pub default_from_name: String,
    pub sms_from: String,
    pub voice_from: String,
    pub resolved_scope: ResolvedScope,
}
