//! Transactional message DTOs.

use caresphere_core::validation::rules;
use caresphere_core::{MessageType, OrganizationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to send one transactional message.
///
/// `from` and `from_name` are optional; when absent they are filled from
/// the sender settings resolved for `user_id` / `organization_id`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    #[serde(rename = "type")]
    pub message_type: MessageType,

    /// Email address or phone number, depending on the message type.
    #[validate(custom(function = rules::not_blank, message = "Recipient must not be blank"))]
    #[validate(length(max = 254, message = "Recipient cannot exceed 254 characters"))]
    pub to: String,

    #[validate(length(max = 200, message = "Subject cannot exceed 200 characters"))]
    pub subject: Option<String>,

    pub body: Option<String>,

    #[validate(length(max = 254, message = "Sender cannot exceed 254 characters"))]
    pub from: Option<String>,

    #[validate(length(max = 128, message = "Sender name cannot exceed 128 characters"))]
    pub from_name: Option<String>,

    /// Sender resolution context, highest precedence first.
    pub user_id: Option<UserId>,
    pub organization_id: Option<OrganizationId>,
}

/// Acknowledgement returned once the provider has queued a message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageReceipt {
    pub message_id: String,
    pub queued_at: DateTime<Utc>,
}
