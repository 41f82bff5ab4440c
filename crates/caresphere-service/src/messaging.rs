//! Transactional messaging: outbound dispatch and sender resolution.

use crate::dto::{MessageReceipt, SendMessageRequest};
use crate::senders::SenderSettingsService;
use async_trait::async_trait;
use caresphere_config::MessagingConfig;
use caresphere_core::validation::ValidateExt;
use caresphere_core::{CareError, CareResult, MessageType};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Service label used in upstream and transport errors.
pub const PROVIDER: &str = "messaging-api";

/// Wire form of one message for the transactional provider.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(rename = "fromName", skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
}

/// Hands a fully assembled message to the provider.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Queues one message, returning the provider's acknowledgement.
    async fn dispatch(&self, message: &OutboundMessage) -> CareResult<MessageReceipt>;
}

/// HTTP dispatcher for the hosted messaging provider.
pub struct HttpMessageDispatcher {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpMessageDispatcher {
    /// Creates a dispatcher from configuration. Unlike the content
    /// client this one carries an explicit request timeout, 30 seconds
    /// by default.
    pub fn new(config: &MessagingConfig) -> CareResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CareError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ProviderAck {
    success: bool,
    #[serde(rename = "messageId")]
    message_id: String,
    #[serde(rename = "queuedAt")]
    queued_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ProviderFailure {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl ProviderErrorBody {
    fn describe(&self) -> String {
        match &self.code {
            Some(code) => format!("{} [{}]", self.message, code),
            None => self.message.clone(),
        }
    }
}

/// The provider answers every request with either an acknowledgement or
/// an error envelope. Decoded in that order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderResponse {
    Ack(ProviderAck),
    Failure(ProviderFailure),
}

#[async_trait]
impl MessageDispatcher for HttpMessageDispatcher {
    async fn dispatch(&self, message: &OutboundMessage) -> CareResult<MessageReceipt> {
        if self.api_key.trim().is_empty() {
            return Err(CareError::configuration(
                "Messaging API key is not configured (CARESPHERE__MESSAGING__API_KEY)",
            ));
        }
        debug!("Dispatching {} message to {}", message.message_type, message.to);

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| CareError::external_service(PROVIDER, format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            // Prefer the structured message when the provider sent one.
            let detail = serde_json::from_str::<ProviderFailure>(&body)
                .map(|failure| failure.error.describe())
                .unwrap_or(body);
            return Err(CareError::upstream(PROVIDER, status.as_u16(), detail));
        }

        match serde_json::from_str::<ProviderResponse>(&body) {
            Ok(ProviderResponse::Ack(ack)) if ack.success => Ok(MessageReceipt {
                message_id: ack.message_id,
                queued_at: ack.queued_at,
            }),
            Ok(ProviderResponse::Ack(ack)) => Err(CareError::external_service(
                PROVIDER,
                format!("message {} was not accepted", ack.message_id),
            )),
            Ok(ProviderResponse::Failure(failure)) => Err(CareError::external_service(
                PROVIDER,
                failure.error.describe(),
            )),
            Err(e) => Err(CareError::external_service(
                PROVIDER,
                format!("JSON parse error: {}", e),
            )),
        }
    }
}

impl std::fmt::Debug for HttpMessageDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMessageDispatcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Outbound message sending with sender-identity resolution.
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Validates, fills sender defaults, and dispatches one message.
    async fn send(&self, request: SendMessageRequest) -> CareResult<MessageReceipt>;
}

/// Default implementation: resolves sender settings, then dispatches.
pub struct MessageServiceImpl {
    dispatcher: Arc<dyn MessageDispatcher>,
    senders: Arc<dyn SenderSettingsService>,
}

impl MessageServiceImpl {
    #[must_use]
    pub fn new(
        dispatcher: Arc<dyn MessageDispatcher>,
        senders: Arc<dyn SenderSettingsService>,
    ) -> Self {
        Self {
            dispatcher,
            senders,
        }
    }
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn send(&self, request: SendMessageRequest) -> CareResult<MessageReceipt> {
        request.validate_request()?;
        debug!("Sending {} message to {}", request.message_type, request.to);

        let resolved = self
            .senders
            .resolve(request.user_id, request.organization_id)
            .await?;

        let from = request.from.or_else(|| {
            Some(match request.message_type {
                MessageType::Email => resolved.default_from,
                MessageType::Sms => resolved.sms_from,
                MessageType::Voice => resolved.voice_from,
            })
        });
        // A display name only means something for email.
        let from_name = match request.message_type {
            MessageType::Email => request.from_name.or(Some(resolved.default_from_name)),
            _ => request.from_name,
        };

        let message = OutboundMessage {
            message_type: request.message_type,
            to: request.to,
            subject: request.subject,
            body: request.body,
            from,
            from_name,
        };
        let receipt = self.dispatcher.dispatch(&message).await?;
        info!(
            "Message queued: {} ({} to {})",
            receipt.message_id, message.message_type, message.to
        );

        Ok(receipt)
    }
}

impl std::fmt::Debug for MessageServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageServiceImpl").finish_non_exhaustive()
    }
}
