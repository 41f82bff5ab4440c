//! Transactional message controller.

use crate::{
    extractors::ValidatedJson,
    responses::{accepted, ApiResponse, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use caresphere_service::{MessageReceipt, SendMessageRequest};
use tracing::debug;

/// Creates the message router.
pub fn router() -> Router<AppState> {
    Router::new().route("/messages", post(send_message))
}

/// Queue one outbound message.
///
/// Sender fields left empty are filled from resolved sender settings
/// before dispatch.
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    tag = "messages",
    request_body = SendMessageRequest,
    responses(
        (status = 202, description = "Message accepted by the provider", body = MessageReceipt),
        (status = 422, description = "Invalid request body"),
        (status = 502, description = "Provider rejected the message")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageReceipt>>), AppError> {
    debug!("Send message request: {} -> {}", request.message_type, request.to);

    let receipt = state.messages.send(request).await?;
    Ok(accepted(receipt))
}
