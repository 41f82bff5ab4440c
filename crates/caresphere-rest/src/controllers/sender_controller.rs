//! Sender settings controller.

use crate::{
    extractors::ValidatedJson,
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Router,
};
use caresphere_core::{CareError, OrganizationId, SenderSettingId, UserId};
use caresphere_service::{ResolvedSenders, SenderSettingResponse, UpsertSenderSettingRequest};
use serde::Deserialize;
use tracing::debug;

/// Creates the sender settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sender-settings", get(list_settings).put(upsert_setting))
        .route("/sender-settings/resolve", get(resolve_senders))
        .route("/sender-settings/:id", delete(delete_setting))
}

/// Resolution context (both optional, highest precedence first).
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
}

/// List all sender setting rows.
#[utoipa::path(
    get,
    path = "/api/v1/sender-settings",
    tag = "sender-settings",
    responses(
        (status = 200, description = "All setting rows", body = [SenderSettingResponse])
    )
)]
pub async fn list_settings(State(state): State<AppState>) -> ApiResult<Vec<SenderSettingResponse>> {
    debug!("List sender settings request");

    let settings = state.senders.list().await?;
    ok(settings)
}

/// Create or replace the setting row for one scope/reference pair.
#[utoipa::path(
    put,
    path = "/api/v1/sender-settings",
    tag = "sender-settings",
    request_body = UpsertSenderSettingRequest,
    responses(
        (status = 200, description = "Stored setting row", body = SenderSettingResponse),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn upsert_setting(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpsertSenderSettingRequest>,
) -> ApiResult<SenderSettingResponse> {
    debug!("Upsert sender setting request: {:?}", request.scope);

    let setting = state.senders.upsert(request).await?;
    ok(setting)
}

/// Resolve the effective sender identity for a messaging context.
#[utoipa::path(
    get,
    path = "/api/v1/sender-settings/resolve",
    tag = "sender-settings",
    params(
        ("user_id" = Option<String>, Query, description = "User ID, tried first"),
        ("organization_id" = Option<String>, Query, description = "Organization ID, tried second")
    ),
    responses(
        (status = 200, description = "Resolved sender identity", body = ResolvedSenders)
    )
)]
pub async fn resolve_senders(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> ApiResult<ResolvedSenders> {
    debug!(
        "Resolve senders request: user={:?} organization={:?}",
        query.user_id, query.organization_id
    );

    let resolved = state
        .senders
        .resolve(query.user_id, query.organization_id)
        .await?;
    ok(resolved)
}

/// Delete a setting row.
#[utoipa::path(
    delete,
    path = "/api/v1/sender-settings/{id}",
    tag = "sender-settings",
    params(("id" = String, Path, description = "Setting row ID")),
    responses(
        (status = 204, description = "Setting row deleted"),
        (status = 404, description = "Unknown setting row")
    )
)]
pub async fn delete_setting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete sender setting request: {}", id);

    let id = parse_setting_id(&id)?;
    state.senders.delete(id).await?;
    Ok(no_content())
}

/// Helper to parse setting ID from path parameter.
fn parse_setting_id(id: &str) -> Result<SenderSettingId, AppError> {
    SenderSettingId::parse(id)
        .map_err(|_| AppError(CareError::validation(format!("Invalid setting ID: {}", id))))
}
