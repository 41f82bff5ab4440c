//! Organization verse-of-the-day controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use caresphere_core::{CareError, OrganizationId};
use caresphere_service::{SetVerseOfDayRequest, VerseOfDayResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

/// Creates the verse-of-the-day router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/organizations/:organization_id/verse-of-day",
        get(get_verse_of_day).put(set_verse_of_day),
    )
}

/// Query parameters for reading an organization's verse of the day.
#[derive(Debug, Clone, Deserialize)]
pub struct VotdQuery {
    /// Date to resolve, defaulting to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Get an organization's verse of the day.
///
/// First access for a date stores the global verse as an automatic row,
/// so repeated reads return the same verse even if the provider rotates.
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{organization_id}/verse-of-day",
    tag = "verse-of-day",
    params(
        ("organization_id" = String, Path, description = "Organization ID"),
        ("date" = Option<String>, Query, description = "Date to resolve (YYYY-MM-DD), defaulting to today")
    ),
    responses(
        (status = 200, description = "Verse of the day", body = VerseOfDayResponse),
        (status = 404, description = "Unknown organization")
    )
)]
pub async fn get_verse_of_day(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
    Query(query): Query<VotdQuery>,
) -> ApiResult<VerseOfDayResponse> {
    debug!("Get verse of day request: {}", organization_id);

    let organization_id = parse_organization_id(&organization_id)?;
    let verse = state
        .verse_of_day
        .get_verse_of_day(organization_id, query.date)
        .await?;
    ok(verse)
}

/// Pin a specific verse for an organization's day.
///
/// Replaces whatever row exists for that date, including an automatic one.
#[utoipa::path(
    put,
    path = "/api/v1/organizations/{organization_id}/verse-of-day",
    tag = "verse-of-day",
    params(("organization_id" = String, Path, description = "Organization ID")),
    request_body = SetVerseOfDayRequest,
    responses(
        (status = 200, description = "Stored verse of the day", body = VerseOfDayResponse),
        (status = 404, description = "Unknown organization"),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn set_verse_of_day(
    State(state): State<AppState>,
    Path(organization_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SetVerseOfDayRequest>,
) -> ApiResult<VerseOfDayResponse> {
    debug!(
        "Set verse of day request: {} -> {}",
        organization_id, request.reference
    );

    let organization_id = parse_organization_id(&organization_id)?;
    let verse = state
        .verse_of_day
        .set_verse_of_day(organization_id, request)
        .await?;
    ok(verse)
}

/// Helper to parse organization ID from path parameter.
fn parse_organization_id(id: &str) -> Result<OrganizationId, AppError> {
    OrganizationId::parse(id)
        .map_err(|_| AppError(CareError::validation(format!("Invalid organization ID: {}", id))))
}
