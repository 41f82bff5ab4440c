//! Notification run controller.
//!
//! The birthday fan-out has no internal scheduler. An external scheduler
//! (cron, a platform timer) POSTs here to trigger one run.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::post,
    Router,
};
use caresphere_service::BirthdayRunReport;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

/// Creates the notification router.
pub fn router() -> Router<AppState> {
    Router::new().route("/notifications/birthdays/run", post(run_birthday_notifications))
}

/// Query parameters for a notification run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunQuery {
    /// Date to run for, defaulting to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Run the birthday message fan-out once.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/birthdays/run",
    tag = "notifications",
    params(
        ("date" = Option<String>, Query, description = "Date to run for (YYYY-MM-DD), defaulting to today")
    ),
    responses(
        (status = 200, description = "Run report", body = BirthdayRunReport)
    )
)]
pub async fn run_birthday_notifications(
    State(state): State<AppState>,
    Query(query): Query<RunQuery>,
) -> ApiResult<BirthdayRunReport> {
    info!("Birthday notification run requested: {:?}", query.date);

    let report = state.birthdays.run(query.date).await?;
    ok(report)
}
