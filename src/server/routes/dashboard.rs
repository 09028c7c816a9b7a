use crate::error::{ApiError, OrInternal};
use crate::server::router::VaxportState;
use crate::service::dashboard::summarize;

use axum::{Json, Router, extract::State, routing::get};
use vaxport_schema::DashboardSummary;

pub fn router() -> Router<VaxportState> {
    Router::new().route("/summary", get(dashboard_summary_handler))
}

const SUMMARY_FAILED: &str = "Failed to retrieve dashboard summary. Please try again later.";

/// Counts and the drives of the next 30 days, relative to the database's current date.
pub async fn dashboard_summary_handler(
    State(state): State<VaxportState>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let today = state
        .store
        .current_date()
        .await
        .or_internal(SUMMARY_FAILED)?;
    let summary = summarize(state.store.as_ref(), today)
        .await
        .or_internal(SUMMARY_FAILED)?;
    Ok(Json(summary))
}
