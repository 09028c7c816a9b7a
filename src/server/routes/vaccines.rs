use crate::error::{ApiError, OrInternal};
use crate::server::router::VaxportState;

use axum::{Json, Router, extract::State, routing::get};
use vaxport_schema::VaccineEntry;

pub fn router() -> Router<VaxportState> {
    Router::new().route("/", get(list_vaccines_handler))
}

pub async fn list_vaccines_handler(
    State(state): State<VaxportState>,
) -> Result<Json<Vec<VaccineEntry>>, ApiError> {
    let vaccines = state
        .store
        .list_vaccines()
        .await
        .or_internal("Unable to fetch vaccine data. Please try again later.")?;
    Ok(Json(vaccines))
}
