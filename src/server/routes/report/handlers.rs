use crate::error::{ApiError, OrInternal};
use crate::server::router::VaxportState;
use crate::service::csv_io::render_report_csv;
use crate::service::validate::validate_report_query;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use tracing::debug;
use vaxport_schema::{ReportDriveRow, ReportQuery, ReportRow, ReportStudentRow};

const REPORT_FAILED: &str = "Failed to retrieve vaccination report. Please try again later.";
const REPORT_FILENAME: &str = "Vaccination_Report.csv";

/// Runs the filtered report and applies the optional column sort.
async fn load_report(
    state: &VaxportState,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Vec<ReportRow>, ApiError> {
    let Query(query) = query?;
    let (filter, sort) = validate_report_query(&query).map_err(ApiError::invalid)?;
    debug!(?filter, ?sort, "Vaccination report requested");

    let mut rows = state
        .store
        .report(&filter)
        .await
        .or_internal(REPORT_FAILED)?;
    if let Some(sort) = sort {
        sort.apply(&mut rows);
    }
    Ok(rows)
}

pub async fn vaccination_report_handler(
    State(state): State<VaxportState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<Vec<ReportRow>>, ApiError> {
    Ok(Json(load_report(&state, query).await?))
}

/// The same rows as [`vaccination_report_handler`], as a CSV download.
pub async fn vaccination_report_csv_handler(
    State(state): State<VaxportState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = load_report(&state, query).await?;
    let body = render_report_csv(&rows).or_internal(REPORT_FAILED)?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        body,
    ))
}

pub async fn report_drives_handler(
    State(state): State<VaxportState>,
) -> Result<Json<Vec<ReportDriveRow>>, ApiError> {
    let drives = state
        .store
        .report_drives()
        .await
        .or_internal("Failed to retrieve vaccination drives. Please try again later.")?;
    Ok(Json(drives))
}

pub async fn report_students_handler(
    State(state): State<VaxportState>,
) -> Result<Json<Vec<ReportStudentRow>>, ApiError> {
    let students = state
        .store
        .report_students()
        .await
        .or_internal("Failed to retrieve student list. Please try again later.")?;
    Ok(Json(students))
}
