use super::extract::{DriveSelection, StatusUpdate, ValidStudent};
use crate::error::{ApiError, OrInternal, VaxportError};
use crate::server::router::VaxportState;
use crate::server::routes::RecordId;
use crate::service::bulk_import::import_students;
use crate::service::csv_io::parse_students_csv;
use crate::service::history::attach_vaccinations;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{info, warn};
use vaxport_schema::{BulkImportSummary, StudentPayload, StudentWithVaccinations};

const DUPLICATE_STUDENT: &str =
    "A student with the same name, class and date of birth already exists";

/// Duplicates are a client error; anything else is the route's plain-text 500.
fn student_write_error(e: VaxportError, message: &'static str) -> ApiError {
    match e {
        VaxportError::DuplicateStudent { .. } => ApiError::conflict(DUPLICATE_STUDENT),
        source => ApiError::Internal {
            message,
            plain_text: true,
            source,
        },
    }
}

/// Students with their vaccinations nested; two queries regardless of the number of students.
pub async fn list_students_handler(
    State(state): State<VaxportState>,
) -> Result<Json<Vec<StudentWithVaccinations>>, ApiError> {
    const FAILED: &str = "Failed to fetch students";

    let (students, records) = tokio::try_join!(
        state.store.list_students(),
        state.store.list_vaccination_records(),
    )
    .or_internal_text(FAILED)?;

    Ok(Json(attach_vaccinations(students, records)))
}

pub async fn add_student_handler(
    State(state): State<VaxportState>,
    ValidStudent(student): ValidStudent,
) -> Result<(StatusCode, &'static str), ApiError> {
    let id = state
        .store
        .insert_student(&student)
        .await
        .map_err(|e| student_write_error(e, "Failed to add student"))?;

    info!(id, name = %student.name, "Student added");
    Ok((StatusCode::CREATED, "Student added successfully"))
}

/// Reports success even when no student has this id.
pub async fn update_student_handler(
    State(state): State<VaxportState>,
    RecordId(id): RecordId,
    ValidStudent(student): ValidStudent,
) -> Result<(StatusCode, &'static str), ApiError> {
    let changed = state
        .store
        .update_student(id, &student)
        .await
        .map_err(|e| student_write_error(e, "Failed to update student"))?;

    if changed == 0 {
        warn!(id, "Student update matched no row");
    }
    Ok((StatusCode::OK, "Student updated successfully"))
}

pub async fn bulk_import_handler(
    State(state): State<VaxportState>,
    body: Result<Json<Vec<StudentPayload>>, JsonRejection>,
) -> Result<Json<BulkImportSummary>, ApiError> {
    let Json(rows) = body?;
    let total = rows.len();
    let summary = import_students(state.store.as_ref(), rows).await;
    info!(
        total,
        added = summary.added,
        skipped = summary.skipped,
        "Bulk import finished"
    );
    Ok(Json(summary))
}

/// Same as [`bulk_import_handler`], reading rows from a CSV body with a header line.
pub async fn bulk_import_csv_handler(
    State(state): State<VaxportState>,
    body: Bytes,
) -> Result<Json<BulkImportSummary>, ApiError> {
    let rows = parse_students_csv(&body).map_err(|e| {
        let detail = match e {
            VaxportError::CsvError(inner) => inner.to_string(),
            other => other.to_string(),
        };
        ApiError::invalid(format!("Invalid CSV: {detail}"))
    })?;

    let total = rows.len();
    let summary = import_students(state.store.as_ref(), rows).await;
    info!(
        total,
        added = summary.added,
        skipped = summary.skipped,
        "CSV bulk import finished"
    );
    Ok(Json(summary))
}

pub async fn record_vaccination_handler(
    State(state): State<VaxportState>,
    RecordId(student_id): RecordId,
    DriveSelection(drive_id): DriveSelection,
) -> Result<(StatusCode, &'static str), ApiError> {
    let inserted = state
        .store
        .record_vaccination(student_id, drive_id)
        .await
        .or_internal_text("Failed to record vaccination")?;

    if !inserted {
        return Err(ApiError::AlreadyVaccinated);
    }
    info!(student_id, drive_id, "Vaccination recorded");
    Ok((StatusCode::CREATED, "Vaccination recorded successfully"))
}

pub async fn update_vaccination_status_handler(
    State(state): State<VaxportState>,
    RecordId(id): RecordId,
    StatusUpdate(status): StatusUpdate,
) -> Result<(StatusCode, &'static str), ApiError> {
    let changed = state
        .store
        .set_vaccination_status(id, &status)
        .await
        .or_internal_text("Failed to update vaccination status")?;

    if changed == 0 {
        warn!(id, "Vaccination status update matched no row");
    }
    Ok((StatusCode::OK, "Vaccination status updated successfully"))
}
