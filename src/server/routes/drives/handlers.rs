use super::extract::ValidDrive;
use crate::error::{ApiError, OrInternal, VaxportError};
use crate::server::router::VaxportState;
use crate::server::routes::RecordId;

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;
use vaxport_schema::VaccinationDrive;

pub const DATE_TAKEN: &str =
    "A vaccination drive is already scheduled for this date. Please choose a different date.";
pub const DRIVE_NOT_FOUND: &str = "Vaccination drive not found. Please check the ID and try again.";

pub async fn list_drives_handler(
    State(state): State<VaxportState>,
) -> Result<Json<Vec<VaccinationDrive>>, ApiError> {
    let drives = state
        .store
        .list_drives()
        .await
        .or_internal("Unable to fetch vaccination drives. Please try again later.")?;
    Ok(Json(drives))
}

/// One drive per calendar date; the insert itself rejects a taken date.
pub async fn create_drive_handler(
    State(state): State<VaxportState>,
    ValidDrive(drive): ValidDrive,
) -> Result<(StatusCode, Json<VaccinationDrive>), ApiError> {
    let created = state
        .store
        .create_drive(&drive)
        .await
        .or_internal("Unable to create vaccination drive. Please try again later.")?
        .ok_or_else(|| ApiError::conflict(DATE_TAKEN))?;

    info!(id = created.id, drive_date = %created.drive_date, "Vaccination drive created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_drive_handler(
    State(state): State<VaxportState>,
    RecordId(id): RecordId,
    ValidDrive(drive): ValidDrive,
) -> Result<Json<VaccinationDrive>, ApiError> {
    let updated = match state.store.update_drive(id, &drive).await {
        Ok(updated) => updated,
        Err(VaxportError::DriveDateTaken(_)) => return Err(ApiError::conflict(DATE_TAKEN)),
        Err(source) => {
            return Err(ApiError::Internal {
                message: "Unable to update vaccination drive. Please try again later.",
                plain_text: false,
                source,
            });
        }
    };

    let updated = updated.ok_or(ApiError::NotFound(DRIVE_NOT_FOUND))?;
    info!(id, drive_date = %updated.drive_date, "Vaccination drive updated");
    Ok(Json(updated))
}
