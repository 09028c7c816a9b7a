use crate::db::StudentCreate;
use crate::error::ApiError;
use crate::service::validate::validate_student;
use crate::utils::logging::with_pretty_json_debug;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use tracing::debug;
use vaxport_schema::{StudentPayload, VaccinatePayload, VaccinationStatusPayload};

pub const DRIVE_ID_REQUIRED: &str = "Vaccination drive ID is required";
pub const STATUS_REQUIRED: &str = "Vaccination status is required";

/// A student body that passed date, name and class validation.
pub struct ValidStudent(pub StudentCreate);

impl<S> FromRequest<S> for ValidStudent
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<StudentPayload>::from_request(req, state).await?;

        with_pretty_json_debug(&payload, |pretty| {
            debug!(body = %pretty, "Student payload");
        });

        validate_student(&payload)
            .map(ValidStudent)
            .map_err(ApiError::invalid)
    }
}

/// Non-zero drive id from `{"vaccinationDriveId": ...}`.
pub struct DriveSelection(pub i32);

impl<S> FromRequest<S> for DriveSelection
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<VaccinatePayload>::from_request(req, state).await?;
        match payload.vaccination_drive_id {
            Some(id) if id != 0 => Ok(DriveSelection(id)),
            _ => Err(ApiError::invalid(DRIVE_ID_REQUIRED)),
        }
    }
}

/// Non-empty status string, kept exactly as sent.
pub struct StatusUpdate(pub String);

impl<S> FromRequest<S> for StatusUpdate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<VaccinationStatusPayload>::from_request(req, state).await?;
        payload
            .vaccination_status
            .map(StatusUpdate)
            .ok_or_else(|| ApiError::invalid(STATUS_REQUIRED))
    }
}
