use crate::db::DriveCreate;
use crate::error::ApiError;
use crate::service::validate::validate_drive;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use tracing::debug;
use vaxport_schema::DrivePayload;

/// A drive body whose `drive_date` is a real `YYYY-MM-DD` date.
pub struct ValidDrive(pub DriveCreate);

impl<S> FromRequest<S> for ValidDrive
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<DrivePayload>::from_request(req, state).await?;
        debug!(
            title = ?payload.title,
            drive_date = ?payload.drive_date,
            "Drive payload"
        );
        validate_drive(&payload)
            .map(ValidDrive)
            .map_err(ApiError::invalid)
    }
}
