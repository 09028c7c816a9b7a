pub mod dashboard;
pub mod drives;
pub mod report;
pub mod students;
pub mod vaccines;

use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Integer `{id}` path segment. Anything else is rejected with `400 {"error":"Invalid id"}`.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i32);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state).await?;
        Ok(RecordId(id))
    }
}
