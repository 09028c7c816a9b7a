pub mod extract;
pub mod handlers;

use crate::server::router::VaxportState;
use handlers::{create_drive_handler, list_drives_handler, update_drive_handler};

use axum::{
    Router,
    routing::{get, put},
};

pub fn router() -> Router<VaxportState> {
    Router::new()
        .route("/", get(list_drives_handler).post(create_drive_handler))
        .route("/{id}", put(update_drive_handler))
}
