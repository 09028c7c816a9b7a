pub mod extract;
pub mod handlers;

use crate::server::router::VaxportState;
use handlers::{
    add_student_handler, bulk_import_csv_handler, bulk_import_handler, list_students_handler,
    record_vaccination_handler, update_student_handler, update_vaccination_status_handler,
};

use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router() -> Router<VaxportState> {
    Router::new()
        .route("/", get(list_students_handler).post(add_student_handler))
        .route("/bulk", post(bulk_import_handler))
        .route("/bulk/csv", post(bulk_import_csv_handler))
        .route("/{id}", put(update_student_handler))
        .route("/{id}/vaccinate", post(record_vaccination_handler))
        .route(
            "/vaccination-status/{id}",
            put(update_vaccination_status_handler),
        )
}
