pub mod handlers;

use crate::server::router::VaxportState;
use handlers::{
    report_drives_handler, report_students_handler, vaccination_report_csv_handler,
    vaccination_report_handler,
};

use axum::{Router, routing::get};

pub fn router() -> Router<VaxportState> {
    Router::new()
        .route(
            "/student-vaccination-report",
            get(vaccination_report_handler),
        )
        .route(
            "/student-vaccination-report/csv",
            get(vaccination_report_csv_handler),
        )
        .route("/vaccination-drives", get(report_drives_handler))
        .route("/students", get(report_students_handler))
}
