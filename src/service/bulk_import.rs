use tracing::{debug, error};
use vaxport_schema::{BulkImportSummary, StudentPayload};

use crate::db::SchoolStore;
use crate::service::validate::validate_student;

/// Imports rows one at a time, in order.
///
/// There is no enclosing transaction: rows added before a failure stay added. Each row ends
/// up either added or skipped:
/// - skipped when it fails validation,
/// - skipped when an identical (name, classname, dob) student already exists,
/// - skipped when the store errors on that row; the next row is still attempted.
pub async fn import_students(
    store: &dyn SchoolStore,
    rows: Vec<StudentPayload>,
) -> BulkImportSummary {
    let mut summary = BulkImportSummary::default();

    for (index, row) in rows.into_iter().enumerate() {
        let student = match validate_student(&row) {
            Ok(student) => student,
            Err(reason) => {
                debug!(row = index, reason, "Bulk import: row skipped");
                summary.skipped += 1;
                continue;
            }
        };

        match store.insert_student_if_absent(&student).await {
            Ok(Some(_)) => summary.added += 1,
            Ok(None) => {
                debug!(row = index, name = %student.name, "Bulk import: duplicate skipped");
                summary.skipped += 1;
            }
            Err(e) => {
                error!(row = index, error = %e, "Error during bulk import");
                summary.skipped += 1;
            }
        }
    }

    summary
}
