pub mod dashboard;
pub mod drive;
pub mod error;
pub mod lax;
pub mod report;
pub mod student;

pub use dashboard::DashboardSummary;
pub use drive::{DrivePayload, UpcomingDrive, VaccinationDrive, VaccineEntry};
pub use error::{ErrorBody, MessageBody};
pub use report::{ReportDriveRow, ReportQuery, ReportRow, ReportStudentRow};
pub use student::{
    BulkImportSummary, StudentPayload, StudentWithVaccinations, VaccinatePayload,
    VaccinationRecord, VaccinationStatusPayload,
};
