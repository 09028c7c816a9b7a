use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use vaxport_schema::{
    ReportDriveRow, ReportRow, ReportStudentRow, UpcomingDrive, VaccinationDrive, VaccineEntry,
};

use crate::db::create::{DriveCreate, ReportFilter, StudentCreate};
use crate::db::models::{DbStudent, DbVaccinationRecord};
use crate::error::VaxportError;

/// Every read and write the HTTP layer performs against the relational store.
///
/// Each method is a leaf operation (one statement, or one atomic conditional write); none of
/// them call each other. Uniqueness rules are enforced by the write itself, so the
/// "if absent" methods report a rejected duplicate through their return value, never via a
/// separate existence check.
#[async_trait]
pub trait SchoolStore: Send + Sync + 'static {
    async fn count_students(&self) -> Result<i64, VaxportError>;

    /// Students whose status is exactly `Vaccinated`.
    async fn count_vaccinated(&self) -> Result<i64, VaxportError>;

    /// Drives with `from <= drive_date <= to`, ascending by date.
    async fn drives_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<UpcomingDrive>, VaxportError>;

    /// All students ordered by id.
    async fn list_students(&self) -> Result<Vec<DbStudent>, VaxportError>;

    /// One entry per link row, joined with its drive.
    async fn list_vaccination_records(&self) -> Result<Vec<DbVaccinationRecord>, VaxportError>;

    /// Returns the new id. A (name, classname, dob) duplicate yields
    /// [`VaxportError::DuplicateStudent`].
    async fn insert_student(&self, student: &StudentCreate) -> Result<i32, VaxportError>;

    /// Returns the number of rows changed; `0` when `id` does not exist.
    async fn update_student(&self, id: i32, student: &StudentCreate) -> Result<u64, VaxportError>;

    /// `Some(id)` when inserted, `None` when an identical (name, classname, dob) row exists.
    async fn insert_student_if_absent(
        &self,
        student: &StudentCreate,
    ) -> Result<Option<i32>, VaxportError>;

    /// `true` when the link was created, `false` when the pair was already linked.
    async fn record_vaccination(
        &self,
        student_id: i32,
        drive_id: i32,
    ) -> Result<bool, VaxportError>;

    /// Stores `status` verbatim. Returns the number of rows changed.
    async fn set_vaccination_status(&self, id: i32, status: &str) -> Result<u64, VaxportError>;

    async fn list_vaccines(&self) -> Result<Vec<VaccineEntry>, VaxportError>;

    /// All drives ascending by date.
    async fn list_drives(&self) -> Result<Vec<VaccinationDrive>, VaxportError>;

    /// `None` when another drive already occupies `drive.drive_date`.
    async fn create_drive(
        &self,
        drive: &DriveCreate,
    ) -> Result<Option<VaccinationDrive>, VaxportError>;

    /// Overwrites all five fields. `Ok(None)` when `id` does not exist;
    /// [`VaxportError::DriveDateTaken`] when the new date belongs to another drive.
    async fn update_drive(
        &self,
        id: i32,
        drive: &DriveCreate,
    ) -> Result<Option<VaccinationDrive>, VaxportError>;

    /// Left join of students, links and drives, narrowed by `filter`.
    async fn report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, VaxportError>;

    /// Drives ordered by date, newest first.
    async fn report_drives(&self) -> Result<Vec<ReportDriveRow>, VaxportError>;

    /// Students ordered by name.
    async fn report_students(&self) -> Result<Vec<ReportStudentRow>, VaxportError>;

    /// The database's `CURRENT_DATE`, the reference day for the dashboard window.
    async fn current_date(&self) -> Result<NaiveDate, VaxportError>;

    /// Server-side clock, used as a connectivity check.
    async fn ping(&self) -> Result<DateTime<Utc>, VaxportError>;
}
