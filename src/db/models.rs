use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxport_schema::{
    ReportDriveRow, ReportRow, ReportStudentRow, UpcomingDrive, VaccinationDrive,
    VaccinationRecord, VaccineEntry,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbStudent {
    pub id: i32,
    pub name: String,
    pub classname: String,
    pub dob: NaiveDate,
    pub vaccination_status: Option<String>,
}

/// One `student_vaccine_link` row joined with its drive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbVaccinationRecord {
    pub student_id: i32,
    pub drive_id: i32,
    pub drive_title: Option<String>,
    pub vaccine_type: Option<String>,
    pub vaccination_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbVaccinationDrive {
    pub id: i32,
    pub title: Option<String>,
    pub vaccine_name: Option<String>,
    pub drive_date: NaiveDate,
    pub no_of_vaccine: Option<i32>,
    pub classname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbUpcomingDrive {
    pub drive_id: i32,
    pub drive_title: Option<String>,
    pub drive_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbVaccine {
    pub drive_id: i32,
    pub drive_title: Option<String>,
    pub vaccine_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbReportRow {
    pub student_name: String,
    pub vaccination_status: Option<String>,
    pub student_class: String,
    pub date_of_birth: NaiveDate,
    pub vaccination_drive_title: Option<String>,
    pub vaccination_date: Option<NaiveDate>,
    pub vaccine_name: Option<String>,
    pub vaccine_quantity: Option<i32>,
    pub drive_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbReportDrive {
    pub drive_title: Option<String>,
    pub vaccination_date: NaiveDate,
    pub vaccine_name: Option<String>,
    pub vaccine_quantity: Option<i32>,
    pub drive_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbReportStudent {
    pub student_name: String,
    pub vaccination_status: Option<String>,
    pub student_class: String,
    pub date_of_birth: NaiveDate,
}

impl From<DbVaccinationRecord> for VaccinationRecord {
    fn from(r: DbVaccinationRecord) -> Self {
        Self {
            drive_id: r.drive_id,
            title: r.drive_title,
            vaccine_name: r.vaccine_type,
            date: r.vaccination_date,
        }
    }
}

impl From<DbVaccinationDrive> for VaccinationDrive {
    fn from(d: DbVaccinationDrive) -> Self {
        Self {
            id: d.id,
            title: d.title,
            vaccine_name: d.vaccine_name,
            drive_date: d.drive_date,
            no_of_vaccine: d.no_of_vaccine,
            classname: d.classname,
        }
    }
}

impl From<DbUpcomingDrive> for UpcomingDrive {
    fn from(d: DbUpcomingDrive) -> Self {
        Self {
            drive_id: d.drive_id,
            drive_title: d.drive_title,
            drive_date: d.drive_date,
        }
    }
}

impl From<DbVaccine> for VaccineEntry {
    fn from(v: DbVaccine) -> Self {
        Self {
            drive_id: v.drive_id,
            drive_title: v.drive_title,
            vaccine_type: v.vaccine_type,
        }
    }
}

impl From<DbReportRow> for ReportRow {
    fn from(r: DbReportRow) -> Self {
        Self {
            student_name: r.student_name,
            vaccination_status: r.vaccination_status,
            student_class: r.student_class,
            date_of_birth: r.date_of_birth,
            vaccination_drive_title: r.vaccination_drive_title,
            vaccination_date: r.vaccination_date,
            vaccine_name: r.vaccine_name,
            vaccine_quantity: r.vaccine_quantity,
            drive_class: r.drive_class,
        }
    }
}

impl From<DbReportDrive> for ReportDriveRow {
    fn from(d: DbReportDrive) -> Self {
        Self {
            drive_title: d.drive_title,
            vaccination_date: d.vaccination_date,
            vaccine_name: d.vaccine_name,
            vaccine_quantity: d.vaccine_quantity,
            drive_class: d.drive_class,
        }
    }
}

impl From<DbReportStudent> for ReportStudentRow {
    fn from(s: DbReportStudent) -> Self {
        Self {
            student_name: s.student_name,
            vaccination_status: s.vaccination_status,
            student_class: s.student_class,
            date_of_birth: s.date_of_birth,
        }
    }
}
