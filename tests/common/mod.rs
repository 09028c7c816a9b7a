#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tower::ServiceExt;
use vaxport::db::{
    DbStudent, DbVaccinationRecord, DriveCreate, ReportFilter, SchoolStore, StudentCreate,
};
use vaxport::{VaxportError, VaxportState, vaxport_router};
use vaxport_schema::{
    ReportDriveRow, ReportRow, ReportStudentRow, UpcomingDrive, VaccinationDrive, VaccineEntry,
};

#[derive(Default)]
struct Tables {
    students: Vec<DbStudent>,
    drives: Vec<VaccinationDrive>,
    /// (student_id, drive_id)
    links: Vec<(i32, i32)>,
    next_student_id: i32,
    next_drive_id: i32,
}

/// In-process `SchoolStore` with the same uniqueness rules as the Postgres schema.
///
/// `set_failing(true)` makes every call return a database error.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failing: AtomicBool,
    /// Overrides the host's local date as the store's `CURRENT_DATE`.
    today: Mutex<Option<NaiveDate>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_today(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = Some(today);
    }

    pub fn student_count(&self) -> usize {
        self.tables.lock().unwrap().students.len()
    }

    pub fn drive_count(&self) -> usize {
        self.tables.lock().unwrap().drives.len()
    }

    pub fn link_count(&self) -> usize {
        self.tables.lock().unwrap().links.len()
    }

    pub fn student(&self, id: i32) -> Option<DbStudent> {
        self.tables
            .lock()
            .unwrap()
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn drive(&self, id: i32) -> Option<VaccinationDrive> {
        self.tables
            .lock()
            .unwrap()
            .drives
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    fn check(&self) -> Result<(), VaxportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VaxportError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn same_student(s: &DbStudent, new: &StudentCreate) -> bool {
    s.name == new.name && s.classname == new.classname && s.dob == new.dob
}

fn contains_ci(haystack: Option<&str>, needle: Option<&String>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let want = needle.to_lowercase();
    haystack.is_some_and(|h| h.to_lowercase().contains(&want))
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn count_students(&self) -> Result<i64, VaxportError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().students.len() as i64)
    }

    async fn count_vaccinated(&self) -> Result<i64, VaxportError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.students
            .iter()
            .filter(|s| s.vaccination_status.as_deref() == Some("Vaccinated"))
            .count() as i64)
    }

    async fn drives_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<UpcomingDrive>, VaxportError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        let mut drives: Vec<_> = t
            .drives
            .iter()
            .filter(|d| d.drive_date >= from && d.drive_date <= to)
            .map(|d| UpcomingDrive {
                drive_id: d.id,
                drive_title: d.title.clone(),
                drive_date: d.drive_date,
            })
            .collect();
        drives.sort_by_key(|d| d.drive_date);
        Ok(drives)
    }

    async fn list_students(&self) -> Result<Vec<DbStudent>, VaxportError> {
        self.check()?;
        Ok(self.tables.lock().unwrap().students.clone())
    }

    async fn list_vaccination_records(&self) -> Result<Vec<DbVaccinationRecord>, VaxportError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.links
            .iter()
            .filter_map(|&(student_id, drive_id)| {
                let d = t.drives.iter().find(|d| d.id == drive_id)?;
                Some(DbVaccinationRecord {
                    student_id,
                    drive_id,
                    drive_title: d.title.clone(),
                    vaccine_type: d.vaccine_name.clone(),
                    vaccination_date: d.drive_date,
                })
            })
            .collect())
    }

    async fn insert_student(&self, student: &StudentCreate) -> Result<i32, VaxportError> {
        self.insert_student_if_absent(student)
            .await?
            .ok_or_else(|| VaxportError::DuplicateStudent {
                name: student.name.clone(),
                classname: student.classname.clone(),
                dob: student.dob,
            })
    }

    async fn update_student(&self, id: i32, student: &StudentCreate) -> Result<u64, VaxportError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if t.students
            .iter()
            .any(|s| s.id != id && same_student(s, student))
        {
            return Err(VaxportError::DuplicateStudent {
                name: student.name.clone(),
                classname: student.classname.clone(),
                dob: student.dob,
            });
        }
        match t.students.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.name.clone_from(&student.name);
                s.classname.clone_from(&student.classname);
                s.dob = student.dob;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_student_if_absent(
        &self,
        student: &StudentCreate,
    ) -> Result<Option<i32>, VaxportError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if t.students.iter().any(|s| same_student(s, student)) {
            return Ok(None);
        }
        t.next_student_id += 1;
        let id = t.next_student_id;
        t.students.push(DbStudent {
            id,
            name: student.name.clone(),
            classname: student.classname.clone(),
            dob: student.dob,
            vaccination_status: None,
        });
        Ok(Some(id))
    }

    async fn record_vaccination(
        &self,
        student_id: i32,
        drive_id: i32,
    ) -> Result<bool, VaxportError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if !t.students.iter().any(|s| s.id == student_id)
            || !t.drives.iter().any(|d| d.id == drive_id)
        {
            return Err(VaxportError::UnexpectedError(
                "foreign key violation".to_string(),
            ));
        }
        if t.links.contains(&(student_id, drive_id)) {
            return Ok(false);
        }
        t.links.push((student_id, drive_id));
        Ok(true)
    }

    async fn set_vaccination_status(&self, id: i32, status: &str) -> Result<u64, VaxportError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        match t.students.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                s.vaccination_status = Some(status.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_vaccines(&self) -> Result<Vec<VaccineEntry>, VaxportError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        Ok(t.drives
            .iter()
            .map(|d| VaccineEntry {
                drive_id: d.id,
                drive_title: d.title.clone(),
                vaccine_type: d.vaccine_name.clone(),
            })
            .collect())
    }

    async fn list_drives(&self) -> Result<Vec<VaccinationDrive>, VaxportError> {
        self.check()?;
        let mut drives = self.tables.lock().unwrap().drives.clone();
        drives.sort_by_key(|d| d.drive_date);
        Ok(drives)
    }

    async fn create_drive(
        &self,
        drive: &DriveCreate,
    ) -> Result<Option<VaccinationDrive>, VaxportError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if t.drives.iter().any(|d| d.drive_date == drive.drive_date) {
            return Ok(None);
        }
        t.next_drive_id += 1;
        let created = VaccinationDrive {
            id: t.next_drive_id,
            title: drive.title.clone(),
            vaccine_name: drive.vaccine_name.clone(),
            drive_date: drive.drive_date,
            no_of_vaccine: drive.no_of_vaccine,
            classname: drive.classname.clone(),
        };
        t.drives.push(created.clone());
        Ok(Some(created))
    }

    async fn update_drive(
        &self,
        id: i32,
        drive: &DriveCreate,
    ) -> Result<Option<VaccinationDrive>, VaxportError> {
        self.check()?;
        let mut t = self.tables.lock().unwrap();
        if !t.drives.iter().any(|d| d.id == id) {
            return Ok(None);
        }
        if t.drives
            .iter()
            .any(|d| d.id != id && d.drive_date == drive.drive_date)
        {
            return Err(VaxportError::DriveDateTaken(drive.drive_date));
        }
        let d = t
            .drives
            .iter_mut()
            .find(|d| d.id == id)
            .expect("checked above");
        d.title.clone_from(&drive.title);
        d.vaccine_name.clone_from(&drive.vaccine_name);
        d.drive_date = drive.drive_date;
        d.no_of_vaccine = drive.no_of_vaccine;
        d.classname.clone_from(&drive.classname);
        Ok(Some(d.clone()))
    }

    async fn report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, VaxportError> {
        self.check()?;
        let t = self.tables.lock().unwrap();
        let mut students = t.students.clone();
        students.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut rows = Vec::new();
        for s in &students {
            let mut drives: Vec<&VaccinationDrive> = t
                .links
                .iter()
                .filter(|(sid, _)| *sid == s.id)
                .filter_map(|(_, did)| t.drives.iter().find(|d| d.id == *did))
                .collect();
            drives.sort_by_key(|d| d.drive_date);

            let joined: Vec<Option<&VaccinationDrive>> = if drives.is_empty() {
                vec![None]
            } else {
                drives.into_iter().map(Some).collect()
            };

            for d in joined {
                let keep = contains_ci(Some(&s.name), filter.student_name.as_ref())
                    && contains_ci(Some(&s.classname), filter.classname.as_ref())
                    && contains_ci(
                        d.and_then(|d| d.vaccine_name.as_deref()),
                        filter.vaccine_name.as_ref(),
                    )
                    && filter
                        .drive_date
                        .is_none_or(|date| d.is_some_and(|d| d.drive_date == date));
                if !keep {
                    continue;
                }
                rows.push(ReportRow {
                    student_name: s.name.clone(),
                    vaccination_status: s.vaccination_status.clone(),
                    student_class: s.classname.clone(),
                    date_of_birth: s.dob,
                    vaccination_drive_title: d.and_then(|d| d.title.clone()),
                    vaccination_date: d.map(|d| d.drive_date),
                    vaccine_name: d.and_then(|d| d.vaccine_name.clone()),
                    vaccine_quantity: d.and_then(|d| d.no_of_vaccine),
                    drive_class: d.and_then(|d| d.classname.clone()),
                });
            }
        }
        Ok(rows)
    }

    async fn report_drives(&self) -> Result<Vec<ReportDriveRow>, VaxportError> {
        self.check()?;
        let mut drives = self.tables.lock().unwrap().drives.clone();
        drives.sort_by(|a, b| b.drive_date.cmp(&a.drive_date));
        Ok(drives
            .into_iter()
            .map(|d| ReportDriveRow {
                drive_title: d.title,
                vaccination_date: d.drive_date,
                vaccine_name: d.vaccine_name,
                vaccine_quantity: d.no_of_vaccine,
                drive_class: d.classname,
            })
            .collect())
    }

    async fn report_students(&self) -> Result<Vec<ReportStudentRow>, VaxportError> {
        self.check()?;
        let mut students = self.tables.lock().unwrap().students.clone();
        students.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(students
            .into_iter()
            .map(|s| ReportStudentRow {
                student_name: s.name,
                vaccination_status: s.vaccination_status,
                student_class: s.classname,
                date_of_birth: s.dob,
            })
            .collect())
    }

    async fn current_date(&self) -> Result<NaiveDate, VaxportError> {
        self.check()?;
        Ok(self
            .today
            .lock()
            .unwrap()
            .unwrap_or_else(|| chrono::Local::now().date_naive()))
    }

    async fn ping(&self) -> Result<DateTime<Utc>, VaxportError> {
        self.check()?;
        Ok(Utc::now())
    }
}

pub fn app(store: Arc<MemoryStore>) -> Router {
    vaxport_router(VaxportState::new(store))
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    app.clone().oneshot(request).await.expect("request failed")
}

pub async fn body_string(resp: Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let text = body_string(resp).await;
    serde_json::from_str(&text).expect("response body was not JSON")
}

pub async fn expect_status(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> StatusCode {
    send(app, method, uri, body).await.status()
}
