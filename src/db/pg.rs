use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgDatabaseError, PgPoolOptions};
use std::str::FromStr;
use tracing::{debug, info, warn};
use vaxport_schema::{
    ReportDriveRow, ReportRow, ReportStudentRow, UpcomingDrive, VaccinationDrive, VaccineEntry,
};

use crate::config::DatabaseConfig;
use crate::db::create::{DriveCreate, ReportFilter, StudentCreate};
use crate::db::models::{
    DbReportDrive, DbReportRow, DbReportStudent, DbStudent, DbUpcomingDrive, DbVaccinationDrive,
    DbVaccinationRecord, DbVaccine,
};
use crate::db::report_query::build_report_query;
use crate::db::schema::{REQUIRED_UNIQUE_INDEXES, init_statements, missing_indexes};
use crate::db::store::SchoolStore;
use crate::error::{VaxportError, is_unique_violation};

/// [`SchoolStore`] over a shared PostgreSQL pool.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the pool from configuration, applies the schema bootstrap when enabled, then
    /// refuses to continue unless every unique index the writes depend on is present.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self, VaxportError> {
        let mut options = PgConnectOptions::from_str(&cfg.url)?;
        if let Some(schema) = cfg.schema.as_deref() {
            options = options.options([("search_path", schema)]);
        }

        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(cfg.acquire_timeout())
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        if cfg.init_schema {
            store.apply_schema().await?;
        }
        store.verify_unique_indexes().await?;

        info!(
            database_url = %cfg.redacted_url(),
            max_connections = cfg.max_connections,
            init_schema = cfg.init_schema,
            "Database pool initialized"
        );
        Ok(store)
    }

    /// Runs the idempotent bootstrap. Existing rows that break a new unique index yield
    /// [`VaxportError::SchemaDuplicateKey`].
    pub async fn apply_schema(&self) -> Result<(), VaxportError> {
        for stmt in init_statements() {
            match sqlx::query(stmt).execute(&self.pool).await {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => return Err(schema_duplicate(stmt, &e)),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Errors with the `CREATE UNIQUE INDEX` statements for every required index absent from
    /// the current schema.
    pub async fn verify_unique_indexes(&self) -> Result<(), VaxportError> {
        let present: Vec<String> = sqlx::query_scalar(
            "SELECT indexname::text FROM pg_indexes WHERE schemaname = current_schema()",
        )
        .fetch_all(&self.pool)
        .await?;

        let missing = missing_indexes(&present);
        if missing.is_empty() {
            return Ok(());
        }

        let statements = missing
            .iter()
            .map(|idx| format!("{};", idx.create))
            .collect::<Vec<_>>()
            .join(" ");
        warn!(
            missing = missing.len(),
            "Database schema lacks required unique indexes"
        );
        Err(VaxportError::MissingUniqueIndexes(statements))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const DRIVE_COLUMNS: &str = "id, title, vaccine_name, drive_date, no_of_vaccine, classname";

#[async_trait]
impl SchoolStore for PgStore {
    async fn count_students(&self) -> Result<i64, VaxportError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn count_vaccinated(&self) -> Result<i64, VaxportError> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM students WHERE vaccination_status = 'Vaccinated'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }

    async fn drives_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<UpcomingDrive>, VaxportError> {
        let rows = sqlx::query_as::<_, DbUpcomingDrive>(
            r#"
        SELECT id AS drive_id, title AS drive_title, drive_date
        FROM vaccination_drives
        WHERE drive_date BETWEEN $1 AND $2
        ORDER BY drive_date ASC
        "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_students(&self) -> Result<Vec<DbStudent>, VaxportError> {
        let rows = sqlx::query_as::<_, DbStudent>(
            "SELECT id, name, classname, dob, vaccination_status FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_vaccination_records(&self) -> Result<Vec<DbVaccinationRecord>, VaxportError> {
        let rows = sqlx::query_as::<_, DbVaccinationRecord>(
            r#"
        SELECT
            svl.student_id,
            vd.id AS drive_id,
            vd.title AS drive_title,
            vd.vaccine_name AS vaccine_type,
            vd.drive_date AS vaccination_date
        FROM student_vaccine_link svl
        JOIN vaccination_drives vd ON svl.vaccination_drive_id = vd.id
        ORDER BY svl.student_id, vd.drive_date
        "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_student(&self, student: &StudentCreate) -> Result<i32, VaxportError> {
        let res = sqlx::query_scalar::<_, i32>(
            "INSERT INTO students (name, classname, dob) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&student.name)
        .bind(&student.classname)
        .bind(student.dob)
        .fetch_one(&self.pool)
        .await;

        match res {
            Ok(id) => Ok(id),
            Err(e) if is_unique_violation(&e) => Err(duplicate_student(student)),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_student(&self, id: i32, student: &StudentCreate) -> Result<u64, VaxportError> {
        let res = sqlx::query(
            "UPDATE students SET name = $1, classname = $2, dob = $3 WHERE id = $4",
        )
        .bind(&student.name)
        .bind(&student.classname)
        .bind(student.dob)
        .bind(id)
        .execute(&self.pool)
        .await;

        match res {
            Ok(done) => Ok(done.rows_affected()),
            Err(e) if is_unique_violation(&e) => Err(duplicate_student(student)),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_student_if_absent(
        &self,
        student: &StudentCreate,
    ) -> Result<Option<i32>, VaxportError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
        INSERT INTO students (name, classname, dob)
        VALUES ($1, $2, $3)
        ON CONFLICT (name, classname, dob) DO NOTHING
        RETURNING id
        "#,
        )
        .bind(&student.name)
        .bind(&student.classname)
        .bind(student.dob)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn record_vaccination(
        &self,
        student_id: i32,
        drive_id: i32,
    ) -> Result<bool, VaxportError> {
        let res = sqlx::query(
            r#"
        INSERT INTO student_vaccine_link (student_id, vaccination_drive_id)
        VALUES ($1, $2)
        ON CONFLICT (student_id, vaccination_drive_id) DO NOTHING
        "#,
        )
        .bind(student_id)
        .bind(drive_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn set_vaccination_status(&self, id: i32, status: &str) -> Result<u64, VaxportError> {
        let res = sqlx::query("UPDATE students SET vaccination_status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn list_vaccines(&self) -> Result<Vec<VaccineEntry>, VaxportError> {
        let rows = sqlx::query_as::<_, DbVaccine>(
            r#"
        SELECT DISTINCT id AS drive_id, title AS drive_title, vaccine_name AS vaccine_type
        FROM vaccination_drives
        ORDER BY drive_id
        "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_drives(&self) -> Result<Vec<VaccinationDrive>, VaxportError> {
        let rows = sqlx::query_as::<_, DbVaccinationDrive>(&format!(
            "SELECT {DRIVE_COLUMNS} FROM vaccination_drives ORDER BY drive_date"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_drive(
        &self,
        drive: &DriveCreate,
    ) -> Result<Option<VaccinationDrive>, VaxportError> {
        let row = sqlx::query_as::<_, DbVaccinationDrive>(&format!(
            r#"
        INSERT INTO vaccination_drives (title, vaccine_name, drive_date, no_of_vaccine, classname)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (drive_date) DO NOTHING
        RETURNING {DRIVE_COLUMNS}
        "#
        ))
        .bind(&drive.title)
        .bind(&drive.vaccine_name)
        .bind(drive.drive_date)
        .bind(drive.no_of_vaccine)
        .bind(&drive.classname)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_none() {
            debug!(drive_date = %drive.drive_date, "Drive insert skipped: date taken");
        }
        Ok(row.map(Into::into))
    }

    async fn update_drive(
        &self,
        id: i32,
        drive: &DriveCreate,
    ) -> Result<Option<VaccinationDrive>, VaxportError> {
        let res = sqlx::query_as::<_, DbVaccinationDrive>(&format!(
            r#"
        UPDATE vaccination_drives
        SET title = $1, vaccine_name = $2, drive_date = $3, no_of_vaccine = $4, classname = $5
        WHERE id = $6
        RETURNING {DRIVE_COLUMNS}
        "#
        ))
        .bind(&drive.title)
        .bind(&drive.vaccine_name)
        .bind(drive.drive_date)
        .bind(drive.no_of_vaccine)
        .bind(&drive.classname)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(row) => Ok(row.map(Into::into)),
            Err(e) if is_unique_violation(&e) => {
                Err(VaxportError::DriveDateTaken(drive.drive_date))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>, VaxportError> {
        let mut qb = build_report_query(filter);
        let rows = qb
            .build_query_as::<DbReportRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn report_drives(&self) -> Result<Vec<ReportDriveRow>, VaxportError> {
        let rows = sqlx::query_as::<_, DbReportDrive>(
            r#"
        SELECT
            title AS drive_title,
            drive_date AS vaccination_date,
            vaccine_name AS vaccine_name,
            no_of_vaccine AS vaccine_quantity,
            classname AS drive_class
        FROM vaccination_drives
        ORDER BY drive_date DESC
        "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn report_students(&self) -> Result<Vec<ReportStudentRow>, VaxportError> {
        let rows = sqlx::query_as::<_, DbReportStudent>(
            r#"
        SELECT
            name AS student_name,
            vaccination_status AS vaccination_status,
            classname AS student_class,
            dob AS date_of_birth
        FROM students
        ORDER BY name ASC
        "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn current_date(&self) -> Result<NaiveDate, VaxportError> {
        let today: NaiveDate = sqlx::query_scalar("SELECT CURRENT_DATE")
            .fetch_one(&self.pool)
            .await?;
        Ok(today)
    }

    async fn ping(&self) -> Result<DateTime<Utc>, VaxportError> {
        let now: DateTime<Utc> = sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }
}

fn schema_duplicate(stmt: &str, e: &sqlx::Error) -> VaxportError {
    let index = REQUIRED_UNIQUE_INDEXES
        .iter()
        .find(|idx| stmt.contains(idx.name))
        .map_or_else(|| "<unknown>".to_string(), |idx| idx.name.to_string());

    let detail = match e {
        sqlx::Error::Database(db) => db
            .try_downcast_ref::<PgDatabaseError>()
            .and_then(PgDatabaseError::detail)
            .map_or_else(|| db.message().to_string(), str::to_string),
        other => other.to_string(),
    };

    VaxportError::SchemaDuplicateKey { index, detail }
}

fn duplicate_student(student: &StudentCreate) -> VaxportError {
    VaxportError::DuplicateStudent {
        name: student.name.clone(),
        classname: student.classname.clone(),
        dob: student.dob,
    }
}
