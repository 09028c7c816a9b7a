//! SQL DDL for bootstrapping the PostgreSQL schema.
//!
//! Every statement is idempotent so the bootstrap can run on each start. There is no
//! versioning; changing an existing table is out of scope here.

/// PostgreSQL schema:
/// - `students`
/// - `vaccination_drives` (at most one drive per calendar date)
/// - `student_vaccine_link` (at most one link per student/drive pair)
///
/// The unique indexes back the `ON CONFLICT DO NOTHING` writes in `PgStore`.
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    classname TEXT NOT NULL,
    dob DATE NOT NULL,
    vaccination_status TEXT NULL
);

-- bulk import treats (name, classname, dob) as the identity of a student
CREATE UNIQUE INDEX IF NOT EXISTS uq_students_identity
    ON students (name, classname, dob);

CREATE TABLE IF NOT EXISTS vaccination_drives (
    id SERIAL PRIMARY KEY,
    title TEXT NULL,
    vaccine_name TEXT NULL,
    drive_date DATE NOT NULL,
    no_of_vaccine INTEGER NULL,
    classname TEXT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS uq_vaccination_drives_date
    ON vaccination_drives (drive_date);

CREATE TABLE IF NOT EXISTS student_vaccine_link (
    id SERIAL PRIMARY KEY,
    student_id INTEGER NOT NULL REFERENCES students (id),
    vaccination_drive_id INTEGER NOT NULL REFERENCES vaccination_drives (id)
);

CREATE UNIQUE INDEX IF NOT EXISTS uq_student_vaccine_link_pair
    ON student_vaccine_link (student_id, vaccination_drive_id);

CREATE INDEX IF NOT EXISTS idx_student_vaccine_link_drive
    ON student_vaccine_link (vaccination_drive_id);
"#;

/// A unique index that `PgStore` writes rely on for `ON CONFLICT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredIndex {
    pub name: &'static str,
    pub create: &'static str,
}

/// Must exist before the store accepts requests, whether or not the bootstrap ran.
pub const REQUIRED_UNIQUE_INDEXES: [RequiredIndex; 3] = [
    RequiredIndex {
        name: "uq_students_identity",
        create: "CREATE UNIQUE INDEX uq_students_identity ON students (name, classname, dob)",
    },
    RequiredIndex {
        name: "uq_vaccination_drives_date",
        create: "CREATE UNIQUE INDEX uq_vaccination_drives_date ON vaccination_drives (drive_date)",
    },
    RequiredIndex {
        name: "uq_student_vaccine_link_pair",
        create: "CREATE UNIQUE INDEX uq_student_vaccine_link_pair \
                 ON student_vaccine_link (student_id, vaccination_drive_id)",
    },
];

/// Required indexes whose name is not in `present`, in declaration order.
pub fn missing_indexes<S: AsRef<str>>(present: &[S]) -> Vec<RequiredIndex> {
    REQUIRED_UNIQUE_INDEXES
        .into_iter()
        .filter(|idx| !present.iter().any(|p| p.as_ref() == idx.name))
        .collect()
}

/// Statements of [`POSTGRES_INIT`] in execution order.
pub fn init_statements() -> impl Iterator<Item = &'static str> {
    POSTGRES_INIT
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
