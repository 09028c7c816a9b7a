use chrono::NaiveDate;
use thiserror::Error as ThisError;

/// Failures below the HTTP layer: storage, configuration and file formats.
#[derive(Debug, ThisError)]
pub enum VaxportError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Another drive already occupies this date (unique index `vaccination_drives.drive_date`).
    #[error("A vaccination drive is already scheduled on {0}")]
    DriveDateTaken(NaiveDate),

    /// Another student row has the same (name, classname, dob).
    #[error("Duplicate student: {name} ({classname}, {dob})")]
    DuplicateStudent {
        name: String,
        classname: String,
        dob: NaiveDate,
    },

    /// The connected database lacks unique indexes the writes depend on. Carries the
    /// `CREATE UNIQUE INDEX` statements to run.
    #[error(
        "Database is missing required unique index(es): {0}. \
         Create them, or start once with database.init_schema = true"
    )]
    MissingUniqueIndexes(String),

    /// Schema bootstrap could not add a unique index because existing rows break it.
    #[error(
        "Cannot create unique index {index}: existing rows are duplicated ({detail}). \
         Remove the duplicates and restart"
    )]
    SchemaDuplicateKey { index: String, detail: String },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("CSV is missing required column(s): {0}")]
    CsvMissingColumns(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] Box<figment::Error>),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<figment::Error> for VaxportError {
    fn from(e: figment::Error) -> Self {
        VaxportError::ConfigError(Box::new(e))
    }
}

/// `true` when the database rejected a write because of a unique index.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
