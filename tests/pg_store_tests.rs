//! Runs against a real PostgreSQL only when `VAXPORT_TEST_DATABASE_URL` is set.

use chrono::{Days, NaiveDate};
use std::time::{SystemTime, UNIX_EPOCH};
use vaxport::VaxportError;
use vaxport::config::DatabaseConfig;
use vaxport::db::{DriveCreate, PgStore, ReportFilter, SchoolStore, StudentCreate};

fn test_config() -> Option<DatabaseConfig> {
    let Ok(url) = std::env::var("VAXPORT_TEST_DATABASE_URL") else {
        eprintln!("VAXPORT_TEST_DATABASE_URL not set; skipping");
        return None;
    };
    Some(DatabaseConfig {
        url,
        max_connections: 2,
        ..DatabaseConfig::default()
    })
}

async fn connect() -> Option<PgStore> {
    let cfg = test_config()?;
    Some(PgStore::connect(&cfg).await.expect("connect to test database"))
}

/// The three tables as a pre-provisioned database has them: no unique indexes.
const LEGACY_SCHEMA: [&str; 3] = [
    "CREATE TABLE students (id SERIAL PRIMARY KEY, name TEXT NOT NULL, classname TEXT NOT NULL, \
     dob DATE NOT NULL, vaccination_status TEXT NULL)",
    "CREATE TABLE vaccination_drives (id SERIAL PRIMARY KEY, title TEXT, vaccine_name TEXT, \
     drive_date DATE NOT NULL, no_of_vaccine INTEGER, classname TEXT)",
    "CREATE TABLE student_vaccine_link (id SERIAL PRIMARY KEY, \
     student_id INTEGER REFERENCES students (id), \
     vaccination_drive_id INTEGER REFERENCES vaccination_drives (id))",
];

/// Creates a throwaway schema holding the legacy tables; returns its name.
async fn legacy_schema(admin: &PgStore, tag: u128) -> String {
    let schema = format!("vaxport_legacy_{tag}");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(admin.pool())
        .await
        .unwrap();
    for ddl in LEGACY_SCHEMA {
        let qualified = ddl
            .replace("TABLE ", &format!("TABLE {schema}."))
            .replace("REFERENCES ", &format!("REFERENCES {schema}."));
        sqlx::query(&qualified).execute(admin.pool()).await.unwrap();
    }
    schema
}

async fn drop_schema(admin: &PgStore, schema: &str) {
    sqlx::query(&format!("DROP SCHEMA {schema} CASCADE"))
        .execute(admin.pool())
        .await
        .unwrap();
}

#[tokio::test]
async fn schema_without_unique_indexes_is_refused_at_connect() {
    let Some(admin) = connect().await else {
        return;
    };
    let schema = legacy_schema(&admin, run_tag()).await;

    let mut cfg = test_config().unwrap();
    cfg.schema = Some(schema.clone());
    cfg.init_schema = false;
    let result = PgStore::connect(&cfg).await;

    drop_schema(&admin, &schema).await;

    let statements = match result {
        Err(VaxportError::MissingUniqueIndexes(statements)) => statements,
        other => panic!("expected MissingUniqueIndexes, got {:?}", other.map(|_| ())),
    };
    for name in [
        "uq_students_identity",
        "uq_vaccination_drives_date",
        "uq_student_vaccine_link_pair",
    ] {
        assert!(
            statements.contains(&format!("CREATE UNIQUE INDEX {name}")),
            "{statements}"
        );
    }
}

#[tokio::test]
async fn bootstrap_names_the_duplicated_key() {
    let Some(admin) = connect().await else {
        return;
    };
    let schema = legacy_schema(&admin, run_tag()).await;
    for _ in 0..2 {
        sqlx::query(&format!(
            "INSERT INTO {schema}.students (name, classname, dob) VALUES ('Asha', '5A', '2015-03-02')"
        ))
        .execute(admin.pool())
        .await
        .unwrap();
    }

    let mut cfg = test_config().unwrap();
    cfg.schema = Some(schema.clone());
    cfg.init_schema = true;
    let result = PgStore::connect(&cfg).await;

    drop_schema(&admin, &schema).await;

    let (index, detail) = match result {
        Err(VaxportError::SchemaDuplicateKey { index, detail }) => (index, detail),
        other => panic!("expected SchemaDuplicateKey, got {:?}", other.map(|_| ())),
    };
    assert_eq!(index, "uq_students_identity");
    assert!(detail.contains("Asha"), "{detail}");
}

#[tokio::test]
async fn bootstrap_completes_a_clean_legacy_schema() {
    let Some(admin) = connect().await else {
        return;
    };
    let schema = legacy_schema(&admin, run_tag()).await;

    let mut cfg = test_config().unwrap();
    cfg.schema = Some(schema.clone());
    cfg.init_schema = true;
    let result = PgStore::connect(&cfg).await;
    let ok = match &result {
        Ok(store) => store.verify_unique_indexes().await.is_ok(),
        Err(_) => false,
    };
    if let Ok(store) = result {
        store.pool().close().await;
    }

    drop_schema(&admin, &schema).await;
    assert!(ok, "bootstrap should add the missing indexes");
}

fn run_tag() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos()
}

#[tokio::test]
async fn uniqueness_is_enforced_by_the_writes() {
    let Some(store) = connect().await else {
        return;
    };
    store.ping().await.expect("ping");
    store.current_date().await.expect("current date");

    let tag = run_tag();
    // A far-future date no real drive uses, distinct per run.
    let day = NaiveDate::from_ymd_opt(2200, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(u64::try_from(tag % 36_500).unwrap()))
        .unwrap();

    let student = StudentCreate {
        name: format!("pg-test-{tag}"),
        classname: "T1".to_string(),
        dob: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(),
    };
    let id = store
        .insert_student_if_absent(&student)
        .await
        .unwrap()
        .expect("first insert adds the row");
    assert_eq!(store.insert_student_if_absent(&student).await.unwrap(), None);
    assert!(matches!(
        store.insert_student(&student).await,
        Err(VaxportError::DuplicateStudent { .. })
    ));

    let drive = DriveCreate {
        title: Some(format!("pg-drive-{tag}")),
        vaccine_name: Some("OPV".to_string()),
        drive_date: day,
        no_of_vaccine: Some(10),
        classname: Some("T1".to_string()),
    };
    let created = store
        .create_drive(&drive)
        .await
        .unwrap()
        .expect("date is free");
    assert_eq!(created.drive_date, day);
    assert!(store.create_drive(&drive).await.unwrap().is_none());

    assert!(store.record_vaccination(id, created.id).await.unwrap());
    assert!(!store.record_vaccination(id, created.id).await.unwrap());

    let rows = store
        .report(&ReportFilter {
            student_name: Some(format!("PG-TEST-{tag}")),
            drive_date: Some(day),
            ..ReportFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].vaccine_name.as_deref(), Some("OPV"));

    assert!(store.update_drive(i32::MAX, &drive).await.unwrap().is_none());

    sqlx::query("DELETE FROM student_vaccine_link WHERE student_id = $1")
        .bind(id)
        .execute(store.pool())
        .await
        .unwrap();
    sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(id)
        .execute(store.pool())
        .await
        .unwrap();
    sqlx::query("DELETE FROM vaccination_drives WHERE id = $1")
        .bind(created.id)
        .execute(store.pool())
        .await
        .unwrap();
}
