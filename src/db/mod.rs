//! Database module: row models, schema bootstrap and the store seam.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `create.rs`: validated write inputs and report filters
//! - `schema.rs`: SQL DDL for bootstrapping the database (PostgreSQL)
//! - `store.rs`: the `SchoolStore` trait handlers are written against
//! - `pg.rs`: `SchoolStore` over a `PgPool`
//! - `report_query.rs`: dynamic SQL for the filtered report

pub mod create;
pub mod models;
pub mod pg;
pub mod report_query;
pub mod schema;
pub mod store;

pub use create::{DriveCreate, ReportFilter, StudentCreate};
pub use models::{DbStudent, DbVaccinationRecord};
pub use pg::PgStore;
pub use schema::POSTGRES_INIT;
pub use store::SchoolStore;
