//! Request-independent logic shared by the route handlers.

pub mod bulk_import;
pub mod csv_io;
pub mod dashboard;
pub mod dates;
pub mod history;
pub mod report_sort;
pub mod validate;
