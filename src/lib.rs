pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod service;
pub mod utils;

pub use config::Config;
pub use db::{PgStore, SchoolStore};
pub use error::{ApiError, VaxportError};
pub use server::{VaxportState, vaxport_router};
