//! Connects with the server's configuration and prints the database clock.

use std::process::ExitCode;
use tracing::{error, info};
use vaxport::{Config, PgStore, SchoolStore, utils::logging::init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&cfg.basic.loglevel);

    let mut database = cfg.database.clone();
    database.init_schema = false;

    let store = match PgStore::connect(&database).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, database_url = %database.redacted_url(), "Database connection failed");
            return ExitCode::FAILURE;
        }
    };

    match store.ping().await {
        Ok(now) => {
            info!(server_time = %now, "Database connected");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Database query failed");
            ExitCode::FAILURE
        }
    }
}
