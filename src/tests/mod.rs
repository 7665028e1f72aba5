//! tests/mod.rs
mod admin_service_tests;
mod record_service_tests;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::db::run_migrations;

/// SQLite en memoria, migrada. Una sola conexión que nunca se recicla
/// (cada conexión nueva vería una base vacía).
pub(crate) async fn migrated_pool() -> Pool<Sqlite> {
    let options =
        SqliteConnectOptions::from_str("sqlite::memory:").expect("Invalid sqlite url");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open sqlite");
    run_migrations(&pool).await.expect("Failed to migrate");
    pool
}
