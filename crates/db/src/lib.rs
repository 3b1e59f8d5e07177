//! Postgres access for the notes service.
//!
//! Exposes pool construction, start-up checks, the embedded schema
//! migrations, and the [`repositories::NoteRepo`] used by the API handlers.

use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::FromRow;

use notes_core::types::Timestamp;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// The database server's clock, as returned by `SELECT NOW()`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DbClock {
    pub now: Timestamp,
}

/// Read the database server's current time.
pub async fn current_time(pool: &DbPool) -> Result<DbClock, sqlx::Error> {
    sqlx::query_as::<_, DbClock>("SELECT NOW() AS now")
        .fetch_one(pool)
        .await
}
