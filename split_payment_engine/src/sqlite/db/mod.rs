//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interactions are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool, or create an atomic transaction as
//! the need arises and call through to the functions without any other changes.
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod products;
pub mod sellers;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the store tables if they do not exist yet. Safe to run on every startup.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), SqlxError> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS sellers (
            seller_id     TEXT PRIMARY KEY NOT NULL,
            access_token  TEXT,
            refresh_token TEXT,
            connected_at  DATETIME
        );"#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS product_mappings (
            product_id TEXT PRIMARY KEY NOT NULL,
            seller_id  TEXT NOT NULL
        );"#,
    )
    .execute(pool)
    .await?;
    Ok(())
}
