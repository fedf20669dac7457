use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::{db_types::Seller, traits::CredentialStoreError};

/// Stores the token pair for a seller. Last write wins: re-authorization replaces the previous pair and bumps
/// `connected_at`.
pub async fn upsert_tokens(
    seller_id: &str,
    access_token: &str,
    refresh_token: &str,
    conn: &mut SqliteConnection,
) -> Result<Seller, CredentialStoreError> {
    let seller: Seller = sqlx::query_as(
        r#"INSERT INTO sellers (seller_id, access_token, refresh_token, connected_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (seller_id) DO UPDATE SET
            access_token = excluded.access_token,
            refresh_token = excluded.refresh_token,
            connected_at = excluded.connected_at
        RETURNING *;
        "#,
    )
    .bind(seller_id)
    .bind(access_token)
    .bind(refresh_token)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Saved token pair for seller {seller_id}");
    Ok(seller)
}

/// Creates an empty seller row if one does not exist. Existing rows (and their tokens) are left untouched.
pub async fn insert_if_absent(seller_id: &str, conn: &mut SqliteConnection) -> Result<(), CredentialStoreError> {
    sqlx::query("INSERT INTO sellers (seller_id) VALUES (?) ON CONFLICT (seller_id) DO NOTHING;")
        .bind(seller_id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_seller(seller_id: &str, conn: &mut SqliteConnection) -> Result<Option<Seller>, CredentialStoreError> {
    let seller = sqlx::query_as("SELECT * FROM sellers WHERE seller_id = ? LIMIT 1;")
        .bind(seller_id)
        .fetch_optional(conn)
        .await?;
    Ok(seller)
}
