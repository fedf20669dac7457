use log::debug;
use sqlx::SqliteConnection;

use crate::traits::CredentialStoreError;

/// Creates or replaces the `product_id -> seller_id` mapping.
pub async fn upsert_mapping(
    product_id: &str,
    seller_id: &str,
    conn: &mut SqliteConnection,
) -> Result<(), CredentialStoreError> {
    sqlx::query(
        r#"INSERT INTO product_mappings (product_id, seller_id)
        VALUES (?, ?)
        ON CONFLICT (product_id) DO UPDATE SET seller_id = excluded.seller_id;
        "#,
    )
    .bind(product_id)
    .bind(seller_id)
    .execute(conn)
    .await?;
    debug!("🗃️ Product {product_id} mapped to seller {seller_id}");
    Ok(())
}

/// Looks up the access token for the seller mapped to the given product. `None` if there is no mapping, or the mapped
/// seller has no stored token.
pub async fn fetch_access_token_for_product(
    product_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<String>, CredentialStoreError> {
    let token: Option<(Option<String>,)> = sqlx::query_as(
        r#"SELECT s.access_token
        FROM sellers s
        JOIN product_mappings p ON s.seller_id = p.seller_id
        WHERE p.product_id = ?
        LIMIT 1;
        "#,
    )
    .bind(product_id)
    .fetch_optional(conn)
    .await?;
    Ok(token.and_then(|(t,)| t))
}
