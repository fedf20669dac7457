//! `SqliteCredentialStore` is a concrete implementation of the credential store backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the [`CredentialStore`] trait.
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{create_schema, new_pool, products, sellers};
use crate::{
    db_types::Seller,
    traits::{CredentialStore, CredentialStoreError},
};

#[derive(Clone)]
pub struct SqliteCredentialStore {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteCredentialStore ({:?})", self.pool)
    }
}

impl SqliteCredentialStore {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, CredentialStoreError> {
        let pool = new_pool(url, max_connections).await?;
        create_schema(&pool).await?;
        Ok(Self { url: url.to_string(), pool })
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn save_tokens(
        &self,
        seller_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Seller, CredentialStoreError> {
        let mut conn = self.pool.acquire().await.map_err(CredentialStoreError::from)?;
        sellers::upsert_tokens(seller_id, access_token, refresh_token, &mut conn).await
    }

    async fn upsert_seller(&self, seller_id: &str) -> Result<(), CredentialStoreError> {
        let mut conn = self.pool.acquire().await.map_err(CredentialStoreError::from)?;
        sellers::insert_if_absent(seller_id, &mut conn).await
    }

    async fn upsert_product_mapping(&self, product_id: &str, seller_id: &str) -> Result<(), CredentialStoreError> {
        let mut conn = self.pool.acquire().await.map_err(CredentialStoreError::from)?;
        products::upsert_mapping(product_id, seller_id, &mut conn).await
    }

    async fn fetch_access_token(&self, product_id: &str) -> Result<Option<String>, CredentialStoreError> {
        let mut conn = self.pool.acquire().await.map_err(CredentialStoreError::from)?;
        products::fetch_access_token_for_product(product_id, &mut conn).await
    }

    async fn fetch_seller(&self, seller_id: &str) -> Result<Option<Seller>, CredentialStoreError> {
        let mut conn = self.pool.acquire().await.map_err(CredentialStoreError::from)?;
        sellers::fetch_seller(seller_id, &mut conn).await
    }
}
