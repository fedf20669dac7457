//! Behaviour definitions for credential store backends.

use thiserror::Error;

use crate::db_types::Seller;

#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CredentialStoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

/// This trait defines the behaviour for backends holding seller credentials and product mappings.
///
/// The store is the only shared mutable resource in the system. All mutations are expressed as atomic upserts, so no
/// application-level locking is needed on top of it.
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Stores the OAuth token pair for the given seller, creating the seller row if it does not exist yet.
    ///
    /// Re-authorization has overwrite semantics. A new token pair replaces whatever was stored before, and
    /// `connected_at` is bumped to the time of the save.
    async fn save_tokens(
        &self,
        seller_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Seller, CredentialStoreError>;

    /// Creates an empty seller row if none exists. Does nothing (and does not touch stored tokens) if it does.
    async fn upsert_seller(&self, seller_id: &str) -> Result<(), CredentialStoreError>;

    /// Creates or updates the `product_id -> seller_id` mapping.
    async fn upsert_product_mapping(&self, product_id: &str, seller_id: &str) -> Result<(), CredentialStoreError>;

    /// Fetches the access token for the seller mapped to the given product.
    ///
    /// Returns `None` if the product has no mapping, or the mapped seller does not exist. A mapped seller without a
    /// stored token yields `Some(None) -> None` as well; callers that need to distinguish an empty string from a
    /// missing token should use [`crate::CredentialApi::resolve_access_token`] instead.
    async fn fetch_access_token(&self, product_id: &str) -> Result<Option<String>, CredentialStoreError>;

    /// Fetches the full seller record, if it exists.
    async fn fetch_seller(&self, seller_id: &str) -> Result<Option<Seller>, CredentialStoreError>;
}
