use std::fmt::Debug;

use log::*;

use crate::{
    db_types::Seller,
    traits::{CredentialStore, CredentialStoreError},
};

/// The public API for the credential store.
///
/// Thin wrapper around a [`CredentialStore`] backend that adds the token resolution semantics the checkout path
/// relies on.
pub struct CredentialApi<B> {
    db: B,
}

impl<B> Debug for CredentialApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialApi")
    }
}

impl<B> CredentialApi<B>
where B: CredentialStore
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Persists the token pair obtained from a successful OAuth code exchange. Overwrites any prior pair for the
    /// seller.
    pub async fn save_tokens(
        &self,
        seller_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Seller, CredentialStoreError> {
        let seller = self.db.save_tokens(seller_id, access_token, refresh_token).await?;
        debug!("🗃️ Stored token pair for seller {seller_id}");
        Ok(seller)
    }

    /// Pre-creates an empty seller row so the OAuth flow has something to key on later.
    pub async fn upsert_seller(&self, seller_id: &str) -> Result<(), CredentialStoreError> {
        self.db.upsert_seller(seller_id).await
    }

    pub async fn upsert_product_mapping(&self, product_id: &str, seller_id: &str) -> Result<(), CredentialStoreError> {
        self.db.upsert_product_mapping(product_id, seller_id).await
    }

    /// Resolves the acting credential for a checkout on the given product.
    ///
    /// Returns `None` when the product has no mapping, the mapped seller has no stored token, or the stored token is
    /// empty. No validation of the token's shape is performed. Any non-empty stored value is accepted, and the
    /// processor's own authorization check decides whether it is usable.
    pub async fn resolve_access_token(&self, product_id: &str) -> Result<Option<String>, CredentialStoreError> {
        let token = self.db.fetch_access_token(product_id).await?;
        match token.filter(|t| !t.trim().is_empty()) {
            Some(t) => Ok(Some(t)),
            None => {
                warn!("🗃️ No usable seller credential for product {product_id}");
                Ok(None)
            },
        }
    }

    pub async fn fetch_seller(&self, seller_id: &str) -> Result<Option<Seller>, CredentialStoreError> {
        self.db.fetch_seller(seller_id).await
    }
}
