//! The inbound product sync operation, called by the platform backend whenever a product is created or reassigned.

use log::*;
use msp_common::Secret;
use split_payment_engine::{traits::CredentialStore, CredentialApi};

use crate::{data_objects::SyncProductParams, errors::ServerError, helpers::required_field};

/// Upserts the `product -> seller` mapping and pre-creates an empty seller row for the OAuth flow to key on later.
///
/// The internal key check runs before anything else. A mismatch is a `Forbidden` and leaves the store untouched.
pub async fn sync_product_mapping<B: CredentialStore>(
    params: SyncProductParams,
    expected_key: &Secret<String>,
    credentials: &CredentialApi<B>,
) -> Result<(), ServerError> {
    let supplied = params.internal_api_key.as_deref().unwrap_or_default();
    if expected_key.reveal().is_empty() || supplied != expected_key.reveal() {
        warn!("🔄️ Product sync called with an invalid internal API key");
        return Err(ServerError::Forbidden);
    }
    let product_id = required_field(params.product_id.as_deref(), "product_id")?;
    let seller_id = required_field(params.seller_id.as_deref(), "seller_id")?;
    credentials.upsert_product_mapping(product_id, seller_id).await?;
    credentials.upsert_seller(seller_id).await?;
    info!("🔄️ Product {product_id} mapped to seller {seller_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use msp_common::Secret;
    use split_payment_engine::CredentialApi;

    use super::sync_product_mapping;
    use crate::{data_objects::SyncProductParams, errors::ServerError, test::mocks::MockCredentialStore};

    fn params(key: &str) -> SyncProductParams {
        SyncProductParams {
            product_id: Some("prod-1".to_string()),
            seller_id: Some("seller-1".to_string()),
            internal_api_key: Some(key.to_string()),
        }
    }

    #[actix_web::test]
    async fn wrong_key_is_forbidden_and_mutates_nothing() {
        let _ = env_logger::try_init();
        let credentials = CredentialApi::new(MockCredentialStore::new());
        let key = Secret::new("right-key".to_string());
        let err = sync_product_mapping(params("wrong-key"), &key, &credentials).await.unwrap_err();
        assert!(matches!(err, ServerError::Forbidden));
    }

    #[actix_web::test]
    async fn an_unset_server_key_rejects_everything() {
        let _ = env_logger::try_init();
        let credentials = CredentialApi::new(MockCredentialStore::new());
        let err = sync_product_mapping(params(""), &Secret::default(), &credentials).await.unwrap_err();
        assert!(matches!(err, ServerError::Forbidden));
    }

    #[actix_web::test]
    async fn missing_ids_are_rejected_after_the_key_check() {
        let _ = env_logger::try_init();
        let credentials = CredentialApi::new(MockCredentialStore::new());
        let key = Secret::new("right-key".to_string());
        let request = SyncProductParams { product_id: None, ..params("right-key") };
        let err = sync_product_mapping(request, &key, &credentials).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
    }

    #[actix_web::test]
    async fn valid_sync_upserts_mapping_and_seller() {
        let _ = env_logger::try_init();
        let mut store = MockCredentialStore::new();
        store
            .expect_upsert_product_mapping()
            .withf(|product, seller| product == "prod-1" && seller == "seller-1")
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_upsert_seller().withf(|seller| seller == "seller-1").times(1).returning(|_| Ok(()));
        let credentials = CredentialApi::new(store);
        let key = Secret::new("right-key".to_string());
        sync_product_mapping(params("right-key"), &key, &credentials).await.unwrap();
    }
}
