use mercado_tools::{
    data_objects::{NewPreference, OauthTokens, PaymentRecord, PreferenceRequest},
    MercadoApiError,
    PaymentGateway,
};
use mockall::mock;
use split_payment_engine::{
    db_types::Seller,
    traits::{CredentialStore, CredentialStoreError},
};

use crate::integrations::order_system::{OrderConfirmation, RelayError};

mock! {
    pub CredentialStore {}
    impl CredentialStore for CredentialStore {
        fn url(&self) -> &str;
        async fn save_tokens(&self, seller_id: &str, access_token: &str, refresh_token: &str) -> Result<Seller, CredentialStoreError>;
        async fn upsert_seller(&self, seller_id: &str) -> Result<(), CredentialStoreError>;
        async fn upsert_product_mapping(&self, product_id: &str, seller_id: &str) -> Result<(), CredentialStoreError>;
        async fn fetch_access_token(&self, product_id: &str) -> Result<Option<String>, CredentialStoreError>;
        async fn fetch_seller(&self, seller_id: &str) -> Result<Option<Seller>, CredentialStoreError>;
    }
}

mock! {
    pub PaymentGateway {}
    impl PaymentGateway for PaymentGateway {
        fn authorization_url(&self, state: &str) -> String;
        async fn exchange_code(&self, code: &str) -> Result<OauthTokens, MercadoApiError>;
        async fn create_preference(&self, seller_token: &str, request: &PreferenceRequest) -> Result<NewPreference, MercadoApiError>;
        async fn get_payment(&self, payment_id: &str) -> Result<PaymentRecord, MercadoApiError>;
    }
}

mock! {
    pub OrderSystem {}
    impl OrderConfirmation for OrderSystem {
        async fn confirm_payment(&self, preference_id: &str) -> Result<(), RelayError>;
    }
}
