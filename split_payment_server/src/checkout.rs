//! The synchronous checkout path: resolve the seller credential for the product, compute the split, and create the
//! payment preference on the seller's behalf.

use log::*;
use mercado_tools::{
    data_objects::{BackUrls, PaymentMethods, PreferenceItem, PreferencePayer, PreferenceRequest},
    helpers::marketplace_fee_percentage,
    PaymentGateway,
};
use split_payment_engine::{traits::CredentialStore, CredentialApi};

use crate::{
    config::ServerOptions,
    data_objects::{CheckoutSummary, NewPreferenceParams},
    errors::ServerError,
    helpers::required_field,
};

/// Builds and submits a split payment preference for one checkout request.
///
/// All validation happens before the store or the gateway is touched. The fee percentage is recomputed from this
/// request's own total. A total at or below the fixed platform fee would push the split above 100% and is rejected
/// outright rather than surfaced to the gateway.
pub async fn create_split_preference<G, B>(
    params: NewPreferenceParams,
    gateway: &G,
    credentials: &CredentialApi<B>,
    options: &ServerOptions,
) -> Result<CheckoutSummary, ServerError>
where
    G: PaymentGateway,
    B: CredentialStore,
{
    let product_id = required_field(params.product_id.as_deref(), "product_id")?;
    let payer_email = required_field(params.payer_email.as_deref(), "payer_email")?;
    let order_id = required_field(params.order_id.as_deref(), "order_id")?;
    let total_amount = params
        .total_amount
        .filter(|amount| *amount > 0.0)
        .ok_or_else(|| ServerError::InvalidRequest("total_amount must be greater than zero".to_string()))?;
    if total_amount <= options.marketplace_fee {
        return Err(ServerError::InvalidRequest(format!(
            "total_amount must exceed the marketplace fee of {}",
            options.marketplace_fee
        )));
    }

    let seller_token = credentials
        .resolve_access_token(product_id)
        .await?
        .ok_or_else(|| ServerError::SellerNotFound(format!("No seller credential for product {product_id}.")))?;

    let fee = marketplace_fee_percentage(options.marketplace_fee, total_amount);
    let request = split_preference_request(product_id, payer_email, order_id, total_amount, fee, options);
    debug!("🛒️ Creating split preference for order {order_id} with a {fee}% marketplace fee");
    let preference = gateway
        .create_preference(&seller_token, &request)
        .await
        .map_err(|e| ServerError::PreferenceCreationFailed(e.to_string()))?;
    info!("🛒️ Preference {} created for order {order_id}", preference.id);
    Ok(CheckoutSummary { checkout_url: preference.init_point, preference_id: preference.id })
}

/// Assembles the processor-facing request. The order id travels as `external_reference`, which is the join key the
/// webhook path uses to correlate the eventual payment back to the order.
fn split_preference_request(
    product_id: &str,
    payer_email: &str,
    order_id: &str,
    total_amount: f64,
    fee_percentage: f64,
    options: &ServerOptions,
) -> PreferenceRequest {
    let item = PreferenceItem {
        id: product_id.to_string(),
        title: format!("Order #{order_id} - Marketplace"),
        description: format!("Payment for order {order_id}"),
        unit_price: total_amount,
        quantity: 1,
    };
    let back_urls = BackUrls {
        success: format!("{}/my-orders?status=success&order_id={order_id}", options.frontend_url),
        failure: format!("{}/my-orders?status=failure&order_id={order_id}", options.frontend_url),
    };
    PreferenceRequest {
        items: vec![item],
        payer: PreferencePayer { email: payer_email.to_string() },
        marketplace_fee: fee_percentage,
        external_reference: order_id.to_string(),
        payment_methods: PaymentMethods::marketplace_default(),
        back_urls,
        notification_url: format!("{}/webhook/payment", options.public_url),
    }
}

#[cfg(test)]
mod tests {
    use mercado_tools::data_objects::NewPreference;
    use msp_common::Secret;
    use split_payment_engine::CredentialApi;

    use super::create_split_preference;
    use crate::{
        config::ServerOptions,
        data_objects::NewPreferenceParams,
        errors::ServerError,
        test::mocks::{MockCredentialStore, MockPaymentGateway},
    };

    fn options() -> ServerOptions {
        ServerOptions {
            public_url: "https://pay.example.com".to_string(),
            frontend_url: "https://shop.example.com".to_string(),
            marketplace_fee: 0.01,
            internal_api_key: Secret::new("key".to_string()),
        }
    }

    fn params() -> NewPreferenceParams {
        NewPreferenceParams {
            product_id: Some("prod-1".to_string()),
            payer_email: Some("buyer@example.com".to_string()),
            total_amount: Some(2.0),
            order_id: Some("order-77".to_string()),
        }
    }

    #[actix_web::test]
    async fn zero_total_is_rejected_before_any_lookup() {
        let _ = env_logger::try_init();
        let gateway = MockPaymentGateway::new();
        let credentials = CredentialApi::new(MockCredentialStore::new());
        let request = NewPreferenceParams { total_amount: Some(0.0), ..params() };
        let err = create_split_preference(request, &gateway, &credentials, &options()).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
    }

    #[actix_web::test]
    async fn total_at_or_below_the_fixed_fee_is_rejected() {
        let _ = env_logger::try_init();
        let gateway = MockPaymentGateway::new();
        let credentials = CredentialApi::new(MockCredentialStore::new());
        let request = NewPreferenceParams { total_amount: Some(0.005), ..params() };
        let err = create_split_preference(request, &gateway, &credentials, &options()).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
    }

    #[actix_web::test]
    async fn missing_fields_are_rejected_before_any_lookup() {
        let _ = env_logger::try_init();
        let gateway = MockPaymentGateway::new();
        let credentials = CredentialApi::new(MockCredentialStore::new());
        let request = NewPreferenceParams { payer_email: None, ..params() };
        let err = create_split_preference(request, &gateway, &credentials, &options()).await.unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
    }

    #[actix_web::test]
    async fn unmapped_product_is_a_seller_not_found() {
        let _ = env_logger::try_init();
        let gateway = MockPaymentGateway::new();
        let mut store = MockCredentialStore::new();
        store.expect_fetch_access_token().returning(|_| Ok(None));
        let credentials = CredentialApi::new(store);
        let err = create_split_preference(params(), &gateway, &credentials, &options()).await.unwrap_err();
        assert!(matches!(err, ServerError::SellerNotFound(_)));
    }

    #[actix_web::test]
    async fn preference_is_created_with_the_sellers_credential_and_recomputed_fee() {
        let _ = env_logger::try_init();
        let mut store = MockCredentialStore::new();
        store
            .expect_fetch_access_token()
            .withf(|product| product == "prod-1")
            .returning(|_| Ok(Some("APP_USR-seller".to_string())));
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_preference()
            .withf(|token, request| {
                token == "APP_USR-seller"
                    && request.external_reference == "order-77"
                    && (request.marketplace_fee - 0.5).abs() < 1e-9
                    && request.items.len() == 1
                    && (request.items[0].unit_price - 2.0).abs() < 1e-9
                    && request.notification_url == "https://pay.example.com/webhook/payment"
            })
            .times(1)
            .returning(|_, _| {
                Ok(NewPreference {
                    id: "pref-900".to_string(),
                    init_point: "https://mp.example.com/checkout/pref-900".to_string(),
                })
            });
        let credentials = CredentialApi::new(store);
        let summary = create_split_preference(params(), &gateway, &credentials, &options()).await.unwrap();
        assert_eq!(summary.preference_id, "pref-900");
        assert_eq!(summary.checkout_url, "https://mp.example.com/checkout/pref-900");
    }

    #[actix_web::test]
    async fn gateway_failure_is_a_preference_creation_failure() {
        let _ = env_logger::try_init();
        let mut store = MockCredentialStore::new();
        store.expect_fetch_access_token().returning(|_| Ok(Some("APP_USR-seller".to_string())));
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_preference().returning(|_, _| {
            Err(mercado_tools::MercadoApiError::QueryError { status: 400, message: "bad split".to_string() })
        });
        let credentials = CredentialApi::new(store);
        let err = create_split_preference(params(), &gateway, &credentials, &options()).await.unwrap_err();
        assert!(matches!(err, ServerError::PreferenceCreationFailed(_)));
    }
}
