//! The webhook relay: verify, then forward confirmed payments to the order system.
//!
//! The processor delivers notifications at least once, over query parameters or a JSON body, and interprets any
//! non-2xx response as "please redeliver". Everything that is not worth redelivering (foreign topics, malformed
//! pings, non-approved payments) must therefore be acknowledged with a 200.

use log::*;
use mercado_tools::PaymentGateway;
use serde_json::Value;

use crate::{data_objects::WebhookParams, errors::ServerError, integrations::order_system::OrderConfirmation};

/// What the relay did with a payment notification that made it past the topic filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDisposition {
    /// The authoritative record says the payment is not (or not yet) approved. Nothing to relay.
    NotApproved { status: String },
    /// The payment is approved but carries no preference id, so there is nothing to join it to. Logged and dropped.
    MissingPreferenceId,
    /// The confirmation was relayed downstream.
    Relayed { preference_id: String },
}

/// Pulls the payment id out of a notification, looking at query parameters first and the body second.
///
/// Returns `None` for anything that must be acknowledged without processing: a topic other than `payment`, or a
/// missing notification id.
pub fn payment_notification_id(params: &WebhookParams, body: &Value) -> Option<String> {
    let topic = params
        .topic
        .clone()
        .or_else(|| body["topic"].as_str().map(String::from))
        .or_else(|| body["type"].as_str().map(String::from));
    if topic.as_deref() != Some("payment") {
        return None;
    }
    params
        .id
        .clone()
        .or_else(|| body["data"]["id"].as_str().map(String::from))
        .or_else(|| body["data"]["id"].as_i64().map(|id| id.to_string()))
        .filter(|id| !id.is_empty())
}

/// Processes one payment notification.
///
/// The webhook payload is never trusted as proof of payment. The authoritative record is re-fetched from the gateway
/// first, and only an approved status triggers the downstream relay. Errors from either call propagate out, turning
/// into the 500 response that asks the processor to redeliver.
pub async fn process_payment_notification<G, R>(
    payment_id: &str,
    gateway: &G,
    orders: &R,
) -> Result<WebhookDisposition, ServerError>
where
    G: PaymentGateway,
    R: OrderConfirmation,
{
    let payment =
        gateway.get_payment(payment_id).await.map_err(|e| ServerError::PaymentLookupFailed(e.to_string()))?;
    debug!("📨️ Payment {payment_id} fetched. Status: {}", payment.status);
    if !payment.is_approved() {
        return Ok(WebhookDisposition::NotApproved { status: payment.status });
    }
    match payment.preference_id.filter(|id| !id.is_empty()) {
        None => {
            warn!("📨️ Payment {payment_id} is approved but has no preference id. Nothing to relay.");
            Ok(WebhookDisposition::MissingPreferenceId)
        },
        Some(preference_id) => {
            orders
                .confirm_payment(&preference_id)
                .await
                .map_err(|e| ServerError::RelayFailed(e.to_string()))?;
            info!("📨️ Relayed approved payment {payment_id} for preference {preference_id}");
            Ok(WebhookDisposition::Relayed { preference_id })
        },
    }
}

#[cfg(test)]
mod tests {
    use mercado_tools::data_objects::PaymentRecord;
    use serde_json::{json, Value};

    use super::{payment_notification_id, process_payment_notification, WebhookDisposition};
    use crate::{
        data_objects::WebhookParams,
        errors::ServerError,
        test::mocks::{MockOrderSystem, MockPaymentGateway},
    };

    fn payment(status: &str, preference_id: Option<&str>) -> PaymentRecord {
        PaymentRecord {
            id: Some(314),
            status: status.to_string(),
            preference_id: preference_id.map(String::from),
            collector_id: Some(42),
            external_reference: Some("order-77".to_string()),
            transaction_amount: Some(2.0),
        }
    }

    #[test]
    fn foreign_topics_are_ignored() {
        let params = WebhookParams { topic: Some("merchant_order".to_string()), id: Some("123".to_string()) };
        assert!(payment_notification_id(&params, &Value::Null).is_none());
    }

    #[test]
    fn missing_notification_id_is_ignored() {
        let params = WebhookParams { topic: Some("payment".to_string()), id: None };
        assert!(payment_notification_id(&params, &Value::Null).is_none());
    }

    #[test]
    fn topic_and_id_can_arrive_in_the_body() {
        let params = WebhookParams { topic: None, id: None };
        let body = json!({"type": "payment", "data": {"id": "314"}});
        assert_eq!(payment_notification_id(&params, &body).as_deref(), Some("314"));
        let body = json!({"topic": "payment", "data": {"id": 314}});
        assert_eq!(payment_notification_id(&params, &body).as_deref(), Some("314"));
    }

    #[test]
    fn query_parameters_take_precedence_over_the_body() {
        let params = WebhookParams { topic: Some("payment".to_string()), id: Some("271".to_string()) };
        let body = json!({"topic": "merchant_order", "data": {"id": "314"}});
        assert_eq!(payment_notification_id(&params, &body).as_deref(), Some("271"));
    }

    #[actix_web::test]
    async fn approved_payment_is_relayed_exactly_once() {
        let _ = env_logger::try_init();
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_get_payment()
            .withf(|id| id == "314")
            .times(1)
            .returning(|_| Ok(payment("approved", Some("pref-900"))));
        let mut orders = MockOrderSystem::new();
        orders.expect_confirm_payment().withf(|id| id == "pref-900").times(1).returning(|_| Ok(()));
        let outcome = process_payment_notification("314", &gateway, &orders).await.unwrap();
        assert_eq!(outcome, WebhookDisposition::Relayed { preference_id: "pref-900".to_string() });
    }

    #[actix_web::test]
    async fn pending_payment_relays_nothing() {
        let _ = env_logger::try_init();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_get_payment().times(1).returning(|_| Ok(payment("pending", Some("pref-900"))));
        let orders = MockOrderSystem::new();
        let outcome = process_payment_notification("314", &gateway, &orders).await.unwrap();
        assert_eq!(outcome, WebhookDisposition::NotApproved { status: "pending".to_string() });
    }

    #[actix_web::test]
    async fn approved_payment_without_preference_id_is_dropped() {
        let _ = env_logger::try_init();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_get_payment().times(1).returning(|_| Ok(payment("approved", None)));
        let orders = MockOrderSystem::new();
        let outcome = process_payment_notification("314", &gateway, &orders).await.unwrap();
        assert_eq!(outcome, WebhookDisposition::MissingPreferenceId);
    }

    #[actix_web::test]
    async fn failed_lookup_asks_for_redelivery() {
        let _ = env_logger::try_init();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_get_payment().times(1).returning(|_| {
            Err(mercado_tools::MercadoApiError::RequestFailed("connection timed out".to_string()))
        });
        let orders = MockOrderSystem::new();
        let err = process_payment_notification("314", &gateway, &orders).await.unwrap_err();
        assert!(matches!(err, ServerError::PaymentLookupFailed(_)));
    }

    #[actix_web::test]
    async fn failed_relay_asks_for_redelivery() {
        let _ = env_logger::try_init();
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_get_payment().times(1).returning(|_| Ok(payment("approved", Some("pref-900"))));
        let mut orders = MockOrderSystem::new();
        orders.expect_confirm_payment().times(1).returning(|_| {
            Err(crate::integrations::order_system::RelayError::RequestFailed("unreachable".to_string()))
        });
        let err = process_payment_notification("314", &gateway, &orders).await.unwrap_err();
        assert!(matches!(err, ServerError::RelayFailed(_)));
    }
}
