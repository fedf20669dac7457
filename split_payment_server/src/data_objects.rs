use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// Query parameters for the onboarding-initiate route.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectSellerParams {
    pub seller_id: Option<String>,
}

/// Query parameters the payment processor redirects back with after the seller authorizes (or cancels).
///
/// Both fields are untrusted input. `code` is absent on cancellation, and `state` carries the platform's seller id
/// only if the initiate route put it there.
#[derive(Debug, Clone, Deserialize)]
pub struct OauthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// The checkout request body posted by the storefront.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPreferenceParams {
    pub product_id: Option<String>,
    pub payer_email: Option<String>,
    pub total_amount: Option<f64>,
    pub order_id: Option<String>,
}

/// The checkout response: where to send the buyer, and the preference id the webhook path will later join on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub checkout_url: String,
    pub preference_id: String,
}

/// The body of an inbound product sync call from the platform backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncProductParams {
    pub product_id: Option<String>,
    pub seller_id: Option<String>,
    pub internal_api_key: Option<String>,
}

/// Webhook query parameters. The processor may deliver `topic` and `id` here, or in the body, or both.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookParams {
    pub topic: Option<String>,
    pub id: Option<String>,
}
