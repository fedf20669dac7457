use serde::{Deserialize, Serialize};

/// The token pair returned by a successful OAuth authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OauthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

/// A processor-facing payment preference request, created on behalf of a connected seller.
///
/// `marketplace_fee` is the platform's cut expressed as a *percentage* of the transaction total, and
/// `external_reference` carries the platform's order id so the webhook path can join the payment back to the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub payer: PreferencePayer,
    pub marketplace_fee: f64,
    pub external_reference: String,
    pub payment_methods: PaymentMethods,
    pub back_urls: BackUrls,
    pub notification_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencePayer {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethods {
    pub installments: u32,
    pub excluded_payment_types: Vec<PaymentTypeId>,
}

impl PaymentMethods {
    /// The restrictions the marketplace applies to every checkout: a single installment, and no debit card, ticket or
    /// ATM payments.
    pub fn marketplace_default() -> Self {
        let excluded = ["debit_card", "ticket", "atm"];
        Self {
            installments: 1,
            excluded_payment_types: excluded.iter().map(|id| PaymentTypeId { id: id.to_string() }).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTypeId {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
}

/// The processor's response to a preference creation: the preference id and the checkout URL to redirect the buyer to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPreference {
    pub id: String,
    pub init_point: String,
}

/// The authoritative payment record, fetched from the gateway when a webhook arrives.
///
/// The webhook payload itself is never trusted as proof of payment status. Only this lookup is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub preference_id: Option<String>,
    #[serde(default)]
    pub collector_id: Option<i64>,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub transaction_amount: Option<f64>,
}

impl PaymentRecord {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}
