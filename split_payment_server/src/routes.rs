//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Every handler awaits its outbound calls (store lookups, gateway requests, the downstream relay), so one slow
//! dependency never blocks the worker from serving other in-flight requests.

use actix_web::{get, http::header, post, web, HttpResponse, Responder};
use log::*;
use mercado_tools::MercadoApi;
use serde_json::Value;
use split_payment_engine::{CredentialApi, SqliteCredentialStore};

use crate::{
    checkout::create_split_preference,
    config::ServerOptions,
    data_objects::{
        ConnectSellerParams,
        JsonResponse,
        NewPreferenceParams,
        OauthCallbackParams,
        SyncProductParams,
        WebhookParams,
    },
    errors::ServerError,
    integrations::order_system::OrderSystemClient,
    onboarding::{self, OnboardingOutcome},
    sync::sync_product_mapping,
    webhook::{payment_notification_id, process_payment_notification},
};

type Credentials = CredentialApi<SqliteCredentialStore>;

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Onboarding  --------------------------------------------------
/// Starts the seller connect flow: 302 to the processor's authorization endpoint with the seller id in `state`.
#[get("/connect")]
pub async fn connect_seller(
    params: web::Query<ConnectSellerParams>,
    gateway: web::Data<MercadoApi>,
) -> Result<HttpResponse, ServerError> {
    let url = onboarding::initiate(&params.into_inner(), gateway.get_ref())?;
    Ok(redirect(&url))
}

/// The OAuth callback the processor redirects the seller back to. Sends the seller on to the platform panel with a
/// status flag; a failed code exchange surfaces as a 500-class error instead.
#[get("/oauth/callback")]
pub async fn oauth_callback(
    params: web::Query<OauthCallbackParams>,
    gateway: web::Data<MercadoApi>,
    credentials: web::Data<Credentials>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let outcome =
        onboarding::complete_authorization(params.into_inner(), gateway.get_ref(), credentials.get_ref()).await?;
    let status = match outcome {
        OnboardingOutcome::Cancelled => "cancelled",
        OnboardingOutcome::Connected { .. } | OnboardingOutcome::ConnectedUnlinked => "connected",
    };
    Ok(redirect(&format!("{}/seller-panel?status={status}", options.frontend_url)))
}

//----------------------------------------------   Checkout  ----------------------------------------------------
/// Creates a split payment preference and returns the checkout URL for the buyer.
#[post("/create_preference")]
pub async fn create_preference(
    body: web::Json<NewPreferenceParams>,
    gateway: web::Data<MercadoApi>,
    credentials: web::Data<Credentials>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let summary =
        create_split_preference(body.into_inner(), gateway.get_ref(), credentials.get_ref(), options.get_ref())
            .await?;
    Ok(HttpResponse::Ok().json(summary))
}

//----------------------------------------------   Product sync  ------------------------------------------------
/// Internal endpoint for the platform backend. Protected by the shared internal key.
#[post("/sync/product")]
pub async fn sync_product(
    body: web::Json<SyncProductParams>,
    credentials: web::Data<Credentials>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    sync_product_mapping(body.into_inner(), &options.internal_api_key, credentials.get_ref()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Mapping saved.")))
}

//----------------------------------------------   Webhook  -----------------------------------------------------
/// The processor's payment notification endpoint (IPN).
///
/// Anything that is not a processable payment notification is acknowledged with a 200 so the processor does not
/// treat it as a delivery failure and redeliver it forever. A 500 is returned only when re-fetching the payment or
/// relaying the confirmation fails, which is exactly the "please redeliver" signal.
#[post("/webhook/payment")]
pub async fn payment_webhook(
    params: web::Query<WebhookParams>,
    body: web::Bytes,
    gateway: web::Data<MercadoApi>,
    orders: web::Data<OrderSystemClient>,
) -> Result<HttpResponse, ServerError> {
    // The body is not always JSON (the processor also sends form-encoded pings), so a parse failure is not an error.
    let body = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    let payment_id = match payment_notification_id(&params, &body) {
        Some(id) => id,
        None => {
            debug!("📨️ Ignoring notification (topic is not \"payment\", or no id was supplied)");
            return Ok(HttpResponse::Ok().json(JsonResponse::success("Notification ignored.")));
        },
    };
    let disposition = process_payment_notification(&payment_id, gateway.get_ref(), orders.get_ref()).await?;
    debug!("📨️ Webhook for payment {payment_id} processed: {disposition:?}");
    Ok(HttpResponse::Ok().json(JsonResponse::success("Webhook processed.")))
}

fn redirect(url: &str) -> HttpResponse {
    HttpResponse::Found().insert_header((header::LOCATION, url)).finish()
}
