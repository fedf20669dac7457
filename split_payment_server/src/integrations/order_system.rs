//! The downstream order-system integration.
//!
//! When the webhook path observes an approved payment, the confirmation is relayed here, authenticated with the
//! internal shared key. The order system treats repeated confirmations for the same preference id as idempotent
//! no-ops, so the relay contract is at-least-once.

use std::time::Duration;

use log::*;
use msp_common::Secret;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Could not initialize relay client: {0}")]
    Initialization(String),
    #[error("Could not reach the order system: {0}")]
    RequestFailed(String),
    #[error("Order system rejected the confirmation. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

/// The behaviour the webhook relay needs from the order system.
#[allow(async_fn_in_trait)]
pub trait OrderConfirmation {
    /// Tells the order system that the payment behind `preference_id` has been confirmed as approved.
    async fn confirm_payment(&self, preference_id: &str) -> Result<(), RelayError>;
}

#[derive(Clone)]
pub struct OrderSystemClient {
    url: String,
    internal_api_key: Secret<String>,
    client: Client,
}

impl OrderSystemClient {
    pub fn new(url: &str, internal_api_key: Secret<String>) -> Result<Self, RelayError> {
        let client =
            Client::builder().timeout(RELAY_TIMEOUT).build().map_err(|e| RelayError::Initialization(e.to_string()))?;
        Ok(Self { url: url.to_string(), internal_api_key, client })
    }
}

impl OrderConfirmation for OrderSystemClient {
    async fn confirm_payment(&self, preference_id: &str) -> Result<(), RelayError> {
        #[derive(Serialize)]
        struct Confirmation<'a> {
            preference_id: &'a str,
            internal_api_key: &'a str,
        }
        let body = Confirmation { preference_id, internal_api_key: self.internal_api_key.reveal() };
        debug!("📨️ Relaying payment confirmation for preference {preference_id}");
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::RequestFailed(e.to_string()))?;
        if response.status().is_success() {
            info!("📨️ Order system accepted the confirmation for preference {preference_id}");
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(RelayError::QueryError { status, message })
        }
    }
}
