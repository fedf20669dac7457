//! The seller onboarding flow.
//!
//! Two operations drive it: [`initiate`], which sends the seller's browser to the processor's authorization endpoint
//! with the platform's seller id threaded through `state`, and [`complete_authorization`], which handles the redirect
//! back, exchanges the authorization code, and persists the token pair.

use log::*;
use mercado_tools::PaymentGateway;
use split_payment_engine::{traits::CredentialStore, CredentialApi};

use crate::{data_objects::{ConnectSellerParams, OauthCallbackParams}, errors::ServerError, helpers::required_field};

/// The result of a completed (not failed) callback. The caller decides how each variant is presented to the seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingOutcome {
    /// The seller backed out at the processor. No exchange was attempted and no credential was touched.
    Cancelled,
    /// The token pair was exchanged and stored against the seller id carried in `state`.
    Connected { seller_id: String },
    /// The exchange succeeded but `state` was absent, so there was no seller id to key the save on. A degraded
    /// outcome, not a failure. The tokens are discarded and the seller has to reconnect.
    ConnectedUnlinked,
}

/// Validates the initiate request and produces the authorization URL to redirect the seller to. Stateless.
pub fn initiate<G: PaymentGateway>(params: &ConnectSellerParams, gateway: &G) -> Result<String, ServerError> {
    let seller_id = required_field(params.seller_id.as_deref(), "seller_id")?;
    let url = gateway.authorization_url(seller_id);
    debug!("🔗️ Redirecting seller {seller_id} to the processor authorization endpoint");
    Ok(url)
}

/// Completes the OAuth flow when the processor redirects back to us.
///
/// A missing `code` means the seller cancelled. Only a fully parsed, successful exchange response reaches the token
/// save, so a failed or timed-out exchange can never leave a partially stored credential.
pub async fn complete_authorization<G, B>(
    params: OauthCallbackParams,
    gateway: &G,
    credentials: &CredentialApi<B>,
) -> Result<OnboardingOutcome, ServerError>
where
    G: PaymentGateway,
    B: CredentialStore,
{
    let code = match params.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => code,
        None => {
            info!("🔗️ Seller cancelled the authorization flow");
            return Ok(OnboardingOutcome::Cancelled);
        },
    };
    let tokens = gateway.exchange_code(code).await.map_err(|e| ServerError::ExchangeFailed(e.to_string()))?;
    match params.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(seller_id) => {
            credentials.save_tokens(seller_id, &tokens.access_token, &tokens.refresh_token).await?;
            info!("🔗️ Seller {seller_id} connected their payment account");
            Ok(OnboardingOutcome::Connected { seller_id: seller_id.to_string() })
        },
        None => {
            // The state parameter is the only channel carrying our seller id through the third-party redirect, and
            // it is untrusted input. Without it there is nothing to associate the tokens with.
            warn!("🔗️ Authorization code exchanged, but no state was returned. The token pair was NOT persisted.");
            Ok(OnboardingOutcome::ConnectedUnlinked)
        },
    }
}
