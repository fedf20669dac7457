use crate::{
    data_objects::{NewPreference, OauthTokens, PaymentRecord, PreferenceRequest},
    MercadoApiError,
};

/// The behaviour of the remote payment gateway, as far as the split payment server is concerned.
///
/// [`crate::MercadoApi`] is the production implementation. The server's orchestration logic is written against this
/// trait so it can be exercised without a network.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// Builds the authorization URL a seller's browser is redirected to in order to connect their account.
    ///
    /// `state` carries the platform's own seller id through the third-party redirect. It is the only channel that
    /// does, and it comes back as untrusted input on the callback.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchanges an OAuth authorization code for the seller's token pair.
    async fn exchange_code(&self, code: &str) -> Result<OauthTokens, MercadoApiError>;

    /// Creates a payment preference on behalf of the seller owning `seller_token`.
    ///
    /// The seller's token is the acting credential here. This is what attributes the split to the correct seller
    /// account. The platform's own credential is never used for this call.
    async fn create_preference(
        &self,
        seller_token: &str,
        request: &PreferenceRequest,
    ) -> Result<NewPreference, MercadoApiError>;

    /// Fetches the authoritative payment record for the given payment id, using the platform's credential.
    async fn get_payment(&self, payment_id: &str) -> Result<PaymentRecord, MercadoApiError>;
}
