use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::MercadoConfig,
    data_objects::{NewPreference, OauthTokens, PaymentRecord, PreferenceRequest},
    traits::PaymentGateway,
    MercadoApiError,
};

/// Every outbound gateway call carries a bounded timeout so a stalled gateway cannot pin a request task forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The production Mercado Pago client.
///
/// The client value itself is credential-free. The acting credential is chosen per call: the platform's own token for
/// payment lookups, the connected seller's token for preference creation. Nothing seller-specific is ever cached on
/// the shared client.
#[derive(Clone)]
pub struct MercadoApi {
    config: MercadoConfig,
    client: Arc<Client>,
}

impl MercadoApi {
    pub fn new(config: MercadoConfig) -> Result<Self, MercadoApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MercadoApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, MercadoApiError> {
        let url = format!("{}{path}", self.config.api_url);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        let response = req.send().await.map_err(|e| MercadoApiError::RequestFailed(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| MercadoApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| MercadoApiError::RequestFailed(e.to_string()))?;
            Err(MercadoApiError::QueryError { status, message })
        }
    }
}

impl PaymentGateway for MercadoApi {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}/authorization?client_id={}&response_type=code&platform_id=mp&state={state}&redirect_uri={}",
            self.config.auth_url, self.config.app_id, self.config.redirect_uri
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<OauthTokens, MercadoApiError> {
        #[derive(Serialize)]
        struct TokenExchangeRequest<'a> {
            client_id: &'a str,
            client_secret: &'a str,
            code: &'a str,
            redirect_uri: &'a str,
            grant_type: &'a str,
        }
        let body = TokenExchangeRequest {
            client_id: &self.config.app_id,
            client_secret: self.config.app_secret.reveal(),
            code,
            redirect_uri: &self.config.redirect_uri,
            grant_type: "authorization_code",
        };
        debug!("Exchanging authorization code for a seller token pair");
        let tokens = self.rest_query::<OauthTokens, _>(Method::POST, "/oauth/token", None, Some(&body)).await?;
        info!("Authorization code exchange succeeded");
        Ok(tokens)
    }

    async fn create_preference(
        &self,
        seller_token: &str,
        request: &PreferenceRequest,
    ) -> Result<NewPreference, MercadoApiError> {
        debug!("Creating payment preference for order {}", request.external_reference);
        let preference = self
            .rest_query::<NewPreference, _>(Method::POST, "/checkout/preferences", Some(seller_token), Some(request))
            .await?;
        info!("Created preference {} for order {}", preference.id, request.external_reference);
        Ok(preference)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PaymentRecord, MercadoApiError> {
        let path = format!("/v1/payments/{payment_id}");
        debug!("Fetching payment record {payment_id}");
        let payment = self
            .rest_query::<PaymentRecord, ()>(Method::GET, &path, Some(self.config.access_token.reveal()), None)
            .await?;
        debug!("Fetched payment {payment_id}. Status: {}", payment.status);
        Ok(payment)
    }
}
