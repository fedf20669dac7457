use log::*;
use msp_common::Secret;

#[derive(Debug, Clone)]
pub struct MercadoConfig {
    /// Base URL for the Mercado Pago REST API.
    pub api_url: String,
    /// Base URL for the OAuth authorization endpoint the seller's browser is sent to.
    pub auth_url: String,
    /// The marketplace connect application id.
    pub app_id: String,
    /// The marketplace connect application secret, used in the authorization-code exchange.
    pub app_secret: Secret<String>,
    /// The platform's own access token, used for payment lookups. Never used to create preferences.
    pub access_token: Secret<String>,
    /// The OAuth redirect URI. Must match the callback route this server exposes.
    pub redirect_uri: String,
}

impl Default for MercadoConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.mercadopago.com".to_string(),
            auth_url: "https://auth.mercadopago.com".to_string(),
            app_id: String::default(),
            app_secret: Secret::default(),
            access_token: Secret::default(),
            redirect_uri: String::default(),
        }
    }
}

impl MercadoConfig {
    pub fn new_from_env_or_default() -> Self {
        let defaults = Self::default();
        let api_url = std::env::var("MSP_MP_API_URL").unwrap_or(defaults.api_url);
        let auth_url = std::env::var("MSP_MP_AUTH_URL").unwrap_or(defaults.auth_url);
        let app_id = std::env::var("MSP_MP_APP_ID").unwrap_or_else(|_| {
            error!("MSP_MP_APP_ID is not set. Please set it to your marketplace application id.");
            String::default()
        });
        let app_secret = Secret::new(std::env::var("MSP_MP_APP_SECRET").unwrap_or_else(|_| {
            error!("MSP_MP_APP_SECRET is not set. Please set it to your marketplace application secret.");
            String::default()
        }));
        let access_token = Secret::new(std::env::var("MSP_MP_ACCESS_TOKEN").unwrap_or_else(|_| {
            error!("MSP_MP_ACCESS_TOKEN is not set. Please set it to the platform's own access token.");
            String::default()
        }));
        let public_url = std::env::var("MSP_PUBLIC_URL").unwrap_or_else(|_| {
            warn!("MSP_PUBLIC_URL is not set, using http://localhost:8480 as default");
            "http://localhost:8480".to_string()
        });
        let redirect_uri = format!("{public_url}/oauth/callback");
        Self { api_url, auth_url, app_id, app_secret, access_token, redirect_uri }
    }
}
