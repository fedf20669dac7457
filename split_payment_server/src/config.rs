use std::env;

use log::*;
use mercado_tools::MercadoConfig;
use msp_common::Secret;

const DEFAULT_MSP_HOST: &str = "127.0.0.1";
const DEFAULT_MSP_PORT: u16 = 8480;
const DEFAULT_MARKETPLACE_FEE: f64 = 0.01;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// This service's own public base URL. Used to build the OAuth redirect URI and the webhook notification URL.
    pub public_url: String,
    /// The platform frontend base URL. Seller-panel and checkout back-url redirects point here.
    pub frontend_url: String,
    /// The downstream order system endpoint that confirmed payments are relayed to.
    pub order_webhook_url: String,
    /// Shared secret protecting the inbound sync endpoint and authenticating the outbound relay.
    pub internal_api_key: Secret<String>,
    /// The platform's fixed absolute cut per transaction. Converted to a percentage per request.
    pub marketplace_fee: f64,
    /// Payment gateway configuration.
    pub mercado_config: MercadoConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MSP_HOST.to_string(),
            port: DEFAULT_MSP_PORT,
            database_url: String::default(),
            public_url: format!("http://{DEFAULT_MSP_HOST}:{DEFAULT_MSP_PORT}"),
            frontend_url: String::default(),
            order_webhook_url: String::default(),
            internal_api_key: Secret::default(),
            marketplace_fee: DEFAULT_MARKETPLACE_FEE,
            mercado_config: MercadoConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("MSP_HOST").ok().unwrap_or_else(|| DEFAULT_MSP_HOST.into());
        let port = env::var("MSP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for MSP_PORT. {e} Using the default, {DEFAULT_MSP_PORT}, instead.");
                    DEFAULT_MSP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MSP_PORT);
        let database_url = env::var("MSP_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ MSP_DATABASE_URL is not set. Please set it to the URL for the credential store database.");
            String::default()
        });
        let public_url = env::var("MSP_PUBLIC_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ MSP_PUBLIC_URL is not set. Using http://{host}:{port}. OAuth callbacks and webhook deliveries \
                   will not reach this server unless it is publicly addressable.");
            format!("http://{host}:{port}")
        });
        let frontend_url = env::var("MSP_FRONTEND_URL").ok().unwrap_or_else(|| {
            error!("🪛️ MSP_FRONTEND_URL is not set. Seller panel and checkout redirects will be broken.");
            String::default()
        });
        let order_webhook_url = env::var("MSP_ORDER_WEBHOOK_URL").ok().unwrap_or_else(|| {
            error!("🪛️ MSP_ORDER_WEBHOOK_URL is not set. Confirmed payments cannot be relayed to the order system.");
            String::default()
        });
        let internal_api_key = Secret::new(env::var("MSP_INTERNAL_API_KEY").ok().unwrap_or_else(|| {
            error!("🪛️ MSP_INTERNAL_API_KEY is not set. The sync endpoint will reject all callers.");
            String::default()
        }));
        let marketplace_fee = env::var("MSP_MARKETPLACE_FEE")
            .map(|s| {
                s.parse::<f64>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid amount for MSP_MARKETPLACE_FEE. {e} Using the default, \
                           {DEFAULT_MARKETPLACE_FEE}, instead.");
                    DEFAULT_MARKETPLACE_FEE
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MARKETPLACE_FEE);
        let mercado_config = MercadoConfig::new_from_env_or_default();
        Self {
            host,
            port,
            database_url,
            public_url,
            frontend_url,
            order_webhook_url,
            internal_api_key,
            marketplace_fee,
            mercado_config,
        }
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that handlers need at request time. Generally we try to keep this as small as
/// possible. The shared internal key is the one secret that has to travel with it, since the sync endpoint checks it
/// on every call.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    pub public_url: String,
    pub frontend_url: String,
    pub marketplace_fee: f64,
    pub internal_api_key: Secret<String>,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            public_url: config.public_url.clone(),
            frontend_url: config.frontend_url.clone(),
            marketplace_fee: config.marketplace_fee,
            internal_api_key: config.internal_api_key.clone(),
        }
    }
}
