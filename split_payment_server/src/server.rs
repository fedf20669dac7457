use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use mercado_tools::MercadoApi;
use split_payment_engine::{CredentialApi, SqliteCredentialStore};

use crate::{
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    integrations::order_system::OrderSystemClient,
    routes::{connect_seller, create_preference, health, oauth_callback, payment_webhook, sync_product},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteCredentialStore::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteCredentialStore) -> Result<Server, ServerError> {
    let gateway =
        MercadoApi::new(config.mercado_config.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let order_system = OrderSystemClient::new(&config.order_webhook_url, config.internal_api_key.clone())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let options = ServerOptions::from_config(&config);
    let srv = HttpServer::new(move || {
        let credentials = CredentialApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("msp::access_log"))
            .app_data(web::Data::new(credentials))
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(order_system.clone()))
            .app_data(web::Data::new(options.clone()))
            .service(health)
            .service(connect_seller)
            .service(oauth_callback)
            .service(create_preference)
            .service(sync_product)
            .service(payment_webhook)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
