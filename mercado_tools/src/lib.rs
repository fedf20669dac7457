//! A minimal Mercado Pago API client for the marketplace split payment server.
//!
//! Covers exactly the three calls the server orchestrates: the OAuth authorization-code exchange, preference creation
//! on behalf of a connected seller, and the authoritative payment lookup that backs webhook processing.
mod api;
mod config;
mod error;
mod traits;

pub mod data_objects;
pub mod helpers;

pub use api::MercadoApi;
pub use config::MercadoConfig;
pub use error::MercadoApiError;
pub use traits::PaymentGateway;
