//! Split Payment Engine
//!
//! The credential store for the marketplace split payment server. It durably maps sellers to the OAuth token pair
//! obtained from the payment processor, and products to the seller that must receive the funds for them.
//!
//! The library is divided into two main sections:
//! 1. The [`traits::CredentialStore`] trait, which defines the behaviour any backend must provide. Currently, SQLite is
//!    the only supported backend ([`SqliteCredentialStore`]).
//! 2. The [`CredentialApi`], which is the public-facing API the server consumes. It wraps a backend and adds the
//!    resolution semantics (a mapped product with an empty token resolves to "not found", not to an unusable
//!    credential).
mod credential_api;
mod sqlite;

pub mod db_types;
pub mod traits;

pub use credential_api::CredentialApi;
pub use sqlite::SqliteCredentialStore;
