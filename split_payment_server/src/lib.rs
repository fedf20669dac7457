pub mod checkout;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod onboarding;
pub mod routes;
pub mod server;
pub mod sync;
pub mod webhook;

#[cfg(test)]
mod test;
