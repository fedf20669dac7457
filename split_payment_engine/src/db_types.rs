use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A seller record, keyed on the platform's own seller id (not the payment processor's).
///
/// A seller row may exist with the token pair unset. This happens when the product sync pre-creates the seller before
/// the seller has completed the OAuth connect flow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seller {
    pub seller_id: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Timestamp of the last successful token save. `None` until the seller has connected at least once.
    pub connected_at: Option<DateTime<Utc>>,
}

/// Maps a product to the seller whose credential must be used at checkout. Unique on `product_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductMapping {
    pub product_id: String,
    pub seller_id: String,
}
