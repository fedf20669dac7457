use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use split_payment_engine::traits::CredentialStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid request. {0}")]
    InvalidRequest(String),
    #[error("No connected seller credential found. {0}")]
    SellerNotFound(String),
    #[error("Invalid internal API key.")]
    Forbidden,
    #[error("Authorization code exchange failed. {0}")]
    ExchangeFailed(String),
    #[error("Could not create payment preference. {0}")]
    PreferenceCreationFailed(String),
    #[error("Could not fetch the payment record from the gateway. {0}")]
    PaymentLookupFailed(String),
    #[error("Could not relay the payment confirmation to the order system. {0}")]
    RelayFailed(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::SellerNotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            // Upstream and downstream dependency faults are 500-class. For the webhook route specifically, this is
            // what asks the processor to redeliver.
            Self::ExchangeFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PreferenceCreationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentLookupFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RelayFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<CredentialStoreError> for ServerError {
    fn from(e: CredentialStoreError) -> Self {
        match e {
            CredentialStoreError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}
