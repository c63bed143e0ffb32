use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Token acquisition failed. Fatal for the enclosing request.
    #[error("provider authentication failed: {0}")]
    ProviderAuth(String),
    /// The provider answered a create/capture call with a non-2xx status.
    /// The provider's body is kept verbatim for diagnostics.
    #[error("provider request failed with status {status}")]
    ProviderRequest {
        status: u16,
        payload: serde_json::Value,
    },
    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    ConfigError(String),
}
