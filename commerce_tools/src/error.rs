use storefront_engine::traits::PlatformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommerceApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

impl From<CommerceApiError> for PlatformError {
    fn from(err: CommerceApiError) -> Self {
        match err {
            CommerceApiError::QueryError { status: 404, .. } => PlatformError::NotFound,
            CommerceApiError::QueryError { status: 401 | 403, .. } => PlatformError::Unauthorized,
            CommerceApiError::QueryError { status, message } => PlatformError::Upstream { status, message },
            CommerceApiError::Initialization(msg) |
            CommerceApiError::RestRequestError(msg) |
            CommerceApiError::RestResponseError(msg) => PlatformError::Network(msg),
            CommerceApiError::JsonError(msg) => PlatformError::Decode(msg),
        }
    }
}
