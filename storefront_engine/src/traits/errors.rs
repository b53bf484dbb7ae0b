use thiserror::Error;

/// Failures reported by the commerce platform client.
///
/// The distinctions matter to the orchestrators: a `NotFound` during an impersonation lookup is a
/// normal outcome, while an `Upstream` failure halfway through buyer provisioning must surface to
/// the caller rather than be logged and forgotten.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("The requested record does not exist on the platform")]
    NotFound,
    #[error("The platform rejected the credentials supplied with this call")]
    Unauthorized,
    #[error("The platform returned an error response. {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("Could not reach the commerce platform: {0}")]
    Network(String),
    #[error("Could not decode the platform response: {0}")]
    Decode(String),
}
