mod api;
mod config;
mod error;

pub use api::CommerceApi;
pub use config::CommerceConfig;
pub use error::CommerceApiError;
