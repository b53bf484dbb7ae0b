use thiserror::Error;

use crate::sfe_api::product_objects::ProductInfoRequest;

#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Could not send the email: {0}")]
    Send(String),
}

/// Delivers shopper questions about a product to the responsible supplier's support inbox.
#[allow(async_fn_in_trait)]
pub trait SupportMailer {
    async fn send_product_info_request(&self, request: &ProductInfoRequest) -> Result<(), MailerError>;
}
