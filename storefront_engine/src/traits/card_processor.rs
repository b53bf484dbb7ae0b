use thiserror::Error;

use crate::platform_types::{Payment, WorksheetOrder};

#[derive(Debug, Clone, Error)]
pub enum CardProcessorError {
    #[error("The card processor declined the void request: {0}")]
    VoidDeclined(String),
    #[error("Card processor error: {0}")]
    Gateway(String),
}

/// The upstream card gateway holds an authorization for every credit card payment. Before such a
/// payment is re-priced, replaced or deleted, the authorization must be voided so the shopper's
/// funds are released.
#[allow(async_fn_in_trait)]
pub trait CreditCardProcessor {
    async fn void_transaction(
        &self,
        payment: &Payment,
        order: &WorksheetOrder,
        user_token: &str,
    ) -> Result<(), CardProcessorError>;
}
