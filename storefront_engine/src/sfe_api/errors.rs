use sfg_common::Currency;
use thiserror::Error;

use crate::traits::{CardProcessorError, MailerError, PlatformError};

#[derive(Debug, Clone, Error)]
pub enum BuyerApiError {
    #[error("Commerce platform error: {0}")]
    Platform(#[from] PlatformError),
    #[error("The platform did not assign an id to the newly created buyer")]
    MissingBuyerId,
}

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("No operating currency is defined on this user's buyer locations")]
    NoCurrencyForUser,
    #[error("No conversion rate is available for {0}")]
    MissingRate(Currency),
    #[error("Commerce platform error: {0}")]
    Platform(#[from] PlatformError),
    #[error("Could not load the buyer aggregate: {0}")]
    Buyer(#[from] BuyerApiError),
    #[error("Could not send the product info request: {0}")]
    Mail(#[from] MailerError),
}

#[derive(Debug, Clone, Error)]
pub enum PaymentsApiError {
    #[error("Commerce platform error: {0}")]
    Platform(#[from] PlatformError),
    #[error("Card processor error: {0}")]
    Processor(#[from] CardProcessorError),
}
