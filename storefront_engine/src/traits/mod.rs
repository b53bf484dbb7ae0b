//! # Collaborator contracts
//!
//! This module defines the interfaces the engine's orchestrators need from the outside world. The
//! engine owns no storage; every record lives in the remote commerce platform, and the traits here
//! describe the slices of that platform each orchestrator touches.
//!
//! * [`BuyerManagement`] covers buyer records and the resources provisioned alongside them
//!   (security profile, message sender and catalog assignments, incrementors, impersonation
//!   configs).
//! * [`CatalogManagement`] covers the shopper-facing catalog surface: product search and detail,
//!   specs, variants, and the calling shopper's profile and location groups.
//! * [`PaymentManagement`] covers order worksheets and payment CRUD in both the seller (incoming)
//!   and shopper (outgoing) directions.
//! * [`ExchangeRateProvider`] returns the conversion table for a base currency.
//! * [`CreditCardProcessor`] voids card authorizations held by the upstream gateway.
//! * [`SupportMailer`] delivers the product-info contact request to the support inbox.
//!
//! All platform-backed traits report failures as [`PlatformError`], so callers can tell a missing
//! record from an upstream outage. The processor and mailer carry their own error types since they
//! front different systems.

mod buyer_management;
mod card_processor;
mod catalog_management;
mod errors;
mod exchange_rates;
mod mailer;
mod payment_management;

pub use buyer_management::BuyerManagement;
pub use card_processor::{CardProcessorError, CreditCardProcessor};
pub use catalog_management::CatalogManagement;
pub use errors::PlatformError;
pub use exchange_rates::ExchangeRateProvider;
pub use mailer::{MailerError, SupportMailer};
pub use payment_management::PaymentManagement;
