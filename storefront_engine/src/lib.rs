//! Storefront Gateway Engine
//!
//! The storefront gateway sits between buyer-facing storefronts and a third-party commerce
//! platform. Every durable record lives in the platform; this library contains the business rules
//! that the platform's flat CRUD surface does not express:
//!
//! 1. Buyer organizations are compound aggregates. Creating one provisions a fixed set of related
//!    resources (security profile, message sender, id incrementors, catalog visibility,
//!    impersonation config) in a fixed order ([`BuyerApi`]).
//! 2. Catalog prices are buyer-relative. Default schedules get the buyer's markup and every price
//!    is converted into the shopper's operating currency ([`CatalogApi`]).
//! 3. Order payments are reconciled, not written. Checkout sends the payment set it wants, and the
//!    engine settles the difference against the order's worksheet total, voiding card
//!    authorizations where required ([`PaymentsApi`]).
//!
//! The engine is client-agnostic: all remote calls go through the traits in [`mod@traits`], which
//! the `commerce_tools` crate implements against the real platform and tests implement with
//! mocks. The wire-level records those traits exchange live in [`mod@platform_types`].

pub mod helpers;
pub mod platform_types;
mod sfe_api;
pub mod traits;


pub use sfe_api::{
    buyer_api::{
        BuyerApi,
        BASE_BUYER_SECURITY_PROFILE,
        BUYER_EMAILS_MESSAGE_SENDER,
        BUYER_ID_PLACEHOLDER,
        IMPERSONATION_CONFIG_PREFIX,
    },
    buyer_objects,
    catalog_api::{convert_price, CatalogApi, MARKUP_CACHE_TTL, VARIANT_PAGE_SIZE},
    errors::{BuyerApiError, CatalogApiError, PaymentsApiError},
    payments_api::PaymentsApi,
    product_objects,
};
