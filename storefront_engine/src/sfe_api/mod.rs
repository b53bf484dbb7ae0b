//! # Storefront gateway public API
//!
//! The `sfe_api` module exposes the programmatic API of the storefront engine. The API is modular,
//! so clients can pick the functionality they need, and different parts (e.g. buyer provisioning
//! and checkout) can be wired up with differently scoped platform clients.
//!
//! * [`buyer_api`] assembles and maintains the compound buyer aggregate (buyer record, markup,
//!   impersonation config) and provisions the resources a new buyer organization needs.
//! * [`catalog_api`] is the shopper-facing catalog: search and detail with buyer markup and
//!   currency conversion applied to every price.
//! * [`payments_api`] reconciles the payments held against an order with what checkout requested.
//!
//! The other submodules hold the request/response objects these APIs exchange.
//!
//! # API usage
//!
//! The pattern is the same everywhere: an API instance is created by supplying collaborators that
//! implement the traits in [`crate::traits`].
//!
//! ```rust,ignore
//! use storefront_engine::{BuyerApi, traits::BuyerManagement};
//! // CommerceApi implements BuyerManagement
//! let api = BuyerApi::new(commerce_client);
//! let aggregate = api.get("0005").await?;
//! ```

pub mod buyer_api;
pub mod buyer_objects;
pub mod catalog_api;
pub mod errors;
pub mod payments_api;
pub mod product_objects;
