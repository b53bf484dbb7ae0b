use rust_decimal::Decimal;

use crate::{
    platform_types::{
        Buyer,
        CatalogAssignment,
        ImpersonationConfig,
        Incrementor,
        MessageSenderAssignment,
        SecurityProfileAssignment,
    },
    traits::PlatformError,
};

/// The `BuyerManagement` trait defines the platform surface needed to provision and maintain buyer
/// organizations.
///
/// The orchestrator in [`crate::BuyerApi`] drives these calls; implementations only translate them
/// into platform requests and must not add sequencing logic of their own.
#[allow(async_fn_in_trait)]
pub trait BuyerManagement {
    /// Creates a new buyer record. The buyer id in the request may be a platform placeholder; the
    /// returned record carries the id the platform actually assigned.
    async fn create_buyer(&self, buyer: &Buyer) -> Result<Buyer, PlatformError>;

    /// Saves the full buyer record over the given id, creating it if it does not exist.
    async fn save_buyer(&self, buyer_id: &str, buyer: &Buyer) -> Result<Buyer, PlatformError>;

    async fn get_buyer(&self, buyer_id: &str) -> Result<Buyer, PlatformError>;

    /// Patches only the markup percentage into the buyer's extended properties, leaving the rest
    /// of the record untouched. Returns the updated buyer.
    async fn patch_buyer_markup(&self, buyer_id: &str, markup_percent: Decimal) -> Result<Buyer, PlatformError>;

    async fn save_security_profile_assignment(
        &self,
        assignment: &SecurityProfileAssignment,
    ) -> Result<(), PlatformError>;

    async fn save_message_sender_assignment(&self, assignment: &MessageSenderAssignment)
        -> Result<(), PlatformError>;

    async fn save_catalog_assignment(&self, assignment: &CatalogAssignment) -> Result<(), PlatformError>;

    /// Saves the incrementor under its own id, creating or replacing it.
    async fn save_incrementor(&self, incrementor: &Incrementor) -> Result<Incrementor, PlatformError>;

    /// Lists the impersonation configs filtered to the given buyer. The platform enforces no
    /// uniqueness here; the engine treats the first entry as _the_ config for the buyer.
    async fn impersonation_configs_for_buyer(&self, buyer_id: &str)
        -> Result<Vec<ImpersonationConfig>, PlatformError>;

    async fn create_impersonation_config(
        &self,
        config: &ImpersonationConfig,
    ) -> Result<ImpersonationConfig, PlatformError>;

    /// Saves the config body over an existing config id.
    async fn save_impersonation_config(
        &self,
        config_id: &str,
        config: &ImpersonationConfig,
    ) -> Result<ImpersonationConfig, PlatformError>;

    async fn delete_impersonation_config(&self, config_id: &str) -> Result<(), PlatformError>;
}
