use std::fmt::Debug;

use log::*;

use crate::{
    platform_types::{
        CatalogAssignment,
        ImpersonationConfig,
        Incrementor,
        MessageSenderAssignment,
        SecurityProfileAssignment,
    },
    sfe_api::{
        buyer_objects::{BuyerAggregate, BuyerMarkup},
        errors::BuyerApiError,
    },
    traits::BuyerManagement,
};

/// Security profile every buyer organization receives at creation.
pub const BASE_BUYER_SECURITY_PROFILE: &str = "BaseBuyer";
/// Message sender that delivers order emails to the buyer's users.
pub const BUYER_EMAILS_MESSAGE_SENDER: &str = "BuyerEmails";
/// Placeholder the platform replaces with the next auto-incremented buyer id.
pub const BUYER_ID_PLACEHOLDER: &str = "{buyerIncrementor}";
/// Prefix of the synthesized impersonation config id; the buyer id follows it.
pub const IMPERSONATION_CONFIG_PREFIX: &str = "admin_";

/// `BuyerApi` is the orchestrator for the compound buyer aggregate: the buyer record itself, the
/// storefront markup stored in its extended properties, and the optional impersonation config.
///
/// A buyer is never just one platform record. Creating one provisions a fixed set of related
/// resources in a fixed order, and updating one keeps the three aggregate parts consistent. This
/// API is the only place that sequencing lives.
pub struct BuyerApi<B> {
    platform: B,
}

impl<B> Debug for BuyerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuyerApi")
    }
}

impl<B> BuyerApi<B> {
    pub fn new(platform: B) -> Self {
        Self { platform }
    }
}

impl<B> BuyerApi<B>
where B: BuyerManagement
{
    /// Provisions a new buyer organization through this API's own platform client.
    ///
    /// The full sequence is:
    /// 1. create the buyer record, defaulting its id to [`BUYER_ID_PLACEHOLDER`] when the caller
    ///    left it empty, and adopt the id the platform assigned;
    /// 2. assign the [`BASE_BUYER_SECURITY_PROFILE`] security profile;
    /// 3. assign the [`BUYER_EMAILS_MESSAGE_SENDER`] message sender;
    /// 4. save the user and location id-incrementors;
    /// 5. assign the buyer's catalog, with all categories visible and no implicit product
    ///    visibility;
    /// 6. patch the markup percent into the buyer's extended properties;
    /// 7. upsert the impersonation config, if one was supplied.
    ///
    /// Any failure is returned to the caller immediately; a partially provisioned buyer is left
    /// behind rather than silently papered over.
    pub async fn create(&self, aggregate: BuyerAggregate) -> Result<BuyerAggregate, BuyerApiError> {
        provision(&self.platform, aggregate).await
    }

    /// Runs the same provisioning sequence as [`BuyerApi::create`], but against a caller-supplied
    /// client. Used when seeding a new organization whose records live behind different
    /// credentials than this API was configured with.
    pub async fn create_on<C>(&self, platform: &C, aggregate: BuyerAggregate) -> Result<BuyerAggregate, BuyerApiError>
    where C: BuyerManagement {
        provision(platform, aggregate).await
    }

    /// Saves the aggregate over an existing buyer.
    ///
    /// The buyer id is immutable: the `buyer_id` parameter always wins, and a different id in the
    /// body is overridden rather than rejected. The buyer record is saved first and the markup
    /// percent patched into the extended properties; the impersonation config is upserted from
    /// the aggregate last (`None` removes an existing config). A failure in an earlier step
    /// leaves the stored impersonation config untouched.
    pub async fn update(&self, buyer_id: &str, mut aggregate: BuyerAggregate) -> Result<BuyerAggregate, BuyerApiError> {
        aggregate.buyer.id = buyer_id.to_string();
        let buyer = self.platform.save_buyer(buyer_id, &aggregate.buyer).await?;
        let markup = patch_markup(&self.platform, buyer_id, aggregate.markup).await?;
        let impersonation_config =
            upsert_impersonation_config(&self.platform, buyer_id, aggregate.impersonation_config).await?;
        debug!("🏬️ Buyer [{buyer_id}] updated");
        Ok(BuyerAggregate { buyer, markup, impersonation_config })
    }

    /// Assembles the aggregate for the given buyer. The buyer record and the impersonation config
    /// are fetched concurrently; the markup percent is read from the stored extended property, and
    /// is zero when the property is absent.
    pub async fn get(&self, buyer_id: &str) -> Result<BuyerAggregate, BuyerApiError> {
        let (buyer, configs) = tokio::try_join!(
            self.platform.get_buyer(buyer_id),
            self.platform.impersonation_configs_for_buyer(buyer_id),
        )?;
        let markup = BuyerMarkup { percent: buyer.xp.markup_percent.unwrap_or_default() };
        trace!("🏬️ Assembled aggregate for buyer [{buyer_id}] with markup {}%", markup.percent);
        Ok(BuyerAggregate { buyer, markup, impersonation_config: configs.into_iter().next() })
    }
}

async fn provision<B>(platform: &B, aggregate: BuyerAggregate) -> Result<BuyerAggregate, BuyerApiError>
where B: BuyerManagement
{
    let mut buyer = aggregate.buyer;
    if buyer.id.is_empty() {
        buyer.id = BUYER_ID_PLACEHOLDER.to_string();
    }
    let buyer = platform.create_buyer(&buyer).await?;
    if buyer.id.is_empty() || buyer.id == BUYER_ID_PLACEHOLDER {
        return Err(BuyerApiError::MissingBuyerId);
    }
    let buyer_id = buyer.id.clone();
    debug!("🏬️ Buyer [{buyer_id}] created. Provisioning its baseline resources");
    let profile = SecurityProfileAssignment {
        buyer_id: buyer_id.clone(),
        security_profile_id: BASE_BUYER_SECURITY_PROFILE.to_string(),
    };
    platform.save_security_profile_assignment(&profile).await?;
    let sender = MessageSenderAssignment {
        buyer_id: buyer_id.clone(),
        message_sender_id: BUYER_EMAILS_MESSAGE_SENDER.to_string(),
    };
    platform.save_message_sender_assignment(&sender).await?;
    platform.save_incrementor(&Incrementor::user_incrementor(&buyer_id)).await?;
    platform.save_incrementor(&Incrementor::location_incrementor(&buyer_id)).await?;
    // The buyer browses its whole category tree, but products stay hidden until assigned.
    let catalog = CatalogAssignment {
        buyer_id: buyer_id.clone(),
        catalog_id: buyer_id.clone(),
        view_all_categories: true,
        view_all_products: false,
    };
    platform.save_catalog_assignment(&catalog).await?;
    let markup = patch_markup(platform, &buyer_id, aggregate.markup).await?;
    let impersonation_config = match aggregate.impersonation_config {
        Some(config) => upsert_impersonation_config(platform, &buyer_id, Some(config)).await?,
        None => None,
    };
    info!("🏬️ Buyer [{buyer_id}] fully provisioned");
    Ok(BuyerAggregate { buyer, markup, impersonation_config })
}

async fn patch_markup<B>(platform: &B, buyer_id: &str, markup: BuyerMarkup) -> Result<BuyerMarkup, BuyerApiError>
where B: BuyerManagement
{
    let buyer = platform.patch_buyer_markup(buyer_id, markup.percent).await?;
    Ok(BuyerMarkup { percent: buyer.xp.markup_percent.unwrap_or_default() })
}

/// Applies the requested impersonation config against whatever the platform currently holds for
/// the buyer.
///
/// The transitions are:
/// * an existing config and no requested one: the existing config is deleted;
/// * an existing config and a requested one: the request is saved over the existing config's id;
/// * no existing config and a requested one: the id is synthesized as `admin_<buyer_id>` and the
///   buyer id and base security profile are stamped on before creation;
/// * neither: nothing happens.
async fn upsert_impersonation_config<B>(
    platform: &B,
    buyer_id: &str,
    requested: Option<ImpersonationConfig>,
) -> Result<Option<ImpersonationConfig>, BuyerApiError>
where B: BuyerManagement
{
    let existing = platform.impersonation_configs_for_buyer(buyer_id).await?.into_iter().next();
    match (existing, requested) {
        (Some(current), None) => {
            debug!("🏬️ Removing impersonation config [{}] from buyer [{buyer_id}]", current.id);
            platform.delete_impersonation_config(&current.id).await?;
            Ok(None)
        },
        (Some(current), Some(config)) => {
            trace!("🏬️ Saving impersonation config over [{}] for buyer [{buyer_id}]", current.id);
            let saved = platform.save_impersonation_config(&current.id, &config).await?;
            Ok(Some(saved))
        },
        (None, Some(mut config)) => {
            config.id = format!("{IMPERSONATION_CONFIG_PREFIX}{buyer_id}");
            config.buyer_id = buyer_id.to_string();
            config.security_profile_id = BASE_BUYER_SECURITY_PROFILE.to_string();
            debug!("🏬️ Creating impersonation config [{}] for buyer [{buyer_id}]", config.id);
            let created = platform.create_impersonation_config(&config).await?;
            Ok(Some(created))
        },
        (None, None) => Ok(None),
    }
}
