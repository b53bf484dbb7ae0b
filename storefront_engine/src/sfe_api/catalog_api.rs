use std::{fmt::Debug, time::Duration};

use log::*;
use rust_decimal::Decimal;
use sfg_common::{Currency, Money};

use crate::{
    helpers::ExpiringCache,
    platform_types::{ConversionRate, Product, ProductPage, ProductSpec},
    sfe_api::{
        buyer_api::BuyerApi,
        buyer_objects::BuyerAggregate,
        errors::CatalogApiError,
        product_objects::{CatalogQuery, ProductDetail, ProductInfoRequest, SearchMode},
    },
    traits::{BuyerManagement, CatalogManagement, ExchangeRateProvider, SupportMailer},
};

/// How long a buyer aggregate fetched for markup lookups stays cached. A buyer whose markup was
/// changed keeps seeing the old prices until this lapses.
pub const MARKUP_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
/// Number of variants fetched for a product detail view.
pub const VARIANT_PAGE_SIZE: u32 = 100;

/// `CatalogApi` is the shopper-facing catalog: product search and detail with every price adjusted
/// for the calling shopper's buyer.
///
/// Two adjustments apply. Default price schedules (the seller's list prices) are multiplied by the
/// buyer's markup and rounded to cents; then every price is converted from the currency it was
/// quoted in into the shopper's operating currency, derived from their buyer-location group.
pub struct CatalogApi<B, R, M> {
    platform: B,
    buyers: BuyerApi<B>,
    rates: R,
    mailer: M,
    base_currency: Currency,
    markup_cache: ExpiringCache<String, BuyerAggregate>,
}

impl<B, R, M> Debug for CatalogApi<B, R, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({})", self.base_currency)
    }
}

impl<B, R, M> CatalogApi<B, R, M> {
    /// Creates a new catalog API. `base_currency` is the currency seller-negotiated price
    /// schedules are quoted in (the store's own currency).
    pub fn new(platform: B, buyers: BuyerApi<B>, rates: R, mailer: M, base_currency: Currency) -> Self {
        Self { platform, buyers, rates, mailer, base_currency, markup_cache: ExpiringCache::new(MARKUP_CACHE_TTL) }
    }

    /// Replaces the markup cache with one using the given TTL. Existing entries are dropped.
    pub fn with_markup_cache_ttl(mut self, ttl: Duration) -> Self {
        self.markup_cache = ExpiringCache::new(ttl);
        self
    }
}

impl<B, R, M> CatalogApi<B, R, M>
where
    B: CatalogManagement + BuyerManagement,
    R: ExchangeRateProvider,
    M: SupportMailer,
{
    /// Runs the shopper's product search and prices the results.
    ///
    /// The search runs in phrase-prefix mode first. When that matches nothing the search is
    /// retried with any-term matching, so a shopper typing words out of order still gets results.
    /// When both passes come back empty the page is returned as-is and no pricing collaborators
    /// are called at all.
    pub async fn list(&self, query: &CatalogQuery, user_token: &str) -> Result<ProductPage, CatalogApiError> {
        let mut page = self.platform.search_products(query, SearchMode::PhrasePrefix, user_token).await?;
        if page.items.is_empty() {
            debug!("🛍️ Phrase-prefix search matched nothing. Retrying with any-term matching");
            page = self.platform.search_products(query, SearchMode::AnyTerm, user_token).await?;
        }
        if page.items.is_empty() {
            trace!("🛍️ No products matched. Skipping pricing");
            return Ok(page);
        }
        let (multiplier, rates) = tokio::try_join!(
            self.default_markup_multiplier(user_token),
            self.exchange_rates_for_user(user_token),
        )?;
        page.items = page
            .items
            .into_iter()
            .map(|product| self.apply_buyer_product_pricing(product, multiplier, &rates))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("🛍️ Priced {} products for the caller", page.items.len());
        Ok(page)
    }

    /// Assembles the priced detail view of one product: the product with its schedule, its specs,
    /// and the first [`VARIANT_PAGE_SIZE`] variants, fetched concurrently. Spec option surcharges
    /// are converted from the product's declared currency but never marked up.
    pub async fn get(&self, product_id: &str, user_token: &str) -> Result<ProductDetail, CatalogApiError> {
        let (product, specs, variants) = tokio::try_join!(
            self.platform.get_product(product_id, user_token),
            self.platform.product_specs(product_id, user_token),
            self.platform.product_variants(product_id, VARIANT_PAGE_SIZE),
        )?;
        let (multiplier, rates) = tokio::try_join!(
            self.default_markup_multiplier(user_token),
            self.exchange_rates_for_user(user_token),
        )?;
        let product_currency = product.xp.currency.unwrap_or_default();
        let product = self.apply_buyer_product_pricing(product, multiplier, &rates)?;
        let specs = convert_spec_markups(specs, product_currency, &rates)?;
        debug!(
            "🛍️ Assembled detail for product [{product_id}] with {} specs and {} variants",
            specs.len(),
            variants.len()
        );
        Ok(ProductDetail { product, specs, variants })
    }

    /// Adjusts the product's price schedule for the calling buyer.
    ///
    /// A default schedule (id equal to the product id) carries the seller list price: each break
    /// is multiplied by the markup multiplier, rounded to cents, then converted from the product's
    /// declared currency. A seller-negotiated schedule is already buyer-specific and quoted in the
    /// store base currency, so it is converted only. Conversion itself never rounds.
    pub fn apply_buyer_product_pricing(
        &self,
        mut product: Product,
        multiplier: Decimal,
        rates: &[ConversionRate],
    ) -> Result<Product, CatalogApiError> {
        let mut schedule = match product.price_schedule.take() {
            Some(schedule) => schedule,
            None => return Ok(product),
        };
        if schedule.id == product.id {
            let currency = product.xp.currency.unwrap_or_default();
            for price_break in &mut schedule.price_breaks {
                let marked_up = (price_break.price * multiplier).round_2dp();
                price_break.price = convert_price(marked_up, currency, rates)?;
            }
        } else {
            for price_break in &mut schedule.price_breaks {
                price_break.price = convert_price(price_break.price, self.base_currency, rates)?;
            }
        }
        product.price_schedule = Some(schedule);
        Ok(product)
    }

    /// The factor the calling shopper's buyer applies to default prices.
    ///
    /// The buyer aggregate behind it is loaded through a read-through cache with
    /// [`MARKUP_CACHE_TTL`] expiry. There is no invalidation: a markup change becomes visible to
    /// cached shoppers only once their entry lapses.
    pub async fn default_markup_multiplier(&self, user_token: &str) -> Result<Decimal, CatalogApiError> {
        let shopper = self.platform.shopper_profile(user_token).await?;
        let buyer_id = shopper.buyer_id;
        let aggregate = match self.markup_cache.get(&buyer_id).await {
            Some(aggregate) => aggregate,
            None => {
                trace!("🛍️ Markup cache miss for buyer [{buyer_id}]");
                let aggregate = self.buyers.get(&buyer_id).await?;
                self.markup_cache.insert(buyer_id.clone(), aggregate.clone()).await;
                aggregate
            },
        };
        Ok(aggregate.markup.multiplier())
    }

    /// The currency the calling shopper's orders settle in: the first of their buyer-location
    /// groups that declares one. A shopper with no such group is a configuration error reported as
    /// [`CatalogApiError::NoCurrencyForUser`].
    pub async fn currency_for_user(&self, user_token: &str) -> Result<Currency, CatalogApiError> {
        let groups = self.platform.shopper_location_groups(user_token).await?;
        groups.iter().find_map(|group| group.xp.currency).ok_or(CatalogApiError::NoCurrencyForUser)
    }

    /// The conversion table for the calling shopper's operating currency.
    pub async fn exchange_rates_for_user(&self, user_token: &str) -> Result<Vec<ConversionRate>, CatalogApiError> {
        let base = self.currency_for_user(user_token).await?;
        let rates = self.rates.rates_for(base).await?;
        trace!("🛍️ Loaded {} conversion rates against {base}", rates.len());
        Ok(rates)
    }

    /// Forwards a shopper's question about a product to the supplier's support inbox.
    pub async fn request_product_info(&self, request: &ProductInfoRequest) -> Result<(), CatalogApiError> {
        info!("🛍️✉️ Forwarding a product info request for [{}] to the support mailer", request.product_id);
        self.mailer.send_product_info_request(request).await?;
        Ok(())
    }
}

/// Converts `amount`, quoted in `from`, into the currency the rate table is based on. A missing or
/// unusable rate entry is a configuration error, not a unit conversion.
pub fn convert_price(amount: Money, from: Currency, rates: &[ConversionRate]) -> Result<Money, CatalogApiError> {
    let rate = rates
        .iter()
        .find(|entry| entry.currency == from)
        .map(|entry| entry.rate)
        .filter(|rate| !rate.is_zero())
        .ok_or(CatalogApiError::MissingRate(from))?;
    Ok(amount / rate)
}

fn convert_spec_markups(
    specs: Vec<ProductSpec>,
    product_currency: Currency,
    rates: &[ConversionRate],
) -> Result<Vec<ProductSpec>, CatalogApiError> {
    specs
        .into_iter()
        .map(|mut spec| {
            for option in &mut spec.options {
                if let Some(markup) = option.price_markup {
                    option.price_markup = Some(convert_price(markup, product_currency, rates)?);
                }
            }
            Ok(spec)
        })
        .collect()
}
