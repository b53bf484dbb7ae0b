use sfg_common::Currency;

use crate::{platform_types::ConversionRate, traits::PlatformError};

/// Source of currency conversion tables.
///
/// `base` is the currency the caller wants prices displayed in; each returned entry states how
/// many units of its `currency` one unit of `base` buys. The engine divides by the matching entry
/// to convert a price into the base currency.
#[allow(async_fn_in_trait)]
pub trait ExchangeRateProvider {
    async fn rates_for(&self, base: Currency) -> Result<Vec<ConversionRate>, PlatformError>;
}
