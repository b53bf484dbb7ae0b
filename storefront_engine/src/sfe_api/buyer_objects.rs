use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::platform_types::{Buyer, ImpersonationConfig};

//--------------------------------------   BuyerAggregate    ---------------------------------------------------------

/// The compound view of a buyer organization: the platform buyer record, the storefront markup
/// applied to default product prices, and the optional impersonation config.
///
/// `markup.percent` always mirrors `buyer.xp.markup_percent`; the aggregate is reassembled from
/// the platform on every read, so the two cannot drift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuyerAggregate {
    pub buyer: Buyer,
    pub markup: BuyerMarkup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impersonation_config: Option<ImpersonationConfig>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuyerMarkup {
    /// Markup on default product prices, as a percentage in the range 0 to 100.
    pub percent: Decimal,
}

impl BuyerMarkup {
    /// The factor a default price is multiplied by: `1 + percent / 100`.
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.percent / Decimal::ONE_HUNDRED
    }
}
