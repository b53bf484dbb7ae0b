//! Wire-level data objects for the remote commerce platform.
//!
//! Every record here is owned by the platform; the engine only manipulates copies in flight.
//! The platform speaks PascalCase JSON with a lowercase `xp` bag for extended properties, and the
//! serde attributes below mirror that convention exactly.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sfg_common::{Currency, Money};

//--------------------------------------       Buyer         ---------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Buyer {
    /// Empty until the platform assigns an id during creation.
    #[serde(rename = "ID", default)]
    pub id: String,
    pub name: String,
    pub active: bool,
    #[serde(rename = "xp", default)]
    pub xp: BuyerXp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuyerXp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup_percent: Option<Decimal>,
}

//--------------------------------------  ImpersonationConfig -------------------------------------------------------

/// Grants a support user the right to act as one of the buyer's shoppers. A buyer organization has
/// at most one of these, and the engine keys it as `admin_<buyer_id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImpersonationConfig {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "BuyerID", default)]
    pub buyer_id: String,
    #[serde(rename = "SecurityProfileID", default)]
    pub security_profile_id: String,
    #[serde(rename = "GroupID", default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(rename = "UserID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

//--------------------------------------     Assignments      --------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityProfileAssignment {
    #[serde(rename = "BuyerID")]
    pub buyer_id: String,
    #[serde(rename = "SecurityProfileID")]
    pub security_profile_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageSenderAssignment {
    #[serde(rename = "BuyerID")]
    pub buyer_id: String,
    #[serde(rename = "MessageSenderID")]
    pub message_sender_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogAssignment {
    #[serde(rename = "BuyerID")]
    pub buyer_id: String,
    #[serde(rename = "CatalogID")]
    pub catalog_id: String,
    pub view_all_categories: bool,
    pub view_all_products: bool,
}

//--------------------------------------    Incrementor       --------------------------------------------------------

pub const USER_INCREMENTOR_PADDING: i32 = 5;
pub const LOCATION_INCREMENTOR_PADDING: i32 = 4;

/// A platform-side counter used to mint zero-padded ids for users and buyer locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Incrementor {
    #[serde(rename = "ID")]
    pub id: String,
    pub last_number: i64,
    pub left_padding_count: i32,
    pub name: String,
}

impl Incrementor {
    pub fn user_incrementor(buyer_id: &str) -> Self {
        Self {
            id: format!("{buyer_id}-UserIncrementor"),
            last_number: 0,
            left_padding_count: USER_INCREMENTOR_PADDING,
            name: "User Incrementor".to_string(),
        }
    }

    pub fn location_incrementor(buyer_id: &str) -> Self {
        Self {
            id: format!("{buyer_id}-LocationIncrementor"),
            last_number: 0,
            left_padding_count: LOCATION_INCREMENTOR_PADDING,
            name: "Location Incrementor".to_string(),
        }
    }
}

//--------------------------------------      Product         --------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ID", default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_schedule: Option<PriceSchedule>,
    #[serde(rename = "xp", default)]
    pub xp: ProductXp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductXp {
    /// The currency the seller listed the product in. Absent means the store base currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

/// A schedule whose id equals the owning product's id is the product default and carries the
/// seller list price, so buyer markup applies to it. Any other schedule is a seller-negotiated
/// override that is already buyer-specific and is only ever currency-converted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceSchedule {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub price_breaks: Vec<PriceBreak>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceBreak {
    pub quantity: i32,
    pub price: Money,
}

//--------------------------------------    Product specs     --------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductSpec {
    #[serde(rename = "ID", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub options: Vec<SpecOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpecOption {
    #[serde(rename = "ID", default)]
    pub id: String,
    pub value: String,
    /// Surcharge added when the shopper picks this option. Quoted in the product's currency and
    /// converted for display; buyer markup never applies to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_markup: Option<Money>,
}

//--------------------------------------      Variant         --------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Variant {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub active: bool,
}

//--------------------------------------    Product page      --------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductPage {
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default)]
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageMeta {
    pub total_count: i64,
    pub page: i32,
    pub page_size: i32,
}

//--------------------------------------      Payment         --------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    CreditCard,
    PurchaseOrder,
    SpendingAccount,
}

impl Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CreditCard => "CreditCard",
            Self::PurchaseOrder => "PurchaseOrder",
            Self::SpendingAccount => "SpendingAccount",
        };
        write!(f, "{s}")
    }
}

/// A payment held against an order. An order carries at most one payment per [`PaymentKind`], and
/// after reconciliation every payment's amount equals the order total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Type")]
    pub kind: PaymentKind,
    #[serde(default)]
    pub amount: Money,
    #[serde(rename = "CreditCardID", default, skip_serializing_if = "Option::is_none")]
    pub credit_card_id: Option<String>,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(rename = "xp", default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<Value>,
}

impl Payment {
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_accepted(mut self, accepted: bool) -> Self {
        self.accepted = accepted;
        self
    }
}

/// Partial payment update. Only the populated fields are sent to the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(rename = "xp", default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<Value>,
}

//--------------------------------------   Order worksheet    --------------------------------------------------------

/// The platform's calculated snapshot of an order. `order.total` is the authoritative amount that
/// payment reconciliation settles against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderWorksheet {
    pub order: WorksheetOrder,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorksheetOrder {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

//--------------------------------------      Shopper         --------------------------------------------------------

/// The calling user's profile, resolved from their access token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shopper {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "BuyerID", default)]
    pub buyer_id: String,
}

//--------------------------------------     User groups      --------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    BuyerLocation,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserGroup {
    #[serde(rename = "ID", default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "xp", default)]
    pub xp: UserGroupXp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserGroupXp {
    #[serde(rename = "Type", default)]
    pub group_kind: GroupKind,
    /// Buyer-location groups carry the currency their orders settle in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

//--------------------------------------   Conversion rate    --------------------------------------------------------

/// How many units of `currency` one unit of the base currency buys. Converting an amount quoted in
/// `currency` into the base currency therefore divides by `rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConversionRate {
    pub currency: Currency,
    pub rate: Decimal,
}
