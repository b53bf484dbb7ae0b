mod currency;
mod money;

pub mod op;
mod secret;

pub use currency::{Currency, CurrencyParseError};
pub use money::{Money, MoneyConversionError};
pub use secret::Secret;
