use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------      Currency       ---------------------------------------------------------

/// The ISO-4217 currencies a storefront can price orders in.
///
/// Products are listed in [`Currency::USD`] and converted to the shopper's assigned currency at
/// read time, so `USD` is the default everywhere a currency is missing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    CAD,
    EUR,
    GBP,
    AUD,
    NZD,
    JPY,
    CHF,
    SEK,
    NOK,
    MXN,
    SGD,
    HKD,
    ZAR,
    INR,
    BRL,
}

#[derive(Debug, Clone, Error)]
#[error("{0} is not a supported currency code")]
pub struct CurrencyParseError(String);

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::CAD => "CAD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::AUD => "AUD",
            Self::NZD => "NZD",
            Self::JPY => "JPY",
            Self::CHF => "CHF",
            Self::SEK => "SEK",
            Self::NOK => "NOK",
            Self::MXN => "MXN",
            Self::SGD => "SGD",
            Self::HKD => "HKD",
            Self::ZAR => "ZAR",
            Self::INR => "INR",
            Self::BRL => "BRL",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "CAD" => Ok(Self::CAD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "AUD" => Ok(Self::AUD),
            "NZD" => Ok(Self::NZD),
            "JPY" => Ok(Self::JPY),
            "CHF" => Ok(Self::CHF),
            "SEK" => Ok(Self::SEK),
            "NOK" => Ok(Self::NOK),
            "MXN" => Ok(Self::MXN),
            "SGD" => Ok(Self::SGD),
            "HKD" => Ok(Self::HKD),
            "ZAR" => Ok(Self::ZAR),
            "INR" => Ok(Self::INR),
            "BRL" => Ok(Self::BRL),
            other => Err(CurrencyParseError(other.to_string())),
        }
    }
}
