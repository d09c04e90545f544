//! Type-safe price representation using decimal arithmetic.
//!
//! The retail backend quotes prices as bare JSON numbers; [`Price`] pairs the
//! decimal amount with a currency so display formatting stays in one place.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store's default currency.
    #[must_use]
    pub fn from_amount(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::default())
    }

    /// Format for display.
    ///
    /// Zero-decimal currencies (VND) are rendered without a fractional part
    /// and with the symbol as a suffix; others use two decimals with a
    /// symbol prefix.
    #[must_use]
    pub fn display(&self) -> String {
        match self.currency_code {
            CurrencyCode::Vnd => format!("{}₫", self.amount.round()),
            code => format!("{}{:.2}", code.symbol(), self.amount),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Vnd,
    Usd,
    Eur,
}

impl CurrencyCode {
    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Vnd => "₫",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Vnd => "VND",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_display_vnd_no_decimals() {
        let price = Price::from_amount(Decimal::new(250_000, 0));
        assert_eq!(price.display(), "250000₫");
    }

    #[test]
    fn test_display_usd_two_decimals() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::Usd);
        assert_eq!(price.display(), "$19.99");
    }

    #[test]
    fn test_currency_serde_uppercase() {
        let json = serde_json::to_string(&CurrencyCode::Vnd).expect("serialize");
        assert_eq!(json, "\"VND\"");
        let back: CurrencyCode = serde_json::from_str("\"USD\"").expect("deserialize");
        assert_eq!(back, CurrencyCode::Usd);
    }
}
