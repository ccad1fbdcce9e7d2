use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO currency code used by a group and its money values.
///
/// The balance arithmetic never looks at the currency: it only matters when
/// converting between human input/output and [`Money`](crate::Money).
///
/// ## Minor units
///
/// `minor_units()` returns how many decimal digits are used when converting between:
/// - major units (human input/output, e.g. `10.50 EUR`)
/// - minor units (e.g. `1050`)
///
/// Example: EUR has 2 minor units, so `10.50 EUR` ⇄ `1050`. JPY has none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Inr,
    Jpy,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Eur | Currency::Usd | Currency::Inr => 2,
            Currency::Jpy => 0,
        }
    }

    /// `10^minor_units`, the number of minor units in one major unit.
    #[must_use]
    pub const fn minor_per_major(self) -> i64 {
        10_i64.pow(self.minor_units() as u32)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "INR" => Ok(Currency::Inr),
            "JPY" => Ok(Currency::Jpy),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from(" inr ").unwrap(), Currency::Inr);
        assert_eq!(Currency::try_from("JPY").unwrap(), Currency::Jpy);
        assert_eq!(
            Currency::try_from("GBP"),
            Err(EngineError::UnsupportedCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn minor_per_major_follows_digits() {
        assert_eq!(Currency::Eur.minor_per_major(), 100);
        assert_eq!(Currency::Jpy.minor_per_major(), 1);
    }
}
