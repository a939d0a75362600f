use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Fixed rounding precision for all monetary arithmetic: the minor-unit
/// scale (cents/pence) of every currency in scope.
pub const MINOR_SCALE: u32 = 2;

/// Rounds a monetary value to the minor-unit scale using round-half-to-even.
///
/// This is the single rounding policy for the whole system. It is applied
/// once per aggregate step; sums of already-rounded values are exact and
/// are never re-rounded.
pub fn round_minor(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MINOR_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Computes a line amount from its quantity and unit amount.
///
/// The line amount is the atomic rounded unit: `round_minor(quantity *
/// unit_amount)`. Aggregates above it sum exact values.
pub fn line_amount(quantity: Decimal, unit_amount: Decimal) -> Decimal {
    round_minor(quantity * unit_amount)
}

/// Currencies the fabricator can issue documents in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Pound sterling.
    #[default]
    #[serde(rename = "GBP")]
    Gbp,
    /// United States dollar.
    #[serde(rename = "USD")]
    Usd,
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    /// ISO 4217 alphabetic code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Display symbol used when rendering amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Gbp => "\u{a3}",
            Currency::Usd => "$",
            Currency::Eur => "\u{20ac}",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GBP" => Ok(Currency::Gbp),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(ValidationError::PatternMismatch {
                field: "Currency",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rounds_half_to_even_at_minor_scale() {
        assert_eq!(round_minor(dec("0.125")), dec("0.12"));
        assert_eq!(round_minor(dec("0.135")), dec("0.14"));
        assert_eq!(round_minor(dec("2.675")), dec("2.68"));
        assert_eq!(round_minor(dec("-0.125")), dec("-0.12"));
    }

    #[test]
    fn line_amount_is_quantity_times_unit_rounded_once() {
        assert_eq!(line_amount(dec("2.5"), dec("10.01")), dec("25.02"));
        assert_eq!(line_amount(dec("3"), dec("7.00")), dec("21.00"));
    }

    #[test]
    fn currency_codes_round_trip() {
        for c in [Currency::Gbp, Currency::Usd, Currency::Eur] {
            assert_eq!(c.code().parse::<Currency>().unwrap(), c);
        }
        assert!("CHF".parse::<Currency>().is_err());
    }
}
