//! Money helpers built on `rust_decimal`.
//!
//! Amounts are computed as `Decimal` and stored as `f64`. Every value leaving
//! this module is rounded to two decimal places, midpoint away from zero.

use std::str::FromStr;

use rust_decimal::prelude::*;

use crate::domain::types::TypeConstraintError;

const DECIMAL_PLACES: u32 = 2;

/// Largest amount or quantity accepted from user input.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Converts a stored `f64` into a `Decimal`.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    round_money(Decimal::from_f64(value).unwrap_or_default())
}

/// Converts a `Decimal` back to `f64` for storage.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Rounds to cents and fixes the scale so `12.5` renders as `12.50`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

/// Parses a user supplied amount or quantity.
///
/// Accepts an optional leading `$` and thousands separators. Negative and
/// oversized values are rejected.
pub fn parse_money(raw: &str) -> Result<Decimal, TypeConstraintError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let value = Decimal::from_str(&cleaned)
        .map_err(|_| TypeConstraintError::InvalidAmount(raw.trim().to_string()))?;
    if value.is_sign_negative() || value > MAX_AMOUNT {
        return Err(TypeConstraintError::InvalidAmount(raw.trim().to_string()));
    }
    Ok(round_money(value))
}

/// Parses an optional amount, treating blank input as `None`.
pub fn parse_optional_money(raw: &str) -> Result<Option<Decimal>, TypeConstraintError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_money(raw).map(Some)
    }
}

/// `quantity * unit_price`, rounded to cents.
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    round_money(quantity * unit_price)
}

/// Sums a sequence of amounts.
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round_money(values.into_iter().fold(Decimal::ZERO, |acc, v| acc + v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn decimal_avoids_float_drift() {
        let total = sum([to_decimal(0.1), to_decimal(0.2)]);
        assert_eq!(to_f64(total), 0.3);
    }

    #[test]
    fn accumulation_stays_exact() {
        let total = sum((0..1000).map(|_| to_decimal(0.01)));
        assert_eq!(total, d("10.00"));
    }

    #[test]
    fn parse_accepts_currency_formatting() {
        assert_eq!(parse_money("$1,250.5").unwrap(), d("1250.50"));
        assert_eq!(parse_money(" 3 ").unwrap().to_string(), "3.00");
    }

    #[test]
    fn parse_rejects_garbage_and_negatives() {
        assert!(parse_money("abc").is_err());
        assert!(parse_money("-5").is_err());
        assert!(parse_money("").is_err());
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(parse_optional_money("  ").unwrap(), None);
        assert_eq!(parse_optional_money("2.5").unwrap(), Some(d("2.50")));
    }

    #[test]
    fn line_total_rounds_half_away_from_zero() {
        assert_eq!(line_total(d("3"), d("0.335")), d("1.01"));
        assert_eq!(line_total(d("2.5"), d("40")), d("100.00"));
    }
}
