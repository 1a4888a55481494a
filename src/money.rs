//! Money helpers.
//!
//! Calculators do their rate arithmetic in `f64` and convert to `Decimal`
//! once per component, rounded to cents. Every total is then a `Decimal`
//! sum of already-rounded parts, which keeps "total == Σ components" exact.

use rust_decimal::prelude::*;

/// Round an `f64` dollar amount to cents (half away from zero).
/// Non-finite input collapses to zero.
pub fn to_cents(amount: f64) -> Decimal {
    Decimal::from_f64(amount)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a `Decimal` to cents.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a `Decimal` to whole currency units.
pub fn round_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Multiply a money amount by an `f64` factor, rounding to cents.
pub fn scale(amount: Decimal, factor: f64) -> Decimal {
    let factor = Decimal::from_f64(factor).unwrap_or(Decimal::ONE);
    round_cents(amount * factor)
}

/// Lossy conversion back to `f64` for ratio checks and logging.
pub fn as_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}
