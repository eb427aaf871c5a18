//! Arbitrary-precision decimal facade (C1).
//!
//! Wraps `rust_decimal::Decimal` rather than hand-rolling bignum arithmetic:
//! the crate already gives exact base-10 arithmetic and comparisons. This
//! module only adds the two things the matching path actually needs on top
//! of it: a canonical string used as a price-level map key, and an explicit
//! half-even rounding policy for division.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Shared zero constant, re-exported for call sites that would otherwise
/// reach for `Decimal::ZERO` directly.
pub const ZERO: Decimal = Decimal::ZERO;

/// Division precision floor required by the spec (at least 20 significant
/// digits past the point, rounded half-even).
const DIV_SCALE: u32 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumericError {
    #[error("'{0}' is not a valid decimal")]
    Parse(String),
    #[error("division by zero")]
    DivisionByZero,
}

/// Parses a decimal string. No float intermediate is ever involved.
pub fn parse(raw: &str) -> Result<Decimal, NumericError> {
    Decimal::from_str_exact(raw.trim()).map_err(|_| NumericError::Parse(raw.to_string()))
}

/// Exact division with explicit half-even rounding at `DIV_SCALE` digits.
pub fn div(lhs: Decimal, rhs: Decimal) -> Result<Decimal, NumericError> {
    if rhs.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    let quotient = lhs / rhs;
    Ok(quotient.round_dp_with_strategy(DIV_SCALE, RoundingStrategy::MidpointNearestEven))
}

/// Canonical string rendering used as a price level's map key and as the
/// wire representation of amounts/prices in the output documents.
///
/// Integers render with no fractional part; otherwise trailing fractional
/// zeros (and a resulting trailing `.`) are stripped. Two decimals that
/// compare equal always render to the same string, because `Decimal`'s
/// `normalize()` collapses representations that differ only in trailing
/// zeros before we ever look at the digits.
pub fn canonical(value: Decimal) -> String {
    let normalized = value.normalize();
    let text = normalized.to_string();
    match text.split_once('.') {
        None => text,
        Some((_, frac)) if frac.chars().all(|c| c == '0') => {
            text.split('.').next().unwrap().to_string()
        }
        Some(_) => text,
    }
}
