//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Command validation (C5): rejects malformed commands before they reach the
// Service's dispatch step. `serde`'s enum deserialization already rules out an
// unknown `type_op`/`side` by the time a command reaches here, so this module
// only covers the residual checks serde can't express: pair format, id
// presence, and numeric sign.
//--------------------------------------------------------------------------------------------------

use thiserror::Error;

use crate::decimal;
use crate::types::OrderCommand;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pair '{0}' is not of the form BASE/QUOTE")]
    MalformedPair(String),
    #[error("account_id must not be empty")]
    EmptyAccountId,
    #[error("order_id must not be empty")]
    EmptyOrderId,
    #[error("amount '{0}' must parse as a strictly positive decimal")]
    NonPositiveAmount(String),
    #[error("limit_price '{0}' must parse as a strictly positive decimal")]
    NonPositiveLimitPrice(String),
}

/// Seam over command validation so Service-level tests can substitute a mock
/// (e.g. via `mockall`) to force a `ValidationError` deterministically.
pub trait Validator {
    fn validate(&self, command: &OrderCommand) -> Result<(), ValidationError>;
}

#[derive(Debug, Default)]
pub struct DefaultValidator;

impl Validator for DefaultValidator {
    fn validate(&self, command: &OrderCommand) -> Result<(), ValidationError> {
        validate_pair(&command.pair)?;

        if command.account_id.trim().is_empty() {
            return Err(ValidationError::EmptyAccountId);
        }
        if command.order_id.trim().is_empty() {
            return Err(ValidationError::EmptyOrderId);
        }

        let amount = decimal::parse(&command.amount)
            .map_err(|_| ValidationError::NonPositiveAmount(command.amount.clone()))?;
        if amount <= decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(command.amount.clone()));
        }

        let limit_price = decimal::parse(&command.limit_price)
            .map_err(|_| ValidationError::NonPositiveLimitPrice(command.limit_price.clone()))?;
        if limit_price <= decimal::ZERO {
            return Err(ValidationError::NonPositiveLimitPrice(command.limit_price.clone()));
        }

        Ok(())
    }
}

fn validate_pair(pair: &str) -> Result<(), ValidationError> {
    match pair.split_once('/') {
        Some((base, quote)) if !base.is_empty() && !quote.is_empty() && !quote.contains('/') => {
            Ok(())
        }
        _ => Err(ValidationError::MalformedPair(pair.to_string())),
    }
}
