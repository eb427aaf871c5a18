//! Crate-wide error taxonomy (§7).
//!
//! Each concern raises its own `thiserror` enum; `EngineError` composes them
//! for call sites (chiefly the CLI) that need one path to a non-zero exit
//! code without caring which layer failed.

use thiserror::Error;

use crate::decimal::NumericError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("price level total_volume went negative for price {price}")]
    NegativeVolume { price: String },
    #[error("price {price} is registered in the side's price index but has no matching level")]
    DanglingPriceIndex { price: String },
    #[error("price level for {price} is registered but holds zero orders")]
    EmptyLevelRegistered { price: String },
}

#[derive(Debug, Error)]
pub enum IOError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode JSON for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Numeric(#[from] NumericError),
    #[error(transparent)]
    Matching(#[from] MatchingError),
    #[error(transparent)]
    Io(#[from] IOError),
}
