//! Batch-mode limit-order matching engine for spot trading pairs.
//!
//! The core (and the only place real engineering lives) is the order book
//! data structure and the price-time priority matching algorithm: see
//! [`orderbook`] and [`matching_engine`]. Everything else — validation, I/O,
//! configuration — is plumbing around that core, built with the same
//! ambient stack (`thiserror`, `tracing`, `serde`, `clap`) as the rest of a
//! real Rust service.

pub mod config;
pub mod decimal;
pub mod error;
pub mod io;
pub mod matching_engine;
pub mod orderbook;
pub mod service;
pub mod types;
pub mod validation;

pub use error::{EngineError, IOError, MatchingError};
pub use matching_engine::MatchingEngine;
pub use orderbook::{OrderBook, OrderBookSide, PriceLevel};
pub use service::OrderBookService;
pub use types::{Order, OrderCommand, RestingOrder, Side, Trade, TypeOp};
pub use validation::{DefaultValidator, ValidationError, Validator};
