//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// The Order Book Service (C4): owns the map {pair -> OrderBook} and the
// global, append-only trade log. `process` is the single entry point that
// turns one wire command into book mutations and trade emissions; `process_all`
// drives a whole batch in input order.
//--------------------------------------------------------------------------------------------------

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::decimal;
use crate::error::EngineError;
use crate::matching_engine::MatchingEngine;
use crate::orderbook::OrderBook;
use crate::types::{Order, OrderCommand, Trade, TypeOp};
use crate::validation::{DefaultValidator, Validator};

/// Owns every pair's book plus the run's trade log. Not `Send`/`Sync` by
/// design: the engine is single-threaded, and callers wanting concurrency
/// must serialize commands through a queue ahead of the Service.
pub struct OrderBookService {
    books: HashMap<String, OrderBook>,
    trades: Vec<Trade>,
    engine: MatchingEngine,
    validator: Box<dyn Validator>,
    next_timestamp: u64,
}

impl Default for OrderBookService {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBookService {
    pub fn new() -> Self {
        OrderBookService::with_validator(Box::new(DefaultValidator))
    }

    /// Constructs a Service with an explicit `Validator`, the seam Service-level
    /// tests use to substitute a mock validator and force a `ValidationError`.
    pub fn with_validator(validator: Box<dyn Validator>) -> Self {
        OrderBookService {
            books: HashMap::new(),
            trades: Vec::new(),
            engine: MatchingEngine::new(),
            validator,
            next_timestamp: 0,
        }
    }

    pub fn books(&self) -> &HashMap<String, OrderBook> {
        &self.books
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Inspection-only: how many pairs currently have a book, resting or not.
    pub fn pair_count(&self) -> usize {
        self.books.len()
    }

    fn next_timestamp(&mut self) -> u64 {
        let ts = self.next_timestamp;
        self.next_timestamp += 1;
        ts
    }

    /// Validates, promotes, and dispatches one command. A `ValidationError`
    /// leaves all state untouched. `NumericError`/`MatchingError` are
    /// programmer-observable failures and propagate as `EngineError`.
    pub fn process(&mut self, command: OrderCommand) -> Result<(), EngineError> {
        self.validator.validate(&command)?;

        let timestamp = self.next_timestamp();
        let amount = decimal::parse(&command.amount)?;
        let limit_price = decimal::parse(&command.limit_price)?;

        let mut order = Order {
            account_id: command.account_id,
            order_id: command.order_id,
            pair: command.pair.clone(),
            side: command.side,
            amount,
            limit_price,
            timestamp,
        };

        let book = self
            .books
            .entry(command.pair.clone())
            .or_insert_with(|| OrderBook::new(command.pair.clone()));

        match command.type_op {
            TypeOp::Create => {
                let trades = self.engine.match_order(&mut order, book, timestamp)?;
                debug!(order_id = %order.order_id, trades = trades.len(), "order matched");
                self.trades.extend(trades);
                if order.amount > decimal::ZERO {
                    self.engine.rest(&order, book);
                }
            }
            TypeOp::Delete => {
                let cancelled = self.engine.cancel(&order, book)?;
                if !cancelled {
                    warn!(
                        order_id = %order.order_id,
                        pair = %order.pair,
                        "cancel requested for an order that is not resting as described"
                    );
                }
            }
        }

        Ok(())
    }

    /// Drives a whole batch in input order. A single command's
    /// `ValidationError` is logged and skipped so that one malformed record
    /// does not abort an otherwise-valid batch; any other `EngineError`
    /// propagates immediately and aborts the run.
    pub fn process_all(&mut self, commands: Vec<OrderCommand>) -> Result<(), EngineError> {
        for command in commands {
            match self.process(command) {
                Ok(()) => {}
                Err(EngineError::Validation(err)) => {
                    warn!(error = %err, "rejected command, continuing batch");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use rust_decimal_macros::dec;

    fn create(account_id: &str, order_id: &str, side: Side, amount: &str, price: &str) -> OrderCommand {
        OrderCommand {
            type_op: TypeOp::Create,
            account_id: account_id.into(),
            order_id: order_id.into(),
            pair: "BTC/USDC".into(),
            side,
            amount: amount.into(),
            limit_price: price.into(),
        }
    }

    fn delete(account_id: &str, order_id: &str, side: Side, price: &str) -> OrderCommand {
        OrderCommand {
            type_op: TypeOp::Delete,
            account_id: account_id.into(),
            order_id: order_id.into(),
            pair: "BTC/USDC".into(),
            side,
            amount: "1".into(),
            limit_price: price.into(),
        }
    }

    #[test]
    fn test_scenario_a_single_cross_partial_fill_of_taker() {
        let mut service = OrderBookService::new();
        service.process(create("2", "S1", Side::Sell, "10", "50000")).unwrap();
        service.process(create("1", "B1", Side::Buy, "15", "50500")).unwrap();

        assert_eq!(service.trades().len(), 1);
        let trade = &service.trades()[0];
        assert_eq!(trade.trade_id, 1);
        assert_eq!(trade.maker_order_id, "S1");
        assert_eq!(trade.taker_order_id, "B1");
        assert_eq!(trade.amount, dec!(10));
        assert_eq!(trade.price, dec!(50000));

        let book = &service.books()["BTC/USDC"];
        assert!(book.asks.is_empty());
        assert_eq!(book.bids.level(dec!(50500)).unwrap().total_volume, dec!(5));
    }

    #[test]
    fn test_scenario_d_cancel_then_no_match() {
        let mut service = OrderBookService::new();
        service.process(create("1", "1", Side::Buy, "10", "49000")).unwrap();
        service.process(delete("1", "1", Side::Buy, "49000")).unwrap();
        service.process(create("2", "2", Side::Sell, "10", "49000")).unwrap();

        assert!(service.trades().is_empty());
        let book = &service.books()["BTC/USDC"];
        assert!(book.bids.is_empty());
        assert_eq!(book.asks.level(dec!(49000)).unwrap().total_volume, dec!(10));
    }

    #[test]
    fn test_a_rejected_command_does_not_mutate_state_and_the_batch_continues() {
        let mut service = OrderBookService::new();
        let commands = vec![
            create("1", "1", Side::Buy, "-5", "49000"),
            create("2", "2", Side::Sell, "10", "49000"),
        ];
        service.process_all(commands).unwrap();

        assert!(service.books().get("BTC/USDC").unwrap().bids.is_empty());
        assert_eq!(
            service.books()["BTC/USDC"].asks.level(dec!(49000)).unwrap().total_volume,
            dec!(10)
        );
    }

    #[test]
    fn test_timestamps_are_a_monotonic_ingestion_counter_not_wall_clock() {
        let mut service = OrderBookService::new();
        service.process(create("1", "1", Side::Buy, "10", "49000")).unwrap();
        service.process(create("1", "2", Side::Buy, "10", "49000")).unwrap();

        let level = &service.books()["BTC/USDC"].bids.level(dec!(49000)).unwrap();
        assert_eq!(level.orders[0].timestamp, 0);
        assert_eq!(level.orders[1].timestamp, 1);
    }

    #[test]
    fn test_failed_cancel_is_not_an_error() {
        let mut service = OrderBookService::new();
        let result = service.process(delete("1", "missing", Side::Buy, "49000"));
        assert!(result.is_ok());
    }

    mockall::mock! {
        StubValidator {}
        impl Validator for StubValidator {
            fn validate(&self, command: &OrderCommand) -> Result<(), crate::validation::ValidationError>;
        }
    }

    #[test]
    fn test_a_mocked_validator_failure_surfaces_without_mutating_the_book() {
        let mut mock = MockStubValidator::new();
        mock.expect_validate()
            .returning(|_| Err(crate::validation::ValidationError::EmptyOrderId));

        let mut service = OrderBookService::with_validator(Box::new(mock));
        let result = service.process(create("1", "1", Side::Buy, "10", "49000"));

        assert!(matches!(
            result,
            Err(EngineError::Validation(crate::validation::ValidationError::EmptyOrderId))
        ));
        assert!(service.books().is_empty());
    }
}
