//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the core data types shared by every layer of the matching engine:
// the raw wire command, the promoted internal Order, and the Trade record.
//
// | Section       | Description                                                        |
// |---------------|---------------------------------------------------------------------|
// | ENUMS         | TypeOp (CREATE/DELETE) and Side (BUY/SELL).                        |
// | STRUCTS       | OrderCommand (wire shape), Order (internal), Trade.                |
// | TESTS         | Unit tests for (de)serialization and promotion.                   |
//--------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

/// Which kind of operation a command requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeOp {
    #[serde(rename = "CREATE")]
    Create,
    #[serde(rename = "DELETE")]
    Delete,
}

/// Which side of the book an order rests on or removes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

/// A raw order command as it arrives on the wire: amount and limit_price are
/// decimal strings, not numbers, so no float ever touches the matching path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCommand {
    pub type_op: TypeOp,
    pub account_id: String,
    pub order_id: String,
    pub pair: String,
    pub side: Side,
    pub amount: String,
    pub limit_price: String,
}

/// An order promoted to its internal representation: the decimal strings of
/// `OrderCommand` have been parsed, and an ingestion `timestamp` has been
/// assigned by the service (see `crate::service`).
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub account_id: String,
    pub order_id: String,
    pub pair: String,
    pub side: Side,
    pub amount: Decimal,
    pub limit_price: Decimal,
    pub timestamp: u64,
}

/// A resting entry queued inside a price level. Distinct from `Order` because
/// it never carries a `pair` (implied by the book it lives in) and its
/// `amount` only ever shrinks, never grows.
#[derive(Debug, Clone, PartialEq)]
pub struct RestingOrder {
    pub order_id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub limit_price: Decimal,
    pub timestamp: u64,
}

impl From<&Order> for RestingOrder {
    fn from(order: &Order) -> Self {
        RestingOrder {
            order_id: order.order_id.clone(),
            account_id: order.account_id.clone(),
            amount: order.amount,
            limit_price: order.limit_price,
            timestamp: order.timestamp,
        }
    }
}

/// A completed trade. Append-only once emitted: nothing in the engine ever
/// mutates a `Trade` after `MatchingEngine::match_order` returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub trade_id: u64,
    pub pair: String,
    pub maker_order_id: String,
    pub taker_order_id: String,
    pub maker_account_id: String,
    pub taker_account_id: String,
    pub amount: Decimal,
    pub price: Decimal,
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_command_round_trips_through_json() {
        let raw = r#"{"type_op":"CREATE","account_id":"1","order_id":"B1","pair":"BTC/USDC","side":"BUY","amount":"10","limit_price":"50000"}"#;
        let command: OrderCommand = serde_json::from_str(raw).unwrap();
        assert!(matches!(command.type_op, TypeOp::Create));
        assert!(matches!(command.side, Side::Buy));
        assert_eq!(command.order_id, "B1");

        let reencoded = serde_json::to_string(&command).unwrap();
        let reparsed: OrderCommand = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(command, reparsed);
    }

    #[test]
    fn test_resting_order_copies_the_fields_a_level_needs() {
        let order = Order {
            account_id: "acct".into(),
            order_id: "o1".into(),
            pair: "BTC/USDC".into(),
            side: Side::Buy,
            amount: Decimal::new(10, 0),
            limit_price: Decimal::new(50000, 0),
            timestamp: 3,
        };
        let resting: RestingOrder = (&order).into();
        assert_eq!(resting.order_id, "o1");
        assert_eq!(resting.amount, order.amount);
        assert_eq!(resting.timestamp, 3);
    }
}
