//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements price-time priority matching (C3): the only place in
// the crate where real engineering lives. `MatchingEngine` is stateless apart
// from the monotonic trade-id counter; every operation takes the book it
// operates on as an explicit argument.
//
// | Function  | Description                                                            |
// |-----------|-------------------------------------------------------------------------|
// | match_order | Walks the opposite side, emitting trades until the taker is filled  |
// |           | or no more marketable volume remains.                                 |
// | rest      | Places an order's residual onto its own side.                         |
// | cancel    | Removes a resting entry located by (side, limit_price, order_id).     |
//--------------------------------------------------------------------------------------------------

use rust_decimal::Decimal;

use crate::decimal::ZERO;
use crate::error::MatchingError;
use crate::orderbook::OrderBook;
use crate::types::{Order, Side, Trade};

/// Stateless matching engine, apart from the monotonically increasing trade
/// id counter it owns.
#[derive(Debug, Default)]
pub struct MatchingEngine {
    next_trade_id: u64,
}

fn opposite_side(side: Side) -> Side {
    match side {
        Side::Buy => Side::Sell,
        Side::Sell => Side::Buy,
    }
}

/// Whether `order`'s limit price is marketable against a resting price `p` on
/// the opposite side: BUY matches when `limit_price >= p`; SELL matches when
/// `limit_price <= p`.
fn price_compatible(side: Side, limit_price: Decimal, p: Decimal) -> bool {
    match side {
        Side::Buy => limit_price >= p,
        Side::Sell => limit_price <= p,
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        MatchingEngine { next_trade_id: 1 }
    }

    fn next_trade_id(&mut self) -> u64 {
        let id = self.next_trade_id;
        self.next_trade_id += 1;
        id
    }

    /// Consumes marketable volume from `order` against the opposite side of
    /// `book`, mutating `order.amount` down to its residual and returning the
    /// trades produced, in generation order.
    pub fn match_order(
        &mut self,
        order: &mut Order,
        book: &mut OrderBook,
        timestamp: u64,
    ) -> Result<Vec<Trade>, MatchingError> {
        let mut trades = Vec::new();
        let oppo_side = opposite_side(order.side);

        loop {
            if order.amount.is_zero() {
                break;
            }

            let Some(best_price) = book.side_for(oppo_side).best_price() else {
                break;
            };

            if !price_compatible(order.side, order.limit_price, best_price) {
                break;
            }

            let oppo = book.side_for_mut(oppo_side);
            let Some(level) = oppo.level_mut(best_price) else {
                return Err(MatchingError::DanglingPriceIndex {
                    price: crate::decimal::canonical(best_price),
                });
            };

            if level.is_empty() {
                oppo.remove_if_empty(best_price);
                continue;
            }

            while !level.is_empty() && !order.amount.is_zero() {
                let maker = level.orders.front_mut().ok_or_else(|| MatchingError::EmptyLevelRegistered {
                    price: crate::decimal::canonical(best_price),
                })?;
                let fill = order.amount.min(maker.amount);
                if fill <= ZERO {
                    return Err(MatchingError::NegativeVolume {
                        price: crate::decimal::canonical(best_price),
                    });
                }

                order.amount -= fill;
                maker.amount -= fill;
                level.total_volume -= fill;
                if level.total_volume < ZERO {
                    return Err(MatchingError::NegativeVolume {
                        price: crate::decimal::canonical(best_price),
                    });
                }

                let trade = Trade {
                    trade_id: self.next_trade_id(),
                    pair: book.pair.clone(),
                    maker_order_id: maker.order_id.clone(),
                    taker_order_id: order.order_id.clone(),
                    maker_account_id: maker.account_id.clone(),
                    taker_account_id: order.account_id.clone(),
                    amount: fill,
                    price: best_price,
                    timestamp,
                };
                trades.push(trade);

                if maker.amount.is_zero() {
                    level.orders.pop_front();
                }
            }

            oppo.remove_if_empty(best_price);
        }

        Ok(trades)
    }

    /// Places `order`'s residual onto its own side of `book`. The caller is
    /// responsible for only calling this when `order.amount > ZERO`.
    pub fn rest(&self, order: &Order, book: &mut OrderBook) {
        let side = book.side_for_mut(order.side);
        side.rest(order.limit_price, order.into());
    }

    /// Locates and removes a resting entry by `(side, limit_price, order_id)`.
    /// Returns `Ok(false)` (not an error) if the locator disagrees with the
    /// resting entry, or the entry is not present at all. Only errors on an
    /// internal invariant breach (the located index no longer resolves).
    pub fn cancel(&self, order: &Order, book: &mut OrderBook) -> Result<bool, MatchingError> {
        let side = book.side_for_mut(order.side);
        let Some(level) = side.level_mut(order.limit_price) else {
            return Ok(false);
        };

        let Some(index) = level
            .orders
            .iter()
            .position(|resting| resting.order_id == order.order_id)
        else {
            return Ok(false);
        };

        let removed = level.orders.remove(index).ok_or_else(|| MatchingError::EmptyLevelRegistered {
            price: crate::decimal::canonical(order.limit_price),
        })?;
        level.total_volume -= removed.amount;
        side.remove_if_empty(order.limit_price);
        Ok(true)
    }

    pub fn best_bid(&self, book: &OrderBook) -> Option<Decimal> {
        book.best_bid()
    }

    pub fn best_ask(&self, book: &OrderBook) -> Option<Decimal> {
        book.best_ask()
    }

    pub fn spread(&self, book: &OrderBook) -> Option<Decimal> {
        book.spread()
    }
}
