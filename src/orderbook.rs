//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the per-pair limit order book (C2): two sides, each a
// price-ordered collection of FIFO price levels. It is a pure data component —
// every mutation is driven by `crate::matching_engine`; this module only knows
// how to hold state consistently.
//
// | Component     | Description                                                      |
// |---------------|--------------------------------------------------------------------|
// | PriceLevel    | FIFO queue of resting orders at a single price, plus total volume. |
// | OrderBookSide | A `BTreeMap<Decimal, PriceLevel>`, best-first iteration per side.  |
// | OrderBook     | A pair's bids and asks.                                            |
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, VecDeque};

use rust_decimal::Decimal;

use crate::types::{RestingOrder, Side};

/// A single price's FIFO queue of resting orders.
///
/// *Invariant*: `total_volume == orders.iter().map(|o| o.amount).sum()`, and a
/// level is never left registered in its side once `orders` is empty — see
/// `OrderBookSide::remove_if_empty`.
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    pub orders: VecDeque<RestingOrder>,
    pub total_volume: Decimal,
}

impl PriceLevel {
    fn push(&mut self, order: RestingOrder) {
        self.total_volume += order.amount;
        self.orders.push_back(order);
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// One side (bids or asks) of an order book.
///
/// Keyed directly on `Decimal` rather than on a canonical string plus a
/// parallel sorted price vector: `rust_decimal::Decimal`'s `Ord` is already
/// structurally canonical (`==` compares mathematical value, not
/// representation), so the map's own ordering already satisfies "best price
/// first" without a second structure to keep in sync.
#[derive(Debug, Clone, Default)]
pub struct OrderBookSide {
    levels: BTreeMap<Decimal, PriceLevel>,
    descending: bool,
}

impl OrderBookSide {
    fn new(descending: bool) -> Self {
        OrderBookSide {
            levels: BTreeMap::new(),
            descending,
        }
    }

    pub fn best_price(&self) -> Option<Decimal> {
        if self.descending {
            self.levels.keys().next_back().copied()
        } else {
            self.levels.keys().next().copied()
        }
    }

    pub fn level(&self, price: Decimal) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub fn level_mut(&mut self, price: Decimal) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Appends a resting order at `price`, creating the level lazily.
    pub fn rest(&mut self, price: Decimal, order: RestingOrder) {
        self.levels.entry(price).or_default().push(order);
    }

    /// Drops the level at `price` if it has become empty. A no-op if the
    /// level is absent or still holds orders.
    pub fn remove_if_empty(&mut self, price: Decimal) {
        if self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&price);
        }
    }

    /// Prices from best to worst, for the matching walk and for serialization.
    pub fn prices_best_first(&self) -> Box<dyn Iterator<Item = Decimal> + '_> {
        if self.descending {
            Box::new(self.levels.keys().rev().copied())
        } else {
            Box::new(self.levels.keys().copied())
        }
    }

    /// Levels from best to worst price, each already FIFO-ordered internally.
    pub fn levels_best_first(&self) -> impl Iterator<Item = &PriceLevel> {
        self.prices_best_first()
            .collect::<Vec<_>>()
            .into_iter()
            .map(move |price| &self.levels[&price])
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[cfg(test)]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

/// A single pair's resting book: bids sorted best-first descending, asks
/// best-first ascending.
///
/// *Cross invariant*, maintained by `crate::matching_engine` after every
/// operation: whenever both sides are non-empty, `best_bid < best_ask`.
#[derive(Debug, Clone)]
pub struct OrderBook {
    pub pair: String,
    pub bids: OrderBookSide,
    pub asks: OrderBookSide,
}

impl OrderBook {
    pub fn new(pair: impl Into<String>) -> Self {
        OrderBook {
            pair: pair.into(),
            bids: OrderBookSide::new(true),
            asks: OrderBookSide::new(false),
        }
    }

    /// The side an order of `side` rests on / is cancelled from: BUY -> bids,
    /// SELL -> asks. Never the side an order matches *against* — see
    /// `crate::matching_engine::opposite_side` for that.
    pub fn side_for(&self, side: Side) -> &OrderBookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub fn side_for_mut(&mut self, side: Side) -> &mut OrderBookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    pub fn bids_best_first(&self) -> impl Iterator<Item = &PriceLevel> {
        self.bids.levels_best_first()
    }

    pub fn asks_best_first(&self) -> impl Iterator<Item = &PriceLevel> {
        self.asks.levels_best_first()
    }

    /// Inspection-only: the number of resting orders at `price` on `side`.
    /// Walks a single level, not the whole book; carries no correctness
    /// weight for matching.
    pub fn order_count_at(&self, side: Side, price: Decimal) -> usize {
        self.side_for(side).level(price).map_or(0, |level| level.orders.len())
    }
}
