//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// I/O (C6): thin `serde_json` wrappers around the three documents described in
// spec §6 — the input command array, the order-book output, and the trades
// output. No business logic; every failure is wrapped as `IOError`.
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;

use crate::decimal;
use crate::error::IOError;
use crate::orderbook::{OrderBook, PriceLevel};
use crate::types::{OrderCommand, Trade};

pub fn read_commands(path: &Path) -> Result<Vec<OrderCommand>, IOError> {
    let file = File::open(path).map_err(|source| IOError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| IOError::Decode {
        path: path.display().to_string(),
        source,
    })
}

#[derive(Debug, Serialize)]
struct BookEntryDocument {
    order_id: String,
    account_id: String,
    amount: String,
    limit_price: String,
    timestamp: u64,
}

#[derive(Debug, Serialize)]
struct BookSideDocument {
    bids: Vec<BookEntryDocument>,
    asks: Vec<BookEntryDocument>,
}

#[derive(Debug, Serialize)]
struct TradeDocument {
    trade_id: String,
    pair: String,
    maker_order_id: String,
    taker_order_id: String,
    maker_account_id: String,
    taker_account_id: String,
    amount: String,
    price: String,
    timestamp: u64,
}

/// Writes the per-pair order-book document: a JSON object keyed by pair, bids
/// descending, asks ascending, each side's entries in FIFO order.
pub fn write_book_document(path: &Path, books: &HashMap<String, OrderBook>) -> Result<(), IOError> {
    // BTreeMap so pair keys come out sorted, keeping the document diff-stable
    // across runs that ingested the same pairs in a different order.
    let mut document: BTreeMap<String, BookSideDocument> = BTreeMap::new();
    for (pair, book) in books {
        let to_entry = |level: &PriceLevel| {
            level.orders.iter().map(|order| BookEntryDocument {
                order_id: order.order_id.clone(),
                account_id: order.account_id.clone(),
                amount: decimal::canonical(order.amount),
                limit_price: decimal::canonical(order.limit_price),
                timestamp: order.timestamp,
            })
        };
        let bids = book.bids_best_first().flat_map(to_entry).collect();
        let asks = book.asks_best_first().flat_map(to_entry).collect();
        document.insert(pair.clone(), BookSideDocument { bids, asks });
    }
    write_json(path, &document)
}

pub fn write_trades_document(path: &Path, trades: &[Trade]) -> Result<(), IOError> {
    let document: Vec<TradeDocument> = trades
        .iter()
        .map(|trade| TradeDocument {
            trade_id: trade.trade_id.to_string(),
            pair: trade.pair.clone(),
            maker_order_id: trade.maker_order_id.clone(),
            taker_order_id: trade.taker_order_id.clone(),
            maker_account_id: trade.maker_account_id.clone(),
            taker_account_id: trade.taker_account_id.clone(),
            amount: decimal::canonical(trade.amount),
            price: decimal::canonical(trade.price),
            timestamp: trade.timestamp,
        })
        .collect();
    write_json(path, &document)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IOError> {
    let file = File::create(path).map_err(|source| IOError::Write {
        path: path.display().to_string(),
        source,
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value).map_err(|source| IOError::Encode {
        path: path.display().to_string(),
        source,
    })
}
