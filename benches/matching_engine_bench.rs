use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;

use limit_match_engine::matching_engine::MatchingEngine;
use limit_match_engine::orderbook::OrderBook;
use limit_match_engine::types::{Order, Side};

fn order(order_id: &str, side: Side, amount: rust_decimal::Decimal, price: rust_decimal::Decimal) -> Order {
    Order {
        account_id: "bench-account".into(),
        order_id: order_id.into(),
        pair: "BTC/USDC".into(),
        side,
        amount,
        limit_price: price,
        timestamp: 0,
    }
}

fn resting_book(depth: i64) -> OrderBook {
    let mut book = OrderBook::new("BTC/USDC");
    let engine = MatchingEngine::new();
    for i in 0..depth {
        let price = dec!(100) - rust_decimal::Decimal::from(i);
        let resting = order(&format!("bid-{i}"), Side::Buy, dec!(1), price);
        engine.rest(&resting, &mut book);
    }
    book
}

fn bench_resting_many_levels(c: &mut Criterion) {
    c.bench_function("rest_1000_distinct_price_levels", |b| {
        b.iter(|| {
            let mut book = OrderBook::new("BTC/USDC");
            let engine = MatchingEngine::new();
            for i in 0..1000 {
                let price = dec!(1) + rust_decimal::Decimal::from(i);
                let resting = order(&format!("o{i}"), Side::Buy, dec!(1), price);
                engine.rest(&resting, &mut book);
            }
            black_box(book.best_bid())
        })
    });
}

fn bench_sweep_across_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_order");
    group.bench_function("sweep_5_levels", |b| {
        b.iter_batched(
            || (resting_book(5), MatchingEngine::new()),
            |(mut book, mut engine)| {
                let mut taker = order("taker", Side::Sell, dec!(5), dec!(100));
                black_box(engine.match_order(&mut taker, &mut book, 1).unwrap())
            },
            criterion::BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_fifo_within_one_level(c: &mut Criterion) {
    c.bench_function("fifo_match_within_single_level", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::new("BTC/USDC");
                let engine = MatchingEngine::new();
                for i in 0..100 {
                    let resting = order(&format!("maker-{i}"), Side::Buy, dec!(1), dec!(100));
                    engine.rest(&resting, &mut book);
                }
                (book, engine)
            },
            |(mut book, mut engine)| {
                let mut taker = order("taker", Side::Sell, dec!(100), dec!(100));
                black_box(engine.match_order(&mut taker, &mut book, 1).unwrap())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_cancel(c: &mut Criterion) {
    c.bench_function("cancel_from_deep_level", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::new("BTC/USDC");
                let engine = MatchingEngine::new();
                for i in 0..500 {
                    let resting = order(&format!("maker-{i}"), Side::Buy, dec!(1), dec!(100));
                    engine.rest(&resting, &mut book);
                }
                (book, engine, order("maker-499", Side::Buy, dec!(1), dec!(100)))
            },
            |(mut book, engine, target)| black_box(engine.cancel(&target, &mut book)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_resting_many_levels,
    bench_sweep_across_levels,
    bench_fifo_within_one_level,
    bench_cancel,
);
criterion_main!(benches);
