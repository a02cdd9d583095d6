// ============================================================================
// Matching Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Batch Processing - Whole mixed batches through a fresh engine
// 2. Policy Comparison - One incoming order per policy against a deep book
// 3. Order Book Operations - Snapshot and resting inserts
// 4. CSV Parsing - Reader throughput on generated input
// ============================================================================

use batch_matching_engine::csv_io::{parse_orders, CsvOptions};
use batch_matching_engine::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use std::hint::black_box;

fn mixed_batch(num_orders: i64) -> Vec<Order> {
    (0..num_orders)
        .map(|i| {
            let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
            let price = Decimal::from(1000 + (i * 7) % 21 - 10);
            let quantity = (1 + (i * 13) % 50) as u64;
            let kind = match i % 10 {
                0 => OrderKind::Market,
                1 => OrderKind::ImmediateOrCancel,
                2 => OrderKind::FillOrKill,
                _ => OrderKind::Limit,
            };
            Order::new(i, kind, i % 64, side, price, quantity)
        })
        .collect()
}

fn seeded_engine(config: EngineConfig, levels: i64) -> MatchingEngine {
    let mut engine = MatchingEngineBuilder::new().with_config(config).build();
    for i in 0..levels {
        engine.process_order(Order::limit(i, i, Side::Sell, Decimal::from(5000 + i), 10));
        engine.process_order(Order::limit(
            levels + i,
            i,
            Side::Buy,
            Decimal::from(4000 - i),
            10,
        ));
    }
    engine
}

// ============================================================================
// Batch Processing
// ============================================================================

fn benchmark_process_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_batch");

    for num_orders in [100i64, 1000, 10000].iter() {
        let orders = mixed_batch(*num_orders);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_orders),
            &orders,
            |b, orders| {
                b.iter_batched(
                    || orders.clone(),
                    |orders| black_box(process_batch(orders)),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// Policy Comparison
// ============================================================================

fn benchmark_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_sweep");
    let config = EngineConfig::conventional();

    let incoming = [
        ("market", OrderKind::Market),
        ("limit", OrderKind::Limit),
        ("ioc", OrderKind::ImmediateOrCancel),
        ("fok", OrderKind::FillOrKill),
    ];

    for (name, kind) in incoming.iter() {
        group.bench_function(*name, |b| {
            b.iter_batched(
                || seeded_engine(config.clone(), 100),
                |mut engine| {
                    // Crosses the first five ask levels
                    let order = Order::new(
                        -1,
                        kind.clone(),
                        999,
                        Side::Buy,
                        Decimal::from(5004),
                        50,
                    );
                    black_box(engine.process_order(order))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// Order Book Operations
// ============================================================================

fn benchmark_order_book_snapshot(c: &mut Criterion) {
    let engine = seeded_engine(EngineConfig::conventional(), 100);

    c.bench_function("order_book_snapshot", |b| {
        b.iter(|| black_box(engine.snapshot(10)));
    });
}

fn benchmark_resting_insert(c: &mut Criterion) {
    c.bench_function("resting_insert_no_match", |b| {
        b.iter_batched(
            || seeded_engine(EngineConfig::conventional(), 100),
            |mut engine| {
                for i in 0..100 {
                    engine.process_order(Order::limit(
                        10_000 + i,
                        i,
                        Side::Buy,
                        Decimal::from(3000 - i),
                        1,
                    ));
                }
                black_box(engine)
            },
            BatchSize::SmallInput,
        );
    });
}

// ============================================================================
// CSV Parsing
// ============================================================================

fn benchmark_csv_parse(c: &mut Criterion) {
    let mut input = String::from("order_id,type,account_id,dir,price,amount\n");
    for order in mixed_batch(10_000) {
        input.push_str(&format!(
            "{},{},{},{},{},{}\n",
            order.id,
            order.kind,
            order.account_id,
            if order.is_buy() { 0 } else { 1 },
            order.price,
            order.quantity
        ));
    }

    c.bench_function("csv_parse_10000", |b| {
        b.iter(|| black_box(parse_orders(input.as_bytes(), &CsvOptions::default())));
    });
}

criterion_group!(
    benches,
    benchmark_process_batch,
    benchmark_policies,
    benchmark_order_book_snapshot,
    benchmark_resting_insert,
    benchmark_csv_parse
);
criterion_main!(benches);
