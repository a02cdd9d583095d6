// ============================================================================
// Basic Usage Example
// ============================================================================

use batch_matching_engine::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    println!("=== Batch Matching Engine Example ===\n");

    let recorder = Arc::new(RecordingEventHandler::new());
    let mut engine = MatchingEngineBuilder::new()
        .conventional_asks()
        .event_handler(recorder.clone())
        .build();

    println!("Created engine with config {:?}\n", engine.config());

    // Ladder of asks
    println!("Adding sell orders...");
    for i in 0i64..5 {
        let price = Decimal::from(100 + i);
        engine.process_order(Order::limit(i, 10 + i, Side::Sell, price, 10));
        println!("  Sell 10 @ {}", price);
    }

    let snapshot = engine.snapshot(10);
    println!("\nBook after asks:");
    println!("  Best ask: {:?}", snapshot.best_ask());
    println!("  Ask depth: {} levels\n", snapshot.asks.len());

    println!("Sweeping with a limit buy 25 @ 103...");
    engine.process_order(Order::limit(100, 1, Side::Buy, Decimal::from(103), 25));

    println!("Immediate-or-cancel buy 30 @ 104...");
    engine.process_order(Order::ioc(101, 2, Side::Buy, Decimal::from(104), 30));

    println!("Fill-or-kill buy 50 @ 110...");
    let events = engine.process_order(Order::fok(102, 3, Side::Buy, Decimal::from(110), 50));
    if events
        .iter()
        .any(|e| matches!(e, OrderEvent::OrderKilled { .. }))
    {
        println!("  killed, not enough liquidity in one order");
    }

    println!("\nFills:");
    for fill in recorder.fills() {
        println!(
            "  {} @ {} buyer={} seller={}",
            fill.quantity, fill.price, fill.buyer, fill.seller
        );
    }

    println!("\nAccounts:");
    for (account_id, account) in engine.ledger() {
        println!(
            "  {:>3}: balance={} position={} turnover={} volume={}",
            account_id,
            batch_matching_engine::csv_io::format_money(account.balance),
            account.position,
            batch_matching_engine::csv_io::format_money(account.turnover),
            account.traded_volume,
        );
    }

    println!("\nStats: {:?}", engine.stats());
}
