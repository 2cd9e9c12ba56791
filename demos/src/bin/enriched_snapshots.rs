//! Demonstrates the `to_dict()` projections: every record type serializes
//! to a stable key/value form.

use agentbook_sim::prelude::*;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Enriched Snapshots Demo ===\n");

    let mut sim = Simulator::new(0, 3);
    sim.place_limit_order(OrderId(1), TraderId(1), Side::Buy, Quantity::new(10), Price::new(100));
    sim.place_limit_order(OrderId(2), TraderId(2), Side::Sell, Quantity::new(6), Price::new(100));
    sim.submit_pending_orders();

    println!("Snapshot.to_dict():\n{}", serde_json::to_string_pretty(&sim.get_current_snapshot().to_dict()).unwrap());
    println!("\nLevel1Data.to_dict():\n{}", serde_json::to_string_pretty(&sim.get_current_level1_data().to_dict()).unwrap());

    if let Some(trade) = sim.get_trade_logs().first() {
        println!("\nTradeRecord.to_dict():\n{}", serde_json::to_string_pretty(&trade.to_dict()).unwrap());
    }

    if let Some(event) = sim.get_order_logs().first() {
        println!("\nOrderEvent.to_dict():\n{}", serde_json::to_string_pretty(&event.to_dict()).unwrap());
    }
}
