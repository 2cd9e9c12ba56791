//! Example demonstrating the use of the prelude module.
//!
//! Shows how to pull in every commonly used type with a single `use`
//! statement, then drive the simulator through one tick.

use agentbook_sim::prelude::*;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Prelude Demo ===\n");

    let mut sim = Simulator::new(0, 7);
    println!("✓ Created Simulator at t={} (seed={})", sim.get_current_time(), sim.seed());

    sim.place_limit_order(OrderId(1), TraderId(1), Side::Buy, Quantity::new(100), Price::new(3000));
    sim.place_limit_order(OrderId(2), TraderId(2), Side::Sell, Quantity::new(100), Price::new(3100));
    sim.submit_pending_orders();
    println!("✓ Rested a BUY of 100 @ 3000 and a SELL of 100 @ 3100");

    let snapshot = sim.get_current_snapshot();
    println!("\nBook state:");
    println!("  best_bid:  {}", snapshot.best_bid);
    println!("  best_ask:  {}", snapshot.best_ask);
    println!("  mid_price: {}", snapshot.mid_price);
    println!("  bid_depth: {}", snapshot.bid_depth);
    println!("  ask_depth: {}", snapshot.ask_depth);

    sim.advance_time(1).unwrap();
    println!("\n✓ Advanced time to t={}", sim.get_current_time());
}
