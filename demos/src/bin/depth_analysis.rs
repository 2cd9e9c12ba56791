//! Demonstrates Level1/Level2 projections and a market-order sweep across
//! several price levels.

use agentbook_sim::prelude::*;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Depth Analysis Demo ===\n");

    let mut sim = Simulator::new(0, 1);
    for (id, price, qty) in [(1u64, 100i64, 3u64), (2, 101, 4), (3, 102, 10)] {
        sim.place_limit_order(OrderId(id), TraderId(id), Side::Sell, Quantity::new(qty), Price::new(price));
    }
    sim.submit_pending_orders();

    let l1 = sim.get_current_level1_data();
    println!("Level1 before sweep: best_ask={} @ qty={}", l1.best_ask_price, l1.best_ask_quantity);

    let l2 = sim.get_current_level2_data(UNBOUNDED_DEPTH);
    println!("Level2 ask ladder: {:?}", l2.ask_ladder);

    sim.place_market_order(OrderId(9), TraderId(9), Side::Buy, Quantity::new(10));
    sim.submit_pending_orders();

    println!("\nAfter a MARKET BUY of 10 sweeps the first two levels and part of the third:");
    let l2 = sim.get_current_level2_data(2);
    println!("Level2 ask ladder (top 2): {:?}", l2.ask_ladder);

    for trade in sim.get_trade_logs() {
        println!("  fill: {} @ {}", trade.quantity, trade.price);
    }
}
