//! Demonstrates a simple cross between two same-priced orders, and
//! price–time priority among two resting orders at the same price.

use agentbook_sim::prelude::*;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Market Trades Demo ===\n");

    let mut sim = Simulator::new(0, 1);

    println!("-- simple cross --");
    sim.place_limit_order(OrderId(1), TraderId(1), Side::Buy, Quantity::new(10), Price::new(100));
    sim.submit_pending_orders();
    sim.place_limit_order(OrderId(2), TraderId(2), Side::Sell, Quantity::new(10), Price::new(100));
    sim.submit_pending_orders();
    for trade in sim.get_trade_logs() {
        println!("  trade {}: {} @ {} (maker={}, taker={})", trade.trade_id, trade.quantity, trade.price, trade.maker_order_id, trade.taker_order_id);
    }

    println!("\n-- price-time priority --");
    let mut sim = Simulator::new(0, 1);
    sim.place_limit_order(OrderId(1), TraderId(1), Side::Sell, Quantity::new(5), Price::new(100));
    sim.submit_pending_orders();
    sim.place_limit_order(OrderId(2), TraderId(2), Side::Sell, Quantity::new(5), Price::new(100));
    sim.submit_pending_orders();
    sim.place_limit_order(OrderId(3), TraderId(3), Side::Buy, Quantity::new(7), Price::new(100));
    sim.submit_pending_orders();
    for trade in sim.get_trade_logs() {
        println!("  trade {}: {} @ {} maker={}", trade.trade_id, trade.quantity, trade.price, trade.maker_order_id);
    }
    println!("  (maker=1 goes first — it rested first, at the same price as maker=2)");
}
