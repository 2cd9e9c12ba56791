//! Demonstrates iterating the append-only order-event and trade logs after
//! several ticks, and cancelling a resting order mid-simulation.

use agentbook_sim::prelude::*;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Trade Listener Demo ===\n");

    let mut sim = Simulator::new(0, 11);

    sim.place_limit_order(OrderId(1), TraderId(1), Side::Sell, Quantity::new(5), Price::new(100));
    sim.submit_pending_orders();
    sim.advance_time(1).unwrap();

    sim.place_limit_order(OrderId(2), TraderId(2), Side::Sell, Quantity::new(5), Price::new(101));
    sim.submit_pending_orders();
    sim.advance_time(1).unwrap();

    sim.cancel_order(OrderId(2)).unwrap();
    println!("✓ Cancelled order 2 before it could be matched against");

    sim.place_market_order(OrderId(3), TraderId(3), Side::Buy, Quantity::new(5));
    sim.submit_pending_orders();

    println!("\nOrder events, in order:");
    for event in sim.get_order_logs() {
        println!(
            "  [{:>3}] t={:<3} order={:<2} {:?}{}",
            event.event_id,
            event.timestamp,
            event.order_id,
            event.event_kind,
            event.reason.map(|r| format!(" ({r})")).unwrap_or_default(),
        );
    }

    println!("\nTrades, in order:");
    for trade in sim.get_trade_logs() {
        println!("  [{:>3}] t={:<3} {} @ {} maker={} taker={}", trade.trade_id, trade.timestamp, trade.quantity, trade.price, trade.maker_order_id, trade.taker_order_id);
    }
}
