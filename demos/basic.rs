//! Basic example of using the `Simulator`.
//!
//! Run with: `cargo run --example basic`

use atm_engine::Simulator;
use std::io::Cursor;

fn main() {
    // Initialize logger (optional, but shows what's happening)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cards = r"card,pin,currency,balance
4111,1234,PLN,1000.00
5500,4321,EUR,150.00
";

    let cash = r"currency,value,count
PLN,100,5
PLN,10,10
EUR,100,1
EUR,10,5
";

    let requests = r"card,pin,currency,amount
4111,1234,PLN,110
4111,1234,PLN,1
4111,9999,PLN,100
5500,4321,EU,110
5500,4321,EUR,100
4111,1234,PLN,800
";

    let mut simulator = Simulator::new();
    simulator
        .load_cards(Cursor::new(cards))
        .expect("Failed to load cards");
    simulator
        .load_cash(Cursor::new(cash))
        .expect("Failed to load cash");

    println!("\n=== Withdrawals ===");
    simulator
        .process_requests(Cursor::new(requests), std::io::stdout())
        .expect("Failed to process requests");

    println!("\n=== Final Account State ===");
    simulator
        .export_accounts(std::io::stdout())
        .expect("Failed to export accounts");
}
