mod commands;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use atm_engine::Simulator;
use clap::Parser;
use commands::Args;

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))
}

fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    // Initialize logger with default level of info (can be overridden with RUST_LOG)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. Initialize the Simulator
    let mut simulator = Simulator::new();

    // 2. Load cards, accounts and cash
    log::info!("Loading cards from {}", args.cards_file.display());
    simulator
        .load_cards(open(&args.cards_file)?)
        .context("Failed to load cards")?;

    log::info!("Loading cash from {}", args.cash_file.display());
    simulator
        .load_cash(open(&args.cash_file)?)
        .context("Failed to load cash")?;

    // 3. Replay the requests, outcomes go to stdout
    log::info!("Processing requests from {}", args.requests_file.display());
    simulator
        .process_requests(open(&args.requests_file)?, std::io::stdout())
        .context("Failed to process withdrawal requests")?;

    // 4. Optionally export the balances
    if let Some(path) = &args.balances_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        simulator
            .export_accounts(file)
            .context("Failed to export account balances")?;
        log::info!("Balances written to {}", path.display());
    }

    Ok(())
}
