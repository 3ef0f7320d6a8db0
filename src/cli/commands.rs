pub(crate) use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "atm-engine",
    author,
    version,
    about = "Replays ATM withdrawals against an in-memory bank and cash tray",
    long_about = None,
    after_help = "OUTPUT:\n    One CSV row per request is printed to stdout: card, currency, amount, status, banknotes.\n    Use shell redirection to save to a file:\n\n    atm-engine --cards cards.csv --cash cash.csv requests.csv > outcomes.csv"
)]
pub struct Args {
    /// Path to the withdrawal requests CSV file
    #[arg(
        index = 1,
        value_name = "REQUESTS",
        help = "Input CSV file with columns: card, pin, currency, amount"
    )]
    pub requests_file: PathBuf,

    /// Path to the cards CSV file
    #[arg(
        long = "cards",
        value_name = "FILE",
        help = "CSV file with columns: card, pin, currency, balance"
    )]
    pub cards_file: PathBuf,

    /// Path to the cash tray CSV file
    #[arg(
        long = "cash",
        value_name = "FILE",
        help = "CSV file with columns: currency, value, count"
    )]
    pub cash_file: PathBuf,

    /// Where to write the final account balances
    #[arg(
        long = "balances",
        value_name = "FILE",
        help = "Optional output CSV file for the final account balances"
    )]
    pub balances_file: Option<PathBuf>,
}
