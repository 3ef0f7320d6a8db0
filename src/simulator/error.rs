use crate::atm::{Currency, Decimal, ValueError};

/// Top-level error type for the simulator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid value: {0}")]
    Value(#[from] ValueError),
    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),
}

/// Errors during record -> domain value conversion (hard errors).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Card {card} has a negative opening balance {balance}")]
    NegativeBalance { card: String, balance: Decimal },

    #[error("No {currency} banknote with face value {value}")]
    UnknownBanknote { currency: Currency, value: u32 },

    #[error("Card {card} is registered twice")]
    DuplicateCard { card: String },
}
