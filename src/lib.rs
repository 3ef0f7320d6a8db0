//! ATM withdrawal engine.
//!
//! The [`atm`] module holds the withdrawal orchestrator and its value objects,
//! the [`simulator`] module provides in-memory collaborators that let the
//! orchestrator be driven end to end from CSV files.

pub mod atm;
pub mod simulator;

pub use atm::{
    AtmMachine, AuthenticationToken, BankLedger, Banknote, Card, CardAuthorizer, CashReservoir,
    Currency, Money, Payment, ValueError, WithdrawalError,
};
pub use simulator::{Error, Simulator};
