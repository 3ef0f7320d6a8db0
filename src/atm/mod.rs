//! ATM withdrawal module.
//!
//! This module contains the withdrawal logic including:
//! - `AtmMachine` - The withdrawal orchestrator
//! - `Money`, `Currency`, `Banknote` - Amounts and the per-currency denomination table
//! - `Card`, `AuthenticationToken` - Card and authorization values
//! - `CardAuthorizer`, `BankLedger`, `CashReservoir` - The collaborators the orchestrator drives
//! - `Error` types - Withdrawal failures and value validation errors

mod atm_machine;
mod banknote;
mod card;
mod error;
mod money;
mod services;

pub use rust_decimal::Decimal;

pub use atm_machine::{AtmMachine, Payment};
pub use banknote::{decompose, Banknote, MAX_BANKNOTES};
pub use card::{AuthenticationToken, Card};
pub use error::{ValueError, WithdrawalError};
pub use money::{Currency, Money};
pub use services::{BankLedger, CardAuthorizer, CashReservoir};
