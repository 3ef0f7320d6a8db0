use crate::atm::{Currency, Decimal};

/// Failures of a single withdrawal.
/// Every variant is terminal for the current call, nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WithdrawalError {
    #[error("Invalid amount: {amount} {currency} must be greater than zero")]
    InvalidAmount { amount: Decimal, currency: Currency },

    #[error("Amount {amount} {currency} cannot be paid out with {currency} banknotes")]
    NonDenominable { amount: Decimal, currency: Currency },

    #[error("Card {card_number} was not authorized")]
    UnauthorizedCard { card_number: String },

    #[error("Insufficient funds: user {user_id} cannot be charged {amount} {currency}")]
    InsufficientFunds {
        user_id: String,
        amount: Decimal,
        currency: Currency,
    },

    #[error("Cash dispenser failed to release {banknotes} banknotes")]
    DispenserFailure { banknotes: usize },
}

impl WithdrawalError {
    /// Short, stable name of the failure kind (`insufficient_funds`, ...)
    pub fn kind(&self) -> &'static str {
        match self {
            WithdrawalError::InvalidAmount { .. } => "invalid_amount",
            WithdrawalError::NonDenominable { .. } => "non_denominable",
            WithdrawalError::UnauthorizedCard { .. } => "unauthorized_card",
            WithdrawalError::InsufficientFunds { .. } => "insufficient_funds",
            WithdrawalError::DispenserFailure { .. } => "dispenser_failure",
        }
    }
}

/// Errors raised by the validated constructors of the value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("Card number must not be blank")]
    BlankCardNumber,

    #[error("User id must not be blank")]
    BlankUserId,

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}
