use serde::{Serialize, Serializer};

use crate::atm::{Currency, Decimal};

/// Serialize Decimal with exactly 2 decimal places
fn serialize_decimal_2dp<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

/// A bank account with available, held, and total balances.
///
/// Charged money is held until the withdrawal is committed (it leaves the
/// account) or aborted (it becomes available again).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Account {
    #[serde(rename = "user")]
    user_id: String,
    currency: Currency,
    #[serde(serialize_with = "serialize_decimal_2dp")]
    available: Decimal,
    #[serde(serialize_with = "serialize_decimal_2dp")]
    held: Decimal,
    #[serde(serialize_with = "serialize_decimal_2dp")]
    total: Decimal,
}

impl Account {
    pub(super) fn new(user_id: String, currency: Currency, balance: Decimal) -> Self {
        Self {
            user_id,
            currency,
            available: balance,
            held: Decimal::ZERO,
            total: balance,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the available balance
    pub fn available(&self) -> Decimal {
        self.available
    }

    /// Returns the balance held by open transactions
    pub fn held(&self) -> Decimal {
        self.held
    }

    /// Returns the total balance
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Hold funds for a charge.
    /// Caller must ensure sufficient available funds.
    pub(super) fn hold(&mut self, amount: Decimal) {
        debug_assert!(amount <= self.available, "hold exceeds available funds");
        self.available -= amount;
        self.held += amount;
        #[cfg(debug_assertions)]
        self.assert_invariant();
    }

    /// Give held funds back (aborted transaction).
    pub(super) fn release(&mut self, amount: Decimal) {
        self.held -= amount;
        self.available += amount;
        #[cfg(debug_assertions)]
        self.assert_invariant();
    }

    /// Remove held funds from the account (committed transaction).
    pub(super) fn settle(&mut self, amount: Decimal) {
        self.held -= amount;
        self.total -= amount;
        #[cfg(debug_assertions)]
        self.assert_invariant();
    }

    /// total = available + held, and no balance below zero
    #[cfg(debug_assertions)]
    fn assert_invariant(&self) {
        debug_assert_eq!(
            self.total,
            self.available + self.held,
            "Invariant violated: total ({}) != available ({}) + held ({})",
            self.total,
            self.available,
            self.held
        );
        debug_assert!(
            self.available >= Decimal::ZERO && self.held >= Decimal::ZERO,
            "Invariant violated: negative balance (available {}, held {})",
            self.available,
            self.held
        );
    }
}
