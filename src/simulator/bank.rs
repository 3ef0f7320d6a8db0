use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::account::Account;
use crate::atm::{AuthenticationToken, BankLedger, Currency, Decimal, Money};

#[derive(Debug, Default)]
struct Ledger {
    /// Maps user ID to their account
    accounts: HashMap<String, Account>,
    /// Maps each open transaction to the amount it has charged so far
    open: HashMap<AuthenticationToken, Decimal>,
}

/// In-memory bank ledger.
///
/// One account per user in a single currency. Charges are held on the account
/// until the transaction is committed or aborted.
#[derive(Debug, Default)]
pub struct Bank {
    ledger: Mutex<Ledger>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an account. Returns `false` if the user already had one.
    pub fn open_account(&self, user_id: &str, currency: Currency, balance: Decimal) -> bool {
        let mut ledger = self.ledger();
        if ledger.accounts.contains_key(user_id) {
            return false;
        }
        ledger.accounts.insert(
            user_id.to_string(),
            Account::new(user_id.to_string(), currency, balance),
        );
        true
    }

    /// Returns a snapshot of a user's account
    pub fn account(&self, user_id: &str) -> Option<Account> {
        self.ledger().accounts.get(user_id).cloned()
    }

    /// Returns a snapshot of all accounts, sorted by user ID
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.ledger().accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        accounts
    }

    /// Returns the number of transactions neither committed nor aborted
    pub fn open_transactions(&self) -> usize {
        self.ledger().open.len()
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BankLedger for Bank {
    fn start_transaction(&self, token: &AuthenticationToken) {
        log::trace!("[bank] start transaction {token}");
        if self
            .ledger()
            .open
            .insert(token.clone(), Decimal::ZERO)
            .is_some()
        {
            log::warn!("[bank] transaction {token} was already open");
        }
    }

    fn charge(&self, token: &AuthenticationToken, money: &Money) -> bool {
        let mut ledger = self.ledger();
        let Ledger { accounts, open } = &mut *ledger;

        let Some(charged) = open.get_mut(token) else {
            log::warn!("[bank] charge without an open transaction for {token}");
            return false;
        };
        let Some(account) = accounts.get_mut(token.user_id()) else {
            log::debug!("[bank] no account for user {}", token.user_id());
            return false;
        };
        if account.currency() != money.currency() {
            log::debug!(
                "[bank] account {} holds {}, cannot charge {money}",
                token.user_id(),
                account.currency()
            );
            return false;
        }
        if account.available() < money.amount() {
            log::debug!(
                "[bank] account {} has {} available, cannot charge {money}",
                token.user_id(),
                account.available()
            );
            return false;
        }

        account.hold(money.amount());
        *charged += money.amount();
        log::trace!(
            "[bank] charged {money} to {} -> available={}",
            token.user_id(),
            account.available()
        );
        true
    }

    fn commit(&self, token: &AuthenticationToken) {
        let mut ledger = self.ledger();
        let Some(charged) = ledger.open.remove(token) else {
            log::warn!("[bank] commit without an open transaction for {token}");
            return;
        };
        if let Some(account) = ledger.accounts.get_mut(token.user_id()) {
            account.settle(charged);
        }
        log::trace!("[bank] committed {charged} for {token}");
    }

    fn abort(&self, token: &AuthenticationToken) {
        let mut ledger = self.ledger();
        let Some(charged) = ledger.open.remove(token) else {
            log::warn!("[bank] abort without an open transaction for {token}");
            return;
        };
        if let Some(account) = ledger.accounts.get_mut(token.user_id()) {
            account.release(charged);
        }
        log::trace!("[bank] aborted {token}, returned {charged}");
    }
}
