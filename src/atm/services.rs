//! Collaborators driven by the [`AtmMachine`](super::AtmMachine).
//!
//! All calls are synchronous and blocking. Implementations shared between
//! threads do their own locking.

use super::{AuthenticationToken, Banknote, Card, Money};

/// Authenticates cards.
pub trait CardAuthorizer {
    /// Returns a token for an accepted card, `None` when the card is rejected.
    fn authorize(&self, card: &Card) -> Option<AuthenticationToken>;
}

/// The bank holding the card owner's account.
///
/// A withdrawal opens a transaction, charges it, and then either commits
/// or aborts it. `abort` must give back whatever `charge` took.
pub trait BankLedger {
    fn start_transaction(&self, token: &AuthenticationToken);

    /// Returns `false` when the account cannot cover `money`.
    fn charge(&self, token: &AuthenticationToken, money: &Money) -> bool;

    fn commit(&self, token: &AuthenticationToken);

    fn abort(&self, token: &AuthenticationToken);
}

/// The physical cash dispenser.
pub trait CashReservoir {
    /// Releases all of `banknotes` or, returning `false`, none of them.
    fn release_banknotes(&self, banknotes: &[Banknote]) -> bool;
}

impl<T: CardAuthorizer + ?Sized> CardAuthorizer for &T {
    fn authorize(&self, card: &Card) -> Option<AuthenticationToken> {
        (**self).authorize(card)
    }
}

impl<T: BankLedger + ?Sized> BankLedger for &T {
    fn start_transaction(&self, token: &AuthenticationToken) {
        (**self).start_transaction(token);
    }

    fn charge(&self, token: &AuthenticationToken, money: &Money) -> bool {
        (**self).charge(token, money)
    }

    fn commit(&self, token: &AuthenticationToken) {
        (**self).commit(token);
    }

    fn abort(&self, token: &AuthenticationToken) {
        (**self).abort(token);
    }
}

impl<T: CashReservoir + ?Sized> CashReservoir for &T {
    fn release_banknotes(&self, banknotes: &[Banknote]) -> bool {
        (**self).release_banknotes(banknotes)
    }
}
