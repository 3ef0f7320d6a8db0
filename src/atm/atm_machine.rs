use super::banknote::decompose;
use super::error::WithdrawalError;
use super::services::{BankLedger, CardAuthorizer, CashReservoir};
use super::{AuthenticationToken, Banknote, Card, Currency, Decimal, Money};

/// Banknotes handed out by a successful withdrawal, smallest denomination first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    banknotes: Vec<Banknote>,
}

impl Payment {
    fn new(mut banknotes: Vec<Banknote>) -> Self {
        banknotes.sort_by_key(Banknote::value);
        Self { banknotes }
    }

    pub fn value(&self) -> &[Banknote] {
        &self.banknotes
    }

    /// Sum of the face values
    pub fn total(&self) -> Decimal {
        self.banknotes
            .iter()
            .map(|banknote| Decimal::from(banknote.value()))
            .sum()
    }

    /// Currency of the banknotes, `None` for an empty payment
    pub fn currency(&self) -> Option<Currency> {
        self.banknotes.first().map(Banknote::currency)
    }
}

/// The withdrawal orchestrator.
///
/// Drives one withdrawal at a time through amount validation, card
/// authorization, the bank transaction and the cash dispenser. Holds no state
/// besides its collaborators, so every call to [`AtmMachine::withdraw`] is
/// independent of the previous ones.
#[derive(Debug)]
pub struct AtmMachine<A, B, R> {
    card_authorizer: A,
    bank: B,
    reservoir: R,
}

impl<A, B, R> AtmMachine<A, B, R>
where
    A: CardAuthorizer,
    B: BankLedger,
    R: CashReservoir,
{
    pub fn new(card_authorizer: A, bank: B, reservoir: R) -> Self {
        log::trace!("AtmMachine initialized");
        Self {
            card_authorizer,
            bank,
            reservoir,
        }
    }

    /// Primary API: withdraw `money` using `card`.
    ///
    /// Either returns the dispensed banknotes or exactly one typed failure.
    /// Nothing reaches the bank or the dispenser unless the amount is valid and
    /// the card authorized, and a bank transaction that was started is either
    /// committed (after the cash left the machine) or aborted.
    pub fn withdraw(&self, money: &Money, card: &Card) -> Result<Payment, WithdrawalError> {
        log::trace!("[withdraw] card={} money={money}", card.number());

        let result = self.run_withdrawal(money, card);
        match &result {
            Ok(payment) => log::debug!(
                "[withdraw] card={} paid out {} banknotes for {money}",
                card.number(),
                payment.value().len()
            ),
            Err(e) => log::warn!("[withdraw] card={} - Rejected: {e}", card.number()),
        }
        result
    }

    fn run_withdrawal(&self, money: &Money, card: &Card) -> Result<Payment, WithdrawalError> {
        // Step 1: Validate the amount, the decomposition is reused for dispensing
        let banknotes = Self::validate_amount(money)?;

        // Step 2: Authorize the card
        let token = self.authorize(card)?;

        // Step 3: Charge the account inside a bank transaction
        self.bank.start_transaction(&token);
        log::trace!("[bank] started transaction for {token}");
        self.charge(&token, money)?;

        // Step 4: Release the cash, the bank transaction is aborted if this fails
        self.dispense(&token, &banknotes)?;

        // Step 5: Settle
        self.bank.commit(&token);
        log::trace!("[bank] committed transaction for {token}");

        Ok(Payment::new(banknotes))
    }
}

// =============================================================================
// Withdrawal Steps
// =============================================================================

impl<A, B, R> AtmMachine<A, B, R>
where
    A: CardAuthorizer,
    B: BankLedger,
    R: CashReservoir,
{
    fn validate_amount(money: &Money) -> Result<Vec<Banknote>, WithdrawalError> {
        if money.amount() <= Decimal::ZERO {
            return Err(WithdrawalError::InvalidAmount {
                amount: money.amount(),
                currency: money.currency(),
            });
        }
        decompose(money.amount(), money.currency())
    }

    fn authorize(&self, card: &Card) -> Result<AuthenticationToken, WithdrawalError> {
        let token = self.card_authorizer.authorize(card).ok_or_else(|| {
            WithdrawalError::UnauthorizedCard {
                card_number: card.number().to_string(),
            }
        })?;
        log::trace!("[authorize] card={} -> token={token}", card.number());
        Ok(token)
    }

    fn charge(&self, token: &AuthenticationToken, money: &Money) -> Result<(), WithdrawalError> {
        if self.bank.charge(token, money) {
            log::trace!("[bank] charged {money} for {token}");
            return Ok(());
        }

        self.bank.abort(token);
        log::trace!("[bank] charge of {money} refused, aborted transaction for {token}");
        Err(WithdrawalError::InsufficientFunds {
            user_id: token.user_id().to_string(),
            amount: money.amount(),
            currency: money.currency(),
        })
    }

    fn dispense(
        &self,
        token: &AuthenticationToken,
        banknotes: &[Banknote],
    ) -> Result<(), WithdrawalError> {
        if self.reservoir.release_banknotes(banknotes) {
            log::trace!("[dispense] released {} banknotes", banknotes.len());
            return Ok(());
        }

        self.bank.abort(token);
        log::trace!("[dispense] release failed, aborted transaction for {token}");
        Err(WithdrawalError::DispenserFailure {
            banknotes: banknotes.len(),
        })
    }
}
