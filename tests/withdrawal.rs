//! Integration tests for the `AtmMachine` withdrawal protocol.
//!
//! A single recording fake plays all three collaborators so the tests can
//! check both which calls were made and in which order.
use std::cell::RefCell;

use atm_engine::{
    AtmMachine, AuthenticationToken, BankLedger, Banknote, Card, CardAuthorizer, CashReservoir,
    Currency, Money, WithdrawalError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Authorize(Card),
    StartTransaction(AuthenticationToken),
    Charge(AuthenticationToken, Money),
    Commit(AuthenticationToken),
    Abort(AuthenticationToken),
    Release(Vec<Banknote>),
}

struct Fake {
    token: Option<AuthenticationToken>,
    charge_succeeds: bool,
    release_succeeds: bool,
    calls: RefCell<Vec<Call>>,
}

impl Fake {
    fn new() -> Self {
        Fake {
            token: Some(token()),
            charge_succeeds: true,
            release_succeeds: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl CardAuthorizer for Fake {
    fn authorize(&self, card: &Card) -> Option<AuthenticationToken> {
        self.record(Call::Authorize(card.clone()));
        self.token.clone()
    }
}

impl BankLedger for Fake {
    fn start_transaction(&self, token: &AuthenticationToken) {
        self.record(Call::StartTransaction(token.clone()));
    }

    fn charge(&self, token: &AuthenticationToken, money: &Money) -> bool {
        self.record(Call::Charge(token.clone(), *money));
        self.charge_succeeds
    }

    fn commit(&self, token: &AuthenticationToken) {
        self.record(Call::Commit(token.clone()));
    }

    fn abort(&self, token: &AuthenticationToken) {
        self.record(Call::Abort(token.clone()));
    }
}

impl CashReservoir for Fake {
    fn release_banknotes(&self, banknotes: &[Banknote]) -> bool {
        self.record(Call::Release(banknotes.to_vec()));
        self.release_succeeds
    }
}

fn card() -> Card {
    Card::new("numer", 1).unwrap()
}

fn token() -> AuthenticationToken {
    AuthenticationToken::new("numer", 11).unwrap()
}

fn money(amount: Decimal, currency: Currency) -> Money {
    Money::new(amount, currency)
}

fn note(currency: Currency, value: u32) -> Banknote {
    Banknote::find(currency, value).unwrap()
}

fn withdraw(fake: &Fake, money: &Money) -> Result<Vec<Banknote>, WithdrawalError> {
    let atm = AtmMachine::new(fake, fake, fake);
    atm.withdraw(money, &card())
        .map(|payment| payment.value().to_vec())
}

// ============================================================================
// Amount validation
// ============================================================================

#[test]
fn test_zero_amount_is_invalid() {
    let fake = Fake::new();
    let result = withdraw(&fake, &money(dec!(0), Currency::Pln));

    assert!(matches!(
        result,
        Err(WithdrawalError::InvalidAmount { .. })
    ));
    assert!(fake.calls().is_empty());
}

#[test]
fn test_negative_amount_is_invalid() {
    let fake = Fake::new();
    let result = withdraw(&fake, &money(dec!(-100), Currency::Eur));

    assert!(matches!(
        result,
        Err(WithdrawalError::InvalidAmount { .. })
    ));
    assert!(fake.calls().is_empty());
}

#[test]
fn test_amount_without_banknotes_is_non_denominable() {
    let fake = Fake::new();
    let result = withdraw(&fake, &money(dec!(1), Currency::Pln));

    assert_eq!(
        result,
        Err(WithdrawalError::NonDenominable {
            amount: dec!(1),
            currency: Currency::Pln
        })
    );
    assert!(fake.calls().is_empty());
}

#[test]
fn test_fractional_amount_is_non_denominable() {
    let fake = Fake::new();
    let result = withdraw(&fake, &money(dec!(100.50), Currency::Eur));

    assert!(matches!(
        result,
        Err(WithdrawalError::NonDenominable { .. })
    ));
    assert!(fake.calls().is_empty());
}

#[test]
fn test_amount_over_banknote_limit_is_non_denominable() {
    let fake = Fake::new();
    let result = withdraw(&fake, &money(dec!(1000000000000000000000.0), Currency::Pln));

    assert!(matches!(
        result,
        Err(WithdrawalError::NonDenominable { .. })
    ));
    assert!(fake.calls().is_empty());
}

// ============================================================================
// Collaborator failures
// ============================================================================

#[test]
fn test_unauthorized_card() {
    let fake = Fake {
        token: None,
        ..Fake::new()
    };
    let result = withdraw(&fake, &money(dec!(10), Currency::Pln));

    assert_eq!(
        result,
        Err(WithdrawalError::UnauthorizedCard {
            card_number: "numer".to_string()
        })
    );
    // Only the authorizer was asked, neither the bank nor the dispenser
    assert_eq!(fake.calls(), vec![Call::Authorize(card())]);
}

#[test]
fn test_insufficient_funds_aborts_without_dispensing() {
    let fake = Fake {
        charge_succeeds: false,
        ..Fake::new()
    };
    let amount = money(dec!(100), Currency::Pln);
    let result = withdraw(&fake, &amount);

    assert!(matches!(
        result,
        Err(WithdrawalError::InsufficientFunds { .. })
    ));
    assert_eq!(
        fake.calls(),
        vec![
            Call::Authorize(card()),
            Call::StartTransaction(token()),
            Call::Charge(token(), amount),
            Call::Abort(token()),
        ]
    );
}

#[test]
fn test_dispenser_failure_aborts_without_commit() {
    let fake = Fake {
        release_succeeds: false,
        ..Fake::new()
    };
    let amount = money(dec!(100), Currency::Pln);
    let result = withdraw(&fake, &amount);

    assert_eq!(
        result,
        Err(WithdrawalError::DispenserFailure { banknotes: 1 })
    );
    assert_eq!(
        fake.calls(),
        vec![
            Call::Authorize(card()),
            Call::StartTransaction(token()),
            Call::Charge(token(), amount),
            Call::Release(vec![note(Currency::Pln, 100)]),
            Call::Abort(token()),
        ]
    );
    assert_eq!(fake.count(|c| matches!(c, Call::Commit(_))), 0);
}

// ============================================================================
// Successful withdrawals
// ============================================================================

#[test]
fn test_returns_single_100_pln_banknote() {
    let fake = Fake::new();
    let result = withdraw(&fake, &money(dec!(100), Currency::Pln));

    assert_eq!(result, Ok(vec![note(Currency::Pln, 100)]));
}

#[test]
fn test_commits_once_with_authorized_token() {
    let fake = Fake::new();
    withdraw(&fake, &money(dec!(100), Currency::Pln)).unwrap();

    assert_eq!(fake.count(|c| *c == Call::Commit(token())), 1);
    assert_eq!(fake.count(|c| matches!(c, Call::Abort(_))), 0);
}

#[test]
fn test_full_sequence_in_order() {
    let fake = Fake::new();
    let amount = money(dec!(110), Currency::Eur);
    withdraw(&fake, &amount).unwrap();

    assert_eq!(
        fake.calls(),
        vec![
            Call::Authorize(card()),
            Call::StartTransaction(token()),
            Call::Charge(token(), amount),
            Call::Release(vec![note(Currency::Eur, 100), note(Currency::Eur, 10)]),
            Call::Commit(token()),
        ]
    );
}

#[test]
fn test_payment_is_ascending() {
    let fake = Fake::new();
    let result = withdraw(&fake, &money(dec!(110), Currency::Eur));

    assert_eq!(
        result,
        Ok(vec![note(Currency::Eur, 10), note(Currency::Eur, 100)])
    );
}

#[test]
fn test_payment_sums_to_requested_amount() {
    let fake = Fake::new();
    let atm = AtmMachine::new(&fake, &fake, &fake);

    for amount in [dec!(5), dec!(15), dec!(385), dec!(1995), dec!(2000)] {
        let payment = atm.withdraw(&money(amount, Currency::Eur), &card()).unwrap();
        assert_eq!(payment.total(), amount);
        assert_eq!(payment.currency(), Some(Currency::Eur));
    }
}

#[test]
fn test_repeated_withdrawals_are_independent() {
    let fake = Fake::new();
    let atm = AtmMachine::new(&fake, &fake, &fake);
    let amount = money(dec!(100), Currency::Pln);

    for _ in 0..3 {
        atm.withdraw(&amount, &card()).unwrap();
    }

    assert_eq!(fake.count(|c| matches!(c, Call::Authorize(_))), 3);
    assert_eq!(fake.count(|c| matches!(c, Call::StartTransaction(_))), 3);
    assert_eq!(fake.count(|c| matches!(c, Call::Charge(..))), 3);
    assert_eq!(fake.count(|c| matches!(c, Call::Release(_))), 3);
    assert_eq!(fake.count(|c| matches!(c, Call::Commit(_))), 3);
}

// ============================================================================
// Concurrent withdrawals
// ============================================================================

#[test]
fn test_concurrent_withdrawals_share_thread_safe_collaborators() {
    use atm_engine::simulator::{Bank, CardRegistry, CashTray};

    const THREADS: usize = 8;
    const WITHDRAWALS_PER_THREAD: usize = 10;
    const NOTES_IN_TRAY: u32 = 50;

    let card = Card::new("4111", 1234).unwrap();
    let mut cards = CardRegistry::new();
    cards.register(&card);
    let bank = Bank::new();
    bank.open_account("4111", Currency::Pln, dec!(10000));
    let tray = CashTray::new();
    let hundred = note(Currency::Pln, 100);
    tray.load(hundred, NOTES_IN_TRAY);

    let atm = AtmMachine::new(&cards, &bank, &tray);
    let amount = money(dec!(100), Currency::Pln);

    let paid: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    (0..WITHDRAWALS_PER_THREAD)
                        .filter(|_| atm.withdraw(&amount, &card).is_ok())
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    // 80 attempts against a tray of 50 notes, the bank never runs short
    assert_eq!(paid, NOTES_IN_TRAY as usize);
    assert_eq!(tray.count(hundred), 0);

    let account = bank.account("4111").unwrap();
    assert_eq!(account.available(), dec!(5000));
    assert_eq!(account.held(), dec!(0));
    assert_eq!(account.total(), dec!(5000));
    assert_eq!(bank.open_transactions(), 0);
}
