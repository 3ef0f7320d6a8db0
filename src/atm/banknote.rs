use std::fmt;

use rust_decimal::prelude::ToPrimitive;

use super::error::WithdrawalError;
use super::{Currency, Decimal};

/// A physical banknote: a denomination recognized for a currency.
///
/// Banknotes only exist as entries of the denomination table below,
/// so every value of this type is a note an ATM can actually hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Banknote {
    currency: Currency,
    value: u32,
}

const PLN_BANKNOTES: &[Banknote] = &[
    Banknote::new(Currency::Pln, 500),
    Banknote::new(Currency::Pln, 200),
    Banknote::new(Currency::Pln, 100),
    Banknote::new(Currency::Pln, 50),
    Banknote::new(Currency::Pln, 20),
    Banknote::new(Currency::Pln, 10),
];

const EUR_BANKNOTES: &[Banknote] = &[
    Banknote::new(Currency::Eur, 500),
    Banknote::new(Currency::Eur, 200),
    Banknote::new(Currency::Eur, 100),
    Banknote::new(Currency::Eur, 50),
    Banknote::new(Currency::Eur, 20),
    Banknote::new(Currency::Eur, 10),
    Banknote::new(Currency::Eur, 5),
];

impl Banknote {
    const fn new(currency: Currency, value: u32) -> Self {
        Self { currency, value }
    }

    /// All banknotes of a currency, largest denomination first.
    pub fn denominations(currency: Currency) -> &'static [Banknote] {
        match currency {
            Currency::Pln => PLN_BANKNOTES,
            Currency::Eur => EUR_BANKNOTES,
        }
    }

    /// Looks up the banknote of `currency` with face value `value`
    pub fn find(currency: Currency, value: u32) -> Option<Banknote> {
        Self::denominations(currency)
            .iter()
            .find(|banknote| banknote.value == value)
            .copied()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Face value in whole currency units
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for Banknote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency, self.value)
    }
}

/// Most banknotes a single withdrawal can hand out.
pub const MAX_BANKNOTES: usize = 200;

/// Expresses `amount` as banknotes of `currency`, largest first.
///
/// Greedy: take as many of the largest denomination as fit, then move on to the
/// next one. This is exact for the tables above, where every denomination set is
/// canonical. Fails with `NonDenominable` when a remainder is left that no
/// banknote fits (amounts below the smallest note, fractional amounts), or when
/// paying the amount out would take more than [`MAX_BANKNOTES`] notes.
/// A zero amount decomposes into no banknotes.
pub fn decompose(amount: Decimal, currency: Currency) -> Result<Vec<Banknote>, WithdrawalError> {
    let non_denominable = || WithdrawalError::NonDenominable { amount, currency };

    let mut remaining = amount;
    let mut counts = Vec::new();
    let mut total = 0usize;

    for &banknote in Banknote::denominations(currency) {
        let value = Decimal::from(banknote.value);
        if remaining < value {
            continue;
        }

        let count = (remaining / value).trunc();
        if count > Decimal::from(MAX_BANKNOTES - total) {
            log::debug!("[decompose] {amount} {currency} needs more than {MAX_BANKNOTES} banknotes");
            return Err(non_denominable());
        }
        let count = count.to_usize().ok_or_else(non_denominable)?;
        remaining -= value * Decimal::from(count);
        total += count;
        counts.push((banknote, count));

        log::trace!("[decompose] {count} x {banknote}, remaining={remaining}");
    }

    if !remaining.is_zero() {
        log::debug!("[decompose] {amount} {currency} leaves {remaining} undispensable");
        return Err(non_denominable());
    }

    let mut banknotes = Vec::with_capacity(total);
    for (banknote, count) in counts {
        banknotes.extend(std::iter::repeat_n(banknote, count));
    }
    Ok(banknotes)
}
