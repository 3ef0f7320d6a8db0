//! CSV row types read and written by the simulator, and their conversion
//! into validated domain values.

use serde::{Deserialize, Serialize};

use super::error::{Error, RecordError};
use crate::atm::{Banknote, Card, Currency, Decimal, Money, Payment, WithdrawalError};

/// A card and the opening balance of the account behind it.
#[derive(Debug, Deserialize, Clone)]
pub struct CardRecord {
    pub card: String,
    pub pin: u16,
    pub currency: Currency,
    pub balance: Decimal,
}

/// A validated card registration.
#[derive(Debug, Clone)]
pub struct CardAccount {
    pub card: Card,
    pub currency: Currency,
    pub balance: Decimal,
}

impl TryFrom<CardRecord> for CardAccount {
    type Error = Error;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        if record.balance < Decimal::ZERO {
            return Err(RecordError::NegativeBalance {
                card: record.card,
                balance: record.balance,
            }
            .into());
        }
        Ok(CardAccount {
            card: Card::new(record.card, record.pin)?,
            currency: record.currency,
            balance: record.balance,
        })
    }
}

/// A stack of banknotes loaded into the cash tray.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CashRecord {
    pub currency: Currency,
    pub value: u32,
    pub count: u32,
}

impl TryFrom<CashRecord> for (Banknote, u32) {
    type Error = RecordError;

    fn try_from(record: CashRecord) -> Result<Self, Self::Error> {
        let banknote = Banknote::find(record.currency, record.value).ok_or(
            RecordError::UnknownBanknote {
                currency: record.currency,
                value: record.value,
            },
        )?;
        Ok((banknote, record.count))
    }
}

/// A withdrawal request as typed in at the ATM.
#[derive(Debug, Deserialize, Clone)]
pub struct RequestRecord {
    pub card: String,
    pub pin: u16,
    pub currency: Currency,
    pub amount: Decimal,
}

impl TryFrom<RequestRecord> for (Card, Money) {
    type Error = Error;

    fn try_from(record: RequestRecord) -> Result<Self, Self::Error> {
        let card = Card::new(record.card, record.pin)?;
        Ok((card, Money::new(record.amount, record.currency)))
    }
}

/// The outcome of one withdrawal request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub card: String,
    pub currency: Currency,
    pub amount: Decimal,
    /// `ok` or the failure kind
    pub status: String,
    /// Dispensed banknotes, smallest first, separated by spaces
    pub banknotes: String,
}

impl OutcomeRecord {
    pub fn new(card: &Card, money: &Money, result: &Result<Payment, WithdrawalError>) -> Self {
        let (status, banknotes) = match result {
            Ok(payment) => (
                "ok".to_string(),
                payment
                    .value()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Err(e) => (e.kind().to_string(), String::new()),
        };
        OutcomeRecord {
            card: card.number().to_string(),
            currency: money.currency(),
            amount: money.amount(),
            status,
            banknotes,
        }
    }
}
