//! In-memory stand-ins for the ATM's collaborators.
//!
//! - `CardRegistry` - Authorizes registered cards by PIN
//! - `Bank` - Single-currency accounts with held charges
//! - `CashTray` - Banknote counts of the dispenser
//! - `Simulator` - Loads all three from CSV and replays withdrawal requests

mod account;
mod bank;
mod card_registry;
mod cash_tray;
mod error;
mod records;

use std::io::{Read, Write};

use crate::atm::{AtmMachine, Banknote, Card, Money};

pub use account::Account;
pub use bank::Bank;
pub use card_registry::CardRegistry;
pub use cash_tray::CashTray;
pub use error::{Error, RecordError};
pub use records::{CardAccount, CardRecord, CashRecord, OutcomeRecord, RequestRecord};

/// An ATM wired to an in-memory bank, card registry and cash tray.
#[derive(Debug, Default)]
pub struct Simulator {
    cards: CardRegistry,
    bank: Bank,
    cash: CashTray,
}

impl Simulator {
    /// Create a new `Simulator` with no cards, accounts, or cash
    pub fn new() -> Self {
        log::trace!("Simulator initialized");
        Self::default()
    }

    /// Register cards and open their accounts from `card,pin,currency,balance` rows.
    ///
    /// All rows are validated first: on error no card from the input is registered.
    pub fn load_cards<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut pending: Vec<CardAccount> = Vec::new();
        for result in csv_reader.deserialize() {
            let record: CardRecord = result?;
            let account = CardAccount::try_from(record)?;

            let number = account.card.number();
            if self.cards.is_registered(number)
                || pending.iter().any(|p| p.card.number() == number)
            {
                return Err(RecordError::DuplicateCard {
                    card: number.to_string(),
                }
                .into());
            }
            pending.push(account);
        }

        for CardAccount {
            card,
            currency,
            balance,
        } in pending
        {
            self.cards.register(&card);
            self.bank.open_account(card.number(), currency, balance);
            log::debug!("[load] card {} with {balance} {currency}", card.number());
        }

        log::info!("Loaded {} cards", self.cards.card_count());
        Ok(())
    }

    /// Fill the cash tray from `currency,value,count` rows.
    pub fn load_cash<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut loaded = 0u64;
        for result in csv_reader.deserialize() {
            let record: CashRecord = result?;
            let (banknote, count) = <(Banknote, u32)>::try_from(record)?;
            self.cash.load(banknote, count);
            loaded += u64::from(count);
        }

        log::info!("Loaded {loaded} banknotes into the cash tray");
        Ok(())
    }

    /// Primary API: replay `card,pin,currency,amount` withdrawal requests and
    /// write one outcome row per request to `writer`.
    ///
    /// A refused withdrawal is an outcome, not an error. Malformed rows stop processing.
    pub fn process_requests<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<(), Error> {
        log::info!("Starting withdrawal processing");

        let atm = AtmMachine::new(&self.cards, &self.bank, &self.cash);
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut paid = 0u64;
        let mut refused = 0u64;

        for result in csv_reader.deserialize() {
            // Step 1: Parse CSV record into a raw RequestRecord
            let record: RequestRecord = result?;
            let row_num = paid + refused + 1;
            log::trace!(
                "[row {row_num}] Parsing: card={} currency={} amount={}",
                record.card,
                record.currency,
                record.amount
            );

            // Step 2: Convert into a validated card and amount
            let (card, money): (Card, Money) = record.try_into()?;

            // Step 3: Withdraw
            let outcome = atm.withdraw(&money, &card);
            if let Err(e) = &outcome {
                log::warn!("[row {row_num}] - Refused: {e}");
                refused += 1;
            } else {
                paid += 1;
            }
            csv_writer.serialize(OutcomeRecord::new(&card, &money, &outcome))?;
        }
        csv_writer.flush()?;

        log::info!("Processing complete: {paid} paid out, {refused} refused");
        Ok(())
    }

    /// Secondary API: write the final account balances to any sink.
    pub fn export_accounts<W: Write>(&self, writer: W) -> Result<(), Error> {
        let accounts = self.bank.accounts();
        log::info!("Exporting {} accounts", accounts.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for account in &accounts {
            csv_writer.serialize(account)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn cash_tray(&self) -> &CashTray {
        &self.cash
    }
}
