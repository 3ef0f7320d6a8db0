use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::atm::{AuthenticationToken, Card, CardAuthorizer};

/// Card authorizer backed by a table of known cards and their PINs.
///
/// Every successful authorization gets a fresh authorization code. Once the
/// codes run out, cards are refused.
#[derive(Debug, Default)]
pub struct CardRegistry {
    pins: HashMap<String, u16>,
    next_code: AtomicU32,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `card`. Returns `false` if its number was already known.
    pub fn register(&mut self, card: &Card) -> bool {
        self.pins
            .insert(card.number().to_string(), card.pin())
            .is_none()
    }

    pub fn is_registered(&self, number: &str) -> bool {
        self.pins.contains_key(number)
    }

    /// Returns the number of registered cards
    pub fn card_count(&self) -> usize {
        self.pins.len()
    }
}

impl CardAuthorizer for CardRegistry {
    fn authorize(&self, card: &Card) -> Option<AuthenticationToken> {
        match self.pins.get(card.number()) {
            Some(&pin) if pin == card.pin() => {
                let next = self
                    .next_code
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |code| code.checked_add(1));
                let Ok(previous) = next else {
                    log::warn!("[authorize] authorization codes exhausted");
                    return None;
                };
                AuthenticationToken::new(card.number(), previous + 1).ok()
            }
            Some(_) => {
                log::debug!("[authorize] wrong PIN for card {}", card.number());
                None
            }
            None => {
                log::debug!("[authorize] unknown card {}", card.number());
                None
            }
        }
    }
}
