use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::atm::{Banknote, CashReservoir};

/// In-memory cash reservoir counting the banknotes of each kind it holds.
#[derive(Debug, Default)]
pub struct CashTray {
    notes: Mutex<BTreeMap<Banknote, u32>>,
}

impl CashTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` notes of `banknote` to the tray
    pub fn load(&self, banknote: Banknote, count: u32) {
        let mut notes = self.notes();
        let held = notes.entry(banknote).or_insert(0);
        *held = held.saturating_add(count);
        log::trace!("[cash] loaded {count} x {banknote} -> {}", *held);
    }

    /// Returns how many notes of `banknote` are left
    pub fn count(&self, banknote: Banknote) -> u32 {
        self.notes().get(&banknote).copied().unwrap_or(0)
    }

    fn notes(&self) -> MutexGuard<'_, BTreeMap<Banknote, u32>> {
        self.notes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CashReservoir for CashTray {
    fn release_banknotes(&self, banknotes: &[Banknote]) -> bool {
        let mut wanted: BTreeMap<Banknote, u32> = BTreeMap::new();
        for &banknote in banknotes {
            *wanted.entry(banknote).or_insert(0) += 1;
        }

        let mut notes = self.notes();
        for (banknote, &count) in &wanted {
            let held = notes.get(banknote).copied().unwrap_or(0);
            if held < count {
                log::debug!("[cash] need {count} x {banknote}, only {held} left");
                return false;
            }
        }

        for (banknote, count) in wanted {
            if let Some(held) = notes.get_mut(&banknote) {
                *held -= count;
            }
        }
        log::trace!("[cash] released {} banknotes", banknotes.len());
        true
    }
}
