//! Credit Balance Store
//!
//! Shared, session-scoped cache of the user's credit balance. Pages read it;
//! only backend responses write it.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Number of upload credits held by a user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditBalance(u64);

impl CreditBalance {
    pub const fn new(credits: u64) -> Self {
        Self(credits)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CreditBalance {
    fn from(credits: u64) -> Self {
        Self(credits)
    }
}

impl fmt::Display for CreditBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session epoch; advanced every time the store is reset
pub type Epoch = u64;

#[derive(Debug, Default)]
struct StoreState {
    balance: CreditBalance,
    epoch: Epoch,
}

/// Handle to the shared credit balance
///
/// Cloning yields another handle to the same state. Writes are whole-value
/// replacements; there is no increment or decrement.
#[derive(Clone, Debug, Default)]
pub struct CreditStore {
    state: Arc<RwLock<StoreState>>,
}

impl CreditStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cached balance
    pub fn balance(&self) -> CreditBalance {
        self.state.read().unwrap_or_else(PoisonError::into_inner).balance
    }

    /// Current session epoch
    pub fn epoch(&self) -> Epoch {
        self.state.read().unwrap_or_else(PoisonError::into_inner).epoch
    }

    /// Replace the balance unconditionally
    pub fn set_balance(&self, balance: CreditBalance) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(from = %state.balance, to = %balance, "Credit balance updated");
        state.balance = balance;
    }

    /// Replace the balance only if the store has not been reset since `epoch`
    ///
    /// Returns `false` when the write was discarded.
    pub fn set_balance_at(&self, epoch: Epoch, balance: CreditBalance) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.epoch != epoch {
            tracing::debug!(
                stale_epoch = epoch,
                current_epoch = state.epoch,
                "Discarding balance from a previous session"
            );
            return false;
        }
        state.balance = balance;
        true
    }

    /// Forget the cached balance (sign-out)
    pub fn reset(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.balance = CreditBalance::default();
        state.epoch += 1;
        tracing::debug!(epoch = state.epoch, "Credit store reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_balance_is_zero() {
        let store = CreditStore::new();
        assert_eq!(store.balance(), CreditBalance::new(0));
    }

    #[test]
    fn test_clones_share_state() {
        let store = CreditStore::new();
        let reader = store.clone();
        store.set_balance(CreditBalance::new(42));
        assert_eq!(reader.balance().get(), 42);
    }

    #[test]
    fn test_reset_discards_stale_writes() {
        let store = CreditStore::new();
        let epoch = store.epoch();
        store.set_balance(CreditBalance::new(10));

        store.reset();
        assert_eq!(store.balance().get(), 0);

        assert!(!store.set_balance_at(epoch, CreditBalance::new(700)));
        assert_eq!(store.balance().get(), 0);

        assert!(store.set_balance_at(store.epoch(), CreditBalance::new(700)));
        assert_eq!(store.balance().get(), 700);
    }

    #[test]
    fn test_balance_serializes_as_number() {
        let json = serde_json::to_string(&CreditBalance::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
