//! Application State

use std::sync::Arc;

use crate::ledger::{CreditLedger, MemoryCreditLedger};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Balances and purchase history
    pub ledger: Arc<dyn CreditLedger>,
}

impl AppState {
    /// State backed by a fresh in-memory ledger
    pub fn in_memory() -> Self {
        Self {
            ledger: Arc::new(MemoryCreditLedger::new()),
        }
    }
}
