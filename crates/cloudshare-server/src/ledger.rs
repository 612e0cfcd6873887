//! Credit Ledger
//!
//! Per-user balances and the purchase history behind the dev endpoints.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use cloudshare_core::{CreditBalance, Plan, PlanId, Transaction};
use rust_decimal::prelude::ToPrimitive;

use crate::error::{Result, ServerError};

/// Credits granted to a user the first time they are seen
pub const INITIAL_CREDITS: u64 = 5;

/// Tier label for users who have never purchased
pub const INITIAL_PLAN: &str = "BASIC";

/// A user's balance record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserCredits {
    pub user_id: String,
    pub credits: CreditBalance,
    pub plan: String,
}

impl UserCredits {
    fn initial(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            credits: CreditBalance::new(INITIAL_CREDITS),
            plan: INITIAL_PLAN.into(),
        }
    }
}

/// Ledger storage trait
pub trait CreditLedger: Send + Sync {
    /// Balance for a user, creating the initial record if absent
    fn get_or_create(&self, user_id: &str) -> Result<UserCredits>;

    /// Credit a plan purchase and record the transaction (atomic)
    fn purchase(&self, user_id: &str, plan: PlanId) -> Result<(UserCredits, Transaction)>;

    /// Successful transactions for a user, newest first
    fn transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;

    /// Whether the user can spend `required` credits
    fn has_enough_credits(&self, user_id: &str, required: u64) -> Result<bool>;

    /// Spend one credit (one file upload); `None` when the balance is zero
    fn consume_credit(&self, user_id: &str) -> Result<Option<UserCredits>>;
}

#[derive(Default)]
struct LedgerState {
    users: HashMap<String, UserCredits>,
    transactions: Vec<(String, Transaction)>,
}

/// In-memory ledger (for development)
#[derive(Default)]
pub struct MemoryCreditLedger {
    state: RwLock<LedgerState>,
}

impl MemoryCreditLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CreditLedger for MemoryCreditLedger {
    fn get_or_create(&self, user_id: &str) -> Result<UserCredits> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let record = state
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| {
                tracing::info!(user_id = %user_id, credits = INITIAL_CREDITS, "Created initial credits");
                UserCredits::initial(user_id)
            });
        Ok(record.clone())
    }

    fn purchase(&self, user_id: &str, plan: PlanId) -> Result<(UserCredits, Transaction)> {
        let plan_info = Plan::get(plan);
        let amount = plan_info
            .price
            .to_u64()
            .ok_or_else(|| ServerError::Storage(format!("price out of range: {}", plan_info.price)))?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let record = state
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserCredits::initial(user_id));
        let credits = record
            .credits
            .get()
            .checked_add(plan_info.credits)
            .ok_or_else(|| ServerError::Storage(format!("credit balance overflow for {user_id}")))?;
        record.credits = CreditBalance::new(credits);
        record.plan = plan.tier().into();
        let updated = record.clone();

        let transaction = Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            plan_id: plan.as_str().into(),
            amount,
            currency: "INR".into(),
            status: "SUCCESS".into(),
            credits_added: plan_info.credits,
            transaction_date: Utc::now(),
        };
        state
            .transactions
            .push((user_id.to_string(), transaction.clone()));

        Ok((updated, transaction))
    }

    fn transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut result: Vec<_> = state
            .transactions
            .iter()
            .rev()
            .filter(|(owner, tx)| owner == user_id && tx.status == "SUCCESS")
            .map(|(_, tx)| tx.clone())
            .collect();

        // Stable sort: equal timestamps keep newest-first insertion order
        result.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(result)
    }

    fn has_enough_credits(&self, user_id: &str, required: u64) -> Result<bool> {
        Ok(self.get_or_create(user_id)?.credits.get() >= required)
    }

    fn consume_credit(&self, user_id: &str) -> Result<Option<UserCredits>> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let record = state
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserCredits::initial(user_id));

        let Some(remaining) = record.credits.get().checked_sub(1) else {
            tracing::warn!(user_id = %user_id, "No credits left to consume");
            return Ok(None);
        };
        record.credits = CreditBalance::new(remaining);
        tracing::debug!(user_id = %user_id, credits = remaining, "Credit consumed");
        Ok(Some(record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_gets_initial_credits() {
        let ledger = MemoryCreditLedger::new();
        let record = ledger.get_or_create("clerk123").unwrap();
        assert_eq!(record.credits.get(), 5);
        assert_eq!(record.plan, "BASIC");
    }

    #[test]
    fn test_purchase_adds_plan_credits() {
        let ledger = MemoryCreditLedger::new();
        ledger.get_or_create("clerk123").unwrap();

        let (record, tx) = ledger.purchase("clerk123", PlanId::Premium).unwrap();
        assert_eq!(record.credits.get(), 505);
        assert_eq!(record.plan, "PREMIUM");
        assert_eq!(tx.amount, 500);
        assert_eq!(tx.credits_added, 500);
        assert_eq!(tx.currency, "INR");

        let (record, _) = ledger.purchase("clerk123", PlanId::Ultimate).unwrap();
        assert_eq!(record.credits.get(), 5505);
        assert_eq!(record.plan, "ULTIMATE");
    }

    #[test]
    fn test_transactions_are_per_user_newest_first() {
        let ledger = MemoryCreditLedger::new();
        ledger.purchase("alice", PlanId::Premium).unwrap();
        ledger.purchase("bob", PlanId::Premium).unwrap();
        ledger.purchase("alice", PlanId::Ultimate).unwrap();

        let history = ledger.transactions("alice").unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].transaction_date >= history[1].transaction_date);
        assert!(ledger.transactions("carol").unwrap().is_empty());
    }

    #[test]
    fn test_same_timestamp_transactions_newest_first() {
        let ledger = MemoryCreditLedger::new();
        let (_, first) = ledger.purchase("alice", PlanId::Premium).unwrap();
        let (_, second) = ledger.purchase("alice", PlanId::Ultimate).unwrap();
        {
            let mut state = ledger.state.write().unwrap();
            for (_, tx) in &mut state.transactions {
                tx.transaction_date = first.transaction_date;
            }
        }

        let ids: Vec<_> = ledger
            .transactions("alice")
            .unwrap()
            .into_iter()
            .map(|tx| tx.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_purchase_overflow_is_a_storage_error() {
        let ledger = MemoryCreditLedger::new();
        ledger.state.write().unwrap().users.insert(
            "whale".into(),
            UserCredits {
                user_id: "whale".into(),
                credits: CreditBalance::new(u64::MAX - 10),
                plan: "ULTIMATE".into(),
            },
        );

        assert!(matches!(
            ledger.purchase("whale", PlanId::Premium),
            Err(ServerError::Storage(_))
        ));
        assert_eq!(ledger.get_or_create("whale").unwrap().credits.get(), u64::MAX - 10);
        assert!(ledger.transactions("whale").unwrap().is_empty());
    }

    #[test]
    fn test_has_enough_credits() {
        let ledger = MemoryCreditLedger::new();
        ledger.purchase("clerk123", PlanId::Premium).unwrap();
        assert!(ledger.has_enough_credits("clerk123", 5).unwrap());

        let ledger = MemoryCreditLedger::new();
        for _ in 0..3 {
            ledger.consume_credit("clerk123").unwrap();
        }
        assert!(!ledger.has_enough_credits("clerk123", 5).unwrap());
    }

    #[test]
    fn test_consume_credit_decrements_by_one() {
        let ledger = MemoryCreditLedger::new();
        let record = ledger.consume_credit("clerk123").unwrap().unwrap();
        assert_eq!(record.credits.get(), 4);
        assert_eq!(ledger.get_or_create("clerk123").unwrap().credits.get(), 4);
    }

    #[test]
    fn test_consume_credit_with_no_credits_left() {
        let ledger = MemoryCreditLedger::new();
        for _ in 0..INITIAL_CREDITS {
            assert!(ledger.consume_credit("clerk123").unwrap().is_some());
        }

        assert!(ledger.consume_credit("clerk123").unwrap().is_none());
        assert_eq!(ledger.get_or_create("clerk123").unwrap().credits.get(), 0);
    }
}
