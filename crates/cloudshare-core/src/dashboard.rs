//! Dashboard Loader
//!
//! Refreshes the shared balance and loads purchase history for the page
//! signed-in visitors are redirected to.

use std::sync::Arc;

use crate::api::{CreditsApi, Transaction};
use crate::credits::{CreditBalance, CreditStore};
use crate::error::Result;
use crate::session::IdentityProvider;

/// Result of a balance refresh
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceRefresh {
    /// Store now holds the fetched balance
    Updated(CreditBalance),
    /// Identity session not restored yet; nothing fetched
    Pending,
    /// User signed out while the request was in flight; store untouched
    Stale,
}

pub struct DashboardLoader<A: ?Sized, I: ?Sized> {
    api: Arc<A>,
    identity: Arc<I>,
    store: CreditStore,
}

impl<A, I> DashboardLoader<A, I>
where
    A: CreditsApi + ?Sized,
    I: IdentityProvider + ?Sized,
{
    pub fn new(api: Arc<A>, identity: Arc<I>, store: CreditStore) -> Self {
        Self {
            api,
            identity,
            store,
        }
    }

    /// Fetch the current balance into the shared store
    pub async fn refresh_balance(&self) -> Result<BalanceRefresh> {
        if !self.identity.is_loaded() {
            return Ok(BalanceRefresh::Pending);
        }

        let epoch = self.store.epoch();
        let token = self.identity.get_token().await?;
        let response = self.api.get_credits(&token).await?;

        if !self.store.set_balance_at(epoch, response.credits) {
            return Ok(BalanceRefresh::Stale);
        }
        tracing::info!(credits = %response.credits, "Dashboard balance refreshed");
        Ok(BalanceRefresh::Updated(response.credits))
    }

    /// Successful purchases, newest first
    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        let token = self.identity.get_token().await?;
        self.api.list_transactions(&token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CreditsResponse, PurchaseResponse};
    use crate::error::CloudShareError;
    use crate::plan::PlanId;
    use crate::session::{BearerToken, StaticIdentity};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FixedApi {
        credits: Option<u64>,
        reset_during_fetch: Option<CreditStore>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CreditsApi for FixedApi {
        async fn get_credits(&self, _token: &BearerToken) -> Result<CreditsResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(store) = &self.reset_during_fetch {
                store.reset();
            }
            self.credits
                .map(|credits| CreditsResponse {
                    credits: CreditBalance::new(credits),
                    plan: Some("BASIC".into()),
                })
                .ok_or_else(|| CloudShareError::Status {
                    status: 500,
                    body: String::new(),
                })
        }

        async fn add_credits(&self, _token: &BearerToken, _plan: PlanId) -> Result<PurchaseResponse> {
            Ok(PurchaseResponse::rejected("not used"))
        }

        async fn list_transactions(&self, _token: &BearerToken) -> Result<Vec<Transaction>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_refresh_writes_shared_store() {
        let store = CreditStore::new();
        let api = Arc::new(FixedApi {
            credits: Some(505),
            ..FixedApi::default()
        });
        let loader = DashboardLoader::new(api, Arc::new(StaticIdentity::signed_in("user_1")), store.clone());

        assert_eq!(
            loader.refresh_balance().await.unwrap(),
            BalanceRefresh::Updated(CreditBalance::new(505))
        );
        assert_eq!(store.balance().get(), 505);
    }

    #[tokio::test]
    async fn test_refresh_waits_for_identity() {
        let api = Arc::new(FixedApi {
            credits: Some(5),
            ..FixedApi::default()
        });
        let identity = Arc::new(StaticIdentity::loading("user_1"));
        let loader = DashboardLoader::new(api.clone(), identity.clone(), CreditStore::new());

        assert_eq!(loader.refresh_balance().await.unwrap(), BalanceRefresh::Pending);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);

        identity.finish_loading();
        assert_eq!(
            loader.refresh_balance().await.unwrap(),
            BalanceRefresh::Updated(CreditBalance::new(5))
        );
    }

    #[tokio::test]
    async fn test_refresh_after_sign_out_is_discarded() {
        let store = CreditStore::new();
        store.set_balance(CreditBalance::new(40));
        let api = Arc::new(FixedApi {
            credits: Some(505),
            reset_during_fetch: Some(store.clone()),
            ..FixedApi::default()
        });
        let loader = DashboardLoader::new(api, Arc::new(StaticIdentity::signed_in("user_1")), store.clone());

        assert_eq!(loader.refresh_balance().await.unwrap(), BalanceRefresh::Stale);
        assert_eq!(store.balance().get(), 0);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_balance() {
        let store = CreditStore::new();
        store.set_balance(CreditBalance::new(12));
        let loader = DashboardLoader::new(
            Arc::new(FixedApi::default()),
            Arc::new(StaticIdentity::signed_in("user_1")),
            store.clone(),
        );

        assert!(matches!(
            loader.refresh_balance().await,
            Err(CloudShareError::Status { status: 500, .. })
        ));
        assert_eq!(store.balance().get(), 12);
    }
}
