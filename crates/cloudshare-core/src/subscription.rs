//! Subscription Page Controller
//!
//! Drives the credit-purchase page: one balance fetch on mount, then
//! user-triggered purchases, one at a time. The shared balance is only
//! written from backend responses.
//!
//! ```text
//!  Loading ──fetch──▶ Ready ──purchase(plan)──▶ Purchasing(plan)
//!                       ▲                              │
//!                       └────────── response ──────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::api::{CreditsApi, PurchaseResponse};
use crate::credits::{CreditBalance, CreditStore};
use crate::error::Result;
use crate::plan::{Plan, PlanId};
use crate::session::IdentityProvider;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load your current credits. Please try again later.";
pub const PURCHASE_REJECTED_MESSAGE: &str = "Failed to add credits.";
pub const PURCHASE_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Where the page is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Balance not fetched yet
    Loading,
    /// Idle; purchases allowed
    Ready,
    /// A purchase request is outstanding
    Purchasing(PlanId),
}

/// One-shot feedback shown above the plans
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Banner {
    #[default]
    None,
    Success(String),
    Error(String),
}

impl Banner {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Success(text) | Self::Error(text) => Some(text),
        }
    }
}

/// Everything the page renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionView {
    pub phase: Phase,
    pub balance: CreditBalance,
    pub banner: Banner,
}

impl SubscriptionView {
    /// Purchase buttons are disabled in this state
    pub const fn purchasing(&self) -> bool {
        matches!(self.phase, Phase::Purchasing(_))
    }
}

/// Result of the mount-time fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(CreditBalance),
    Failed,
    /// Identity session not restored yet; nothing fetched, call `mount` again
    Pending,
    /// `mount` had already run for this page
    AlreadyMounted,
    /// Page closed, or the user signed out, before the response arrived
    Abandoned,
}

/// Result of a purchase attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Succeeded(CreditBalance),
    /// Backend declined; carries the banner text
    Rejected(String),
    /// Transport, token or contract failure
    Failed,
    /// Not issued: page not ready or another purchase in flight
    Ignored,
    /// Page closed, or the user signed out, before the response arrived
    Abandoned,
}

#[derive(Debug)]
struct FlowState {
    phase: Phase,
    banner: Banner,
}

/// Controller for one subscription page instance
pub struct SubscriptionFlow<A: ?Sized, I: ?Sized> {
    api: Arc<A>,
    identity: Arc<I>,
    store: CreditStore,
    state: RwLock<FlowState>,
    mounted: AtomicBool,
    in_flight: AtomicBool,
    closed: AtomicBool,
}

impl<A, I> SubscriptionFlow<A, I>
where
    A: CreditsApi + ?Sized,
    I: IdentityProvider + ?Sized,
{
    pub fn new(api: Arc<A>, identity: Arc<I>, store: CreditStore) -> Self {
        Self {
            api,
            identity,
            store,
            state: RwLock::new(FlowState {
                phase: Phase::Loading,
                banner: Banner::None,
            }),
            mounted: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Current render state
    pub fn snapshot(&self) -> SubscriptionView {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        SubscriptionView {
            phase: state.phase,
            balance: self.store.balance(),
            banner: state.banner.clone(),
        }
    }

    /// Mark the page as torn down; in-flight responses are dropped
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Fetch the balance once per page load
    ///
    /// Returns `Pending` without fetching while the identity provider is
    /// still restoring the session.
    pub async fn mount(&self) -> LoadOutcome {
        if !self.identity.is_loaded() {
            tracing::debug!("Identity session not loaded; deferring credit fetch");
            return LoadOutcome::Pending;
        }
        if self.mounted.swap(true, Ordering::SeqCst) {
            return LoadOutcome::AlreadyMounted;
        }

        let epoch = self.store.epoch();
        let result = self.fetch_balance().await;

        if self.is_closed() {
            tracing::debug!("Subscription page closed before credits arrived");
            return LoadOutcome::Abandoned;
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.phase = Phase::Ready;

        match result {
            Ok(balance) => {
                if !self.store.set_balance_at(epoch, balance) {
                    return LoadOutcome::Abandoned;
                }
                tracing::info!(credits = %balance, "Loaded credit balance");
                LoadOutcome::Loaded(balance)
            }
            Err(_) if self.store.epoch() != epoch => {
                tracing::debug!("Signed out before credits arrived");
                LoadOutcome::Abandoned
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching user credits");
                state.banner = Banner::Error(LOAD_FAILED_MESSAGE.into());
                LoadOutcome::Failed
            }
        }
    }

    /// Buy a plan; a no-op unless the page is `Ready`
    pub async fn purchase(&self, plan: PlanId) -> PurchaseOutcome {
        if !self.begin_purchase(plan) {
            return PurchaseOutcome::Ignored;
        }
        self.complete_purchase(plan).await
    }

    /// Synchronous half of `purchase`: `Ready -> Purchasing(plan)`
    ///
    /// Lets a UI disable its buttons before the request is issued. Returns
    /// `false` if the page was not `Ready`.
    pub fn begin_purchase(&self, plan: PlanId) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.phase != Phase::Ready {
            tracing::debug!(plan = %plan, phase = ?state.phase, "Purchase ignored");
            return false;
        }
        state.phase = Phase::Purchasing(plan);
        state.banner = Banner::None;
        true
    }

    /// Issue the request for a purchase started with `begin_purchase`
    pub async fn complete_purchase(&self, plan: PlanId) -> PurchaseOutcome {
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if state.phase != Phase::Purchasing(plan) {
                tracing::debug!(plan = %plan, phase = ?state.phase, "No purchase to complete");
                return PurchaseOutcome::Ignored;
            }
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!(plan = %plan, "Purchase request already in flight");
            return PurchaseOutcome::Ignored;
        }

        let epoch = self.store.epoch();
        let result = self.request_purchase(plan).await;
        self.in_flight.store(false, Ordering::SeqCst);

        if self.is_closed() {
            tracing::debug!(plan = %plan, "Subscription page closed before purchase completed");
            return PurchaseOutcome::Abandoned;
        }

        let (outcome, banner) = match result {
            _ if self.store.epoch() != epoch => {
                tracing::debug!(plan = %plan, "Signed out before purchase completed");
                (PurchaseOutcome::Abandoned, Banner::None)
            }
            Ok(PurchaseResponse {
                success: true,
                credits: Some(balance),
                ..
            }) => {
                if self.store.set_balance_at(epoch, balance) {
                    let granted = Plan::get(plan).credits;
                    tracing::info!(plan = %plan, credits = %balance, "Credits purchased");
                    (
                        PurchaseOutcome::Succeeded(balance),
                        Banner::Success(format!("Successfully purchased {granted} credits!")),
                    )
                } else {
                    (PurchaseOutcome::Abandoned, Banner::None)
                }
            }
            Ok(PurchaseResponse { success: true, .. }) => {
                tracing::error!(plan = %plan, "Purchase succeeded without a balance in the response");
                (
                    PurchaseOutcome::Failed,
                    Banner::Error(PURCHASE_FAILED_MESSAGE.into()),
                )
            }
            Ok(PurchaseResponse { message, .. }) => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PURCHASE_REJECTED_MESSAGE.into());
                tracing::warn!(plan = %plan, reason = %message, "Purchase rejected");
                (
                    PurchaseOutcome::Rejected(message.clone()),
                    Banner::Error(message),
                )
            }
            Err(e) => {
                tracing::error!(plan = %plan, error = %e, "Error adding credits");
                (
                    PurchaseOutcome::Failed,
                    Banner::Error(PURCHASE_FAILED_MESSAGE.into()),
                )
            }
        };

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.phase = Phase::Ready;
        state.banner = banner;
        outcome
    }

    async fn fetch_balance(&self) -> Result<CreditBalance> {
        let token = self.identity.get_token().await?;
        let response = self.api.get_credits(&token).await?;
        Ok(response.credits)
    }

    async fn request_purchase(&self, plan: PlanId) -> Result<PurchaseResponse> {
        let token = self.identity.get_token().await?;
        self.api.add_credits(&token, plan).await
    }
}
