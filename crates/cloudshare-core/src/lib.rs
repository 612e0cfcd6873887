//! # cloudshare-core
//!
//! Credit balance, plan catalog and page controllers for the CloudShare
//! frontend.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  LandingGate        SubscriptionFlow / DashboardLoader       │
//! │       │                   │        │          │              │
//! │  ┌────▼─────┐  ┌──────────▼──┐ ┌───▼──────┐ ┌─▼───────────┐  │
//! │  │Navigator │  │ Identity    │ │CreditsApi│ │ CreditStore │  │
//! │  │ (router) │  │ Provider    │ │ (backend)│ │ (shared)    │  │
//! │  └──────────┘  └─────────────┘ └──────────┘ └─────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router, identity provider and backend are external; this crate only
//! defines the seams it consumes them through.

pub mod api;
pub mod credits;
pub mod dashboard;
pub mod error;
pub mod landing;
pub mod plan;
pub mod session;
pub mod subscription;

pub use api::{CreditsApi, CreditsResponse, PurchaseRequest, PurchaseResponse, Transaction};
pub use credits::{CreditBalance, CreditStore};
pub use dashboard::{BalanceRefresh, DashboardLoader};
pub use error::{CloudShareError, Result};
pub use landing::{LandingGate, LandingView};
pub use plan::{Plan, PlanId, catalog};
pub use session::{BearerToken, IdentityProvider, Navigator, StaticIdentity, routes};
pub use subscription::{
    Banner, LoadOutcome, Phase, PurchaseOutcome, SubscriptionFlow, SubscriptionView,
};
