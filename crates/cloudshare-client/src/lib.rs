//! # cloudshare-client
//!
//! HTTP implementation of the credits backend contract.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cloudshare_client::HttpCreditsApi;
//! use cloudshare_core::{CreditStore, StaticIdentity, SubscriptionFlow};
//!
//! let api = Arc::new(HttpCreditsApi::from_env());
//! let flow = SubscriptionFlow::new(api, Arc::new(StaticIdentity::signed_in("user_1")), CreditStore::new());
//! flow.mount().await;
//! ```

pub mod config;
pub mod http;

pub use config::{ApiConfig, DEFAULT_BASE_URL, Endpoints};
pub use http::HttpCreditsApi;
