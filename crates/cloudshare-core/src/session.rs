//! Session and Navigation Seams
//!
//! The identity provider owns sign-in state and token issuance; the router
//! owns navigation. Both are consumed through the traits below so the page
//! controllers can run against the browser SDK, a dev stub, or a test double.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::{CloudShareError, Result};

/// Route paths the pages navigate between
pub mod routes {
    pub const HOME: &str = "/";
    pub const DASHBOARD: &str = "/dashboard";
    pub const SUBSCRIPTIONS: &str = "/subscriptions";
}

/// Opaque bearer token issued by the identity provider
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// External identity provider (hosted sign-in SDK)
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait IdentityProvider {
    /// Whether the provider has finished restoring any existing session
    ///
    /// Until then `is_signed_in` and `get_token` report a signed-out user.
    fn is_loaded(&self) -> bool {
        true
    }

    /// Whether a user session is currently active
    fn is_signed_in(&self) -> bool;

    /// Fetch a fresh bearer token for backend calls
    async fn get_token(&self) -> Result<BearerToken>;

    /// Open the provider's sign-in modal
    fn open_sign_in(&self);

    /// Open the provider's sign-up modal
    fn open_sign_up(&self);
}

/// Imperative router access
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// In-process identity with a fixed token
///
/// Used by the development tooling and tests in place of the hosted SDK.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    token: RwLock<Option<String>>,
    sign_in_prompts: AtomicUsize,
    sign_up_prompts: AtomicUsize,
    fail_tokens: AtomicBool,
    loading: AtomicBool,
}

impl StaticIdentity {
    /// Identity with an active session
    pub fn signed_in(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            ..Self::default()
        }
    }

    /// Identity with no session
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Session `token` that is still being restored; see `finish_loading`
    pub fn loading(token: impl Into<String>) -> Self {
        let identity = Self::signed_in(token);
        identity.loading.store(true, Ordering::SeqCst);
        identity
    }

    /// Complete session restore
    pub fn finish_loading(&self) {
        self.loading.store(false, Ordering::SeqCst);
    }

    /// End the session
    pub fn sign_out(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Make `get_token` fail while a session is still reported as active
    pub fn fail_token_requests(&self, fail: bool) {
        self.fail_tokens.store(fail, Ordering::SeqCst);
    }

    /// Number of times the sign-in modal was requested
    pub fn sign_in_prompts(&self) -> usize {
        self.sign_in_prompts.load(Ordering::SeqCst)
    }

    /// Number of times the sign-up modal was requested
    pub fn sign_up_prompts(&self) -> usize {
        self.sign_up_prompts.load(Ordering::SeqCst)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl IdentityProvider for StaticIdentity {
    fn is_loaded(&self) -> bool {
        !self.loading.load(Ordering::SeqCst)
    }

    fn is_signed_in(&self) -> bool {
        self.is_loaded()
            && self
                .token
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .is_some()
    }

    async fn get_token(&self) -> Result<BearerToken> {
        if !self.is_loaded() {
            return Err(CloudShareError::Auth("session not loaded".into()));
        }
        if self.fail_tokens.load(Ordering::SeqCst) {
            return Err(CloudShareError::Auth("token endpoint unavailable".into()));
        }
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .map(BearerToken::new)
            .ok_or_else(|| CloudShareError::Auth("no active session".into()))
    }

    fn open_sign_in(&self) {
        self.sign_in_prompts.fetch_add(1, Ordering::SeqCst);
    }

    fn open_sign_up(&self) {
        self.sign_up_prompts.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = BearerToken::new("secret");
        assert_eq!(format!("{token:?}"), "BearerToken(***)");
        assert_eq!(token.authorization(), "Bearer secret");
    }

    #[tokio::test]
    async fn test_static_identity_lifecycle() {
        let identity = StaticIdentity::signed_in("user_1");
        assert!(identity.is_signed_in());
        assert_eq!(identity.get_token().await.unwrap().as_str(), "user_1");

        identity.sign_out();
        assert!(!identity.is_signed_in());
        assert!(matches!(
            identity.get_token().await,
            Err(CloudShareError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_token_failure_while_signed_in() {
        let identity = StaticIdentity::signed_in("user_1");
        identity.fail_token_requests(true);
        assert!(identity.is_signed_in());
        assert!(identity.get_token().await.is_err());
    }

    #[tokio::test]
    async fn test_loading_identity_reports_signed_out() {
        let identity = StaticIdentity::loading("user_1");
        assert!(!identity.is_loaded());
        assert!(!identity.is_signed_in());
        assert!(identity.get_token().await.is_err());

        identity.finish_loading();
        assert!(identity.is_loaded());
        assert!(identity.is_signed_in());
        assert_eq!(identity.get_token().await.unwrap().as_str(), "user_1");
    }
}
