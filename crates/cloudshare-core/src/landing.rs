//! Landing Page Gate
//!
//! Signed-in visitors never see the marketing page; they are sent to the
//! dashboard exactly once.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::session::{IdentityProvider, Navigator, routes};

/// What the landing page should show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LandingView {
    /// Redirect issued (or already issued); render nothing interactive
    Redirecting,
    /// Show the marketing sections
    Marketing,
}

/// Redirect guard for one landing page instance
#[derive(Debug, Default)]
pub struct LandingGate {
    redirected: AtomicBool,
}

impl LandingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate on every render; navigates at most once
    pub fn on_render<I, N>(&self, identity: &I, navigator: &N) -> LandingView
    where
        I: IdentityProvider + ?Sized,
        N: Navigator + ?Sized,
    {
        if !identity.is_signed_in() {
            return LandingView::Marketing;
        }

        if !self.redirected.swap(true, Ordering::SeqCst) {
            tracing::info!(to = routes::DASHBOARD, "Signed-in visitor redirected");
            navigator.navigate(routes::DASHBOARD);
        }
        LandingView::Redirecting
    }

    /// Whether the redirect has fired
    pub fn has_redirected(&self) -> bool {
        self.redirected.load(Ordering::SeqCst)
    }

    /// "Sign in" action
    pub fn sign_in<I: IdentityProvider + ?Sized>(&self, identity: &I) {
        identity.open_sign_in();
    }

    /// "Get started" / "Sign up" action
    pub fn sign_up<I: IdentityProvider + ?Sized>(&self, identity: &I) {
        identity.open_sign_up();
    }
}
