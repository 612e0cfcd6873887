//! Main App Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{components::*, path};

use cloudshare_core::{CreditBalance, CreditStore};

use crate::identity::watch_session;
use crate::pages::{DashboardPage, LandingPage, SubscriptionPage};

/// Session state mirrored from the identity SDK
#[derive(Clone, Copy)]
pub struct SessionState {
    pub signed_in: RwSignal<bool>,
    /// SDK loaded and any existing session restored
    pub ready: RwSignal<bool>,
}

/// Shared credit balance with a reactive mirror for rendering
#[derive(Clone)]
pub struct CreditsContext {
    pub store: CreditStore,
    pub balance: RwSignal<CreditBalance>,
}

impl CreditsContext {
    fn new() -> Self {
        let store = CreditStore::new();
        let balance = RwSignal::new(store.balance());
        Self { store, balance }
    }

    /// Copy the store's value into the signal
    pub fn sync(&self) {
        self.balance.set(self.store.balance());
    }
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let session = SessionState {
        signed_in: RwSignal::new(false),
        ready: RwSignal::new(false),
    };
    let credits = CreditsContext::new();

    spawn_local(watch_session(session, credits.clone()));
    provide_context(session);
    provide_context(credits);

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=LandingPage />
                    <Route path=path!("/dashboard") view=DashboardPage />
                    <Route path=path!("/subscriptions") view=SubscriptionPage />
                </Routes>
            </main>
        </Router>
    }
}
