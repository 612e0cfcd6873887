//! Identity Provider Bindings
//!
//! Thin bindings to the hosted identity SDK object the host page installs as
//! `window.Clerk`, plus the router adapter for `Navigator`.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use cloudshare_core::{BearerToken, CloudShareError, IdentityProvider, Navigator};

use crate::app::{CreditsContext, SessionState};

#[wasm_bindgen]
extern "C" {
    type ClerkWindow;

    #[wasm_bindgen(method, getter, js_name = Clerk)]
    fn clerk(this: &ClerkWindow) -> Option<Clerk>;

    type Clerk;

    #[wasm_bindgen(method, getter)]
    fn loaded(this: &Clerk) -> bool;

    #[wasm_bindgen(method, getter)]
    fn user(this: &Clerk) -> Option<JsValue>;

    #[wasm_bindgen(method, getter)]
    fn session(this: &Clerk) -> Option<ClerkSession>;

    #[wasm_bindgen(method, js_name = openSignIn)]
    fn open_sign_in(this: &Clerk);

    #[wasm_bindgen(method, js_name = openSignUp)]
    fn open_sign_up(this: &Clerk);

    #[wasm_bindgen(method, js_name = signOut)]
    fn sign_out(this: &Clerk);

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &Clerk, callback: &Closure<dyn FnMut(JsValue)>);

    type ClerkSession;

    #[wasm_bindgen(method, catch, js_name = getToken)]
    async fn get_token(this: &ClerkSession) -> Result<JsValue, JsValue>;
}

fn clerk() -> Option<Clerk> {
    let window: JsValue = web_sys::window()?.into();
    window.unchecked_into::<ClerkWindow>().clerk()
}

/// The hosted identity SDK, looked up on every call
#[derive(Clone, Copy, Debug, Default)]
pub struct ClerkIdentity;

impl ClerkIdentity {
    pub fn sign_out(self) {
        if let Some(clerk) = clerk() {
            clerk.sign_out();
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for ClerkIdentity {
    fn is_loaded(&self) -> bool {
        clerk().is_some_and(|c| c.loaded())
    }

    fn is_signed_in(&self) -> bool {
        clerk().and_then(|c| c.user()).is_some()
    }

    async fn get_token(&self) -> cloudshare_core::Result<BearerToken> {
        let session = clerk()
            .and_then(|c| c.session())
            .ok_or_else(|| CloudShareError::Auth("no active session".into()))?;

        let token = session
            .get_token()
            .await
            .map_err(|e| CloudShareError::Auth(format!("{e:?}")))?;

        token
            .as_string()
            .map(BearerToken::new)
            .ok_or_else(|| CloudShareError::Auth("session returned no token".into()))
    }

    fn open_sign_in(&self) {
        match clerk() {
            Some(clerk) => clerk.open_sign_in(),
            None => tracing::warn!("Identity SDK not loaded; cannot open sign-in"),
        }
    }

    fn open_sign_up(&self) {
        match clerk() {
            Some(clerk) => clerk.open_sign_up(),
            None => tracing::warn!("Identity SDK not loaded; cannot open sign-up"),
        }
    }
}

const SDK_POLL_MS: u32 = 50;
const SDK_SLOW_AFTER_POLLS: u32 = 200;

/// Resolve once the SDK script has run and restored any existing session
async fn loaded_clerk() -> Clerk {
    let mut polls = 0_u32;
    loop {
        if let Some(clerk) = clerk().filter(Clerk::loaded) {
            return clerk;
        }
        polls += 1;
        if polls == SDK_SLOW_AFTER_POLLS {
            tracing::warn!(waited_ms = polls * SDK_POLL_MS, "Identity SDK still loading");
        }
        TimeoutFuture::new(SDK_POLL_MS).await;
    }
}

/// Mirror the SDK's session into `session`; reset credits on sign-out
///
/// Waits for the SDK to load, then marks the session ready and follows
/// later sign-in and sign-out events.
pub async fn watch_session(session: SessionState, credits: CreditsContext) {
    let clerk = loaded_clerk().await;
    let signed_in = ClerkIdentity.is_signed_in();
    tracing::info!(signed_in, "Identity session restored");
    session.signed_in.set(signed_in);
    session.ready.set(true);

    let listener = Closure::<dyn FnMut(JsValue)>::new(move |_resources: JsValue| {
        let now = ClerkIdentity.is_signed_in();
        let was = session.signed_in.get_untracked();
        if was && !now {
            credits.store.reset();
            credits.sync();
        }
        if was != now {
            session.signed_in.set(now);
        }
    });
    clerk.add_listener(&listener);

    // The SDK holds the callback for the lifetime of the page
    listener.forget();
}

/// `Navigator` over the router's navigate function
pub struct RouterNavigator<F>(F);

impl<F: Fn(&str)> RouterNavigator<F> {
    pub const fn new(navigate: F) -> Self {
        Self(navigate)
    }
}

impl<F: Fn(&str)> Navigator for RouterNavigator<F> {
    fn navigate(&self, path: &str) {
        (self.0)(path);
    }
}
