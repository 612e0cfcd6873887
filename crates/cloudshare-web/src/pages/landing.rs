//! Landing Page

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use cloudshare_core::{LandingGate, LandingView};

use crate::app::SessionState;
use crate::components::{CtaSection, FeaturesSection, Footer, HeroSection, PricingSection, TestimonialsSection};
use crate::identity::{ClerkIdentity, RouterNavigator};

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = expect_context::<SessionState>();
    let gate = Arc::new(LandingGate::new());
    let navigate = use_navigate();
    let navigator = RouterNavigator::new(move |path: &str| navigate(path, Default::default()));

    // Signed-in visitors never get the marketing sections
    let landing = RwSignal::new(if session.signed_in.get_untracked() {
        LandingView::Redirecting
    } else {
        LandingView::Marketing
    });

    let redirect_gate = gate.clone();
    Effect::new(move |_| {
        session.ready.track();
        session.signed_in.track();
        landing.set(redirect_gate.on_render(&ClerkIdentity, &navigator));
    });

    let sign_in_gate = gate.clone();
    let open_sign_in = Callback::new(move |()| sign_in_gate.sign_in(&ClerkIdentity));
    let open_sign_up = Callback::new(move |()| gate.sign_up(&ClerkIdentity));

    view! {
        <Show
            when=move || landing.get() == LandingView::Marketing
            fallback=|| view! { <div class="redirecting"></div> }
        >
            <div class="landing-page">
                <HeroSection open_sign_in=open_sign_in open_sign_up=open_sign_up />
                <FeaturesSection />
                <PricingSection open_sign_up=open_sign_up />
                <TestimonialsSection />
                <CtaSection open_sign_up=open_sign_up />
                <Footer />
            </div>
        </Show>
    }
}
