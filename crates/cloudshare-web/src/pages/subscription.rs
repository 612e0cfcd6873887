//! Subscription Page

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use cloudshare_client::HttpCreditsApi;
use cloudshare_core::{PlanId, SubscriptionFlow, SubscriptionView, catalog};

use crate::app::{CreditsContext, SessionState};
use crate::components::{BalanceCard, BannerView, PlanFeatures, plan_class};
use crate::identity::ClerkIdentity;

type Flow = SubscriptionFlow<HttpCreditsApi, ClerkIdentity>;

#[component]
pub fn SubscriptionPage() -> impl IntoView {
    let credits = expect_context::<CreditsContext>();
    let session = expect_context::<SessionState>();
    let flow = StoredValue::new_local(Arc::<Flow>::new(
        SubscriptionFlow::new(
            Arc::new(HttpCreditsApi::from_env()),
            Arc::new(ClerkIdentity),
            credits.store.clone(),
        ),
    ));
    let state = RwSignal::new(flow.with_value(|f| f.snapshot()));

    // Fetch the balance once per page load, after the session is restored
    let mount_credits = credits.clone();
    Effect::new(move |_| {
        if !session.ready.get() {
            return;
        }
        let f = flow.get_value();
        let credits = mount_credits.clone();
        spawn_local(async move {
            f.mount().await;
            if !f.is_closed() {
                publish(&f, state, &credits);
            }
        });
    });

    // Follow shared balance changes, including the reset on sign-out
    let balance = credits.balance;
    Effect::new(move |_| {
        balance.track();
        if let Some(view) = flow.try_with_value(|f| f.snapshot()) {
            state.set(view);
        }
    });

    on_cleanup(move || {
        flow.try_with_value(|f| f.close());
    });

    let purchase = move |plan: PlanId| {
        let f = flow.get_value();
        if !f.begin_purchase(plan) {
            return;
        }
        state.set(f.snapshot());

        let credits = credits.clone();
        spawn_local(async move {
            f.complete_purchase(plan).await;
            if !f.is_closed() {
                publish(&f, state, &credits);
            }
        });
    };

    let purchasing = move || state.get().purchasing();

    view! {
        <div class="subscription">
            <h1>"Subscription Plans"</h1>
            <p class="subtitle">"Choose a plan that works for you"</p>

            <BannerView banner=Signal::derive(move || state.get().banner) />

            <BalanceCard balance=Signal::derive(move || state.get().balance) />

            <div class="plans">
                {catalog()
                    .iter()
                    .map(|plan| {
                        let purchase = purchase.clone();
                        view! {
                            <div class=plan_class(plan)>
                                <Show when=move || plan.recommended>
                                    <span class="badge">"RECOMMENDED"</span>
                                </Show>
                                <h3>{plan.name}</h3>
                                <div class="price">
                                    {plan.price_label()}
                                    <span>" for "{plan.credits}" credits"</span>
                                </div>
                                <PlanFeatures plan=plan />
                                <button
                                    class="btn btn-primary"
                                    disabled=purchasing
                                    on:click=move |_| purchase(plan.id)
                                >
                                    {move || if purchasing() { "Processing..." } else { "Purchase Plan" }}
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// Push the controller's state to the page and the shared balance signal
fn publish(flow: &Flow, state: RwSignal<SubscriptionView>, credits: &CreditsContext) {
    state.try_set(flow.snapshot());
    credits.sync();
}
