//! Dashboard Page

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use cloudshare_client::HttpCreditsApi;
use cloudshare_core::{DashboardLoader, Transaction, routes};

use crate::app::{CreditsContext, SessionState};
use crate::components::BalanceCard;
use crate::identity::ClerkIdentity;

type Loader = DashboardLoader<HttpCreditsApi, ClerkIdentity>;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let credits = expect_context::<CreditsContext>();
    let session = expect_context::<SessionState>();
    let loader = StoredValue::new_local(Arc::<Loader>::new(DashboardLoader::new(
        Arc::new(HttpCreditsApi::from_env()),
        Arc::new(ClerkIdentity),
        credits.store.clone(),
    )));
    let history = RwSignal::new(Vec::<Transaction>::new());
    let history_error = RwSignal::new(None::<String>);

    // Reload whenever a restored session signs in
    let load_credits = credits.clone();
    Effect::new(move |_| {
        if !session.ready.get() || !session.signed_in.get() {
            return;
        }
        let loader = loader.get_value();
        let credits = load_credits.clone();
        spawn_local(async move {
            match loader.refresh_balance().await {
                Ok(_) => credits.sync(),
                Err(e) => tracing::error!(error = %e, "Error fetching user credits"),
            }
            match loader.transactions().await {
                Ok(transactions) => {
                    history.try_set(transactions);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error fetching transactions");
                    history_error.try_set(Some(e.user_message().to_string()));
                }
            }
        });
    });

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Dashboard"</h1>
                <nav>
                    <a href=routes::SUBSCRIPTIONS class="btn btn-primary">"Buy Credits"</a>
                    <Show when=move || session.signed_in.get()>
                        <button class="btn" on:click=move |_| ClerkIdentity.sign_out()>
                            "Sign Out"
                        </button>
                    </Show>
                </nav>
            </header>

            <BalanceCard balance=credits.balance />

            <section class="transactions">
                <h2>"Purchase History"</h2>
                {move || history_error.get().map(|message| view! { <p class="banner banner-error">{message}</p> })}
                <Show
                    when=move || !history.get().is_empty()
                    fallback=|| view! { <p class="empty">"No purchases yet."</p> }
                >
                    <table>
                        <thead>
                            <tr>
                                <th>"Date"</th>
                                <th>"Plan"</th>
                                <th>"Amount"</th>
                                <th>"Credits"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || history.get()
                                key=|tx| tx.id.clone()
                                children=move |tx| view! {
                                    <tr>
                                        <td>{tx.transaction_date.format("%d %b %Y").to_string()}</td>
                                        <td>{tx.plan_id.clone()}</td>
                                        <td>{format!("{} {}", tx.amount, tx.currency)}</td>
                                        <td>{tx.credits_added}</td>
                                    </tr>
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </section>
        </div>
    }
}
