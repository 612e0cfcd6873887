//! UI Components

use leptos::prelude::*;

use cloudshare_core::{Banner, CreditBalance, Plan, catalog};

use crate::content::{FEATURES, TESTIMONIALS, banner_class, upload_hint};

#[component]
pub fn HeroSection(open_sign_in: Callback<()>, open_sign_up: Callback<()>) -> impl IntoView {
    view! {
        <header class="hero">
            <h1>"Share Files Securely with CloudShare"</h1>
            <p class="tagline">
                "Upload, manage and share your files in one place. Pay only for what you upload."
            </p>
            <div class="cta">
                <button class="btn btn-primary" on:click=move |_| open_sign_up.run(())>
                    "Get Started"
                </button>
                <button class="btn" on:click=move |_| open_sign_in.run(())>
                    "Sign In"
                </button>
            </div>
        </header>
    }
}

#[component]
pub fn FeaturesSection() -> impl IntoView {
    view! {
        <section class="features">
            <h2>"Everything you need for file sharing"</h2>
            <div class="feature-grid">
                {FEATURES
                    .iter()
                    .map(|feature| {
                        view! {
                            <div class="feature">
                                <h3>{feature.icon}" "{feature.title}</h3>
                                <p>{feature.description}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

/// Catalog cards on the marketing page; every button leads to sign-up
#[component]
pub fn PricingSection(open_sign_up: Callback<()>) -> impl IntoView {
    view! {
        <section class="pricing">
            <h2>"Simple, credit-based pricing"</h2>
            <div class="plans">
                <div class="plan">
                    <h3>"Free"</h3>
                    <div class="price">"₹0"</div>
                    <ul>
                        <li>"5 credits on sign-up"</li>
                        <li>"Public and private files"</li>
                    </ul>
                    <button class="btn" on:click=move |_| open_sign_up.run(())>
                        "Get Started"
                    </button>
                </div>
                {catalog()
                    .iter()
                    .map(|plan| {
                        view! {
                            <div class=plan_class(plan)>
                                <h3>{plan.name}</h3>
                                <div class="price">
                                    {plan.price_label()}
                                    <span>" for "{plan.credits}" credits"</span>
                                </div>
                                <PlanFeatures plan=plan />
                                <button class="btn btn-primary" on:click=move |_| open_sign_up.run(())>
                                    "Get Started"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn TestimonialsSection() -> impl IntoView {
    view! {
        <section class="testimonials">
            <h2>"Trusted by people who share"</h2>
            <div class="testimonial-grid">
                {TESTIMONIALS
                    .iter()
                    .map(|t| {
                        view! {
                            <blockquote class="testimonial">
                                <p>"\u{201c}"{t.quote}"\u{201d}"</p>
                                <footer>{t.name}", "{t.role}</footer>
                            </blockquote>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn CtaSection(open_sign_up: Callback<()>) -> impl IntoView {
    view! {
        <section class="cta-section">
            <h2>"Ready to start sharing?"</h2>
            <p>"Create a free account and get 5 upload credits."</p>
            <button class="btn btn-primary" on:click=move |_| open_sign_up.run(())>
                "Sign Up Free"
            </button>
        </section>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <p>"© CloudShare. All rights reserved."</p>
        </footer>
    }
}

#[component]
pub fn PlanFeatures(plan: &'static Plan) -> impl IntoView {
    view! {
        <ul class="plan-features">
            {plan.features.iter().map(|feature| view! { <li>"✓ "{*feature}</li> }).collect_view()}
        </ul>
    }
}

/// Success or error feedback; renders nothing for `Banner::None`
#[component]
pub fn BannerView(#[prop(into)] banner: Signal<Banner>) -> impl IntoView {
    move || {
        let banner = banner.get();
        let class = banner_class(&banner);
        banner.text().map(|text| {
            let text = text.to_string();
            view! { <div class=class role="status">{text}</div> }
        })
    }
}

#[component]
pub fn BalanceCard(#[prop(into)] balance: Signal<CreditBalance>) -> impl IntoView {
    view! {
        <div class="balance-card">
            <h2>"Current Credits: "<span class="credits">{move || balance.get().to_string()}</span></h2>
            <p class="hint">{move || upload_hint(balance.get())}</p>
        </div>
    }
}

pub const fn plan_class(plan: &Plan) -> &'static str {
    if plan.recommended { "plan featured" } else { "plan" }
}
