//! # cloudshare-server
//!
//! Development backend implementing the credits contract the frontend
//! consumes. Balances live in memory; there is no payment processor.

pub mod error;
pub mod handlers;
pub mod ledger;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use ledger::{CreditLedger, MemoryCreditLedger, UserCredits};
pub use state::AppState;

use crate::handlers::{add_credits, get_user_credits, health_check, list_transactions};

/// Path prefix of the credits API
pub const API_PREFIX: &str = "/api/v1.0";

/// Credits routes, relative to `API_PREFIX`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/users/credits", get(get_user_credits))
        .route("/payments/add-credits", post(add_credits))
        .route("/transactions", get(list_transactions))
}

/// Full application router
pub fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use cloudshare_core::{CreditsResponse, PurchaseResponse, Transaction};
    use tower::ServiceExt;

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn purchase(plan_id: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1.0/payments/add-credits")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"planId":"{plan_id}"}}"#)))
            .unwrap()
    }

    async fn json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(AppState::in_memory())
            .oneshot(get("/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_credits_require_bearer_token() {
        let response = app(AppState::in_memory())
            .oneshot(get("/api/v1.0/users/credits", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_new_user_starts_with_five_credits() {
        let response = app(AppState::in_memory())
            .oneshot(get("/api/v1.0/users/credits", Some("clerk123")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: CreditsResponse = json(response).await;
        assert_eq!(body.credits.get(), 5);
        assert_eq!(body.plan.as_deref(), Some("BASIC"));
    }

    #[tokio::test]
    async fn test_purchase_then_history() {
        let app = app(AppState::in_memory());

        let response = app.clone().oneshot(purchase("ultimate", "clerk123")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: PurchaseResponse = json(response).await;
        assert!(body.success);
        assert_eq!(body.credits.map(|c| c.get()), Some(5005));
        assert_eq!(body.amount, Some(2500));
        assert_eq!(body.currency.as_deref(), Some("INR"));
        assert_eq!(body.plan_id.as_deref(), Some("ultimate"));

        let response = app
            .oneshot(get("/api/v1.0/transactions", Some("clerk123")))
            .await
            .unwrap();
        let history: Vec<Transaction> = json(response).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].credits_added, 5000);
    }

    #[tokio::test]
    async fn test_unknown_plan_is_rejected() {
        let response = app(AppState::in_memory())
            .oneshot(purchase("gold", "clerk123"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: PurchaseResponse = json(response).await;
        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some("Invalid plan selected"));
    }
}
