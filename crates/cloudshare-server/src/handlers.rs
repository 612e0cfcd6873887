//! HTTP Handlers

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};
use serde::Serialize;

use cloudshare_core::{CreditsResponse, PlanId, PurchaseRequest, PurchaseResponse, Transaction};

use crate::error::ServerError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        let status = match err {
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::InvalidPlan(_) => StatusCode::BAD_REQUEST,
            ServerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: err.to_string(),
                code: err.code().into(),
            }),
        )
    }
}

/// The dev backend treats the bearer token itself as the user id
fn bearer_user(headers: &HeaderMap) -> Result<String, ServerError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServerError::Unauthorized("missing Authorization header".into()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .ok_or_else(|| ServerError::Unauthorized("expected a bearer token".into()))
}

fn parse_plan(raw: &str) -> Result<PlanId, ServerError> {
    raw.parse().map_err(|_| ServerError::InvalidPlan(raw.to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /users/credits`
pub async fn get_user_credits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CreditsResponse>, ApiError> {
    let user_id = bearer_user(&headers)?;
    let record = state.ledger.get_or_create(&user_id)?;

    Ok(Json(CreditsResponse {
        credits: record.credits,
        plan: Some(record.plan),
    }))
}

/// `POST /payments/add-credits`
///
/// Rejections are `400` with `success: false` so the caller can show the message.
pub async fn add_credits(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseResponse>), ApiError> {
    let user_id = bearer_user(&headers)?;

    let plan = match parse_plan(&payload.plan_id) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Invalid plan selected");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(PurchaseResponse::rejected("Invalid plan selected")),
            ));
        }
    };

    match state.ledger.purchase(&user_id, plan) {
        Ok((record, transaction)) => {
            tracing::info!(
                user_id = %user_id,
                plan = %plan,
                credits = %record.credits,
                transaction_id = %transaction.id,
                "Credits added"
            );
            Ok((
                StatusCode::OK,
                Json(PurchaseResponse {
                    success: true,
                    credits: Some(record.credits),
                    message: Some("Credits added successfully".into()),
                    amount: Some(transaction.amount),
                    currency: Some(transaction.currency),
                    plan_id: Some(transaction.plan_id),
                }),
            ))
        }
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Purchase failed");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(PurchaseResponse::rejected(format!("Error adding credits: {e}"))),
            ))
        }
    }
}

/// `GET /transactions`
pub async fn list_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let user_id = bearer_user(&headers)?;
    Ok(Json(state.ledger.transactions(&user_id)?))
}
