//! Credits Backend Contract
//!
//! Wire types for the credits endpoints and the trait the page controllers
//! call them through. Field names follow the backend's camelCase JSON.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credits::CreditBalance;
use crate::error::Result;
use crate::plan::PlanId;
use crate::session::BearerToken;

/// `GET /users/credits` response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditsResponse {
    pub credits: CreditBalance,

    /// Tier label the backend tracks (`BASIC`, `PREMIUM`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

/// `POST /payments/add-credits` request body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub plan_id: String,
}

impl From<PlanId> for PurchaseRequest {
    fn from(plan: PlanId) -> Self {
        Self {
            plan_id: plan.as_str().to_string(),
        }
    }
}

/// `POST /payments/add-credits` response body
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub success: bool,

    /// Balance after the purchase (present on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<CreditBalance>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Amount charged, whole INR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
}

impl PurchaseResponse {
    /// Rejection with a message
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// A recorded credit purchase
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub plan_id: String,
    pub amount: u64,
    pub currency: String,
    pub status: String,
    pub credits_added: u64,
    pub transaction_date: DateTime<Utc>,
}

/// Credits backend
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CreditsApi {
    /// Current balance of the token's user
    async fn get_credits(&self, token: &BearerToken) -> Result<CreditsResponse>;

    /// Purchase a plan; logical rejections come back as `success: false`
    async fn add_credits(&self, token: &BearerToken, plan: PlanId) -> Result<PurchaseResponse>;

    /// Successful purchases, newest first
    async fn list_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_request_wire_format() {
        let body = serde_json::to_value(PurchaseRequest::from(PlanId::Ultimate)).unwrap();
        assert_eq!(body, serde_json::json!({ "planId": "ultimate" }));
    }

    #[test]
    fn test_purchase_response_optional_fields() {
        let response: PurchaseResponse =
            serde_json::from_str(r#"{"success":false,"message":"card declined"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.credits, None);
        assert_eq!(response.message.as_deref(), Some("card declined"));
    }

    #[test]
    fn test_negative_credits_rejected() {
        let parsed = serde_json::from_str::<CreditsResponse>(r#"{"credits":-3}"#);
        assert!(parsed.is_err());
    }
}
