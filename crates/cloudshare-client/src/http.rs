//! HTTP Credits API
//!
//! Implementation of `CreditsApi` over the backend's REST endpoints.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header::AUTHORIZATION};
use serde::de::DeserializeOwned;

use cloudshare_core::{
    BearerToken, CloudShareError, CreditsApi, CreditsResponse, PlanId, PurchaseRequest,
    PurchaseResponse, Result, Transaction,
};

use crate::config::{ApiConfig, Endpoints};

/// Credits backend reached over HTTP
#[derive(Clone, Debug)]
pub struct HttpCreditsApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpCreditsApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing `reqwest::Client`
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            endpoints: config.endpoints(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::new(&ApiConfig::from_env())
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(request: RequestBuilder, token: &BearerToken) -> Result<(u16, String)> {
        let response: Response = request
            .header(AUTHORIZATION, token.authorization())
            .send()
            .await
            .map_err(|e| CloudShareError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| CloudShareError::Transport(e.to_string()))?;
        Ok((status, body))
    }

    fn parse<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
        if !(200..300).contains(&status) {
            return Err(CloudShareError::Status {
                status,
                body: body.to_string(),
            });
        }
        serde_json::from_str(body).map_err(|e| CloudShareError::MalformedResponse(e.to_string()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CreditsApi for HttpCreditsApi {
    async fn get_credits(&self, token: &BearerToken) -> Result<CreditsResponse> {
        let request = self.client.get(&self.endpoints.get_credits);
        let (status, body) = Self::send(request, token).await?;
        Self::parse(status, &body)
    }

    async fn add_credits(&self, token: &BearerToken, plan: PlanId) -> Result<PurchaseResponse> {
        let request = self
            .client
            .post(&self.endpoints.add_credits)
            .json(&PurchaseRequest::from(plan));
        let (status, body) = Self::send(request, token).await?;

        // Rejections arrive as 4xx with a PurchaseResponse body
        if !(200..300).contains(&status) {
            if let Ok(rejection) = serde_json::from_str::<PurchaseResponse>(&body) {
                if !rejection.success {
                    tracing::debug!(status, plan = %plan, "Backend rejected purchase");
                    return Ok(rejection);
                }
            }
        }
        Self::parse(status, &body)
    }

    async fn list_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>> {
        let request = self.client.get(&self.endpoints.transactions);
        let (status, body) = Self::send(request, token).await?;
        Self::parse(status, &body)
    }
}
