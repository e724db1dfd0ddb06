use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::Envelope;
use contracts::system::auth::{VerifyOtpData, VerifyOtpRequest};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;

use crate::shared::config::UpstreamConfig;

/// HTTP client for the pricing API
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

static UPSTREAM: OnceCell<UpstreamClient> = OnceCell::new();

pub fn initialize(config: &UpstreamConfig) -> anyhow::Result<()> {
    let client = UpstreamClient::new(config)?;
    tracing::info!("Pricing API: {}", client.base_url);
    UPSTREAM
        .set(client)
        .map_err(|_| anyhow::anyhow!("Upstream client already initialized"))
}

pub fn client() -> anyhow::Result<&'static UpstreamClient> {
    UPSTREAM
        .get()
        .ok_or_else(|| anyhow::anyhow!("Upstream client not initialized"))
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /auth/verify-otp, authorized by the exchange token from send-otp
    pub async fn verify_otp(&self, exchange_token: &str, otp: &str) -> Result<VerifyOtpData, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/verify-otp"))
            .bearer_auth(exchange_token)
            .header("Accept", "application/json")
            .json(&VerifyOtpRequest {
                otp: otp.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let envelope: Envelope<VerifyOtpData> = read_json(response).await?;
        Ok(envelope.data)
    }

    /// DELETE /auth. Revokes the pricing API token.
    pub async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url("/auth"))
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;

    if !status.is_success() {
        tracing::error!("Pricing API request failed ({}): {}", status, body);
        return Err(ApiError::from_response(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Failed to parse pricing API response: {}", e);
        ApiError::decode(status.as_u16(), e)
    })
}
