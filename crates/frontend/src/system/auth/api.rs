//! Calls behind the login flow.
//!
//! The OTP request goes straight to the pricing API; verification and the
//! session itself live on the dashboard backend, which keeps the session in
//! an HttpOnly cookie.

use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::Envelope;
use contracts::system::auth::{SendOtpData, SendOtpRequest, Session, SignInRequest};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::backend_url;

/// Ask the pricing API to text a code to `mobile`
pub async fn send_otp(client: &ApiClient, mobile: &str) -> Result<SendOtpData, ApiError> {
    let request = SendOtpRequest {
        mobile: mobile.to_string(),
    };
    let envelope: Envelope<SendOtpData> = client.post("/auth/send-otp", &request).await?;
    Ok(envelope.data)
}

/// Exchange token + code for a dashboard session
pub async fn sign_in(request: &SignInRequest) -> Result<Session, ApiError> {
    let response = Request::post(&backend_url("/api/auth/verify-otp"))
        .json(request)
        .map_err(|e| ApiError::network(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;

    read_json(response).await
}

/// Session carried by the cookie, `None` when signed out or expired
pub async fn fetch_session() -> Result<Option<Session>, ApiError> {
    let response = Request::get(&backend_url("/api/auth/session"))
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;

    read_json(response).await
}

pub async fn sign_out() -> Result<(), ApiError> {
    let response = Request::post(&backend_url("/api/auth/signout"))
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;

    if !response.ok() {
        let text = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(response.status(), &text));
    }
    Ok(())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if !response.ok() {
        return Err(ApiError::from_response(status, &text));
    }
    serde_json::from_str(&text).map_err(|e| ApiError::decode(status, e))
}
