//! The single REST client for the pricing API.
//!
//! Built once in `App` and handed out through context. Every request gets
//! the stored bearer token; every failure is classified and logged, and a 401
//! clears the stored token. The caller always receives the error itself.

use std::sync::Arc;

use contracts::shared::api_error::{ApiError, ApiErrorKind};
use contracts::system::auth::ClientConfig;
use contracts::system::token_store::{reject, token_preview, TokenStore};
use gloo_net::http::{Request, RequestBuilder};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::api_utils::{join_url, with_query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    fn builder(&self, url: &str) -> RequestBuilder {
        match self {
            Self::Get => Request::get(url),
            Self::Post => Request::post(url),
            Self::Put => Request::put(url),
            Self::Delete => Request::delete(url),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: config.api_url.clone(),
            timeout_ms: config.timeout_ms,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        self.tokens.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(HttpMethod::Get, &with_query(path, query), None)
            .await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(HttpMethod::Post, path, Some(encode_body(body)?))
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(HttpMethod::Put, path, Some(encode_body(body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpMethod::Delete, path, None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let url = join_url(&self.base_url, path);
        let mut builder = method
            .builder(&url)
            .header("Accept", "application/json");

        match self.tokens.get_token() {
            Some(token) => {
                log::debug!(
                    "Using token {} for {} {}",
                    token_preview(&token),
                    method.as_str(),
                    path
                );
                builder = builder.header("Authorization", &format!("Bearer {}", token));
            }
            None => log::warn!("No token found for {} {}", method.as_str(), path),
        }

        // Aborts the fetch once the timeout elapses; dropping the timer cancels it.
        let controller = web_sys::AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        let _timer = controller.clone().map(|c| {
            gloo_timers::callback::Timeout::new(self.timeout_ms, move || c.abort())
        });
        builder = builder.abort_signal(signal.as_ref());

        log::debug!("API request: {} {}", method.as_str(), path);

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::network(e.to_string()))?;

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let timed_out = signal.as_ref().is_some_and(|s| s.aborted());
                let error = if timed_out {
                    ApiError::network(format!(
                        "Request timed out after {} ms",
                        self.timeout_ms
                    ))
                } else {
                    ApiError::network(e.to_string())
                };
                return self.fail(method, path, error);
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !response.ok() {
            let error = ApiError::from_response(status, &text);
            return self.fail(method, path, error);
        }

        log::debug!("API response: {} {} -> {}", method.as_str(), path, status);

        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| {
            log::error!("Failed to parse {} {}: {}", method.as_str(), path, e);
            ApiError::decode(status, e)
        })
    }

    /// Central handling of a failed call: logging and token clearing. The
    /// caller still receives `error` unchanged.
    fn fail<T>(&self, method: HttpMethod, path: &str, error: ApiError) -> Result<T, ApiError> {
        match error.kind {
            ApiErrorKind::Server | ApiErrorKind::Unknown | ApiErrorKind::Network => log::error!(
                "API error [{}] {} {}: {}",
                error.kind,
                method.as_str(),
                path,
                error.message
            ),
            _ => log::warn!(
                "API error [{}] {} {}: {}",
                error.kind,
                method.as_str(),
                path,
                error.message
            ),
        }
        if error.is_unauthorized() {
            log::warn!("401 from {} {}, clearing stored token", method.as_str(), path);
        }
        reject(self.tokens.as_ref(), error)
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body)
        .map_err(|e| ApiError::network(format!("Failed to serialize request: {}", e)))
}

/// REST resource rooted at a base path, sharing the app's client.
#[derive(Clone)]
pub struct ApiResource {
    client: ApiClient,
    base_path: &'static str,
}

impl ApiResource {
    pub fn new(client: ApiClient, base_path: &'static str) -> Self {
        Self { client, base_path }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn path(&self, sub: &str) -> String {
        format!("{}{}", self.base_path, sub)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        sub: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.client.get(&self.path(sub), query).await
    }

    pub async fn post(&self, sub: &str, body: &Value) -> Result<Value, ApiError> {
        self.client.post(&self.path(sub), body).await
    }

    pub async fn put(&self, sub: &str, body: &Value) -> Result<Value, ApiError> {
        self.client.put(&self.path(sub), body).await
    }

    pub async fn delete(&self, sub: &str) -> Result<Value, ApiError> {
        self.client.delete(&self.path(sub)).await
    }
}

/// The client provided by `App`.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided")
}
