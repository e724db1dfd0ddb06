//! Classification of failed pricing-API calls.
//!
//! Every failed request is mapped to an [`ApiErrorKind`] and a user-facing
//! message. Classification only describes the failure: the caller always
//! receives the error itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    /// No response was received (connection refused, timeout, CORS).
    Network,
    Authentication,
    Authorization,
    NotFound,
    Validation,
    RateLimit,
    Server,
    Unknown,
}

impl ApiErrorKind {
    /// Kind for an HTTP status; `None` means the request never got a response.
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            None => Self::Network,
            Some(401) => Self::Authentication,
            Some(403) => Self::Authorization,
            Some(404) => Self::NotFound,
            Some(422) => Self::Validation,
            Some(429) => Self::RateLimit,
            Some(500 | 502 | 503 | 504) => Self::Server,
            Some(_) => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK",
            Self::Authentication => "AUTHENTICATION",
            Self::Authorization => "AUTHORIZATION",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::RateLimit => "RATE_LIMIT",
            Self::Server => "SERVER",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Fallback text when the response body carries no message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Network => {
                "Network error. Please check your internet connection and try again."
            }
            Self::Authentication => "Please log in to continue.",
            Self::Authorization => "You do not have permission to perform this action.",
            Self::NotFound => "The requested resource was not found.",
            Self::Validation => "Please check your input and try again.",
            Self::RateLimit => "Too many requests. Please wait and try again.",
            Self::Server => "Server error. Please try again later.",
            Self::Unknown => "An unexpected error occurred. Please try again.",
        }
    }

    /// Whether a retry could plausibly succeed. Nothing retries automatically.
    pub fn should_retry(&self) -> bool {
        matches!(self, Self::Network | Self::Server | Self::RateLimit)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed API call as delivered to UI code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    /// `(field, first message)` pairs from a validation body, in body order.
    pub field_errors: Vec<(String, String)>,
}

impl ApiError {
    /// Request never produced a response. `detail` is the transport's own text.
    pub fn network(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let kind = ApiErrorKind::Network;
        Self {
            kind,
            status: None,
            message: if detail.trim().is_empty() {
                kind.default_message().to_string()
            } else {
                detail
            },
            field_errors: Vec::new(),
        }
    }

    /// Builds the error from a non-2xx response and its raw body text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = ApiErrorKind::from_status(Some(status));
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let field_errors = parsed.as_ref().map(field_errors_from_body).unwrap_or_default();
        let message = parsed
            .as_ref()
            .and_then(message_from_body)
            .unwrap_or_else(|| kind.default_message().to_string());

        Self {
            kind,
            status: Some(status),
            message,
            field_errors,
        }
    }

    /// Response arrived but its body could not be decoded.
    pub fn decode(status: u16, detail: impl fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Unknown,
            status: Some(status),
            message: format!("Failed to parse response: {}", detail),
            field_errors: Vec::new(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Authentication
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// User-facing message from an error body: `message` first, then the first
/// entry of `errors` (first element when that entry is an array).
pub fn message_from_body(body: &Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        if !message.is_empty() {
            return Some(message.to_string());
        }
    }
    field_errors_from_body(body)
        .into_iter()
        .next()
        .map(|(_, message)| message)
}

fn field_errors_from_body(body: &Value) -> Vec<(String, String)> {
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return Vec::new();
    };
    errors
        .iter()
        .filter_map(|(field, entry)| {
            let message = match entry {
                Value::Array(items) => items.first().map(first_text)?,
                other => first_text(other),
            };
            Some((field.clone(), message))
        })
        .collect()
}

fn first_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ApiErrorKind::from_status(None), ApiErrorKind::Network);
        assert_eq!(ApiErrorKind::from_status(Some(401)), ApiErrorKind::Authentication);
        assert_eq!(ApiErrorKind::from_status(Some(403)), ApiErrorKind::Authorization);
        assert_eq!(ApiErrorKind::from_status(Some(404)), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_status(Some(422)), ApiErrorKind::Validation);
        assert_eq!(ApiErrorKind::from_status(Some(429)), ApiErrorKind::RateLimit);
        for status in [500, 502, 503, 504] {
            assert_eq!(ApiErrorKind::from_status(Some(status)), ApiErrorKind::Server);
        }
        assert_eq!(ApiErrorKind::from_status(Some(501)), ApiErrorKind::Unknown);
        assert_eq!(ApiErrorKind::from_status(Some(400)), ApiErrorKind::Unknown);
    }

    #[test]
    fn test_body_message_wins() {
        let err = ApiError::from_response(404, r#"{"message":"همکار یافت نشد"}"#);
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.message, "همکار یافت نشد");
    }

    #[test]
    fn test_validation_errors_first_entry() {
        let body = r#"{"errors":{"price":["قیمت الزامی است","دوم"],"title":"عنوان"}}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.message, "قیمت الزامی است");
        assert_eq!(
            err.field_errors,
            vec![
                ("price".to_string(), "قیمت الزامی است".to_string()),
                ("title".to_string(), "عنوان".to_string()),
            ]
        );
    }

    #[test]
    fn test_fallback_to_kind_message() {
        let err = ApiError::from_response(503, "<html>bad gateway</html>");
        assert_eq!(err.kind, ApiErrorKind::Server);
        assert_eq!(err.message, ApiErrorKind::Server.default_message());

        let err = ApiError::network("");
        assert_eq!(err.status, None);
        assert_eq!(err.message, ApiErrorKind::Network.default_message());
        assert_eq!(ApiError::network("timeout").message, "timeout");
    }

    #[test]
    fn test_retry_predicate() {
        assert!(ApiErrorKind::Network.should_retry());
        assert!(ApiErrorKind::RateLimit.should_retry());
        assert!(ApiErrorKind::Server.should_retry());
        assert!(!ApiErrorKind::Validation.should_retry());
        assert!(!ApiErrorKind::Authentication.should_retry());
    }
}
