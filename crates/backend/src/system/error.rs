use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::api_error::{ApiError, ApiErrorKind};
use serde_json::json;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    /// The pricing API answered with a non-2xx status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The pricing API could not be reached.
    #[error("{0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => ApiErrorKind::Validation.as_str(),
            AppError::Unauthorized(_) => ApiErrorKind::Authentication.as_str(),
            AppError::Upstream { status, .. } => ApiErrorKind::from_status(Some(*status)).as_str(),
            AppError::Network(_) => ApiErrorKind::Network.as_str(),
            AppError::Internal(_) => ApiErrorKind::Server.as_str(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err.status {
            Some(status) => AppError::Upstream {
                status,
                message: err.message,
            },
            None => AppError::Network(err.message),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(format!("{:#}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let body = Json(json!({
            "message": self.to_string(),
            "code": self.code(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_kept() {
        let err: AppError = ApiError::from_response(422, r#"{"errors":{"otp":["کد نامعتبر است"]}}"#).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "VALIDATION");
        assert_eq!(err.to_string(), "کد نامعتبر است");
    }

    #[test]
    fn test_transport_failure_is_bad_gateway() {
        let err: AppError = ApiError::network("connection refused").into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "NETWORK");
    }

    #[test]
    fn test_response_body_shape() {
        let response = AppError::Unauthorized("no session".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
