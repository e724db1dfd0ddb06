use axum::{
    extract::Json,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
};
use contracts::system::auth::{
    validate_otp, ClientConfig, Session, SessionUser, SignInRequest,
};

use crate::shared::config;
use crate::system::auth::extractor::MaybeSession;
use crate::system::auth::session;
use crate::system::error::{AppError, Result};
use crate::system::upstream;

/// Exchanges the OTP for a pricing API token and opens the web session
pub async fn verify_otp(Json(request): Json<SignInRequest>) -> Result<impl IntoResponse> {
    let otp = request.otp.trim();
    validate_otp(otp).map_err(|msg| AppError::Validation(msg.to_string()))?;
    if request.token.trim().is_empty() {
        return Err(AppError::Unauthorized("Missing exchange token".into()));
    }

    let data = upstream::client()?.verify_otp(&request.token, otp).await?;
    let user = SessionUser::from_verified(data);

    let session_config = &config::get().session;
    let (token, session) = session::issue(user, session_config)?;
    tracing::info!("Session opened for user {}", session.user.id);

    let cookie = session::session_cookie(
        &session_config.cookie_name,
        &token,
        session_config.max_age_days,
    );
    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(session)))
}

/// Current session, or `null`
pub async fn session(MaybeSession(session): MaybeSession) -> Json<Option<Session>> {
    Json(session)
}

/// Closes the web session. The upstream token is revoked on a best-effort basis.
pub async fn signout(MaybeSession(session): MaybeSession) -> impl IntoResponse {
    if let Some(session) = session {
        match upstream::client() {
            Ok(client) => {
                if let Err(e) = client.logout(&session.user.access_token).await {
                    tracing::warn!("Upstream logout failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("{}", e),
        }
        tracing::info!("Session closed for user {}", session.user.id);
    }

    let cookie = session::clear_cookie(&config::get().session.cookie_name);
    (StatusCode::NO_CONTENT, AppendHeaders([(header::SET_COOKIE, cookie)]))
}

/// Runtime settings for the browser app
pub async fn client_config() -> Json<ClientConfig> {
    let upstream = &config::get().upstream;
    Json(ClientConfig {
        api_url: upstream.base_url().to_string(),
        timeout_ms: (upstream.timeout_secs * 1000) as u32,
    })
}
