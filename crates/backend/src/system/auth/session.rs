use anyhow::{Context, Result};
use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use contracts::system::auth::{Session, SessionClaims, SessionUser};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::shared::config::SessionConfig;

/// Signs a session JWT for `user` valid for `max_age_days`.
pub fn issue(user: SessionUser, config: &SessionConfig) -> Result<(String, Session)> {
    issue_at(user, config, Utc::now())
}

fn issue_at(
    user: SessionUser,
    config: &SessionConfig,
    now: DateTime<Utc>,
) -> Result<(String, Session)> {
    let expires = now + chrono::Duration::days(config.max_age_days);
    let claims = SessionClaims {
        sub: user.id.clone(),
        user: user.clone(),
        iat: now.timestamp(),
        exp: expires.timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .context("Failed to encode session token")?;

    Ok((token, Session { user, expires }))
}

/// Validates the signature and expiry and rebuilds the session.
pub fn decode_session(token: &str, secret: &str) -> Result<Session> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode session token")?;

    let claims = token_data.claims;
    tracing::debug!("Session {} for user {}", claims.jti, claims.sub);
    let expires = DateTime::<Utc>::from_timestamp(claims.exp, 0)
        .context("Session expiry out of range")?;
    Ok(Session {
        user: claims.user,
        expires,
    })
}

pub fn session_cookie(name: &str, token: &str, max_age_days: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name,
        token,
        max_age_days * 24 * 60 * 60
    )
}

pub fn clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

/// Value of cookie `name` from the `Cookie` headers, if present and non-empty.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Session carried by the request cookie. Invalid or expired tokens count
/// as no session.
pub fn session_from_headers(headers: &HeaderMap, config: &SessionConfig) -> Option<Session> {
    let token = cookie_value(headers, &config.cookie_name)?;
    match decode_session(&token, &config.secret) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::debug!("Ignoring session cookie: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret".to_string(),
            max_age_days: 30,
            cookie_name: "print_panel_session".to_string(),
        }
    }

    fn user() -> SessionUser {
        SessionUser {
            id: "7".into(),
            mobile: Some("9121234567".into()),
            verified_at: None,
            panel_id: None,
            access_token: "upstream-token".into(),
            name: Some("9121234567".into()),
        }
    }

    #[test]
    fn test_issue_and_decode() {
        let (token, session) = issue(user(), &config()).unwrap();
        let decoded = decode_session(&token, "test-secret").unwrap();
        assert_eq!(decoded.user, session.user);
        assert_eq!(decoded.user.access_token, "upstream-token");
        assert_eq!(decoded.expires.timestamp(), session.expires.timestamp());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (token, _) = issue(user(), &config()).unwrap();
        assert!(decode_session(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_session_is_rejected() {
        let issued = Utc::now() - chrono::Duration::days(40);
        let (token, _) = issue_at(user(), &config(), issued).unwrap();
        assert!(decode_session(&token, "test-secret").is_err());
    }

    #[test]
    fn test_cookie_round_trip_through_headers() {
        let config = config();
        let (token, _) = issue(user(), &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", config.cookie_name, token)).unwrap(),
        );
        let session = session_from_headers(&headers, &config).unwrap();
        assert_eq!(session.user.id, "7");

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("print_panel_session=garbage"));
        assert!(session_from_headers(&headers, &config).is_none());
    }

    #[test]
    fn test_cookie_strings() {
        assert_eq!(
            session_cookie("s", "tok", 1),
            "s=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400"
        );
        assert!(clear_cookie("s").ends_with("Max-Age=0"));
    }
}
