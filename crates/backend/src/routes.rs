use axum::{
    body::Body,
    http::{Method, Request},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use contracts::shared::i18n::Locale;
use tower_http::services::{ServeDir, ServeFile};

use crate::shared::config;
use crate::system;

/// All application routes
pub fn configure_routes() -> Router {
    let static_dir = std::path::PathBuf::from(&config::get().server.static_dir);
    let index = static_dir.join("index.html");

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SESSION ROUTES
        // ========================================
        .route(
            "/api/auth/verify-otp",
            post(system::handlers::auth::verify_otp),
        )
        .route("/api/auth/session", get(system::handlers::auth::session))
        .route("/api/auth/signout", post(system::handlers::auth::signout))
        .route("/api/config", get(system::handlers::auth::client_config))
        // Browser app; unknown paths get index.html for client-side routing
        .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
        .layer(middleware::from_fn(redirect_to_locale))
}

async fn redirect_to_locale(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::GET {
        if let Some(target) = locale_redirect(req.uri().path()) {
            let target = match req.uri().query() {
                Some(query) => format!("{}?{}", target, query),
                None => target,
            };
            return Redirect::temporary(&target).into_response();
        }
    }
    next.run(req).await
}

/// Where a page path without a usable locale prefix should go.
///
/// `/` and `/{locale}` land on the prices overview; other page paths get the
/// default locale prepended. API routes, static assets and already localized
/// paths are left alone.
pub fn locale_redirect(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Some(Locale::default().localize("/prices"));
    }

    let mut segments = trimmed.trim_start_matches('/').split('/');
    let first = segments.next().unwrap_or_default();

    if let Some(locale) = Locale::from_code(first) {
        return match segments.next() {
            None => Some(locale.localize("/prices")),
            Some(_) => None,
        };
    }

    if first == "api" || first == "health" {
        return None;
    }

    let last = trimmed.rsplit('/').next().unwrap_or_default();
    if last.contains('.') {
        return None;
    }

    Some(Locale::default().localize(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use contracts::system::auth::{ClientConfig, Session, SessionUser};
    use tower::ServiceExt;

    #[test]
    fn test_locale_redirect_rules() {
        assert_eq!(locale_redirect("/").as_deref(), Some("/fa/prices"));
        assert_eq!(locale_redirect("/en").as_deref(), Some("/en/prices"));
        assert_eq!(locale_redirect("/en/").as_deref(), Some("/en/prices"));
        assert_eq!(locale_redirect("/prices/papers").as_deref(), Some("/fa/prices/papers"));
        assert_eq!(locale_redirect("/login").as_deref(), Some("/fa/login"));

        assert_eq!(locale_redirect("/fa/prices"), None);
        assert_eq!(locale_redirect("/ar/prices/uvs"), None);
        assert_eq!(locale_redirect("/api/config"), None);
        assert_eq!(locale_redirect("/health"), None);
        assert_eq!(locale_redirect("/frontend-abc123_bg.wasm"), None);
        assert_eq!(locale_redirect("/assets/app.css"), None);
    }

    #[tokio::test]
    async fn test_root_redirects_to_prices() {
        let router = configure_routes();
        let req = Request::builder().uri("/?tab=1").body(Body::empty()).unwrap();
        let resp = router.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/fa/prices?tab=1"
        );
    }

    #[tokio::test]
    async fn test_health_and_client_config() {
        let router = configure_routes();

        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let req = Request::builder().uri("/api/config").body(Body::empty()).unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let config: ClientConfig = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(config.api_url, config::get().upstream.base_url());
        assert_eq!(config.timeout_ms as u64, config::get().upstream.timeout_secs * 1000);
    }

    #[tokio::test]
    async fn test_session_endpoint_reads_cookie() {
        let router = configure_routes();

        let req = Request::builder()
            .uri("/api/auth/session")
            .body(Body::empty())
            .unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"null");

        let session_config = &config::get().session;
        let user = SessionUser {
            id: "42".into(),
            mobile: Some("9120000000".into()),
            verified_at: None,
            panel_id: None,
            access_token: "tok".into(),
            name: None,
        };
        let (token, _) = system::auth::session::issue(user, session_config).unwrap();

        let req = Request::builder()
            .uri("/api/auth/session")
            .header(header::COOKIE, format!("{}={}", session_config.cookie_name, token))
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let session: Option<Session> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(session.unwrap().user.access_token, "tok");
    }

    #[tokio::test]
    async fn test_verify_otp_rejects_malformed_code() {
        let router = configure_routes();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/verify-otp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"token":"exchange","otp":"12"}"#))
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_signout_clears_cookie() {
        let router = configure_routes();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/signout")
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.ends_with("Max-Age=0"));
    }
}
