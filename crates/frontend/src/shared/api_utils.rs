//! URL helpers for the two HTTP surfaces the app talks to.
//!
//! - the dashboard backend (session routes, runtime config), same origin
//! - the pricing API, whose base URL comes from the backend config

use contracts::system::auth::ClientConfig;
use gloo_net::http::Request;

/// Origin of the page, e.g. `http://localhost:3000`.
///
/// Empty string if window is not available, which keeps URLs relative.
pub fn backend_base() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Build a full backend URL from a path starting with `/api/`.
pub fn backend_url(path: &str) -> String {
    format!("{}{}", backend_base(), path)
}

/// `base + path`, tolerating a trailing slash on the base.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Appends URL-encoded query parameters; empty values are skipped.
pub fn with_query(url: &str, params: &[(&str, String)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, query.join("&"))
    }
}

/// Runtime settings from `GET /api/config`; defaults when the backend is
/// unreachable (e.g. `trunk serve` without a backend).
pub async fn load_client_config() -> ClientConfig {
    let response = match Request::get(&backend_url("/api/config")).send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            log::warn!("GET /api/config answered {}, using defaults", response.status());
            return ClientConfig::default();
        }
        Err(e) => {
            log::warn!("GET /api/config failed ({}), using defaults", e);
            return ClientConfig::default();
        }
    };

    match response.json::<ClientConfig>().await {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Invalid /api/config payload ({}), using defaults", e);
            ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://127.0.0.1:8000/api/v1/", "/client/offset/papers"),
            "http://127.0.0.1:8000/api/v1/client/offset/papers"
        );
        assert_eq!(join_url("http://a", "b"), "http://a/b");
    }

    #[test]
    fn test_with_query_encodes_and_skips_empty() {
        let params = vec![
            ("cooperator", "12".to_string()),
            ("range_id", String::new()),
            ("type", "جعبه ساده".to_string()),
        ];
        assert_eq!(
            with_query("/client/offset/boxes", &params),
            "/client/offset/boxes?cooperator=12&type=%D8%AC%D8%B9%D8%A8%D9%87%20%D8%B3%D8%A7%D8%AF%D9%87"
        );
        assert_eq!(with_query("/x", &[]), "/x");
    }
}
