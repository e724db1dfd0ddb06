//! Storage slot for the pricing API bearer token.

use super::auth::SessionStatus;
use crate::shared::api_error::ApiError;
use std::sync::Mutex;

pub trait TokenStore: Send + Sync {
    fn get_token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn clear_token(&self);

    fn is_authenticated(&self) -> bool {
        self.get_token().is_some_and(|t| !t.is_empty())
    }
}

/// In-process store, used where no browser storage exists.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear_token(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// Mirrors the session into the store: authenticated writes the session's
/// access token, unauthenticated clears it, loading leaves it alone.
pub fn sync_session_token(store: &dyn TokenStore, status: &SessionStatus) {
    match status {
        SessionStatus::Authenticated(session) => store.set_token(&session.user.access_token),
        SessionStatus::Unauthenticated => store.clear_token(),
        SessionStatus::Loading => {}
    }
}

/// Side effect of every API response: a 401 drops the stored token.
/// Returns whether the token was cleared.
pub fn observe_response_status(store: &dyn TokenStore, status: u16) -> bool {
    if status == 401 {
        store.clear_token();
        true
    } else {
        false
    }
}

/// Ends a failed call: the status side effects run against `store` and the
/// caller gets back exactly the error it would have seen without them.
pub fn reject<T>(store: &dyn TokenStore, error: ApiError) -> Result<T, ApiError> {
    if let Some(status) = error.status {
        observe_response_status(store, status);
    }
    Err(error)
}

/// First ten characters followed by `...`, for logs and the debug page.
pub fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(10).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::{Session, SessionUser};
    use chrono::{TimeZone, Utc};

    fn session(token: &str) -> SessionStatus {
        SessionStatus::Authenticated(Session {
            user: SessionUser {
                id: "1".into(),
                mobile: Some("9120000000".into()),
                verified_at: None,
                panel_id: None,
                access_token: token.into(),
                name: None,
            },
            expires: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    #[test]
    fn test_sync_follows_session_transitions() {
        let store = MemoryTokenStore::new();

        sync_session_token(&store, &SessionStatus::Loading);
        assert_eq!(store.get_token(), None);

        sync_session_token(&store, &session("tok-123"));
        assert_eq!(store.get_token().as_deref(), Some("tok-123"));

        sync_session_token(&store, &SessionStatus::Loading);
        assert_eq!(store.get_token().as_deref(), Some("tok-123"));

        sync_session_token(&store, &SessionStatus::Unauthenticated);
        assert_eq!(store.get_token(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_unauthorized_response_clears_token() {
        let store = MemoryTokenStore::new();
        store.set_token("tok");

        assert!(!observe_response_status(&store, 500));
        assert!(store.is_authenticated());

        assert!(observe_response_status(&store, 401));
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_rejected_401_still_reaches_the_caller() {
        let store = MemoryTokenStore::new();
        store.set_token("tok");

        let error = ApiError::from_response(401, r#"{"message":"Unauthenticated."}"#);
        let result: Result<Vec<serde_json::Value>, ApiError> = reject(&store, error.clone());
        assert_eq!(result, Err(error));
        assert_eq!(store.get_token(), None);

        store.set_token("tok");
        let error = ApiError::network("timeout");
        assert_eq!(reject::<()>(&store, error.clone()), Err(error));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_token_preview() {
        assert_eq!(token_preview("abcdefghijklmnop"), "abcdefghij...");
        assert_eq!(token_preview("abc"), "abc...");
    }
}
