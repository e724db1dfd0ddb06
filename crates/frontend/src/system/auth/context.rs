use contracts::shared::api_error::ApiError;
use contracts::system::auth::{SessionStatus, SignInRequest};
use contracts::system::token_store::sync_session_token;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api_client::use_api;

/// Session state shared by the whole app
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub status: RwSignal<SessionStatus>,
}

/// Auth context provider component
///
/// Restores the session from the backend cookie on mount and keeps the API
/// client's stored token in step with the session status.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext {
        status: RwSignal::new(SessionStatus::Loading),
    };
    provide_context(auth);

    let tokens = use_api().tokens();
    Effect::new(move |_| {
        auth.status.with(|status| sync_session_token(tokens.as_ref(), status));
    });

    spawn_local(async move {
        let status = match api::fetch_session().await {
            Ok(Some(session)) => SessionStatus::Authenticated(session),
            Ok(None) => SessionStatus::Unauthenticated,
            Err(e) => {
                log::warn!("Session restore failed: {}", e);
                SessionStatus::Unauthenticated
            }
        };
        auth.status.set(status);
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

/// Helper: Perform OTP sign-in
pub async fn do_sign_in(auth: AuthContext, request: SignInRequest) -> Result<(), ApiError> {
    let session = api::sign_in(&request).await?;
    log::info!("Signed in as {}", session.user.display_name());
    auth.status.set(SessionStatus::Authenticated(session));
    Ok(())
}

/// Helper: Perform logout
///
/// The local session ends even when the backend call fails.
pub async fn do_logout(auth: AuthContext) {
    if let Err(e) = api::sign_out().await {
        log::warn!("Sign-out request failed: {}", e);
    }
    auth.status.set(SessionStatus::Unauthenticated);
}
