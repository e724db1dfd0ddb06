use std::sync::Arc;

use contracts::system::auth::ClientConfig;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::api_client::ApiClient;
use crate::shared::storage::LocalStorageTokenStore;
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    // One API client for the whole app, token kept in localStorage.
    provide_context(ApiClient::new(&config, Arc::new(LocalStorageTokenStore)));

    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
