use contracts::system::auth::SessionStatus;
use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;
use crate::shared::components::ui::Loading;
use crate::shared::locale::use_locale;

/// Component that requires authentication
/// Sends signed-out visitors to the login page of the current locale
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let locale = use_locale();
    // `None` while the session is being restored
    let signed_in = Memo::new(move |_| {
        auth.status.with(|status| match status {
            SessionStatus::Loading => None,
            SessionStatus::Authenticated(_) => Some(true),
            SessionStatus::Unauthenticated => Some(false),
        })
    });

    move || match signed_in.get() {
        Some(true) => children().into_any(),
        Some(false) => {
            let path = locale.get_untracked().localize("/login");
            view! { <Redirect path=path /> }.into_any()
        }
        None => view! { <Loading /> }.into_any(),
    }
}
