use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;

use contracts::shared::i18n::Locale;

use crate::layout::Shell;
use crate::prices::ui::pages::{CategoryPage, NotFound, PricesOverview};
use crate::shared::locale::use_locale;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::auth_debug::AuthDebugPage;
use crate::system::pages::login::LoginPage;

/// Keeps `<html lang dir>` in step with the locale in the URL.
#[component]
fn DocumentLocale() -> impl IntoView {
    let location = use_location();

    Effect::new(move |_| {
        let locale = Locale::from_path(&location.pathname.get()).unwrap_or_default();
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            let _ = root.set_attribute("lang", locale.code());
            let _ = root.set_attribute("dir", locale.direction().as_str());
        }
    });
}

/// Signed-in area: shell around the matched page
#[component]
fn PrivateLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet />
            </Shell>
        </RequireAuth>
    }
}

#[component]
fn LocaleHome() -> impl IntoView {
    let locale = use_locale();
    view! { <Redirect path=locale.get_untracked().localize("/prices") /> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <DocumentLocale />
            <Routes fallback=|| view! { <NotFound /> }>
                <Route
                    path=path!("/")
                    view=|| view! { <Redirect path=Locale::default().localize("/prices") /> }
                />
                <Route path=path!("/:lang/login") view=LoginPage />
                <ParentRoute path=path!("/:lang") view=PrivateLayout>
                    <Route path=path!("") view=LocaleHome />
                    <Route path=path!("prices") view=PricesOverview />
                    <Route path=path!("prices/:category") view=CategoryPage />
                    <Route path=path!("debug/auth") view=AuthDebugPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
