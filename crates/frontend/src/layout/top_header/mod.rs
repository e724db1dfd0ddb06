//! Application top bar: sidebar toggle, title, locale switch, user and logout.

use contracts::shared::i18n::Locale;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::shared::locale::{switch_locale, use_locale};
use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let auth = use_auth();
    let locale = use_locale();
    let location = use_location();
    let navigate = use_navigate();

    let on_locale_change = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::Event| {
            let code = event_target_value(&ev);
            if let Some(target) = Locale::from_code(&code) {
                let path = switch_locale(&location.pathname.get_untracked(), target);
                navigate(&path, Default::default());
            }
        }
    };

    let logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            do_logout(auth).await;
            navigate(&locale.get_untracked().localize("/login"), Default::default());
        });
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "بستن منو" } else { "نمایش منو" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"پنل قیمت‌گذاری چاپ"</span>
            </div>

            <div class="top-header__actions">
                <select class="top-header__locale" on:change=on_locale_change>
                    {Locale::ALL.into_iter().map(|l| view! {
                        <option value=l.code() selected=move || locale.get() == l>
                            {l.native_name()}
                        </option>
                    }).collect_view()}
                </select>

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth.status.with(|s| {
                            s.session()
                                .map(|session| session.user.display_name())
                                .unwrap_or_else(|| "مهمان".to_string())
                        })}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="خروج">
                    {icon("log-out")}
                </button>
            </div>
        </header>
    }
}
