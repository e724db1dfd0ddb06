//! Auth status panel for diagnosing token sync problems.

use contracts::prices::category::PriceCategory;
use contracts::system::auth::SessionStatus;
use contracts::system::token_store::{sync_session_token, token_preview};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::prices::api::use_price_service;
use crate::shared::components::ui::{Badge, Button};
use crate::system::auth::context::use_auth;

#[derive(Debug, Clone, PartialEq)]
struct Probe {
    ok: bool,
    text: String,
}

#[component]
pub fn AuthDebugPage() -> impl IntoView {
    let auth = use_auth();
    let service = StoredValue::new(use_price_service());

    // Re-read on demand; localStorage is not reactive.
    let stored_token = RwSignal::new(service.with_value(|s| s.client().tokens().get_token()));
    let probe = RwSignal::new(Option::<Probe>::None);
    let testing = RwSignal::new(false);

    let refresh_stored = move || {
        stored_token.set(service.with_value(|s| s.client().tokens().get_token()));
    };

    let session_token = move || {
        auth.status
            .with(|s| s.session().map(|session| session.user.access_token.clone()))
    };

    let check_status = move |_| refresh_stored();

    let test_call = move |_| {
        testing.set(true);
        let service = service.get_value();
        spawn_local(async move {
            let result = service
                .price_table(PriceCategory::Papers, &[])
                .await;
            probe.set(Some(match result {
                Ok(rows) => Probe {
                    ok: true,
                    text: format!("API call successful ({} rows)", rows.len()),
                },
                Err(e) => Probe {
                    ok: false,
                    text: format!(
                        "[{}] {}{}",
                        e.kind,
                        e.message,
                        e.status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
                    ),
                },
            }));
            testing.set(false);
            refresh_stored();
        });
    };

    let force_sync = move |_| {
        let status = auth.status.get_untracked();
        service.with_value(|s| sync_session_token(s.client().tokens().as_ref(), &status));
        refresh_stored();
        probe.set(Some(match status {
            SessionStatus::Authenticated(_) => Probe {
                ok: true,
                text: "Token manually synced with API client".to_string(),
            },
            _ => Probe {
                ok: false,
                text: "No session token available to sync".to_string(),
            },
        }));
    };

    view! {
        <div class="page" dir="ltr">
            <h1 class="page__title">"Authentication Debug Panel"</h1>
            <Card attr:style="padding: var(--spacing-lg); max-width: 720px;">
                <Flex gap=FlexGap::Small>
                    <Button variant="secondary" on_click=check_status>"Check Auth Status"</Button>
                    <Button variant="secondary" disabled=testing on_click=test_call>"Test API Call"</Button>
                    <Button variant="secondary" on_click=force_sync>"Force Token Sync"</Button>
                </Flex>

                <h3>"Session"</h3>
                <Badge
                    variant=Signal::derive(move || {
                        if auth.status.with(|s| s.is_authenticated()) { "success" } else { "error" }.to_string()
                    })
                    outlined=true
                >
                    {move || auth.status.with(|s| s.label())}
                </Badge>
                {move || auth.status.with(|s| s.session().cloned()).map(|session| view! {
                    <dl class="debug-list">
                        <dt>"User ID"</dt><dd>{session.user.id.clone()}</dd>
                        <dt>"Mobile"</dt><dd>{session.user.mobile.clone().unwrap_or_default()}</dd>
                        <dt>"Session token"</dt><dd>{token_preview(&session.user.access_token)}</dd>
                        <dt>"Expires"</dt><dd>{session.expires.to_rfc3339()}</dd>
                    </dl>
                })}

                <h3>"API client"</h3>
                <dl class="debug-list">
                    <dt>"Base URL"</dt>
                    <dd>{service.with_value(|s| s.client().base_url().to_string())}</dd>
                    <dt>"Stored token"</dt>
                    <dd>{move || stored_token.get().map(|t| token_preview(&t)).unwrap_or_else(|| "none".to_string())}</dd>
                    <dt>"Matches session"</dt>
                    <dd>{move || match (stored_token.get(), session_token()) {
                        (Some(stored), Some(session)) if stored == session => "yes",
                        (None, None) => "yes (signed out)",
                        _ => "no",
                    }}</dd>
                </dl>

                {move || probe.get().map(|p| view! {
                    <div class={if p.ok { "info-box info-box--success" } else { "warning-box warning-box--error" }}>
                        {p.text}
                    </div>
                })}
            </Card>
        </div>
    }
}
