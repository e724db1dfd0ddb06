//! Two-step OTP login: mobile number, then the texted code.

use contracts::system::auth::{
    format_countdown, validate_mobile, validate_otp, SignInRequest, OTP_RESEND_SECONDS,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::shared::api_client::use_api;
use crate::shared::components::ui::{Alert, Button, Input};
use crate::shared::locale::use_locale;
use crate::system::auth::api;
use crate::system::auth::context::{do_sign_in, use_auth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Mobile,
    Code,
}

/// Counts `remaining` down to zero, one tick per second.
fn start_countdown(remaining: RwSignal<u32>) {
    remaining.set(OTP_RESEND_SECONDS);
    spawn_local(async move {
        loop {
            TimeoutFuture::new(1_000).await;
            match remaining.try_get_untracked() {
                Some(n) if n > 1 => remaining.set(n - 1),
                Some(_) => {
                    remaining.set(0);
                    break;
                }
                // Page unmounted
                None => break,
            }
        }
    });
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api_client = StoredValue::new(use_api());
    let auth = use_auth();
    let locale = use_locale();
    let navigate = use_navigate();

    let step = RwSignal::new(Step::Mobile);
    let mobile = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let exchange_token = RwSignal::new(String::new());
    let dev_otp = RwSignal::new(Option::<String>::None);
    let mobile_error = RwSignal::new(Option::<String>::None);
    let otp_error = RwSignal::new(Option::<String>::None);
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);
    let countdown = RwSignal::new(0u32);

    // Already signed in (e.g. back button): go to the price tables
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if auth.status.with(|s| s.is_authenticated()) {
                navigate(&locale.get_untracked().localize("/prices"), Default::default());
            }
        });
    }

    let request_otp = move || {
        let number = mobile.get_untracked().trim().to_string();
        if let Err(message) = validate_mobile(&number) {
            mobile_error.set(Some(message.to_string()));
            return;
        }
        mobile_error.set(None);
        error_message.set(None);
        is_loading.set(true);

        spawn_local(async move {
            match api::send_otp(&api_client.get_value(), &number).await {
                Ok(data) => {
                    exchange_token.set(data.token.clone());
                    dev_otp.set(data.dev_otp());
                    otp.set(String::new());
                    step.set(Step::Code);
                    start_countdown(countdown);
                }
                Err(e) => error_message.set(Some(e.message)),
            }
            is_loading.set(false);
        });
    };

    let verify = move || {
        let code = otp.get_untracked().trim().to_string();
        if let Err(message) = validate_otp(&code) {
            otp_error.set(Some(message.to_string()));
            return;
        }
        otp_error.set(None);
        error_message.set(None);
        is_loading.set(true);

        let request = SignInRequest {
            token: exchange_token.get_untracked(),
            otp: code,
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match do_sign_in(auth, request).await {
                Ok(()) => navigate(&locale.get_untracked().localize("/prices"), Default::default()),
                Err(e) => error_message.set(Some(e.message)),
            }
            is_loading.set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match step.get_untracked() {
            Step::Mobile => request_otp(),
            Step::Code => verify(),
        }
    };

    let back_to_mobile = move |_| {
        step.set(Step::Mobile);
        otp_error.set(None);
        error_message.set(None);
    };

    view! {
        <div class="login-container" dir="rtl">
            <div class="login-box">
                <h1>"پنل مدیریت قیمت‌ها"</h1>
                <h2>
                    {move || match step.get() {
                        Step::Mobile => "ورود با شماره موبایل",
                        Step::Code => "کد تایید را وارد کنید",
                    }}
                </h2>

                <Show when=move || error_message.get().is_some()>
                    <Alert message=Signal::derive(move || error_message.get().unwrap_or_default()) />
                </Show>

                <form on:submit=on_submit>
                    <Show
                        when=move || step.get() == Step::Code
                        fallback=move || view! {
                            <Input
                                id="mobile"
                                label="شماره موبایل"
                                input_type="tel"
                                dir="ltr"
                                maxlength=10
                                placeholder="9123456789"
                                value=mobile
                                on_input=move |v: String| mobile.set(v)
                                error=mobile_error
                                helper="شماره را بدون صفر ابتدایی وارد کنید"
                                disabled=is_loading
                            />
                        }
                    >
                        <p class="login-info">
                            {move || format!("کد به شماره {} ارسال شد", mobile.get())}
                        </p>
                        <Input
                            id="otp"
                            label="کد تایید"
                            input_type="text"
                            dir="ltr"
                            maxlength=6
                            placeholder="------"
                            value=otp
                            on_input=move |v: String| otp.set(v)
                            error=otp_error
                            disabled=is_loading
                        />
                        {move || dev_otp.get().map(|code| view! {
                            <p class="login-info">"کد آزمایشی: " <strong>{code}</strong></p>
                        })}
                    </Show>

                    <Button button_type="submit" disabled=is_loading>
                        {move || match (is_loading.get(), step.get()) {
                            (true, _) => "لطفا صبر کنید...",
                            (false, Step::Mobile) => "دریافت کد",
                            (false, Step::Code) => "ورود",
                        }}
                    </Button>
                </form>

                <Show when=move || step.get() == Step::Code>
                    <div class="login-actions">
                        <Button
                            variant="ghost"
                            size="sm"
                            disabled=Signal::derive(move || countdown.get() > 0 || is_loading.get())
                            on_click=move |_| request_otp()
                        >
                            {move || match countdown.get() {
                                0 => "ارسال مجدد کد".to_string(),
                                n => format!("ارسال مجدد تا {}", format_countdown(n)),
                            }}
                        </Button>
                        <Button variant="ghost" size="sm" on_click=back_to_mobile>
                            "تغییر شماره"
                        </Button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
