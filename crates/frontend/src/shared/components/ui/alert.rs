use leptos::prelude::*;
use thaw::*;

/// Inline error box. With `on_close` it gets a dismiss button, with
/// `on_retry` a retry button.
#[component]
pub fn Alert(
    #[prop(into)] message: Signal<String>,
    #[prop(optional, into)] on_close: Option<Callback<()>>,
    #[prop(default = None)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="warning-box warning-box--error" role="alert">
            <span class="warning-box__icon">"⚠"</span>
            <span class="warning-box__text">{move || message.get()}</span>
            {on_retry.map(|handler| view! {
                <button class="warning-box__retry" on:click=move |_| handler.run(())>
                    "تلاش مجدد"
                </button>
            })}
            {on_close.map(|handler| view! {
                <button
                    class="warning-box__close"
                    title="بستن"
                    on:click=move |_| handler.run(())
                >
                    "×"
                </button>
            })}
        </div>
    }
}

/// Spinner with a caption, centered in its container.
#[component]
pub fn Loading(#[prop(optional, into)] text: MaybeProp<String>) -> impl IntoView {
    view! {
        <Flex justify=FlexJustify::Center align=FlexAlign::Center gap=FlexGap::Small style="padding: var(--spacing-4xl);">
            <Spinner />
            <span>{move || text.get().unwrap_or_else(|| "در حال بارگذاری...".to_string())}</span>
        </Flex>
    }
}
