use leptos::prelude::*;

/// Multi-line text input, used for long text cells
#[component]
pub fn Textarea(
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional, into)]
    on_input: Option<Callback<String>>,
    #[prop(optional)]
    rows: Option<u32>,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <textarea
            class="form__textarea"
            rows=rows.unwrap_or(2)
            disabled=move || disabled.get().unwrap_or(false)
            prop:value=move || value.get()
            on:input=move |ev| {
                if let Some(handler) = on_input {
                    handler.run(event_target_value(&ev));
                }
            }
        />
    }
}
