use leptos::prelude::*;

/// Labelled input with an optional error line under it
#[component]
pub fn Input(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional, into)]
    on_input: Option<Callback<String>>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// Input type: "text" (default), "number", "tel", etc.
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    /// Validation message; the input is marked invalid while set
    #[prop(optional, into)]
    error: MaybeProp<String>,
    /// Hint shown when there is no error
    #[prop(optional, into)]
    helper: MaybeProp<String>,
    /// Text direction override, e.g. "ltr" for digits in an rtl page
    #[prop(optional, into)]
    dir: MaybeProp<String>,
    #[prop(optional)]
    maxlength: Option<u32>,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let input_id = move || id.get().unwrap_or_default();
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let invalid = move || error.get().is_some_and(|e| !e.is_empty());

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=input_id>
                    {l}
                </label>
            })}
            <input
                id=input_id
                class=move || if invalid() { "form__input form__input--invalid" } else { "form__input" }
                type=input_t
                dir=move || dir.get().unwrap_or_default()
                maxlength=maxlength.map(|m| m.to_string())
                prop:value=move || value.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get().unwrap_or(false)
                aria-invalid=move || invalid().to_string()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
            {move || match error.get().filter(|e| !e.is_empty()) {
                Some(e) => Some(view! { <span class="form__error">{e}</span> }.into_any()),
                None => helper
                    .get()
                    .map(|h| view! { <span class="form__helper">{h}</span> }.into_any()),
            }}
        </div>
    }
}
