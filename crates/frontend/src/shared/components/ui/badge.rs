use leptos::prelude::*;

/// Small label chip; select cells render their option label with it.
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Outlined instead of filled
    #[prop(optional)]
    outlined: bool,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };
    let outline_class = if outlined { "badge--outlined" } else { "" };

    view! {
        <span class=move || format!("badge {} {}", variant_class(), outline_class)>
            {children()}
        </span>
    }
}
