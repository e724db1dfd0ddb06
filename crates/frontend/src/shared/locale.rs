use contracts::shared::i18n::Locale;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

/// Locale from the `:lang` route segment; unknown codes fall back to Persian.
pub fn use_locale() -> Memo<Locale> {
    let params = use_params_map();
    Memo::new(move |_| {
        params
            .read()
            .get("lang")
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or_default()
    })
}

/// Same page under another locale: `/fa/prices/papers` → `/en/prices/papers`.
pub fn switch_locale(path: &str, to: Locale) -> String {
    let trimmed = path.trim_start_matches('/');
    let rest = match trimmed.split_once('/') {
        Some((first, rest)) if Locale::from_code(first).is_some() => rest,
        None if Locale::from_code(trimmed).is_some() => "prices",
        _ => trimmed,
    };
    to.localize(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_locale_keeps_the_page() {
        assert_eq!(switch_locale("/fa/prices/papers", Locale::En), "/en/prices/papers");
        assert_eq!(switch_locale("/ar/login", Locale::Fa), "/fa/login");
        assert_eq!(switch_locale("/fr", Locale::Ar), "/ar/prices");
        assert_eq!(switch_locale("/prices", Locale::En), "/en/prices");
    }
}
