//! Filter selectors above the price table.
//!
//! Each one loads its reference list once on mount. The empty option means
//! "all" and reports `None`; a failed load replaces the select with an alert.

use std::future::Future;

use contracts::prices::category::PriceCategory;
use contracts::prices::filters::selection;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::prices::api::use_price_service;
use crate::shared::components::ui::{Alert, Select};

#[derive(Debug, Clone, Default, PartialEq)]
struct OptionList {
    loading: bool,
    items: Vec<(String, String)>,
    error: Option<String>,
}

fn load_options<Fut>(fetch: Fut) -> RwSignal<OptionList>
where
    Fut: Future<Output = Result<Vec<(String, String)>, ApiError>> + 'static,
{
    let list = RwSignal::new(OptionList {
        loading: true,
        ..Default::default()
    });
    spawn_local(async move {
        let result = fetch.await;
        list.set(match result {
            Ok(items) => OptionList {
                loading: false,
                items,
                error: None,
            },
            Err(e) => OptionList {
                loading: false,
                items: Vec::new(),
                error: Some(e.message),
            },
        });
    });
    list
}

#[component]
fn FilterSelect(
    id: &'static str,
    label: &'static str,
    empty_label: &'static str,
    error_prefix: &'static str,
    list: RwSignal<OptionList>,
    #[prop(into)] value: Signal<Option<String>>,
    on_change: Callback<Option<String>>,
) -> impl IntoView {
    move || match list.with(|l| l.error.clone()) {
        Some(error) => view! {
            <Alert message=format!("{}: {}", error_prefix, error) />
        }
        .into_any(),
        None => view! {
            <div class="price-filter">
                <Select
                    id=id
                    label=label
                    empty_label=empty_label
                    value=Signal::derive(move || value.get().unwrap_or_default())
                    options=Signal::derive(move || list.with(|l| l.items.clone()))
                    disabled=Signal::derive(move || list.with(|l| l.loading))
                    on_change=move |raw: String| on_change.run(selection(&raw))
                />
                <Show when=move || list.with(|l| l.loading)>
                    <span class="price-filter__loading">"..."</span>
                </Show>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn CooperatorSelector(
    category: PriceCategory,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] on_change: Callback<Option<String>>,
) -> impl IntoView {
    let service = use_price_service();
    let list = load_options(async move {
        let cooperators = service.cooperators(category).await?;
        Ok(cooperators.iter().map(|c| (c.value(), c.label())).collect())
    });

    view! {
        <FilterSelect
            id="cooperator"
            label="انتخاب همکار"
            empty_label="همه همکاران"
            error_prefix="خطا در بارگذاری لیست همکاران"
            list=list
            value=value
            on_change=on_change
        />
    }
}

#[component]
pub fn CirculationRangeSelector(
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] on_change: Callback<Option<String>>,
) -> impl IntoView {
    let service = use_price_service();
    let list = load_options(async move {
        let ranges = service.circulation_ranges().await?;
        Ok(ranges.iter().map(|r| (r.value(), r.label())).collect())
    });

    view! {
        <FilterSelect
            id="circulation-range"
            label="انتخاب محدوده تیراژ"
            empty_label="همه محدوده‌ها"
            error_prefix="خطا در بارگذاری لیست محدوده تیراژ"
            list=list
            value=value
            on_change=on_change
        />
    }
}

#[component]
pub fn BoxTypeSelector(
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] on_change: Callback<Option<String>>,
) -> impl IntoView {
    let service = use_price_service();
    let list = load_options(async move {
        let types = service.box_types().await?;
        Ok(types.into_iter().map(|t| (t.key, t.title)).collect())
    });

    view! {
        <FilterSelect
            id="box-type"
            label="نوع جعبه"
            empty_label="همه انواع"
            error_prefix="خطا در بارگذاری انواع جعبه"
            list=list
            value=value
            on_change=on_change
        />
    }
}

#[component]
pub fn BinderyTypeSelector(
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(into)] on_change: Callback<Option<String>>,
) -> impl IntoView {
    let service = use_price_service();
    let list = load_options(async move {
        let types = service.bindery_types().await?;
        Ok(types.into_iter().map(|t| (t.key, t.title)).collect())
    });

    view! {
        <FilterSelect
            id="bindery-type"
            label="نوع صحافی"
            empty_label="همه انواع"
            error_prefix="خطا در بارگذاری انواع صحافی"
            list=list
            value=value
            on_change=on_change
        />
    }
}
