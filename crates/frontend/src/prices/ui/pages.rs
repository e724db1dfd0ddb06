use contracts::prices::category::{navigation, PriceCategory};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use thaw::*;

use super::container::PriceTableContainer;
use crate::shared::locale::use_locale;

/// All categories as cards, grouped like the sidebar
#[component]
pub fn PricesOverview() -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="page">
            <h1 class="page__title">"جداول قیمت"</h1>
            {navigation().into_iter().map(|(group, categories)| view! {
                <section class="price-overview__group">
                    {group.title().map(|title| view! { <h2 class="price-overview__group-title">{title}</h2> })}
                    <div class="price-overview__grid">
                        {categories.into_iter().map(|category| {
                            let href = move || locale.get().localize(&format!("/prices/{}", category.slug()));
                            view! {
                                <A href=href>
                                    <Card attr:class=format!("price-overview__card price-overview__card--{}", category.color())>
                                        <i class=category.icon()></i>
                                        <h3>{category.title()}</h3>
                                        <p>{category.description()}</p>
                                    </Card>
                                </A>
                            }
                        }).collect_view()}
                    </div>
                </section>
            }).collect_view()}
        </div>
    }
}

/// `/:lang/prices/:category`
#[component]
pub fn CategoryPage() -> impl IntoView {
    let params = use_params_map();
    let category = Memo::new(move |_| {
        params
            .read()
            .get("category")
            .and_then(|slug| PriceCategory::from_slug(&slug))
    });

    move || match category.get() {
        Some(category) => view! {
            <div class="page">
                <PriceTableContainer category=category />
            </div>
        }
        .into_any(),
        None => view! { <NotFound /> }.into_any(),
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="page page--not-found">
            <h1>"۴۰۴"</h1>
            <p>"صفحه مورد نظر یافت نشد"</p>
            <A href=move || locale.get().localize("/prices")>"بازگشت به جداول قیمت"</A>
        </div>
    }
}
