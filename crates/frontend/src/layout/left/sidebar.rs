//! Sidebar with the price-category menu.
//!
//! Ungrouped categories are plain links; grouped ones sit under a
//! collapsible parent item.

use contracts::prices::category::{navigation, NavGroup, PriceCategory};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::shared::icons::icon;
use crate::shared::locale::use_locale;

#[component]
fn CategoryLink(category: PriceCategory) -> impl IntoView {
    let locale = use_locale();
    let location = use_location();
    let href = Memo::new(move |_| locale.get().localize(&format!("/prices/{}", category.slug())));
    let is_active = move || location.pathname.get() == href.get();

    view! {
        <A href=move || href.get()>
            <div class="app-sidebar__item" class:app-sidebar__item--active=is_active>
                <div class="app-sidebar__item-content">
                    <i class=category.icon()></i>
                    <span>{category.title()}</span>
                </div>
            </div>
        </A>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let locale = use_locale();
    let location = use_location();
    let expanded_groups = RwSignal::new(Vec::<NavGroup>::new());

    // Open the group holding the current category
    Effect::new(move |_| {
        let path = location.pathname.get();
        let current = path
            .rsplit('/')
            .next()
            .and_then(PriceCategory::from_slug);
        if let Some(current) = current {
            let group = navigation()
                .into_iter()
                .find(|(_, categories)| categories.contains(&current))
                .map(|(group, _)| group);
            if let Some(group) = group.filter(|g| *g != NavGroup::Root) {
                if !expanded_groups.with_untracked(|g| g.contains(&group)) {
                    expanded_groups.update(|g| g.push(group));
                }
            }
        }
    });

    view! {
        <nav class="app-sidebar__content">
            <A href=move || locale.get().localize("/prices")>
                <div class="app-sidebar__item app-sidebar__item--heading">
                    <div class="app-sidebar__item-content">
                        {icon("table")}
                        <span>"جداول قیمت"</span>
                    </div>
                </div>
            </A>
            {navigation().into_iter().map(|(group, categories)| match group.title() {
                None => categories
                    .into_iter()
                    .map(|category| view! { <CategoryLink category=category /> })
                    .collect_view()
                    .into_any(),
                Some(title) => {
                    let items = StoredValue::new(categories);
                    let is_expanded = move || expanded_groups.with(|g| g.contains(&group));
                    view! {
                        <div>
                            <div
                                class="app-sidebar__item"
                                on:click=move |_| {
                                    expanded_groups.update(|items| {
                                        if let Some(pos) = items.iter().position(|g| *g == group) {
                                            items.remove(pos);
                                        } else {
                                            items.push(group);
                                        }
                                    });
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    <span>{title}</span>
                                </div>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=is_expanded
                                >
                                    {move || if is_expanded() { icon("chevron-down") } else { icon("chevron-left") }}
                                </div>
                            </div>
                            <Show when=is_expanded>
                                <div class="app-sidebar__children">
                                    {items.get_value().into_iter().map(|category| view! {
                                        <CategoryLink category=category />
                                    }).collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                    .into_any()
                }
            }).collect_view()}
        </nav>
    }
}
