//! One category's price table with its filters, loading and mutations.
//!
//! Every filter change or refresh starts a fetch with a fresh ticket; a
//! response is applied only if no newer fetch started since. Mutations never
//! touch local rows: success refetches, failure shows a prefixed alert and
//! leaves the table as it was.

use std::future::Future;

use contracts::prices::category::PriceCategory;
use contracts::prices::load_state::{LoadState, Mutation, PriceTableState};
use contracts::prices::validation::{
    default_values, price_form_schema, validate_price_data, FieldRule, ValidationErrors,
};
use contracts::shared::api_error::ApiError;
use contracts::shared::json_path::{display_text, read_path, write_path};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use thaw::*;

use super::selectors::{
    BinderyTypeSelector, BoxTypeSelector, CirculationRangeSelector, CooperatorSelector,
};
use super::table::DynamicPriceTable;
use crate::prices::api::use_price_service;
use crate::shared::components::ui::{Alert, Button, Input, Loading, Select};

/// Runs one mutation request and routes its outcome into `state`.
fn mutate<Fut>(
    state: RwSignal<PriceTableState>,
    mutation: Mutation,
    request: Fut,
    on_success: impl FnOnce() + 'static,
) where
    Fut: Future<Output = Result<Value, ApiError>> + 'static,
{
    state.update(|s| {
        s.saving = true;
        s.mutation_error = None;
    });
    spawn_local(async move {
        let result = request.await;
        state.update(|s| s.saving = false);
        match result {
            Ok(_) => {
                log::info!("{:?} succeeded", mutation);
                on_success();
            }
            Err(e) => state.update(|s| s.mutation_failed(mutation, &e.message)),
        }
    });
}

#[component]
pub fn PriceTableContainer(category: PriceCategory) -> impl IntoView {
    let service = StoredValue::new(use_price_service());
    let state = RwSignal::new(PriceTableState::new(category));
    let created = RwSignal::new(0u32);
    let show_form = RwSignal::new(false);

    let load = move || {
        let Some(ticket) = state.try_update(|s| s.begin_fetch()) else {
            return;
        };
        let params = state.with_untracked(|s| s.query_params());
        let service = service.get_value();
        spawn_local(async move {
            let result = service.price_table(category, &params).await;
            let applied = state.try_update(|s| s.finish_fetch(ticket, result));
            if applied == Some(false) {
                log::debug!("Dropped superseded {} fetch #{}", category, ticket);
            }
        });
    };

    // Refetch whenever the effective query changes
    let query = Memo::new(move |_| state.with(|s| s.query_params()));
    Effect::new(move |_| {
        query.track();
        load();
    });

    let after_create = move || {
        created.update(|n| *n += 1);
        load();
    };

    let create_entry = move |mut entry: Value| {
        state.with_untracked(|s| s.filters.attach_cooperator(&mut entry));
        let service = service.get_value();
        mutate(
            state,
            Mutation::Create,
            async move { service.create_entry(category, &entry).await },
            after_create,
        );
    };

    let update_entry = move |(id, row): (Value, Value)| {
        let service = service.get_value();
        mutate(
            state,
            Mutation::Update,
            async move { service.update_entry(category, &id, &row).await },
            load,
        );
    };

    let delete_entry = move |id: Value| {
        let service = service.get_value();
        mutate(
            state,
            Mutation::Delete,
            async move { service.delete_entry(category, &id).await },
            load,
        );
    };

    let bulk_save = move |rows: Vec<Value>| {
        let service = service.get_value();
        mutate(
            state,
            Mutation::BulkSave,
            async move { service.bulk_update(category, rows).await },
            move || {
                state.update(|s| s.bulk_saved());
                load();
            },
        );
    };

    let selectors = state.with_untracked(|s| s.selectors());
    let is_editing = Signal::derive(move || state.with(|s| s.is_editing));
    let saving = Signal::derive(move || state.with(|s| s.saving));
    let busy = Signal::derive(move || state.with(|s| s.is_loading()));

    view! {
        <Card attr:style="padding: var(--spacing-lg);">
            <div class="price-card__header">
                <div>
                    <h2 class="price-card__title">{category.title()}</h2>
                    <p class="price-card__subtitle">{category.description()}</p>
                </div>
                <Flex gap=FlexGap::Small>
                    <Button
                        variant=Signal::derive(move || if is_editing.get() { "secondary" } else { "primary" }.to_string())
                        disabled=busy
                        on_click=move |_| state.update(|s| s.toggle_editing())
                    >
                        {move || if is_editing.get() { "لغو ویرایش" } else { "ویرایش" }}
                    </Button>
                    <Button variant="ghost" title="بارگذاری مجدد" disabled=busy on_click=move |_| load()>
                        "⟳"
                    </Button>
                </Flex>
            </div>

            <div class="price-card__filters">
                <CooperatorSelector
                    category=category
                    value=Signal::derive(move || state.with(|s| s.filters.cooperator.clone()))
                    on_change={move |v: Option<String>| state.update(|s| s.filters.cooperator = v)}
                />
                {selectors.box_type.then(|| view! {
                    <BoxTypeSelector
                        value=Signal::derive(move || state.with(|s| s.filters.box_type.clone()))
                        on_change={move |v: Option<String>| state.update(|s| s.filters.box_type = v)}
                    />
                })}
                {selectors.bindery_type.then(|| view! {
                    <BinderyTypeSelector
                        value=Signal::derive(move || state.with(|s| s.filters.bindery_type.clone()))
                        on_change={move |v: Option<String>| state.update(|s| s.filters.bindery_type = v)}
                    />
                })}
                {selectors.circulation_range.then(|| view! {
                    <CirculationRangeSelector
                        value=Signal::derive(move || state.with(|s| s.filters.range_id.clone()))
                        on_change={move |v: Option<String>| state.update(|s| s.filters.range_id = v)}
                    />
                })}
            </div>

            {move || state.with(|s| s.alert().map(str::to_string)).map(|message| {
                let on_retry = state
                    .with(|s| s.can_retry())
                    .then(|| Callback::new(move |_: ()| load()));
                view! {
                    <Alert
                        message=message
                        on_close=move |_| state.update(|s| s.dismiss_alert())
                        on_retry=on_retry
                    />
                }
            })}

            <Show when=move || busy.get()>
                <Loading />
            </Show>

            <Show when=move || is_editing.get()>
                <div class="price-card__form-toggle">
                    <Button variant="ghost" size="sm" on_click=move |_| show_form.update(|v| *v = !*v)>
                        {move || if show_form.get() { "بستن فرم" } else { "افزودن با فرم" }}
                    </Button>
                </div>
                <Show when=move || show_form.get()>
                    <PriceEntryForm
                        category=category
                        saving=saving
                        created=created
                        on_submit=create_entry
                    />
                </Show>
            </Show>

            <Show when=move || state.with(|s| s.load != LoadState::Loading && s.schema.is_some())>
                <DynamicPriceTable
                    schema=Signal::derive(move || state.with(|s| s.schema.clone().unwrap_or_default()))
                    rows=Signal::derive(move || state.with(|s| s.rows.clone()))
                    is_editing=is_editing
                    saving=saving
                    created=created
                    on_create=create_entry
                    on_update=update_entry
                    on_delete=delete_entry
                    on_bulk_save=bulk_save
                />
            </Show>

            <Show when=move || state.with(|s| s.show_empty_state())>
                <div class="price-card__empty">
                    <h3>"هیچ داده‌ای یافت نشد"</h3>
                    <p>"برای همکار انتخاب شده قیمتی ثبت نشده است"</p>
                </div>
            </Show>
        </Card>
    }
}

/// Validated quick-add form for one entry of `category`
#[component]
fn PriceEntryForm(
    category: PriceCategory,
    #[prop(into)] saving: Signal<bool>,
    /// Bumped after a successful create; resets the form
    #[prop(into)]
    created: Signal<u32>,
    #[prop(into)] on_submit: Callback<Value>,
) -> impl IntoView {
    let slug = category.slug();
    let form = RwSignal::new(default_values(slug));
    let errors = RwSignal::new(Option::<ValidationErrors>::None);

    Effect::new(move |prev: Option<u32>| {
        let tick = created.get();
        if prev.is_some_and(|p| p != tick) {
            form.set(default_values(slug));
            errors.set(None);
        }
        tick
    });

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_price_data(slug, &form.get_untracked()) {
            Ok(entry) => {
                errors.set(None);
                on_submit.run(entry);
            }
            Err(e) => {
                log::debug!("Entry form rejected: {}", e);
                errors.set(Some(e));
            }
        }
    };

    let fields = price_form_schema(slug).fields;

    view! {
        <form class="price-entry-form" on:submit=submit>
            {fields.into_iter().map(|field| {
                let name = field.name;
                let value = Signal::derive(move || form.with(|f| display_text(&read_path(f, name))));
                let error = Signal::derive(move || {
                    errors.with(|e| e.as_ref().and_then(|e| e.get(name)).map(str::to_string))
                });
                let on_input = move |raw: String| form.update(|f| write_path(f, name, Value::String(raw)));

                match field.rule {
                    FieldRule::Picklist { options, .. } => {
                        let options: Vec<(String, String)> =
                            options.into_iter().map(|o| (o.value, o.label)).collect();
                        view! {
                            <div>
                                <Select
                                    id=name
                                    label=field.label
                                    value=value
                                    options=Signal::stored(options)
                                    on_change=on_input
                                />
                                {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
                            </div>
                        }
                        .into_any()
                    }
                    FieldRule::NonNegative | FieldRule::Integer { .. } => view! {
                        <Input
                            id=name
                            label=field.label
                            input_type="number"
                            dir="ltr"
                            value=value
                            error=error
                            on_input=on_input
                        />
                    }
                    .into_any(),
                    FieldRule::Text | FieldRule::OptionalText => view! {
                        <Input id=name label=field.label value=value error=error on_input=on_input />
                    }
                    .into_any(),
                }
            }).collect_view()}
            <Button button_type="submit" disabled=saving>"ثبت"</Button>
        </form>
    }
}
