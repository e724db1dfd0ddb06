//! Schema-driven price table.
//!
//! Rows are edited in a local [`EditableTable`]; nothing is sent until the
//! user saves a row, adds the new entry or saves everything. New source rows
//! from the parent replace the local copy.

use contracts::prices::column::{ColumnSchema, ColumnType};
use contracts::prices::table::{CellDisplay, EditableTable};
use contracts::shared::json_path::display_text;
use leptos::prelude::*;
use serde_json::Value;

use crate::shared::components::ui::{Badge, Button, Textarea};

/// Which record a cell editor writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellTarget {
    Row(usize),
    NewEntry,
}

impl CellTarget {
    fn read(&self, table: &EditableTable, key: &str) -> Value {
        match self {
            Self::Row(index) => table.cell_value(*index, key),
            Self::NewEntry => table.new_entry_value(key),
        }
    }

    fn write(&self, table: &mut EditableTable, key: &str, value: Value) {
        match self {
            Self::Row(index) => table.set_cell(*index, key, value),
            Self::NewEntry => table.set_new_entry(key, value),
        }
    }
}

fn bound(value: Option<f64>) -> Option<String> {
    value.map(|v| v.to_string())
}

fn cell_editor(
    table: RwSignal<EditableTable>,
    column: StoredValue<ColumnSchema>,
    target: CellTarget,
) -> AnyView {
    let key = column.with_value(|c| c.key.clone());
    let current = move || table.with(|t| display_text(&target.read(t, &key)));
    let on_edit = move |raw: String| {
        column.with_value(|c| {
            let value = c.parse_input(&raw);
            table.update(|t| target.write(t, &c.key, value));
        })
    };

    let (column_type, multiline) = column.with_value(|c| (c.column_type, c.multiline));
    match column_type {
        ColumnType::Select => {
            let options = column.with_value(|c| c.options.clone());
            view! {
                <select class="form__select" on:change=move |ev| on_edit(event_target_value(&ev))>
                    {options.into_iter().map(|option| {
                        let current = current.clone();
                        let value = option.value.clone();
                        view! {
                            <option value=option.value selected=move || current() == value>
                                {option.label}
                            </option>
                        }
                    }).collect_view()}
                </select>
            }
            .into_any()
        }
        ColumnType::Number => {
            let (min, max, step, suffix) =
                column.with_value(|c| (bound(c.min), bound(c.max), bound(c.step), c.suffix.clone()));
            view! {
                <div class="price-table__number">
                    <input
                        type="number"
                        class="form__input"
                        dir="ltr"
                        min=min
                        max=max
                        step=step
                        prop:value=current
                        on:input=move |ev| on_edit(event_target_value(&ev))
                    />
                    {suffix.map(|s| view! { <span class="price-table__suffix">{s}</span> })}
                </div>
            }
            .into_any()
        }
        ColumnType::Text if multiline => {
            let rows = column.with_value(|c| c.rows);
            view! {
                <Textarea value=Signal::derive(current) rows=rows.unwrap_or(2) on_input=on_edit />
            }
            .into_any()
        }
        ColumnType::Text => view! {
            <input
                type="text"
                class="form__input"
                prop:value=current
                on:input=move |ev| on_edit(event_target_value(&ev))
            />
        }
        .into_any(),
    }
}

fn cell_display(
    table: RwSignal<EditableTable>,
    column: StoredValue<ColumnSchema>,
    index: usize,
) -> AnyView {
    let view = move || {
        let display = table.with(|t| {
            t.rows()
                .get(index)
                .map(|row| column.with_value(|c| EditableTable::display_value(c, row)))
        });
        match display {
            Some(CellDisplay::Badge(label)) => view! {
                <Badge variant="primary" outlined=true>{label}</Badge>
            }
            .into_any(),
            Some(CellDisplay::Text(text)) => view! { <span>{text}</span> }.into_any(),
            None => ().into_any(),
        }
    };
    view.into_any()
}

#[component]
pub fn DynamicPriceTable(
    #[prop(into)] schema: Signal<Vec<ColumnSchema>>,
    #[prop(into)] rows: Signal<Vec<Value>>,
    #[prop(into)] is_editing: Signal<bool>,
    #[prop(into)] saving: Signal<bool>,
    /// Bumped by the parent after a successful create; clears the new-entry row
    #[prop(into)]
    created: Signal<u32>,
    #[prop(into)] on_create: Callback<Value>,
    /// `(id, row)`
    #[prop(into)]
    on_update: Callback<(Value, Value)>,
    #[prop(into)] on_delete: Callback<Value>,
    #[prop(into)] on_bulk_save: Callback<Vec<Value>>,
) -> impl IntoView {
    let table = RwSignal::new(EditableTable::default());

    Effect::new(move |_| {
        let schema = schema.get();
        table.update(|t| t.reset_schema(schema));
    });
    Effect::new(move |_| {
        let rows = rows.get();
        table.update(|t| t.reset_rows(rows));
    });
    Effect::new(move |prev: Option<u32>| {
        let tick = created.get();
        if prev.is_some_and(|p| p != tick) {
            table.update(|t| {
                t.take_new_entry();
            });
        }
        tick
    });

    let columns = Memo::new(move |_| table.with(|t| t.schema().to_vec()));
    let row_count = Memo::new(move |_| table.with(|t| t.rows().len()));

    let add_entry = move |_| {
        let entry = table.with_untracked(|t| t.new_entry_payload());
        on_create.run(entry);
    };
    let save_all = move |_| {
        on_bulk_save.run(table.with_untracked(|t| t.edited_rows()));
    };

    move || {
        let cols: Vec<StoredValue<ColumnSchema>> =
            columns.get().into_iter().map(StoredValue::new).collect();
        let header = cols.clone();
        let new_row = cols.clone();

        view! {
            <div class="price-table">
                <table class="table">
                    <thead>
                        <tr>
                            {header.into_iter().map(|c| view! {
                                <th>{c.with_value(|c| c.label.clone())}</th>
                            }).collect_view()}
                            <Show when=move || is_editing.get()>
                                <th>"عملیات"</th>
                            </Show>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || 0..row_count.get()
                            key=|index| *index
                            children=move |index| {
                                let target = CellTarget::Row(index);
                                view! {
                                    <tr>
                                        {cols.iter().copied().map(|column| {
                                            let editable = column.with_value(|c| c.editable);
                                            view! {
                                                <td>
                                                    {move || if is_editing.get() && editable {
                                                        cell_editor(table, column, target)
                                                    } else {
                                                        cell_display(table, column, index)
                                                    }}
                                                </td>
                                            }
                                        }).collect_view()}
                                        <Show when=move || is_editing.get()>
                                            <td class="price-table__actions">
                                                {move || table.with(|t| t.row_id(index)).map(|id| {
                                                    let update_id = id.clone();
                                                    view! {
                                                        <Button
                                                            variant="secondary"
                                                            size="sm"
                                                            title="ذخیره"
                                                            disabled=saving
                                                            on_click=move |_| {
                                                                let row = table.with_untracked(|t| t.row_payload(index));
                                                                if let Some(row) = row {
                                                                    on_update.run((update_id.clone(), row));
                                                                }
                                                            }
                                                        >
                                                            "✓"
                                                        </Button>
                                                        <Button
                                                            variant="danger"
                                                            size="sm"
                                                            title="حذف"
                                                            disabled=saving
                                                            on_click=move |_| on_delete.run(id.clone())
                                                        >
                                                            "🗑"
                                                        </Button>
                                                    }
                                                })}
                                            </td>
                                        </Show>
                                    </tr>
                                }
                            }
                        />
                        <Show when=move || is_editing.get()>
                            <tr class="price-table__new-row">
                                {new_row.iter().copied().map(|column| {
                                    let editable = column.with_value(|c| c.editable);
                                    view! {
                                        <td>
                                            {editable.then(|| cell_editor(table, column, CellTarget::NewEntry))}
                                        </td>
                                    }
                                }).collect_view()}
                                <td class="price-table__actions">
                                    <Button size="sm" title="افزودن" disabled=saving on_click=add_entry>
                                        "+"
                                    </Button>
                                </td>
                            </tr>
                        </Show>
                    </tbody>
                </table>
                <Show when=move || is_editing.get()>
                    <div class="price-table__footer">
                        <Button disabled=saving on_click=save_all>
                            "ذخیره همه تغییرات"
                        </Button>
                    </div>
                </Show>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_target_routes_reads_and_writes() {
        let schema = vec![ColumnSchema::id(), ColumnSchema::number("price", "قیمت")];
        let mut table = EditableTable::new(schema, vec![json!({ "id": 1, "price": 100 })]);

        CellTarget::Row(0).write(&mut table, "price", json!(150));
        CellTarget::NewEntry.write(&mut table, "price", json!(90));

        assert_eq!(CellTarget::Row(0).read(&table, "price"), json!(150));
        assert_eq!(CellTarget::NewEntry.read(&table, "price"), json!(90));
        assert_eq!(table.edited_rows(), vec![json!({ "id": 1, "price": 150 })]);
    }

    #[test]
    fn test_bound_formats_optional_limits() {
        assert_eq!(bound(Some(0.5)), Some("0.5".to_string()));
        assert_eq!(bound(None), None);
    }
}
