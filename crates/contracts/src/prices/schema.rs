//! Column schemas per price category.
//!
//! Known categories get a fixed column list; related-object columns are only
//! added when the sample record actually carries that relation. Anything
//! else falls back to reading the sample's own keys.

use super::category::PriceCategory;
use super::column::{ColumnSchema, Formatter};
use serde_json::Value;

/// Record fields never shown as columns by the generic fallback.
pub const SYSTEM_FIELDS: [&str; 6] = [
    "id",
    "panel_id",
    "cooperator_id",
    "created_at",
    "updated_at",
    "deleted_at",
];

/// Schema for a category tag, using `sample` (the first fetched record) to
/// decide which optional columns appear. Unknown tags use generic inference.
pub fn infer_schema(sample: &Value, category: &str) -> Vec<ColumnSchema> {
    match PriceCategory::from_slug(category) {
        Some(known) => schema_for(known, sample),
        None => generic_schema(sample),
    }
}

/// Schema used when the fetched list is empty. Unknown tags get
/// `id`, `title`, `price`.
pub fn default_schema(category: &str) -> Vec<ColumnSchema> {
    match PriceCategory::from_slug(category) {
        Some(known) => default_schema_for(known),
        None => vec![
            ColumnSchema::id(),
            ColumnSchema::text("title", "عنوان"),
            price(),
        ],
    }
}

fn present(sample: &Value, field: &str) -> bool {
    sample.get(field).is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn price() -> ColumnSchema {
    amount("price", "قیمت")
}

fn amount(key: &str, label: &str) -> ColumnSchema {
    ColumnSchema::number(key, label).with_bounds(Some(0.0), None, None)
}

fn machine(sample: &Value, columns: &mut Vec<ColumnSchema>) {
    if present(sample, "machine") {
        columns.push(ColumnSchema::title_of("machine", "ماشین"));
    }
}

fn offset_inks() -> [ColumnSchema; 4] {
    [
        amount("cmyk", "CMYK"),
        amount("spot", "اسپات"),
        amount("metallic", "متالیک"),
        amount("verni", "ورنی"),
    ]
}

fn lithography_costs() -> [ColumnSchema; 7] {
    [
        amount("colored_film", "فیلم رنگی"),
        amount("film", "فیلم"),
        amount("ozalid", "ازالید"),
        amount("zinc", "روی"),
        amount("burned_zinc", "روی سوخته"),
        amount("plate", "پلیت"),
        amount("forming", "قالب‌سازی"),
    ]
}

fn papers_columns() -> [ColumnSchema; 4] {
    [
        ColumnSchema::text("title", "عنوان").required(),
        ColumnSchema::number("grammage", "گرماژ").with_suffix("گرم"),
        ColumnSchema::number("quantity", "تعداد"),
        price(),
    ]
}

fn others_columns() -> [ColumnSchema; 4] {
    [
        ColumnSchema::text("title", "عنوان").required(),
        ColumnSchema::text("description", "توضیحات").multiline(2),
        ColumnSchema::text("type", "نوع"),
        price(),
    ]
}

/// Schema for a known category given a sample record.
pub fn schema_for(category: PriceCategory, sample: &Value) -> Vec<ColumnSchema> {
    use PriceCategory::*;

    let mut columns = vec![ColumnSchema::id()];
    match category {
        Papers => {
            columns.extend(papers_columns());
            if present(sample, "type") {
                columns.push(ColumnSchema::title_of("type", "نوع"));
            }
            if present(sample, "material") {
                columns.push(ColumnSchema::title_of("material", "جنس"));
            }
            if present(sample, "dimension") {
                columns.push(
                    ColumnSchema::text("dimension", "ابعاد")
                        .read_only()
                        .with_formatter(Formatter::Dimensions),
                );
            }
            if present(sample, "measurement") {
                columns.push(ColumnSchema::title_of("measurement", "واحد اندازه‌گیری"));
            }
        }
        Lithographies => {
            machine(sample, &mut columns);
            columns.extend(lithography_costs());
        }
        Monitorings => {
            if present(sample, "level") {
                columns.push(ColumnSchema::title_of("level", "سطح نظارت"));
            }
            columns.extend([
                amount("complex", "پیچیده"),
                amount("medium", "متوسط"),
                amount("simple", "ساده"),
            ]);
        }
        Colors => {
            machine(sample, &mut columns);
            columns.extend(offset_inks());
        }
        Circulations => {
            columns.push(ColumnSchema::number("quantity", "تعداد (از)"));
            columns.push(ColumnSchema::number("to", "تا"));
            columns.extend(offset_inks());
        }
        Uvs => {
            machine(sample, &mut columns);
            if present(sample, "uv_type") {
                columns.push(ColumnSchema::title_of("uv_type", "نوع UV"));
            }
            columns.push(price());
        }
        Selefons => {
            machine(sample, &mut columns);
            if present(sample, "selefon_type") {
                columns.push(ColumnSchema::title_of("selefon_type", "نوع سلفون"));
            }
            columns.push(price());
        }
        Laminates => {
            machine(sample, &mut columns);
            columns.extend([amount("opaque", "مات"), amount("glossy", "براق")]);
        }
        Boxes => {
            if present(sample, "box_type") {
                columns.push(ColumnSchema::title_of("box_type", "نوع جعبه"));
            }
            if present(sample, "title") {
                columns.push(ColumnSchema::text("title", "سایز").read_only());
            }
            columns.push(price());
        }
        Pockets | Bags => {
            columns.push(ColumnSchema::text("title", "عنوان"));
            columns.push(price());
        }
        Binderies => {
            if present(sample, "trim") {
                columns.push(ColumnSchema::title_of("trim", "قطع"));
            }
            columns.extend([amount("tahrir", "تحریر"), amount("gelase", "گلاسه")]);
        }
        Framings => {
            columns.push(ColumnSchema::text("type", "نوع"));
            columns.push(ColumnSchema::number("size", "سایز"));
            columns.push(price());
        }
        Plates => {
            columns.push(ColumnSchema::number("perimeter", "محیط"));
            columns.push(ColumnSchema::number("size", "سایز"));
            columns.push(price());
        }
        Golds => {
            if present(sample, "gold_size") {
                columns.push(
                    ColumnSchema::text("gold_size", "اندازه طلاکوب")
                        .read_only()
                        .with_formatter(Formatter::Dimensions),
                );
            }
            columns.push(price());
        }
        Letterpress | Perforages => {
            machine(sample, &mut columns);
            columns.push(amount("per_cycle", "هر دور"));
        }
        Cuts | Numerations => columns.push(price()),
        Glues => {
            columns.push(ColumnSchema::number("quantity", "تعداد"));
            columns.push(price());
        }
        Others => columns.extend(others_columns()),
    }
    columns
}

/// Schema for a known category with no sample: relation columns are left
/// out, except the box size which is always listed.
pub fn default_schema_for(category: PriceCategory) -> Vec<ColumnSchema> {
    match category {
        PriceCategory::Boxes => vec![
            ColumnSchema::id(),
            ColumnSchema::text("title", "سایز").read_only(),
            price(),
        ],
        other => schema_for(other, &Value::Null),
    }
}

/// Generic inference: one column per non-system key of `sample`, in key order.
pub fn generic_schema(sample: &Value) -> Vec<ColumnSchema> {
    let mut columns = vec![ColumnSchema::id()];
    let Some(fields) = sample.as_object() else {
        return columns;
    };

    for (key, value) in fields {
        if SYSTEM_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let column = match value {
            Value::Object(related) if related.get("title").is_some_and(is_truthy) => {
                ColumnSchema::title_of(key, capitalize(key))
            }
            Value::Object(_) => ColumnSchema::text(key.as_str(), capitalize(key))
                .read_only()
                .with_formatter(Formatter::Json),
            Value::Number(_) => ColumnSchema::number(key.as_str(), humanize(key)),
            _ => ColumnSchema::text(key.as_str(), humanize(key)),
        };
        columns.push(column);
    }
    columns
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `unit_price` → `Unit Price`.
fn humanize(key: &str) -> String {
    key.split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::column::ColumnType;
    use serde_json::json;

    fn keys(columns: &[ColumnSchema]) -> Vec<&str> {
        columns.iter().map(|c| c.key.as_str()).collect()
    }

    #[test]
    fn test_known_categories_start_with_read_only_id() {
        let sample = json!({
            "id": 3, "title": "A4", "price": 1200, "machine": { "title": "GTO" },
            "type": { "title": "گلاسه" }, "box_type": { "title": "کشویی" },
        });
        for category in PriceCategory::ALL {
            let columns = infer_schema(&sample, category.slug());
            assert_eq!(columns[0].key, "id", "{}", category);
            assert!(!columns[0].editable, "{}", category);
        }
    }

    #[test]
    fn test_papers_relation_columns_follow_sample() {
        let bare = json!({ "id": 1, "title": "تحریر", "price": 100 });
        assert_eq!(
            keys(&infer_schema(&bare, "papers")),
            vec!["id", "title", "grammage", "quantity", "price"]
        );

        let full = json!({
            "id": 1,
            "type": { "title": "گلاسه" },
            "material": { "title": "مقوا" },
            "dimension": { "width": 70, "height": 100 },
            "measurement": null,
        });
        let columns = infer_schema(&full, "papers");
        assert_eq!(
            keys(&columns),
            vec!["id", "title", "grammage", "quantity", "price", "type.title", "material.title", "dimension"]
        );
        let dimension = columns.last().unwrap();
        assert_eq!(dimension.formatter, Some(Formatter::Dimensions));
        assert!(!dimension.editable);
    }

    #[test]
    fn test_machine_column_only_when_present() {
        let with_machine = json!({ "id": 1, "machine": { "id": 2, "title": "KORD" } });
        assert_eq!(
            keys(&infer_schema(&with_machine, "letterpress")),
            vec!["id", "machine.title", "per_cycle"]
        );
        assert_eq!(
            keys(&infer_schema(&json!({ "id": 1 }), "letterpress")),
            vec!["id", "per_cycle"]
        );
    }

    #[test]
    fn test_generic_inference_one_column_per_key() {
        let sample = json!({
            "id": 9,
            "panel_id": 1,
            "cooperator_id": 4,
            "created_at": "2024-01-01",
            "updated_at": "2024-01-02",
            "deleted_at": null,
            "unit_price": 2500,
            "name": "ویژه",
            "machine": { "id": 3, "title": "SM 74" },
            "extra": { "width": 10 },
        });
        let columns = infer_schema(&sample, "stickers");
        assert_eq!(columns.len(), 4 + 1);
        assert_eq!(
            keys(&columns),
            vec!["id", "unit_price", "name", "machine.title", "extra"]
        );

        assert_eq!(columns[1].label, "Unit Price");
        assert_eq!(columns[1].column_type, ColumnType::Number);
        assert!(columns[1].editable);
        assert_eq!(columns[2].column_type, ColumnType::Text);

        assert_eq!(columns[3].label, "Machine");
        assert!(!columns[3].editable);
        assert!(!columns[4].editable);
    }

    #[test]
    fn test_generic_inference_non_object_sample() {
        assert_eq!(keys(&infer_schema(&json!([1, 2]), "unknown")), vec!["id"]);
    }

    #[test]
    fn test_default_schema_non_empty_for_every_category() {
        for category in PriceCategory::ALL {
            let columns = default_schema(category.slug());
            assert!(columns.len() > 1, "{}", category);
            assert_eq!(columns[0].key, "id");
            assert!(columns.iter().all(|c| !c.key.contains('.')), "{}", category);
        }
        assert_eq!(keys(&default_schema("boxes")), vec!["id", "title", "price"]);
        assert_eq!(keys(&default_schema("stickers")), vec!["id", "title", "price"]);
    }
}
