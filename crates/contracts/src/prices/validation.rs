//! Entry-form rules per category.
//!
//! The form carries only the entry's own fields. `cooperator_id` and the
//! category are attached by the caller when the entry is submitted, so the
//! defaults from [`default_values`] validate cleanly.

use super::column::SelectOption;
use crate::shared::json_path::as_number;
use serde_json::{Map, Value};
use std::fmt;

const REQUIRED: &str = "این فیلد الزامی است";
const NON_NEGATIVE: &str = "مقدار باید بزرگتر یا مساوی صفر باشد";
const NOT_A_NUMBER: &str = "مقدار باید عدد باشد";
const NOT_AN_INTEGER: &str = "مقدار باید عدد صحیح باشد";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Papers,
    Uvs,
    Cuts,
    Lithographies,
    Laminates,
    Bindings,
    Generic,
}

impl FormKind {
    /// `bindings` is accepted as an alias of `binderies`.
    pub fn for_category(category: &str) -> Self {
        match category {
            "papers" => Self::Papers,
            "uvs" => Self::Uvs,
            "cuts" => Self::Cuts,
            "lithographies" => Self::Lithographies,
            "laminates" => Self::Laminates,
            "binderies" | "bindings" => Self::Bindings,
            _ => Self::Generic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// Trimmed text; must be present, may be empty.
    Text,
    /// Text that may be left out entirely.
    OptionalText,
    /// Number `>= 0`.
    NonNegative,
    /// Integer within bounds; each bound carries its own message.
    Integer {
        min: (i64, &'static str),
        max: Option<(i64, &'static str)>,
    },
    Picklist {
        options: Vec<SelectOption>,
        message: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub rule: FieldRule,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, rule: FieldRule) -> Self {
        Self { name, label, rule }
    }

    /// Checks one raw value, returning its normalized form.
    pub fn check(&self, raw: Option<&Value>) -> Result<Value, &'static str> {
        let raw = raw.filter(|v| !v.is_null());
        match &self.rule {
            FieldRule::OptionalText => match raw {
                None => Ok(Value::Null),
                Some(Value::String(s)) => Ok(Value::String(s.trim().to_string())),
                Some(_) => Err(REQUIRED),
            },
            FieldRule::Text => match raw {
                Some(Value::String(s)) => Ok(Value::String(s.trim().to_string())),
                _ => Err(REQUIRED),
            },
            FieldRule::NonNegative => {
                let n = number(raw)?;
                if n < 0.0 {
                    return Err(NON_NEGATIVE);
                }
                Ok(Value::from(n))
            }
            FieldRule::Integer { min, max } => {
                let n = number(raw)?;
                if n.fract() != 0.0 {
                    return Err(NOT_AN_INTEGER);
                }
                let n = n as i64;
                if n < min.0 {
                    return Err(min.1);
                }
                if let Some((bound, message)) = max {
                    if n > *bound {
                        return Err(*message);
                    }
                }
                Ok(Value::from(n))
            }
            FieldRule::Picklist { options, message } => match raw {
                Some(Value::String(s)) if options.iter().any(|o| &o.value == s) => {
                    Ok(Value::String(s.clone()))
                }
                _ => Err(*message),
            },
        }
    }
}

fn number(raw: Option<&Value>) -> Result<f64, &'static str> {
    match raw {
        None => Err(REQUIRED),
        Some(Value::String(s)) if s.trim().is_empty() => Err(REQUIRED),
        Some(value) => as_number(value).ok_or(NOT_A_NUMBER),
    }
}

fn picklist(options: &[(&str, &str)], message: &'static str) -> FieldRule {
    FieldRule::Picklist {
        options: options
            .iter()
            .map(|(value, label)| SelectOption::new(*value, *label))
            .collect(),
        message,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub kind: FormKind,
    pub fields: Vec<FieldSpec>,
}

pub fn price_form_schema(category: &str) -> FormSchema {
    use FieldRule::*;

    let kind = FormKind::for_category(category);
    let fields = match kind {
        FormKind::Papers => vec![
            FieldSpec::new("paper_type", "نوع کاغذ", Text),
            FieldSpec::new("paper_size", "اندازه کاغذ", Text),
            FieldSpec::new("weight", "وزن", NonNegative),
            FieldSpec::new("unit_price", "قیمت واحد", NonNegative),
        ],
        FormKind::Uvs => vec![
            FieldSpec::new(
                "uv_type",
                "نوع UV",
                picklist(
                    &[("glossy", "براق"), ("matte", "مات"), ("spot", "موضعی")],
                    "نوع UV معتبر نیست",
                ),
            ),
            FieldSpec::new("surface_area", "مساحت", NonNegative),
            FieldSpec::new("unit_price", "قیمت واحد", NonNegative),
        ],
        FormKind::Cuts => vec![
            FieldSpec::new(
                "cut_type",
                "نوع برش",
                picklist(
                    &[("straight", "مستقیم"), ("shaped", "فرم‌دار"), ("rounded", "گرد")],
                    "نوع برش معتبر نیست",
                ),
            ),
            FieldSpec::new("material_thickness", "ضخامت", NonNegative),
            FieldSpec::new("price_per_cut", "قیمت هر برش", NonNegative),
        ],
        FormKind::Lithographies => vec![
            FieldSpec::new("paper_size", "اندازه کاغذ", Text),
            FieldSpec::new(
                "color_count",
                "تعداد رنگ",
                Integer {
                    min: (1, "تعداد رنگ باید حداقل 1 باشد"),
                    max: Some((8, "تعداد رنگ نمی‌تواند بیش از 8 باشد")),
                },
            ),
            FieldSpec::new("price_per_sheet", "قیمت هر برگ", NonNegative),
        ],
        FormKind::Laminates => vec![
            FieldSpec::new(
                "laminate_type",
                "نوع لمینت",
                picklist(
                    &[("glossy", "براق"), ("matte", "مات"), ("soft_touch", "سافت تاچ")],
                    "نوع لمینت معتبر نیست",
                ),
            ),
            FieldSpec::new("thickness", "ضخامت", NonNegative),
            FieldSpec::new("price_per_sqm", "قیمت هر متر مربع", NonNegative),
        ],
        FormKind::Bindings => vec![
            FieldSpec::new(
                "binding_type",
                "نوع صحافی",
                picklist(
                    &[
                        ("spiral", "سیمی"),
                        ("thermal", "چسب گرم"),
                        ("perfect", "لب چسب"),
                        ("saddle", "منگنه"),
                    ],
                    "نوع صحافی معتبر نیست",
                ),
            ),
            FieldSpec::new(
                "page_count_min",
                "حداقل صفحه",
                Integer {
                    min: (1, "حداقل تعداد صفحه باید 1 باشد"),
                    max: None,
                },
            ),
            FieldSpec::new(
                "page_count_max",
                "حداکثر صفحه",
                Integer {
                    min: (1, "حداکثر تعداد صفحه باید 1 باشد"),
                    max: None,
                },
            ),
            FieldSpec::new("unit_price", "قیمت واحد", NonNegative),
        ],
        FormKind::Generic => vec![
            FieldSpec::new("name", "نام", Text),
            FieldSpec::new("description", "توضیحات", OptionalText),
            FieldSpec::new("unit_price", "قیمت واحد", NonNegative),
        ],
    };
    FormSchema { kind, fields }
}

/// Starting values of the entry form.
pub fn default_values(category: &str) -> Value {
    match FormKind::for_category(category) {
        FormKind::Papers => serde_json::json!({
            "paper_type": "", "paper_size": "", "weight": 0, "unit_price": 0
        }),
        FormKind::Uvs => serde_json::json!({
            "uv_type": "glossy", "surface_area": 0, "unit_price": 0
        }),
        FormKind::Cuts => serde_json::json!({
            "cut_type": "straight", "material_thickness": 0, "price_per_cut": 0
        }),
        FormKind::Lithographies => serde_json::json!({
            "paper_size": "", "color_count": 1, "price_per_sheet": 0
        }),
        FormKind::Laminates => serde_json::json!({
            "laminate_type": "glossy", "thickness": 0, "price_per_sqm": 0
        }),
        FormKind::Bindings => serde_json::json!({
            "binding_type": "spiral", "page_count_min": 1, "page_count_max": 100, "unit_price": 0
        }),
        FormKind::Generic => serde_json::json!({
            "name": "", "description": "", "unit_price": 0
        }),
    }
}

/// Field-level failures, in form order. `root` is used for a non-object input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<(String, String)>);

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("، "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates `data` against the category's form. On success returns the
/// normalized entry: trimmed text, numbers as JSON numbers, unknown keys kept.
pub fn validate_price_data(category: &str, data: &Value) -> Result<Value, ValidationErrors> {
    let Some(input) = data.as_object() else {
        return Err(ValidationErrors(vec![(
            "root".to_string(),
            REQUIRED.to_string(),
        )]));
    };

    let schema = price_form_schema(category);
    let mut output: Map<String, Value> = input.clone();
    let mut errors = Vec::new();

    for field in &schema.fields {
        match field.check(input.get(field.name)) {
            Ok(Value::Null) => {
                output.remove(field.name);
            }
            Ok(value) => {
                output.insert(field.name.to_string(), value);
            }
            Err(message) => errors.push((field.name.to_string(), message.to_string())),
        }
    }

    if errors.is_empty() {
        Ok(Value::Object(output))
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::category::PriceCategory;
    use serde_json::json;

    #[test]
    fn test_defaults_pass_validation_for_every_category() {
        let mut tags: Vec<&str> = PriceCategory::ALL.iter().map(|c| c.slug()).collect();
        tags.push("bindings");
        tags.push("stickers");
        for tag in tags {
            let result = validate_price_data(tag, &default_values(tag));
            assert!(result.is_ok(), "{}: {:?}", tag, result);
        }
    }

    #[test]
    fn test_negative_and_missing_numbers() {
        let errors = validate_price_data(
            "papers",
            &json!({ "paper_type": "تحریر", "paper_size": "A4", "weight": -1 }),
        )
        .unwrap_err();
        assert_eq!(errors.get("weight"), Some(NON_NEGATIVE));
        assert_eq!(errors.get("unit_price"), Some(REQUIRED));
        assert_eq!(errors.get("paper_type"), None);
    }

    #[test]
    fn test_color_count_bounds() {
        let mut entry = default_values("lithographies");
        entry["color_count"] = json!(9);
        let errors = validate_price_data("lithographies", &entry).unwrap_err();
        assert_eq!(errors.get("color_count"), Some("تعداد رنگ نمی‌تواند بیش از 8 باشد"));

        entry["color_count"] = json!("2.5");
        let errors = validate_price_data("lithographies", &entry).unwrap_err();
        assert_eq!(errors.get("color_count"), Some(NOT_AN_INTEGER));
    }

    #[test]
    fn test_picklist_rejects_unknown_option() {
        let mut entry = default_values("uvs");
        entry["uv_type"] = json!("metallic");
        let errors = validate_price_data("uvs", &entry).unwrap_err();
        assert_eq!(errors.get("uv_type"), Some("نوع UV معتبر نیست"));
    }

    #[test]
    fn test_normalizes_input_strings() {
        let entry = json!({ "name": "  ویژه ", "unit_price": "1500", "cooperator_id": 3 });
        let normalized = validate_price_data("others", &entry).unwrap();
        assert_eq!(normalized["name"], json!("ویژه"));
        assert_eq!(normalized["unit_price"], json!(1500.0));
        assert_eq!(normalized["cooperator_id"], json!(3));
        assert!(normalized.get("description").is_none());
    }

    #[test]
    fn test_non_finite_text_is_not_a_number() {
        for raw in ["NaN", "inf", "-Infinity"] {
            let entry = json!({ "name": "x", "unit_price": raw });
            let errors = validate_price_data("others", &entry).unwrap_err();
            assert_eq!(errors.get("unit_price"), Some(NOT_A_NUMBER));
        }

        let mut entry = default_values("lithographies");
        entry["color_count"] = json!("NaN");
        let errors = validate_price_data("lithographies", &entry).unwrap_err();
        assert_eq!(errors.get("color_count"), Some(NOT_A_NUMBER));
    }

    #[test]
    fn test_binderies_use_binding_rules() {
        assert_eq!(price_form_schema("binderies").kind, FormKind::Bindings);
        assert_eq!(price_form_schema("bindings").kind, FormKind::Bindings);
        assert_eq!(price_form_schema("golds").kind, FormKind::Generic);
    }
}
