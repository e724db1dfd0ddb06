//! Column metadata driving the generic price table.

use crate::shared::json_path::display_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    #[default]
    Text,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Display transforms a column may request instead of type-based rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    /// `{ width, height }` object shown as `width × height`, `-` when absent.
    Dimensions,
    /// Nested object without a title, shown as compact JSON.
    Json,
}

impl Formatter {
    /// `raw` is the record's top-level value under the column key, falling
    /// back to the dot-path value. `row` is the whole record.
    pub fn apply(&self, raw: &Value, _row: &Value) -> String {
        match self {
            Self::Dimensions => match raw {
                Value::Object(map) => format!(
                    "{} × {}",
                    map.get("width").map(display_text).unwrap_or_default(),
                    map.get("height").map(display_text).unwrap_or_default()
                ),
                _ => "-".to_string(),
            },
            Self::Json => match raw {
                Value::Null => "-".to_string(),
                Value::String(s) if s.is_empty() => "-".to_string(),
                other => other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Dot-path into the record, e.g. `price` or `machine.title`.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub editable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<Formatter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default)]
    pub multiline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default)]
    pub required: bool,
}

impl ColumnSchema {
    fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
            editable: true,
            options: Vec::new(),
            formatter: None,
            default_value: None,
            min: None,
            max: None,
            step: None,
            suffix: None,
            multiline: false,
            rows: None,
            required: false,
        }
    }

    /// The leading, read-only `id` column every schema starts with.
    pub fn id() -> Self {
        Self::number("id", "شناسه").read_only()
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnType::Text)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnType::Number)
    }

    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        let mut column = Self::new(key, label, ColumnType::Select);
        column.options = options;
        column
    }

    /// Related-object title (`machine.title`), never edited inline.
    pub fn title_of(field: &str, label: impl Into<String>) -> Self {
        Self::text(format!("{}.title", field), label).read_only()
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    pub fn multiline(mut self, rows: u32) -> Self {
        self.multiline = true;
        self.rows = Some(rows);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Seed for this column in a fresh new-entry row.
    pub fn initial_value(&self) -> Value {
        match &self.default_value {
            Some(v) if !v.is_null() => v.clone(),
            _ => Value::String(String::new()),
        }
    }

    /// Converts an input's text back into a cell value. A number column only
    /// stores a number when it reads back as exactly the typed text, so
    /// unfinished input such as `1.` or `0.50` stays as typed.
    pub fn parse_input(&self, raw: &str) -> Value {
        if self.column_type != ColumnType::Number {
            return Value::String(raw.to_string());
        }
        let trimmed = raw.trim();
        match parse_number(trimmed) {
            Some(n) if display_text(&n) == trimmed => n,
            _ => Value::String(raw.to_string()),
        }
    }

    /// Value as submitted: numeric text in a number column becomes a number.
    pub fn finalize(&self, value: Value) -> Value {
        if self.column_type != ColumnType::Number {
            return value;
        }
        match value.as_str().and_then(|s| parse_number(s.trim())) {
            Some(n) => n,
            None => value,
        }
    }

    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::from(n));
    }
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_column_shape() {
        let id = ColumnSchema::id();
        assert_eq!(id.key, "id");
        assert_eq!(id.column_type, ColumnType::Number);
        assert!(!id.editable);
    }

    #[test]
    fn test_parse_input_by_type() {
        let price = ColumnSchema::number("price", "قیمت");
        assert_eq!(price.parse_input("1200"), json!(1200));
        assert_eq!(price.parse_input(" 2.5 "), json!(2.5));
        assert_eq!(price.parse_input(""), json!(""));
        assert_eq!(price.parse_input("12a"), json!("12a"));
        assert_eq!(price.parse_input("NaN"), json!("NaN"));

        let title = ColumnSchema::text("title", "عنوان");
        assert_eq!(title.parse_input("42"), json!("42"));
    }

    #[test]
    fn test_typing_a_decimal_keeps_the_text() {
        let price = ColumnSchema::number("price", "قیمت");
        let mut shown = String::new();
        for key in ["1", ".", "5"] {
            shown.push_str(key);
            let value = price.parse_input(&shown);
            assert_eq!(display_text(&value), shown);
        }
        assert_eq!(price.parse_input(&shown), json!(1.5));

        assert_eq!(price.parse_input("1."), json!("1."));
        assert_eq!(price.parse_input("0.50"), json!("0.50"));
        assert_eq!(price.finalize(json!("1.")), json!(1.0));
        assert_eq!(price.finalize(json!("0.50")), json!(0.5));
        assert_eq!(price.finalize(json!("")), json!(""));
        assert_eq!(price.finalize(json!("inf")), json!("inf"));

        let title = ColumnSchema::text("title", "عنوان");
        assert_eq!(title.finalize(json!("12")), json!("12"));
    }

    #[test]
    fn test_dimensions_formatter() {
        let row = json!({ "dimension": { "width": 70, "height": 100 } });
        assert_eq!(Formatter::Dimensions.apply(&row["dimension"], &row), "70 × 100");
        assert_eq!(Formatter::Dimensions.apply(&Value::Null, &row), "-");
    }

    #[test]
    fn test_serializes_type_field() {
        let column = ColumnSchema::select(
            "uv_type",
            "نوع UV",
            vec![SelectOption::new("glossy", "براق")],
        );
        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(value["type"], json!("select"));
        assert_eq!(column.option_label("glossy"), Some("براق"));
        assert_eq!(column.option_label("matte"), None);
    }

    #[test]
    fn test_initial_value_defaults_to_empty_string() {
        assert_eq!(ColumnSchema::number("price", "قیمت").initial_value(), json!(""));
        assert_eq!(
            ColumnSchema {
                default_value: Some(json!(0)),
                ..ColumnSchema::number("price", "قیمت")
            }
            .initial_value(),
            json!(0)
        );
    }
}
