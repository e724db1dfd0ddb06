//! Filter selectors narrowing a price query, and the reference lists
//! that feed them.

use super::category::PriceCategory;
use crate::shared::json_path::display_text;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which selectors a category shows. The cooperator selector is always on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSelectors {
    pub cooperator: bool,
    pub circulation_range: bool,
    pub box_type: bool,
    pub bindery_type: bool,
}

impl ActiveSelectors {
    pub fn for_category(category: PriceCategory) -> Self {
        Self {
            cooperator: true,
            circulation_range: category.needs_range_selector(),
            box_type: category.needs_box_type_selector(),
            bindery_type: category.needs_bindery_type_selector(),
        }
    }
}

/// Current selections. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceFilters {
    pub cooperator: Option<String>,
    pub range_id: Option<String>,
    pub box_type: Option<String>,
    pub bindery_type: Option<String>,
}

impl PriceFilters {
    /// Query parameters for `GET /client/offset/{category}`.
    ///
    /// Selections for selectors the category does not show are dropped. Box
    /// and bindery type share the `type` parameter, but at most one of them
    /// is active for any category.
    pub fn query_params(&self, category: PriceCategory) -> Vec<(&'static str, String)> {
        let active = ActiveSelectors::for_category(category);
        let mut params = Vec::new();

        if let Some(cooperator) = non_empty(&self.cooperator) {
            params.push(("cooperator", cooperator));
        }
        if active.circulation_range {
            if let Some(range) = non_empty(&self.range_id) {
                params.push(("range_id", range));
            }
        }
        let kind = if active.box_type {
            non_empty(&self.box_type)
        } else if active.bindery_type {
            non_empty(&self.bindery_type)
        } else {
            None
        };
        if let Some(kind) = kind {
            params.push(("type", kind));
        }
        params
    }

    /// New entries are created for the selected cooperator (`null` for "all").
    pub fn attach_cooperator(&self, entry: &mut Value) {
        let cooperator = match non_empty(&self.cooperator) {
            Some(id) => id
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::String(id)),
            None => Value::Null,
        };
        if let Value::Object(map) = entry {
            map.insert("cooperator_id".to_string(), cooperator);
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Maps a select's raw value to a selection: the empty "all" option clears it.
pub fn selection(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cooperator {
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Cooperator {
    pub fn value(&self) -> String {
        display_text(&self.id)
    }

    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| format!("#{}", self.value()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculationRange {
    pub id: Value,
    #[serde(default)]
    pub from: Option<Value>,
    #[serde(default)]
    pub to: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
}

impl CirculationRange {
    pub fn value(&self) -> String {
        display_text(&self.id)
    }

    /// `from - to` with Persian digits, or the title when bounds are missing.
    pub fn label(&self) -> String {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => format!(
                "{} - {}",
                persian_grouped(&display_text(from)),
                persian_grouped(&display_text(to))
            ),
            _ => self.title.clone().unwrap_or_else(|| self.value()),
        }
    }
}

/// Box and bindery type entries. The selection value is `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOption {
    pub id: Value,
    pub key: String,
    pub title: String,
}

/// `12000` → `۱۲٬۰۰۰`. Non-integer text is only digit-mapped.
pub fn persian_grouped(number: &str) -> String {
    let grouped = if number.chars().all(|c| c.is_ascii_digit()) && !number.is_empty() {
        let digits: Vec<char> = number.chars().collect();
        let mut out = String::new();
        for (i, c) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('٬');
            }
            out.push(*c);
        }
        out
    } else {
        number.to_string()
    };
    grouped
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32('۰' as u32 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn all_set() -> PriceFilters {
        PriceFilters {
            cooperator: Some("4".into()),
            range_id: Some("2".into()),
            box_type: Some("drawer".into()),
            bindery_type: Some("spiral".into()),
        }
    }

    #[test]
    fn test_active_selectors() {
        let boxes = ActiveSelectors::for_category(PriceCategory::Boxes);
        assert!(boxes.cooperator && boxes.circulation_range && boxes.box_type);
        assert!(!boxes.bindery_type);

        let papers = ActiveSelectors::for_category(PriceCategory::Papers);
        assert!(papers.cooperator);
        assert!(!papers.circulation_range && !papers.box_type && !papers.bindery_type);
    }

    #[test]
    fn test_query_params_respect_active_selectors() {
        let filters = all_set();
        assert_eq!(
            filters.query_params(PriceCategory::Boxes),
            vec![
                ("cooperator", "4".to_string()),
                ("range_id", "2".to_string()),
                ("type", "drawer".to_string()),
            ]
        );
        assert_eq!(
            filters.query_params(PriceCategory::Binderies),
            vec![("cooperator", "4".to_string()), ("type", "spiral".to_string())]
        );
        assert_eq!(
            filters.query_params(PriceCategory::Papers),
            vec![("cooperator", "4".to_string())]
        );
        assert!(PriceFilters::default().query_params(PriceCategory::Boxes).is_empty());
    }

    #[test]
    fn test_attach_cooperator() {
        let mut entry = json!({ "price": "100" });
        all_set().attach_cooperator(&mut entry);
        assert_eq!(entry["cooperator_id"], json!(4));

        let mut entry = json!({ "price": "100" });
        PriceFilters::default().attach_cooperator(&mut entry);
        assert_eq!(entry["cooperator_id"], Value::Null);
    }

    #[test]
    fn test_reference_labels() {
        let range: CirculationRange =
            serde_json::from_value(json!({ "id": 1, "from": 1000, "to": 5000 })).unwrap();
        assert_eq!(range.label(), "۱٬۰۰۰ - ۵٬۰۰۰");

        let cooperator: Cooperator = serde_json::from_value(json!({ "id": 7 })).unwrap();
        assert_eq!(cooperator.label(), "#7");
        assert_eq!(selection(""), None);
    }
}
