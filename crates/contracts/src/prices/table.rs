//! State behind the editable price table.
//!
//! The table edits a private copy of the fetched rows; nothing reaches the
//! server until the caller submits [`EditableTable::edited_rows`] or a single
//! row. Replacing the source rows discards all local edits.

use super::column::{ColumnSchema, ColumnType};
use crate::shared::json_path::{display_text, read_path, write_path};
use serde_json::{Map, Value};

/// What a read-only cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDisplay {
    Text(String),
    /// Matched select option, rendered as a badge.
    Badge(String),
}

impl CellDisplay {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(t) | Self::Badge(t) => t,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditableTable {
    schema: Vec<ColumnSchema>,
    rows: Vec<Value>,
    new_entry: Value,
}

impl EditableTable {
    pub fn new(schema: Vec<ColumnSchema>, rows: Vec<Value>) -> Self {
        let new_entry = Self::seed(&schema);
        Self {
            schema,
            rows,
            new_entry,
        }
    }

    fn seed(schema: &[ColumnSchema]) -> Value {
        let mut entry = Value::Object(Map::new());
        for column in schema.iter().filter(|c| c.editable) {
            write_path(&mut entry, &column.key, column.initial_value());
        }
        entry
    }

    pub fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// New source data: local edits are dropped.
    pub fn reset_rows(&mut self, rows: Vec<Value>) {
        self.rows = rows;
    }

    /// New schema: the new-entry row is re-seeded from its defaults.
    pub fn reset_schema(&mut self, schema: Vec<ColumnSchema>) {
        self.new_entry = Self::seed(&schema);
        self.schema = schema;
    }

    pub fn cell_value(&self, row: usize, key: &str) -> Value {
        self.rows
            .get(row)
            .map(|r| read_path(r, key))
            .unwrap_or_else(|| Value::String(String::new()))
    }

    /// Edits one cell of the local copy. Out-of-range rows are ignored.
    pub fn set_cell(&mut self, row: usize, key: &str, value: Value) {
        if let Some(record) = self.rows.get_mut(row) {
            write_path(record, key, value);
        }
    }

    pub fn row_id(&self, row: usize) -> Option<Value> {
        self.rows
            .get(row)
            .and_then(|r| r.get("id"))
            .filter(|id| !id.is_null())
            .cloned()
    }

    /// A record as it is sent to the server. Number cells still holding
    /// typed text are converted.
    fn finalize(&self, record: &Value) -> Value {
        let mut record = record.clone();
        for column in self.schema.iter().filter(|c| c.editable) {
            let value = read_path(&record, &column.key);
            let finalized = column.finalize(value.clone());
            if finalized != value {
                write_path(&mut record, &column.key, finalized);
            }
        }
        record
    }

    /// The whole edited set, as submitted by bulk save.
    pub fn edited_rows(&self) -> Vec<Value> {
        self.rows.iter().map(|r| self.finalize(r)).collect()
    }

    /// One edited row, as submitted by its save button.
    pub fn row_payload(&self, row: usize) -> Option<Value> {
        self.rows.get(row).map(|r| self.finalize(r))
    }

    pub fn new_entry(&self) -> &Value {
        &self.new_entry
    }

    /// The new entry as submitted by the add button.
    pub fn new_entry_payload(&self) -> Value {
        self.finalize(&self.new_entry)
    }

    pub fn new_entry_value(&self, key: &str) -> Value {
        read_path(&self.new_entry, key)
    }

    pub fn set_new_entry(&mut self, key: &str, value: Value) {
        write_path(&mut self.new_entry, key, value);
    }

    /// Hands out the new entry for submission and clears the row back to defaults.
    pub fn take_new_entry(&mut self) -> Value {
        let entry = self.new_entry_payload();
        self.new_entry = Self::seed(&self.schema);
        entry
    }

    /// Read-only rendering of one cell. A column formatter wins over the
    /// type-based rendering and receives the row's top-level value under the
    /// column key when there is one.
    pub fn display_value(column: &ColumnSchema, row: &Value) -> CellDisplay {
        let value = read_path(row, &column.key);

        if let Some(formatter) = column.formatter {
            let raw = row
                .get(&column.key)
                .filter(|v| !v.is_null())
                .unwrap_or(&value);
            return CellDisplay::Text(formatter.apply(raw, row));
        }

        let text = display_text(&value);
        match column.column_type {
            ColumnType::Select => match column.option_label(&text) {
                Some(label) => CellDisplay::Badge(label.to_string()),
                None => CellDisplay::Text(text),
            },
            ColumnType::Number => match &column.suffix {
                Some(suffix) if !text.is_empty() => {
                    CellDisplay::Text(format!("{} {}", text, suffix))
                }
                _ => CellDisplay::Text(text),
            },
            ColumnType::Text => CellDisplay::Text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::column::{Formatter, SelectOption};
    use serde_json::json;

    fn schema() -> Vec<ColumnSchema> {
        vec![
            ColumnSchema::id(),
            ColumnSchema::title_of("machine", "ماشین"),
            ColumnSchema {
                default_value: Some(json!(0)),
                ..ColumnSchema::number("price", "قیمت")
            },
            ColumnSchema::text("title", "عنوان"),
        ]
    }

    fn rows() -> Vec<Value> {
        vec![
            json!({ "id": 1, "machine": { "title": "GTO" }, "price": 100, "title": "A" }),
            json!({ "id": 2, "price": 200, "title": "B" }),
        ]
    }

    #[test]
    fn test_new_entry_seeded_from_editable_columns() {
        let table = EditableTable::new(schema(), rows());
        assert_eq!(table.new_entry(), &json!({ "price": 0, "title": "" }));
    }

    #[test]
    fn test_take_new_entry_resets_to_defaults() {
        let mut table = EditableTable::new(schema(), rows());
        table.set_new_entry("title", json!("C"));
        table.set_new_entry("price", json!("300"));

        let submitted = table.take_new_entry();
        assert_eq!(submitted, json!({ "price": 300, "title": "C" }));
        assert_eq!(table.new_entry_value("title"), json!(""));
        assert_eq!(table.new_entry_value("price"), json!(0));
    }

    #[test]
    fn test_cell_edits_stay_local_until_reset() {
        let mut table = EditableTable::new(schema(), rows());
        table.set_cell(1, "machine.title", json!("SM 52"));
        table.set_cell(0, "price", json!("150"));
        table.set_cell(9, "price", json!("ignored"));

        let edited = table.edited_rows();
        assert_eq!(edited[1]["machine"]["title"], json!("SM 52"));
        assert_eq!(edited[0]["price"], json!(150));
        assert_eq!(table.cell_value(0, "price"), json!("150"));

        table.reset_rows(rows());
        assert_eq!(table.cell_value(0, "price"), json!(100));
        assert_eq!(table.cell_value(1, "machine.title"), json!(""));
        assert_eq!(table.row_id(1), Some(json!(2)));
        assert_eq!(table.row_id(5), None);
    }

    #[test]
    fn test_typed_decimal_is_submitted_as_typed() {
        let mut table = EditableTable::new(schema(), rows());
        let price = table.schema()[2].clone();
        for typed in ["1", "1.", "1.5"] {
            let value = price.parse_input(typed);
            table.set_cell(0, "price", value);
            assert_eq!(display_text(&table.cell_value(0, "price")), typed);
        }
        assert_eq!(table.row_payload(0).unwrap()["price"], json!(1.5));

        table.set_cell(1, "price", price.parse_input("2."));
        assert_eq!(table.edited_rows()[1]["price"], json!(2.0));
        assert_eq!(table.row_payload(7), None);

        table.set_new_entry("price", price.parse_input("0.50"));
        assert_eq!(table.new_entry_payload()["price"], json!(0.5));
        assert_eq!(table.new_entry_value("price"), json!("0.50"));
    }

    #[test]
    fn test_display_value_dispatch() {
        let row = json!({
            "id": 1,
            "kind": "matte",
            "grammage": 80,
            "dimension": { "width": 50, "height": 70 },
        });

        let select = ColumnSchema::select(
            "kind",
            "نوع",
            vec![SelectOption::new("glossy", "براق"), SelectOption::new("matte", "مات")],
        );
        assert_eq!(
            EditableTable::display_value(&select, &row),
            CellDisplay::Badge("مات".into())
        );

        let unmatched = ColumnSchema::select("kind", "نوع", vec![]);
        assert_eq!(
            EditableTable::display_value(&unmatched, &row),
            CellDisplay::Text("matte".into())
        );

        let weighted = ColumnSchema::number("grammage", "گرماژ").with_suffix("گرم");
        assert_eq!(EditableTable::display_value(&weighted, &row).text(), "80 گرم");

        let dimension = ColumnSchema::text("dimension", "ابعاد")
            .read_only()
            .with_formatter(Formatter::Dimensions);
        assert_eq!(EditableTable::display_value(&dimension, &row).text(), "50 × 70");

        let missing = ColumnSchema::title_of("machine", "ماشین");
        assert_eq!(EditableTable::display_value(&missing, &row).text(), "");
    }
}
