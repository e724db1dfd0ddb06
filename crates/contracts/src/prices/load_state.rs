//! Fetch and mutation state of one category's price table.
//!
//! Every fetch takes a ticket from [`RequestGeneration`]; a response is only
//! applied when its ticket is still the latest, so a slow superseded fetch
//! can never overwrite newer data.

use super::category::PriceCategory;
use super::column::ColumnSchema;
use super::filters::{ActiveSelectors, PriceFilters};
use super::schema::{default_schema_for, schema_for};
use crate::shared::api_error::ApiError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
    BulkSave,
}

impl Mutation {
    pub fn error_prefix(&self) -> &'static str {
        match self {
            Self::Create => "خطا در ایجاد",
            Self::Update => "خطا در به‌روزرسانی",
            Self::Delete => "خطا در حذف",
            Self::BulkSave => "خطا در ذخیره",
        }
    }

    pub fn describe(&self, message: &str) -> String {
        format!("{}: {}", self.error_prefix(), message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceTableState {
    pub category: PriceCategory,
    pub filters: PriceFilters,
    pub load: LoadState,
    pub rows: Vec<Value>,
    pub schema: Option<Vec<ColumnSchema>>,
    pub is_editing: bool,
    pub saving: bool,
    pub mutation_error: Option<String>,
    /// Set when the last fetch failed in a way a manual retry may fix.
    pub retryable: bool,
    generation: RequestGeneration,
}

impl PriceTableState {
    pub fn new(category: PriceCategory) -> Self {
        Self {
            category,
            filters: PriceFilters::default(),
            load: LoadState::Idle,
            rows: Vec::new(),
            schema: None,
            is_editing: false,
            saving: false,
            mutation_error: None,
            retryable: false,
            generation: RequestGeneration::default(),
        }
    }

    pub fn selectors(&self) -> ActiveSelectors {
        ActiveSelectors::for_category(self.category)
    }

    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        self.filters.query_params(self.category)
    }

    /// Enters `Loading` and returns the ticket the response must present.
    pub fn begin_fetch(&mut self) -> u64 {
        self.load = LoadState::Loading;
        self.mutation_error = None;
        self.retryable = false;
        self.generation.next()
    }

    /// Applies a fetch result. Returns `false` when the ticket was superseded
    /// and the result was dropped.
    pub fn finish_fetch(&mut self, ticket: u64, result: Result<Vec<Value>, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        match result {
            Ok(rows) => {
                let schema = match rows.first() {
                    Some(sample) => schema_for(self.category, sample),
                    None => default_schema_for(self.category),
                };
                self.schema = Some(schema);
                self.rows = rows;
                self.load = LoadState::Ready;
            }
            // Prior rows and schema stay on screen under the alert.
            Err(error) => {
                self.retryable = error.kind.should_retry();
                self.load = LoadState::Error(error.message);
            }
        }
        true
    }

    pub fn mutation_failed(&mut self, mutation: Mutation, message: &str) {
        self.mutation_error = Some(mutation.describe(message));
    }

    pub fn bulk_saved(&mut self) {
        self.is_editing = false;
    }

    pub fn toggle_editing(&mut self) {
        self.is_editing = !self.is_editing;
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading || self.saving
    }

    /// Message for the inline alert, mutation failures first.
    pub fn alert(&self) -> Option<&str> {
        if let Some(message) = &self.mutation_error {
            return Some(message);
        }
        match &self.load {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the alert should offer a retry of the failed fetch.
    pub fn can_retry(&self) -> bool {
        self.retryable && self.mutation_error.is_none() && matches!(self.load, LoadState::Error(_))
    }

    pub fn dismiss_alert(&mut self) {
        self.mutation_error = None;
        if matches!(self.load, LoadState::Error(_)) {
            self.load = if self.schema.is_some() {
                LoadState::Ready
            } else {
                LoadState::Idle
            };
        }
    }

    pub fn show_empty_state(&self) -> bool {
        !self.is_loading() && self.alert().is_none() && self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_superseded_fetch_is_dropped() {
        let mut state = PriceTableState::new(PriceCategory::Papers);
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.finish_fetch(second, Ok(vec![json!({ "id": 2, "title": "new" })])));
        assert!(!state.finish_fetch(first, Ok(vec![json!({ "id": 1, "title": "old" })])));

        assert_eq!(state.rows[0]["id"], json!(2));
        assert_eq!(state.load, LoadState::Ready);
    }

    #[test]
    fn test_empty_result_uses_default_schema() {
        let mut state = PriceTableState::new(PriceCategory::Boxes);
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![]));

        let keys: Vec<_> = state
            .schema
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.key.clone())
            .collect();
        assert_eq!(keys, vec!["id", "title", "price"]);
        assert!(state.show_empty_state());
    }

    #[test]
    fn test_fetch_error_keeps_prior_rows() {
        let mut state = PriceTableState::new(PriceCategory::Cuts);
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![json!({ "id": 1, "price": 10 })]));

        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Err(ApiError::network("Network error")));

        assert_eq!(state.alert(), Some("Network error"));
        assert!(state.can_retry());
        assert_eq!(state.rows.len(), 1);
        assert!(!state.show_empty_state());

        state.dismiss_alert();
        assert_eq!(state.load, LoadState::Ready);
        assert_eq!(state.alert(), None);
    }

    #[test]
    fn test_retry_offered_only_for_transient_failures() {
        let mut state = PriceTableState::new(PriceCategory::Papers);
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Err(ApiError::from_response(404, "")));
        assert!(!state.can_retry());

        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Err(ApiError::from_response(503, "")));
        assert!(state.can_retry());

        state.mutation_failed(Mutation::Delete, "x");
        assert!(!state.can_retry());

        state.begin_fetch();
        assert!(!state.can_retry());
    }

    #[test]
    fn test_mutation_errors_are_prefixed() {
        let mut state = PriceTableState::new(PriceCategory::Uvs);
        state.is_editing = true;
        state.mutation_failed(Mutation::BulkSave, "Server error");
        assert_eq!(state.alert(), Some("خطا در ذخیره: Server error"));
        assert!(state.is_editing);

        state.begin_fetch();
        assert_eq!(state.alert(), None);
        state.bulk_saved();
        assert!(!state.is_editing);
    }
}
