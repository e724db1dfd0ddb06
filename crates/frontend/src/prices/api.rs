//! Price tables service on `/client/offset`.

use contracts::prices::category::PriceCategory;
use contracts::prices::filters::{CirculationRange, Cooperator, TypeOption};
use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::DataOrBare;
use contracts::shared::json_path::display_text;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::shared::api_client::{use_api, ApiClient, ApiResource};

#[derive(Clone)]
pub struct PriceService {
    resource: ApiResource,
}

impl PriceService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: ApiResource::new(client, "/client/offset"),
        }
    }

    pub fn client(&self) -> &ApiClient {
        self.resource.client()
    }

    /// Rows of one category, narrowed by the filter query parameters
    pub async fn price_table(
        &self,
        category: PriceCategory,
        params: &[(&str, String)],
    ) -> Result<Vec<Value>, ApiError> {
        if !self.client().is_authenticated() {
            log::warn!("No authentication token found. Make sure user is logged in.");
        }
        let body: DataOrBare<Vec<Value>> = self
            .resource
            .get(&format!("/{}", category.slug()), params)
            .await?;
        Ok(body.into_inner())
    }

    /// Cooperators offering `category`
    pub async fn cooperators(&self, category: PriceCategory) -> Result<Vec<Cooperator>, ApiError> {
        self.list(&format!("/{}", category.slug())).await
    }

    pub async fn circulation_ranges(&self) -> Result<Vec<CirculationRange>, ApiError> {
        self.list("/circulation_range").await
    }

    pub async fn box_types(&self) -> Result<Vec<TypeOption>, ApiError> {
        self.list("/box-types").await
    }

    pub async fn bindery_types(&self) -> Result<Vec<TypeOption>, ApiError> {
        self.list("/bindery_types").await
    }

    pub async fn create_entry(
        &self,
        category: PriceCategory,
        entry: &Value,
    ) -> Result<Value, ApiError> {
        self.resource
            .post(&format!("/{}", category.slug()), entry)
            .await
    }

    pub async fn update_entry(
        &self,
        category: PriceCategory,
        id: &Value,
        entry: &Value,
    ) -> Result<Value, ApiError> {
        self.resource
            .put(&entry_path(category, id), entry)
            .await
    }

    pub async fn delete_entry(&self, category: PriceCategory, id: &Value) -> Result<Value, ApiError> {
        self.resource.delete(&entry_path(category, id)).await
    }

    /// Replaces the category's entries with the edited set in one call
    pub async fn bulk_update(
        &self,
        category: PriceCategory,
        entries: Vec<Value>,
    ) -> Result<Value, ApiError> {
        self.resource
            .put(
                &format!("/{}/bulk", category.slug()),
                &json!({ "entries": entries }),
            )
            .await
    }

    async fn list<T: DeserializeOwned>(&self, sub: &str) -> Result<Vec<T>, ApiError> {
        let body: DataOrBare<Vec<Value>> = self.resource.get(sub, &[]).await?;
        Ok(decode_items(sub, body.into_inner()))
    }
}

fn entry_path(category: PriceCategory, id: &Value) -> String {
    format!("/{}/{}", category.slug(), display_text(id))
}

/// Items that do not fit `T` are logged and skipped.
fn decode_items<T: DeserializeOwned>(source: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!("Skipping malformed item from {}: {}", source, e);
                None
            }
        })
        .collect()
}

pub fn use_price_service() -> PriceService {
    PriceService::new(use_api())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_path_formats_numeric_and_string_ids() {
        assert_eq!(entry_path(PriceCategory::Papers, &json!(15)), "/papers/15");
        assert_eq!(entry_path(PriceCategory::Binderies, &json!("b-2")), "/binderies/b-2");
    }

    #[test]
    fn test_decode_items_skips_malformed() {
        let items = vec![
            json!({ "id": 1, "key": "simple", "title": "ساده" }),
            json!({ "id": 2 }),
            json!({ "id": 3, "key": "rigid", "title": "سخت" }),
        ];
        let types: Vec<TypeOption> = decode_items("/box-types", items);
        assert_eq!(types.len(), 2);
        assert_eq!(types[1].key, "rigid");
    }
}
