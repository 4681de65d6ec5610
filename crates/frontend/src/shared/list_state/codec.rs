//! URL/session codec for filter and sort arrays.
//!
//! Serialized form is a JSON array (dates as ISO-8601 strings). An empty array
//! serializes to `""` so the param is omitted rather than written as `[]`.
//! Decoding fails soft: absent, blank, malformed or non-array input gives `None`.

use contracts::shared::list_query::{FilterCondition, SortOption};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ListStateError;

pub fn get_filters_param_key(key: &str) -> String {
    format!("{}_filters", key)
}

pub fn get_sorts_param_key(key: &str) -> String {
    format!("{}_sorts", key)
}

pub fn get_filter_state_session_key(key: &str) -> String {
    format!("filter_state_{}", key)
}

fn encode_list<T: Serialize>(items: &[T]) -> String {
    if items.is_empty() {
        return String::new();
    }
    match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to serialize list state: {}", e);
            String::new()
        }
    }
}

fn try_decode_list<T: DeserializeOwned>(value: &str) -> Result<Vec<T>, ListStateError> {
    Ok(serde_json::from_str::<Vec<T>>(value)?)
}

fn decode_list<T: DeserializeOwned>(value: Option<&str>) -> Option<Vec<T>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    match try_decode_list(value) {
        Ok(items) => Some(items),
        Err(e) => {
            log::warn!("Ignoring unreadable list state: {}", e);
            None
        }
    }
}

pub fn serialize_filters(filters: &[FilterCondition]) -> String {
    encode_list(filters)
}

pub fn deserialize_filters(value: Option<&str>) -> Option<Vec<FilterCondition>> {
    decode_list(value)
}

pub fn serialize_sorts(sorts: &[SortOption]) -> String {
    encode_list(sorts)
}

pub fn deserialize_sorts(value: Option<&str>) -> Option<Vec<SortOption>> {
    decode_list(value)
}

/// Session-storage entry under `filter_state_{key}`.
///
/// Both fields hold the serialized strings above, not nested arrays.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub filters: String,
    #[serde(default)]
    pub sorts: String,
}

impl SessionSnapshot {
    pub fn new(filters: &[FilterCondition], sorts: &[SortOption]) -> Self {
        Self {
            filters: serialize_filters(filters),
            sorts: serialize_sorts(sorts),
        }
    }

    pub fn encode(&self) -> Result<String, ListStateError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str::<SessionSnapshot>(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("Ignoring unreadable session snapshot: {}", e);
                None
            }
        }
    }

    pub fn filters(&self) -> Option<Vec<FilterCondition>> {
        deserialize_filters(Some(self.filters.as_str()))
    }

    pub fn sorts(&self) -> Option<Vec<SortOption>> {
        deserialize_sorts(Some(self.sorts.as_str()))
    }
}
