//! Filter rows and defaults of the customer list.
//!
//! Both filter rows use fixed ids so editing replaces the row in place and
//! the serialized URL state stays stable between edits.

use contracts::domain::customer::aggregate::CustomerStatus;
use contracts::shared::list_query::{
    FilterCondition, FilterDataType, FilterOperator, SortDirection, SortOption,
    TypedBackendFilter,
};

use crate::shared::list_state::{FilterSortOptions, ListEngineConfig};

/// Persistence key: URL params `fetchCustomers_*`, session `filter_state_fetchCustomers`
pub const PERSISTENCE_KEY: &str = "fetchCustomers";

pub const STATUS_FILTER_ID: &str = "status";
pub const NAME_FILTER_ID: &str = "name";

pub fn status_filter(status: CustomerStatus) -> FilterCondition {
    FilterCondition::new("status", FilterOperator::Equal, FilterDataType::String)
        .with_id(STATUS_FILTER_ID)
        .with_string(status.as_str())
}

pub fn name_filter(query: &str) -> FilterCondition {
    FilterCondition::new("name", FilterOperator::Contains, FilterDataType::String)
        .with_id(NAME_FILTER_ID)
        .with_string(query)
}

pub fn parse_status(value: &str) -> Option<CustomerStatus> {
    CustomerStatus::all()
        .iter()
        .copied()
        .find(|s| s.as_str() == value)
}

pub fn selected_status(filters: &[FilterCondition]) -> Option<CustomerStatus> {
    filters
        .iter()
        .find(|f| f.field == "status")
        .and_then(|f| f.value_string.as_deref())
        .and_then(parse_status)
}

pub fn name_query(filters: &[FilterCondition]) -> String {
    filters
        .iter()
        .find(|f| f.id == NAME_FILTER_ID)
        .and_then(|f| f.value_string.clone())
        .unwrap_or_default()
}

pub fn default_sorts() -> Vec<SortOption> {
    vec![SortOption::new("created_at", "Created", SortDirection::Desc)]
}

pub fn filter_options(config: &ListEngineConfig) -> FilterSortOptions {
    FilterSortOptions {
        initial_filters: Vec::new(),
        initial_sorts: default_sorts(),
        debounce_ms: config.debounce_ms,
        on_filter_change: Some(Box::new(|filters: &[TypedBackendFilter]| {
            log::debug!("customer filters changed: {} active", filters.len());
        })),
        on_sort_change: None,
    }
}
