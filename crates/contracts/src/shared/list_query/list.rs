use serde::{Deserialize, Serialize};

use super::wire::{TypedBackendFilter, TypedBackendSort};

/// Request passed to a list fetch function
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub limit: usize,
    pub offset: usize,
    #[serde(default)]
    pub filters: Vec<TypedBackendFilter>,
    #[serde(default)]
    pub sort: Vec<TypedBackendSort>,
}

impl ListParams {
    /// Unfiltered single-row request used to check whether a list has any data
    pub fn probe(limit: usize) -> Self {
        Self {
            limit,
            offset: 0,
            filters: Vec::new(),
            sort: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> ListResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationMeta::default(),
        }
    }
}
