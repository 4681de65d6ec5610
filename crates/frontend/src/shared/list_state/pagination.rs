//! Page state kept in the URL, plus the trigger that sends a list back to its
//! first page when the sanitized filters or sorts change.

use contracts::shared::list_query::{ListParams, TypedBackendFilter, TypedBackendSort};
use serde::Serialize;

use super::config::HistoryMode;
use super::query_string::{get_param, merge_query, same_query};
use super::store::LocationStore;

/// `page`, or `{prefix}_page` when several paginated lists share one URL
pub fn page_param_key(prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}_page", prefix),
        _ => "page".to_string(),
    }
}

pub struct PaginationController<L: LocationStore> {
    location: L,
    page_key: String,
    limit: usize,
    history_mode: HistoryMode,
}

impl<L: LocationStore> PaginationController<L> {
    pub fn new(location: L, prefix: Option<&str>, limit: usize, history_mode: HistoryMode) -> Self {
        Self {
            location,
            page_key: page_param_key(prefix),
            limit: limit.max(1),
            history_mode,
        }
    }

    pub fn page_key(&self) -> &str {
        &self.page_key
    }

    /// Current 1-based page; absent or invalid values read as 1
    pub fn page(&self) -> usize {
        get_param(&self.location.search(), &self.page_key)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }

    pub fn set_page(&mut self, page: usize) {
        let page = page.max(1).to_string();
        self.write_page(&page, self.history_mode);
    }

    /// Back to page 1. Returns true when the URL actually changed.
    pub fn reset(&mut self) -> bool {
        let search = self.location.search();
        match get_param(&search, &self.page_key) {
            Some(raw) if raw != "1" => {
                log::debug!("pagination '{}' reset to 1", self.page_key);
                self.write_page("1", HistoryMode::Replace)
            }
            _ => false,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the page size (in memory only) and go back to page 1
    pub fn set_limit(&mut self, limit: usize) {
        let limit = limit.max(1);
        if limit != self.limit {
            self.limit = limit;
            self.reset();
        }
    }

    pub fn offset(&self) -> usize {
        self.page().saturating_sub(1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }

    /// Request for the main list query at the current page
    pub fn params(
        &self,
        filters: &[TypedBackendFilter],
        sort: &[TypedBackendSort],
    ) -> ListParams {
        ListParams {
            limit: self.limit,
            offset: self.offset(),
            filters: filters.to_vec(),
            sort: sort.to_vec(),
        }
    }

    fn write_page(&self, page: &str, mode: HistoryMode) -> bool {
        let search = self.location.search();
        let next = merge_query(&search, &[(self.page_key.as_str(), Some(page))]);
        if same_query(&next, &search) {
            return false;
        }
        match self.location.write_search(&next, mode) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("page update '{}' failed: {}", self.page_key, e);
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResetPhase {
    /// Nothing observed yet (first render)
    #[default]
    Initial,
    /// Serialized baseline of the last observed filters and sorts
    Tracking { filters: String, sorts: String },
}

/// Decides when pagination must go back to page 1.
///
/// The first observation only records a baseline, so mounting a list never
/// resets a page that came from the URL. Later observations compare
/// serialized content, not identity, so re-renders with equal state are free.
#[derive(Debug, Clone, Default)]
pub struct ResetTrigger {
    phase: ResetPhase,
}

impl ResetTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ResetPhase {
        &self.phase
    }

    /// Record the current state; true means "reset pagination now"
    pub fn observe(&mut self, filters: &[TypedBackendFilter], sorts: &[TypedBackendSort]) -> bool {
        let filters = snapshot_key(filters);
        let sorts = snapshot_key(sorts);

        let changed = match &self.phase {
            ResetPhase::Initial => false,
            ResetPhase::Tracking {
                filters: base_filters,
                sorts: base_sorts,
            } => *base_filters != filters || *base_sorts != sorts,
        };

        if changed || self.phase == ResetPhase::Initial {
            self.phase = ResetPhase::Tracking { filters, sorts };
        }
        changed
    }
}

fn snapshot_key<T: Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_default()
}
