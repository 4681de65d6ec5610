//! Canonical in-memory filter/sort state of one list.
//!
//! Raw edits apply synchronously so controlled inputs never lag; the sanitized
//! (backend-ready) arrays follow after a quiet debounce window.

use contracts::shared::list_query::{
    active_filter_count, sanitize_filters, sanitize_sorts, FilterCondition, SortOption,
    TypedBackendFilter, TypedBackendSort,
};

use super::debounce::{Debouncer, Millis};

pub type FilterChangeFn = Box<dyn FnMut(&[TypedBackendFilter])>;
pub type SortChangeFn = Box<dyn FnMut(&[TypedBackendSort])>;

pub struct FilterSortOptions {
    pub initial_filters: Vec<FilterCondition>,
    pub initial_sorts: Vec<SortOption>,
    pub debounce_ms: Millis,
    pub on_filter_change: Option<FilterChangeFn>,
    pub on_sort_change: Option<SortChangeFn>,
}

impl Default for FilterSortOptions {
    fn default() -> Self {
        Self {
            initial_filters: Vec::new(),
            initial_sorts: Vec::new(),
            debounce_ms: 300,
            on_filter_change: None,
            on_sort_change: None,
        }
    }
}

/// What a debounce flush changed; `None` fields did not change
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SanitizedUpdate {
    pub filters: Option<Vec<TypedBackendFilter>>,
    pub sorts: Option<Vec<TypedBackendSort>>,
}

impl SanitizedUpdate {
    pub fn is_empty(&self) -> bool {
        self.filters.is_none() && self.sorts.is_none()
    }
}

pub struct FilterSortController {
    initial_filters: Vec<FilterCondition>,
    initial_sorts: Vec<SortOption>,
    filters: Vec<FilterCondition>,
    sorts: Vec<SortOption>,
    sanitized_filters: Vec<TypedBackendFilter>,
    sanitized_sorts: Vec<TypedBackendSort>,
    filter_debounce: Debouncer<Vec<FilterCondition>>,
    sort_debounce: Debouncer<Vec<SortOption>>,
    on_filter_change: Option<FilterChangeFn>,
    on_sort_change: Option<SortChangeFn>,
}

impl FilterSortController {
    pub fn new(options: FilterSortOptions) -> Self {
        let FilterSortOptions {
            initial_filters,
            initial_sorts,
            debounce_ms,
            on_filter_change,
            on_sort_change,
        } = options;

        Self {
            sanitized_filters: sanitize_filters(&initial_filters),
            sanitized_sorts: sanitize_sorts(&initial_sorts),
            filters: initial_filters.clone(),
            sorts: initial_sorts.clone(),
            initial_filters,
            initial_sorts,
            filter_debounce: Debouncer::new(debounce_ms),
            sort_debounce: Debouncer::new(debounce_ms),
            on_filter_change,
            on_sort_change,
        }
    }

    pub fn filters(&self) -> &[FilterCondition] {
        &self.filters
    }

    pub fn sorts(&self) -> &[SortOption] {
        &self.sorts
    }

    pub fn sanitized_filters(&self) -> &[TypedBackendFilter] {
        &self.sanitized_filters
    }

    pub fn sanitized_sorts(&self) -> &[TypedBackendSort] {
        &self.sanitized_sorts
    }

    pub fn initial_filters(&self) -> &[FilterCondition] {
        &self.initial_filters
    }

    pub fn initial_sorts(&self) -> &[SortOption] {
        &self.initial_sorts
    }

    pub fn active_filter_count(&self) -> usize {
        active_filter_count(&self.filters)
    }

    pub fn set_filters(&mut self, filters: Vec<FilterCondition>, now: Millis) {
        self.filters = filters.clone();
        self.filter_debounce.push(filters, now);
    }

    pub fn set_sorts(&mut self, sorts: Vec<SortOption>, now: Millis) {
        self.sorts = sorts.clone();
        self.sort_debounce.push(sorts, now);
    }

    /// Replace the condition with the same id, or append it
    pub fn upsert_filter(&mut self, condition: FilterCondition, now: Millis) {
        let mut next = self.filters.clone();
        match next.iter_mut().find(|f| f.id == condition.id) {
            Some(existing) => *existing = condition,
            None => next.push(condition),
        }
        self.set_filters(next, now);
    }

    pub fn remove_filter(&mut self, id: &str, now: Millis) {
        let next: Vec<FilterCondition> =
            self.filters.iter().filter(|f| f.id != id).cloned().collect();
        self.set_filters(next, now);
    }

    /// Back to the initial filters and sorts (debounced like any edit)
    pub fn clear(&mut self, now: Millis) {
        self.set_filters(self.initial_filters.clone(), now);
        self.set_sorts(self.initial_sorts.clone(), now);
    }

    /// Overwrite raw and sanitized state at once, dropping pending edits.
    ///
    /// Used when state is adopted from outside (URL navigation), where there
    /// is no typing to wait for.
    pub fn replace_all(
        &mut self,
        filters: Vec<FilterCondition>,
        sorts: Vec<SortOption>,
    ) -> SanitizedUpdate {
        self.cancel();
        self.filters = filters.clone();
        self.sorts = sorts.clone();
        let update = SanitizedUpdate {
            filters: self.apply_filters(&filters),
            sorts: self.apply_sorts(&sorts),
        };
        self.notify(&update);
        update
    }

    /// Earliest pending debounce deadline
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.filter_debounce.deadline(), self.sort_debounce.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.filter_debounce.is_pending() || self.sort_debounce.is_pending()
    }

    /// Propagate edits whose quiet window has elapsed
    pub fn poll(&mut self, now: Millis) -> SanitizedUpdate {
        let filters = self.filter_debounce.poll(now);
        let sorts = self.sort_debounce.poll(now);
        self.propagate(filters, sorts)
    }

    /// Propagate pending edits immediately
    pub fn flush(&mut self) -> SanitizedUpdate {
        let filters = self.filter_debounce.flush();
        let sorts = self.sort_debounce.flush();
        self.propagate(filters, sorts)
    }

    /// Drop pending edits (unmount, key change)
    pub fn cancel(&mut self) {
        self.filter_debounce.cancel();
        self.sort_debounce.cancel();
    }

    fn propagate(
        &mut self,
        filters: Option<Vec<FilterCondition>>,
        sorts: Option<Vec<SortOption>>,
    ) -> SanitizedUpdate {
        let update = SanitizedUpdate {
            filters: filters.and_then(|f| self.apply_filters(&f)),
            sorts: sorts.and_then(|s| self.apply_sorts(&s)),
        };
        self.notify(&update);
        update
    }

    fn apply_filters(&mut self, filters: &[FilterCondition]) -> Option<Vec<TypedBackendFilter>> {
        let sanitized = sanitize_filters(filters);
        if sanitized == self.sanitized_filters {
            return None;
        }
        self.sanitized_filters = sanitized.clone();
        Some(sanitized)
    }

    fn apply_sorts(&mut self, sorts: &[SortOption]) -> Option<Vec<TypedBackendSort>> {
        let sanitized = sanitize_sorts(sorts);
        if sanitized == self.sanitized_sorts {
            return None;
        }
        self.sanitized_sorts = sanitized.clone();
        Some(sanitized)
    }

    fn notify(&mut self, update: &SanitizedUpdate) {
        if let (Some(filters), Some(callback)) = (&update.filters, self.on_filter_change.as_mut()) {
            callback(filters.as_slice());
        }
        if let (Some(sorts), Some(callback)) = (&update.sorts, self.on_sort_change.as_mut()) {
            callback(sorts.as_slice());
        }
    }
}
