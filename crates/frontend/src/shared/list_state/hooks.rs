//! Leptos bindings for the list-state engine.
//!
//! The state machines live in the sibling modules; here they are wrapped in
//! `StoredValue::new_local` and mirrored into signals, and the browser
//! supplies the clock (`Date.now()`), the timers and `popstate`. The `_with`
//! variants take the stores and the location signal explicitly.

use std::rc::Rc;

use contracts::shared::list_query::{
    FilterCondition, ListParams, SortOption, TypedBackendFilter, TypedBackendSort,
};
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::config::{HistoryMode, ListEngineConfig};
use super::controller::{FilterSortController, FilterSortOptions, SanitizedUpdate};
use super::debounce::Millis;
use super::pagination::{PaginationController, ResetTrigger};
use super::persistence::PersistenceController;
use super::probe::{
    fetch_with_probe_staged, probe_when_empty, BoxedFetch, EmptyState, LatestRequest, ListQuery,
    ProbedList, QueryKey,
};
use super::store::{BrowserLocation, BrowserSessionStorage, LocationStore, SessionStore};

fn now_ms() -> Millis {
    js_sys::Date::now() as Millis
}

/// Reactive copy of `window.location.search`, refreshed on `popstate`.
///
/// First paint reads the location directly; afterwards this signal is the
/// source for back/forward navigation. One listener per app, shared via
/// context.
#[derive(Clone, Copy)]
pub struct LocationSearch(pub RwSignal<String>);

pub fn use_location_search() -> RwSignal<String> {
    if let Some(LocationSearch(search)) = use_context::<LocationSearch>() {
        return search;
    }

    let search = RwSignal::new(BrowserLocation.search());
    let handle = window_event_listener(ev::popstate, move |_| {
        search.set(BrowserLocation.search());
    });
    on_cleanup(move || handle.remove());
    provide_context(LocationSearch(search));
    search
}

/// Filter/sort state of one list: raw values for inputs, sanitized values
/// for queries.
#[derive(Clone, Copy)]
pub struct FilterSortState {
    pub filters: RwSignal<Vec<FilterCondition>>,
    pub sorts: RwSignal<Vec<SortOption>>,
    pub sanitized_filters: RwSignal<Vec<TypedBackendFilter>>,
    pub sanitized_sorts: RwSignal<Vec<TypedBackendSort>>,
    controller: StoredValue<FilterSortController, LocalStorage>,
    /// Bumped on every (re)schedule; a timer whose generation is stale does nothing
    timer_generation: StoredValue<u64>,
}

impl FilterSortState {
    fn new(controller: FilterSortController) -> Self {
        Self {
            filters: RwSignal::new(controller.filters().to_vec()),
            sorts: RwSignal::new(controller.sorts().to_vec()),
            sanitized_filters: RwSignal::new(controller.sanitized_filters().to_vec()),
            sanitized_sorts: RwSignal::new(controller.sanitized_sorts().to_vec()),
            controller: StoredValue::new_local(controller),
            timer_generation: StoredValue::new(0),
        }
    }

    pub fn set_filters(&self, filters: Vec<FilterCondition>) {
        self.edit(|c, now| c.set_filters(filters, now));
    }

    pub fn set_sorts(&self, sorts: Vec<SortOption>) {
        self.edit(|c, now| c.set_sorts(sorts, now));
    }

    pub fn upsert_filter(&self, condition: FilterCondition) {
        self.edit(|c, now| c.upsert_filter(condition, now));
    }

    pub fn remove_filter(&self, id: &str) {
        self.edit(|c, now| c.remove_filter(id, now));
    }

    pub fn clear(&self) {
        self.edit(|c, now| c.clear(now));
    }

    pub fn active_filter_count(&self) -> usize {
        self.controller.with_value(|c| c.active_filter_count())
    }

    /// Apply externally adopted state at once (no debounce)
    pub fn replace_all(&self, filters: Vec<FilterCondition>, sorts: Vec<SortOption>) {
        self.bump_generation();
        let update = self
            .controller
            .try_update_value(|c| c.replace_all(filters, sorts))
            .unwrap_or_default();
        self.refresh_raw();
        self.apply(update);
    }

    /// Propagate pending edits now (e.g. on Enter)
    pub fn flush(&self) {
        self.bump_generation();
        let update = self
            .controller
            .try_update_value(|c| c.flush())
            .unwrap_or_default();
        self.apply(update);
    }

    pub fn cancel(&self) {
        self.bump_generation();
        let _ = self.controller.try_update_value(|c| c.cancel());
    }

    fn edit(&self, f: impl FnOnce(&mut FilterSortController, Millis)) {
        let now = now_ms();
        if self.controller.try_update_value(|c| f(c, now)).is_none() {
            return;
        }
        self.refresh_raw();
        self.schedule();
    }

    fn refresh_raw(&self) {
        let (filters, sorts) = self
            .controller
            .with_value(|c| (c.filters().to_vec(), c.sorts().to_vec()));
        self.filters.set(filters);
        self.sorts.set(sorts);
    }

    fn apply(&self, update: SanitizedUpdate) {
        if let Some(filters) = update.filters {
            self.sanitized_filters.set(filters);
        }
        if let Some(sorts) = update.sorts {
            self.sanitized_sorts.set(sorts);
        }
    }

    fn bump_generation(&self) -> u64 {
        self.timer_generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or_default()
    }

    fn schedule(&self) {
        let generation = self.bump_generation();
        let Some(deadline) = self.controller.with_value(|c| c.next_deadline()) else {
            return;
        };
        let delay = deadline.saturating_sub(now_ms()).min(u32::MAX as Millis) as u32;
        let this = *self;

        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if this.timer_generation.try_get_value() != Some(generation) {
                return;
            }
            let Some(update) = this.controller.try_update_value(|c| c.poll(now_ms())) else {
                return;
            };
            this.apply(update);
            if this.controller.with_value(|c| c.is_pending()) {
                this.schedule();
            }
        });
    }
}

/// In-memory filter/sort state with debounced propagation.
/// Pending timers are dropped when the owner is cleaned up.
///
/// Change callbacks run while the controller is borrowed; they must not call
/// back into the returned state.
pub fn use_filter_sort(options: FilterSortOptions) -> FilterSortState {
    let state = FilterSortState::new(FilterSortController::new(options));
    on_cleanup(move || state.cancel());
    state
}

/// [`use_filter_sort`] mirrored into the URL and session storage under `key`
pub fn use_persisted_filter_sort(
    key: &str,
    options: FilterSortOptions,
    config: Option<ListEngineConfig>,
) -> FilterSortState {
    let config = config.unwrap_or_else(ListEngineConfig::embedded);
    use_persisted_filter_sort_with(
        key,
        options,
        config.history_mode,
        BrowserLocation,
        BrowserSessionStorage,
        use_location_search().into(),
    )
}

/// [`use_persisted_filter_sort`] over arbitrary stores. `search` must follow
/// external navigation only; the engine's own writes never feed it.
pub fn use_persisted_filter_sort_with<L, S>(
    key: &str,
    options: FilterSortOptions,
    history_mode: HistoryMode,
    location: L,
    session: S,
    search: Signal<String>,
) -> FilterSortState
where
    L: LocationStore + 'static,
    S: SessionStore + 'static,
{
    let mut persistence = PersistenceController::new(key, location, session, history_mode);
    let hydrated = persistence.hydrate(&options.initial_filters, &options.initial_sorts);

    let state = use_filter_sort(options);
    if let Some(hydrated) = hydrated {
        state.replace_all(hydrated.filters, hydrated.sorts);
    }

    let persistence = StoredValue::new_local(persistence);

    Effect::new(move |_| {
        let filters = state.filters.get();
        let sorts = state.sorts.get();
        let _ = persistence.try_update_value(|p| p.sync(&filters, &sorts));
    });

    // the first run sees the URL hydration already read
    Effect::new(move |prev: Option<()>| {
        let search = search.get();
        if prev.is_none() {
            return;
        }
        let filters = state.filters.get_untracked();
        let sorts = state.sorts.get_untracked();
        let adopted = persistence
            .try_update_value(|p| p.on_location_change(&search, &filters, &sorts))
            .flatten();
        if let Some((filters, sorts)) = adopted {
            state.replace_all(filters, sorts);
        }
    });

    state
}

#[derive(Clone, Copy)]
pub struct PaginationState {
    pub page: RwSignal<usize>,
    pub limit: RwSignal<usize>,
    controller: StoredValue<PaginationController<Rc<dyn LocationStore>>, LocalStorage>,
}

impl PaginationState {
    pub fn set_page(&self, page: usize) {
        let _ = self.controller.try_update_value(|c| c.set_page(page));
        self.refresh();
    }

    pub fn reset(&self) {
        let _ = self.controller.try_update_value(|c| c.reset());
        self.refresh();
    }

    pub fn set_limit(&self, limit: usize) {
        let _ = self.controller.try_update_value(|c| c.set_limit(limit));
        self.refresh();
    }

    pub fn offset(&self) -> usize {
        self.page.get().saturating_sub(1) * self.limit.get()
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit.get().max(1))
    }

    /// Reactive request for the main query
    pub fn params(&self, state: FilterSortState) -> ListParams {
        ListParams {
            limit: self.limit.get(),
            offset: self.offset(),
            filters: state.sanitized_filters.get(),
            sort: state.sanitized_sorts.get(),
        }
    }

    fn refresh(&self) {
        let Some((page, limit)) = self.controller.try_with_value(|c| (c.page(), c.limit())) else {
            return;
        };
        if self.page.get_untracked() != page {
            self.page.set(page);
        }
        if self.limit.get_untracked() != limit {
            self.limit.set(limit);
        }
    }
}

/// Page number kept in the URL under `page` / `{prefix}_page`
pub fn use_pagination(prefix: Option<&str>, config: Option<ListEngineConfig>) -> PaginationState {
    let config = config.unwrap_or_else(ListEngineConfig::embedded);
    use_pagination_with(
        Rc::new(BrowserLocation),
        prefix,
        &config,
        use_location_search().into(),
    )
}

/// [`use_pagination`] over an arbitrary location store
pub fn use_pagination_with(
    location: Rc<dyn LocationStore>,
    prefix: Option<&str>,
    config: &ListEngineConfig,
    search: Signal<String>,
) -> PaginationState {
    let controller =
        PaginationController::new(location, prefix, config.page_size, config.history_mode);
    let state = PaginationState {
        page: RwSignal::new(controller.page()),
        limit: RwSignal::new(controller.limit()),
        controller: StoredValue::new_local(controller),
    };

    Effect::new(move |_| {
        search.track();
        state.refresh();
    });

    state
}

/// Send `pagination` back to page 1 whenever the sanitized filters or sorts
/// change content. Never fires on mount.
pub fn use_pagination_reset(state: FilterSortState, pagination: PaginationState) {
    let mut trigger = ResetTrigger::new();
    Effect::new(move |_| {
        let filters = state.sanitized_filters.get();
        let sorts = state.sanitized_sorts.get();
        if trigger.observe(&filters, &sorts) {
            pagination.reset();
        }
    });
}

pub struct ProbedListState<T: Send + Sync + 'static> {
    pub result: RwSignal<ProbedList<T>>,
    reload: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for ProbedListState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ProbedListState<T> {}

impl<T: Clone + Send + Sync + 'static> ProbedListState<T> {
    pub fn empty_state(&self) -> EmptyState {
        self.result.with(|r| r.empty_state())
    }

    pub fn items(&self) -> Vec<T> {
        self.result
            .with(|r| r.main.data.as_ref().map(|d| d.items.clone()))
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.result
            .with(|r| r.main.data.as_ref().map(|d| d.pagination.total))
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.result.with(|r| r.main.is_loading || r.probe.is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.result.with(|r| r.main.error.clone())
    }

    /// Run the current query again even though its key did not change
    pub fn refetch(&self) {
        self.reload.update(|n| *n += 1);
    }
}

/// Main list query plus the empty-state probe, re-run whenever `params`
/// changes. Answers for superseded keys are dropped.
pub fn use_probed_list<T>(
    base_key: &str,
    params: Signal<ListParams>,
    fetch: BoxedFetch<T>,
    config: Option<ListEngineConfig>,
) -> ProbedListState<T>
where
    T: Clone + Send + Sync + 'static,
{
    let config = config.unwrap_or_else(ListEngineConfig::embedded);
    let base_key = base_key.to_string();
    let initial_key = QueryKey::new(&base_key, &params.get_untracked());
    let state = ProbedListState {
        result: RwSignal::new(ProbedList::loading(initial_key)),
        reload: RwSignal::new(0),
    };
    let latest = StoredValue::new(LatestRequest::default());
    let fetch = StoredValue::new_local(fetch);

    Effect::new(move |prev_reload: Option<u64>| {
        let params = params.get();
        let reload = state.reload.get();
        if prev_reload.is_some_and(|prev| prev != reload) {
            latest.update_value(LatestRequest::invalidate);
        }

        let key = QueryKey::new(&base_key, &params);
        if !latest.try_update_value(|l| l.begin(&key)).unwrap_or(false) {
            return reload;
        }
        state.result.set(ProbedList::loading(key.clone()));

        let main_fetch = fetch.get_value();
        let probe_fetch = main_fetch.clone();
        let probe_key = QueryKey::probe_for(&key);
        let main = ListQuery {
            key,
            params,
            fetch: move |p: ListParams| main_fetch(p),
        };
        let probe = ListQuery {
            key: probe_key,
            params: ListParams::probe(config.probe_limit),
            fetch: move |p: ListParams| probe_fetch(p),
        };

        let publish = move |list: &ProbedList<T>| {
            if latest
                .try_with_value(|l| l.accepts(&list.main_key))
                .unwrap_or(false)
            {
                let _ = state.result.try_set(list.clone());
            }
        };
        spawn_local(async move {
            let result = fetch_with_probe_staged(main, probe, probe_when_empty, publish).await;
            publish(&result);
        });

        reload
    });

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_state::codec::{
        deserialize_filters, get_filter_state_session_key, get_filters_param_key,
        serialize_filters, SessionSnapshot,
    };
    use crate::shared::list_state::query_string::{get_param, merge_query};
    use crate::shared::list_state::store::{MemoryLocation, MemorySessionStorage};
    use contracts::shared::list_query::{FilterDataType, FilterOperator};
    use leptos::prelude::Owner;
    use any_spawner::Executor;
    use tokio::task::LocalSet;

    const KEY: &str = "fetchCustomers";

    fn status_filter(value: &str) -> FilterCondition {
        FilterCondition::new("status", FilterOperator::Equal, FilterDataType::String)
            .with_id("f-status")
            .with_string(value)
    }

    fn url_with(search: &str, filters: &[FilterCondition]) -> String {
        let key = get_filters_param_key(KEY);
        let json = serialize_filters(filters);
        merge_query(search, &[(key.as_str(), Some(json.as_str()))])
    }

    fn session_snapshot(session: &MemorySessionStorage) -> Option<SessionSnapshot> {
        session
            .get_item(&get_filter_state_session_key(KEY))
            .unwrap()
            .as_deref()
            .and_then(SessionSnapshot::decode)
    }

    /// Let every scheduled effect (and the effects they wake) run
    async fn settle() {
        for _ in 0..8 {
            Executor::tick().await;
        }
    }

    fn mount(
        location: &MemoryLocation,
        session: &MemorySessionStorage,
        search: RwSignal<String>,
    ) -> (FilterSortState, PaginationState) {
        let config = ListEngineConfig {
            history_mode: HistoryMode::Push,
            ..ListEngineConfig::default()
        };
        let state = use_persisted_filter_sort_with(
            KEY,
            FilterSortOptions::default(),
            config.history_mode,
            location.clone(),
            session.clone(),
            search.into(),
        );
        let pagination =
            use_pagination_with(Rc::new(location.clone()), None, &config, search.into());
        use_pagination_reset(state, pagination);
        (state, pagination)
    }

    #[tokio::test]
    async fn test_back_navigation_is_adopted_without_echo() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        LocalSet::new()
            .run_until(async {
                let archived = vec![status_filter("ARCHIVED")];
                let location = MemoryLocation::new(&url_with("active=customers", &archived));
                let session = MemorySessionStorage::new();
                let search = RwSignal::new(location.search());
                let (state, pagination) = mount(&location, &session, search);
                settle().await;

                assert_eq!(state.filters.get_untracked(), archived);
                assert_eq!(state.sanitized_filters.get_untracked().len(), 1);
                assert_eq!(pagination.page.get_untracked(), 1);
                assert!(location.writes().is_empty());
                assert_eq!(
                    session_snapshot(&session),
                    Some(SessionSnapshot::new(&archived, &[]))
                );

                // back to the entry from before the filter was shared
                location.navigate("active=customers");
                search.set(location.search());
                settle().await;

                assert!(state.filters.get_untracked().is_empty());
                assert!(state.sanitized_filters.get_untracked().is_empty());
                assert!(location.writes().is_empty());
                assert_eq!(location.search(), "active=customers");
                assert_eq!(session_snapshot(&session), Some(SessionSnapshot::default()));
            })
            .await;
    }

    #[tokio::test]
    async fn test_filter_change_resets_page_once() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        LocalSet::new()
            .run_until(async {
                let location =
                    MemoryLocation::new(&url_with("page=3", &[status_filter("ARCHIVED")]));
                let session = MemorySessionStorage::new();
                let search = RwSignal::new(location.search());
                let (state, pagination) = mount(&location, &session, search);
                settle().await;

                // mounting keeps the shared page
                assert_eq!(pagination.page.get_untracked(), 3);
                assert!(location.writes().is_empty());

                let published = vec![status_filter("PUBLISHED")];
                state.replace_all(published.clone(), Vec::new());
                settle().await;

                let current = location.search();
                assert_eq!(pagination.page.get_untracked(), 1);
                assert_eq!(get_param(&current, "page").as_deref(), Some("1"));
                assert_eq!(
                    deserialize_filters(
                        get_param(&current, &get_filters_param_key(KEY)).as_deref()
                    ),
                    Some(published.clone())
                );
                assert_eq!(location.pushes(), 1);

                // same content again: no URL traffic
                let writes = location.writes().len();
                state.replace_all(published, Vec::new());
                settle().await;
                assert_eq!(location.writes().len(), writes);
            })
            .await;
    }
}
