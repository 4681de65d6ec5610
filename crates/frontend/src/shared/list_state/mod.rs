//! URL- and session-persisted filter/sort/pagination state for list pages.
//!
//! Every list page owns one persistence key (e.g. `fetchCustomers`). The
//! framework-free controllers below hold the state machines; `hooks` binds
//! them to Leptos signals and the browser.

pub mod codec;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod hooks;
pub mod pagination;
pub mod persistence;
pub mod probe;
pub mod query_string;
pub mod store;

pub use codec::{
    deserialize_filters, deserialize_sorts, get_filter_state_session_key, get_filters_param_key,
    get_sorts_param_key, serialize_filters, serialize_sorts, SessionSnapshot,
};
pub use config::{HistoryMode, ListEngineConfig};
pub use controller::{FilterSortController, FilterSortOptions, SanitizedUpdate};
pub use error::ListStateError;
pub use hooks::{
    use_filter_sort, use_location_search, use_pagination, use_pagination_reset,
    use_pagination_with, use_persisted_filter_sort, use_persisted_filter_sort_with,
    use_probed_list, FilterSortState, PaginationState, ProbedListState,
};
pub use pagination::{page_param_key, PaginationController, ResetTrigger};
pub use persistence::{HydrationSource, PersistenceController, SyncOutcome, SyncPhase};
pub use probe::{
    fetch_with_probe, fetch_with_probe_staged, probe_when_empty, resolve_empty_state, BoxedFetch,
    EmptyState, FetchResult, ListQuery, ProbedList, QueryKey, QueryState,
};
pub use query_string::{get_param, merge_query, parse_query, same_query};
pub use store::{
    BrowserLocation, BrowserSessionStorage, LocationStore, MemoryLocation, MemorySessionStorage,
    SessionStore,
};
