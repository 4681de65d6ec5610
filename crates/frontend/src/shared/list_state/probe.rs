//! Empty-state probe: tells "filters exclude everything" apart from "this list
//! has no data at all".
//!
//! The main query always runs. The probe (no filters, first page, one row)
//! only runs when `should_probe` accepts the main result, normally when it
//! came back empty, so ordinary list loads cost one request.

use std::future::Future;

use contracts::shared::list_query::{ListParams, ListResponse};
use futures::future::LocalBoxFuture;
use serde::Serialize;

use super::error::ListStateError;

/// Result of a caller-supplied fetch function
pub type FetchResult<T> = Result<ListResponse<T>, String>;

/// Boxed fetch function as stored by the Leptos hooks
pub type BoxedFetch<T> = std::rc::Rc<dyn Fn(ListParams) -> LocalBoxFuture<'static, FetchResult<T>>>;

/// Cache identity of a query: list name plus the full request signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new<P: Serialize>(base: &str, params: &P) -> Self {
        let signature = serde_json::to_string(params).unwrap_or_default();
        Self(format!("{}:{}", base, signature))
    }

    /// Probe key derived from the main key, so a probe answer can only ever
    /// be matched with the main result it was run for
    pub fn probe_for(main: &QueryKey) -> Self {
        Self(format!("probe|{}", main.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One query as handed to the orchestrator
pub struct ListQuery<F> {
    pub key: QueryKey,
    pub params: ListParams,
    pub fetch: F,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub key: Option<QueryKey>,
    pub data: Option<ListResponse<T>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            key: None,
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn loading(key: QueryKey) -> Self {
        Self {
            key: Some(key),
            data: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn settled(key: QueryKey, result: FetchResult<T>) -> Self {
        let (data, error) = match result {
            Ok(data) => (Some(data), None),
            Err(e) => {
                let e = ListStateError::Fetch(e);
                log::warn!("list query failed: {}", e);
                (None, Some(e.to_string()))
            }
        };
        Self {
            key: Some(key),
            data,
            is_loading: false,
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn returned_empty(&self) -> bool {
        self.data.as_ref().is_some_and(ListResponse::is_empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    Error,
    HasItems,
    /// Nothing matches the current filters
    FilteredEmpty,
    /// The list has no data at all
    AbsoluteEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbedList<T> {
    pub main_key: QueryKey,
    pub main: QueryState<T>,
    pub probe: QueryState<T>,
}

impl<T> ProbedList<T> {
    pub fn loading(main_key: QueryKey) -> Self {
        Self {
            main: QueryState::loading(main_key.clone()),
            probe: QueryState::default(),
            main_key,
        }
    }

    pub fn probe_ran(&self) -> bool {
        self.probe.key.is_some()
    }

    pub fn empty_state(&self) -> EmptyState {
        resolve_empty_state(&self.main, &self.probe, &self.main_key)
    }
}

/// Display decision for a list.
///
/// A probe answer only counts when its key was derived from `main_key`; a
/// leftover probe from older filters is ignored.
pub fn resolve_empty_state<T>(
    main: &QueryState<T>,
    probe: &QueryState<T>,
    main_key: &QueryKey,
) -> EmptyState {
    if main.key.as_ref() != Some(main_key) || main.is_loading {
        return EmptyState::Loading;
    }
    if main.is_error() {
        return EmptyState::Error;
    }
    if !main.returned_empty() {
        return EmptyState::HasItems;
    }

    let probe_matches = probe.key.as_ref() == Some(&QueryKey::probe_for(main_key));
    if probe_matches && probe.is_loading {
        EmptyState::Loading
    } else if probe_matches && probe.returned_empty() {
        EmptyState::AbsoluteEmpty
    } else {
        EmptyState::FilteredEmpty
    }
}

/// Canonical probe predicate: main came back with no rows
pub fn probe_when_empty<T>(main: &ListResponse<T>) -> bool {
    main.items.is_empty()
}

/// Run the main query, then the probe if `should_probe` asks for it
pub async fn fetch_with_probe<T, MF, MFut, PF, PFut, SP>(
    main: ListQuery<MF>,
    probe: ListQuery<PF>,
    should_probe: SP,
) -> ProbedList<T>
where
    MF: FnOnce(ListParams) -> MFut,
    MFut: Future<Output = FetchResult<T>>,
    PF: FnOnce(ListParams) -> PFut,
    PFut: Future<Output = FetchResult<T>>,
    SP: FnOnce(&ListResponse<T>) -> bool,
{
    fetch_with_probe_staged(main, probe, should_probe, |_| {}).await
}

/// Like [`fetch_with_probe`], but hands the settled main answer to
/// `on_main` before the probe is awaited, so a list can render its rows
/// (or a loading empty state) while the probe is in flight.
///
/// `on_main` only runs when a probe follows.
pub async fn fetch_with_probe_staged<T, MF, MFut, PF, PFut, SP, OM>(
    main: ListQuery<MF>,
    probe: ListQuery<PF>,
    should_probe: SP,
    on_main: OM,
) -> ProbedList<T>
where
    MF: FnOnce(ListParams) -> MFut,
    MFut: Future<Output = FetchResult<T>>,
    PF: FnOnce(ListParams) -> PFut,
    PFut: Future<Output = FetchResult<T>>,
    SP: FnOnce(&ListResponse<T>) -> bool,
    OM: FnOnce(&ProbedList<T>),
{
    let main_key = main.key.clone();
    let main_state = QueryState::settled(main.key, (main.fetch)(main.params).await);

    let run_probe = main_state.data.as_ref().is_some_and(should_probe);
    if !run_probe {
        return ProbedList {
            main_key,
            main: main_state,
            probe: QueryState::default(),
        };
    }

    let mut list = ProbedList {
        main_key,
        main: main_state,
        probe: QueryState::loading(probe.key.clone()),
    };
    on_main(&list);

    log::debug!("probing '{}'", probe.key.as_str());
    list.probe = QueryState::settled(probe.key, (probe.fetch)(probe.params).await);
    list
}

/// Remembers the latest requested main key so late answers for superseded
/// requests can be dropped
#[derive(Debug, Clone, Default)]
pub struct LatestRequest {
    current: Option<QueryKey>,
}

impl LatestRequest {
    /// Register a request; false when the key is already the current one
    pub fn begin(&mut self, key: &QueryKey) -> bool {
        if self.current.as_ref() == Some(key) {
            return false;
        }
        self.current = Some(key.clone());
        true
    }

    /// Forget the current key so the next `begin` always runs (refetch)
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn accepts(&self, key: &QueryKey) -> bool {
        self.current.as_ref() == Some(key)
    }
}
