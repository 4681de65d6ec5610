//! Mirrors a list's filter/sort state into the URL and session storage.
//!
//! In-memory state is the source of truth; both stores are mirrors keyed by
//! the persistence key. Hydration reads them once, per field, in the order
//! URL → session → caller defaults. Afterwards every sync diffs the serialized
//! state against the URL and writes through a single merge.
//!
//! Hydrated state and state adopted from the URL (back/forward) put the
//! controller in [`SyncPhase::Adopted`]. The next sync carrying exactly that
//! state only fills in params the URL lacks, always with a replace, so
//! neither mounting nor adopting can add a history entry.

use contracts::shared::list_query::{FilterCondition, SortOption};

use super::codec::{
    deserialize_filters, deserialize_sorts, get_filter_state_session_key, get_filters_param_key,
    get_sorts_param_key, serialize_filters, serialize_sorts, SessionSnapshot,
};
use super::config::HistoryMode;
use super::query_string::{get_param, merge_query, same_query};
use super::store::{LocationStore, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    Url,
    Session,
    Defaults,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HydratedState {
    pub filters: Vec<FilterCondition>,
    pub sorts: Vec<SortOption>,
    pub filters_source: HydrationSource,
    pub sorts_source: HydrationSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPhase {
    /// Stores not read yet
    Unhydrated,
    /// State was just taken from the URL; holds its serialized form
    Adopted { filters: String, sorts: String },
    Synced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Sync before hydration, nothing written
    NotHydrated,
    SessionOnly,
    UrlAndSession,
}

pub struct PersistenceController<L: LocationStore, S: SessionStore> {
    key: String,
    location: L,
    session: S,
    history_mode: HistoryMode,
    phase: SyncPhase,
}

impl<L: LocationStore, S: SessionStore> PersistenceController<L, S> {
    pub fn new(key: impl Into<String>, location: L, session: S, history_mode: HistoryMode) -> Self {
        Self {
            key: key.into(),
            location,
            session,
            history_mode,
            phase: SyncPhase::Unhydrated,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn phase(&self) -> &SyncPhase {
        &self.phase
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Read initial state. Only the first call reads the stores.
    pub fn hydrate(
        &mut self,
        default_filters: &[FilterCondition],
        default_sorts: &[SortOption],
    ) -> Option<HydratedState> {
        if self.phase != SyncPhase::Unhydrated {
            log::debug!("list state '{}' already hydrated", self.key);
            return None;
        }

        let search = self.location.search();
        let url_filters = deserialize_filters(
            get_param(&search, &get_filters_param_key(&self.key)).as_deref(),
        );
        let url_sorts =
            deserialize_sorts(get_param(&search, &get_sorts_param_key(&self.key)).as_deref());

        let snapshot = self.read_session();
        let session_filters = snapshot.as_ref().and_then(SessionSnapshot::filters);
        let session_sorts = snapshot.as_ref().and_then(SessionSnapshot::sorts);

        let (filters, filters_source) = pick(url_filters, session_filters, default_filters);
        let (sorts, sorts_source) = pick(url_sorts, session_sorts, default_sorts);

        log::debug!(
            "hydrated '{}': filters from {:?}, sorts from {:?}",
            self.key,
            filters_source,
            sorts_source
        );

        self.phase = SyncPhase::Adopted {
            filters: serialize_filters(&filters),
            sorts: serialize_sorts(&sorts),
        };

        Some(HydratedState {
            filters,
            sorts,
            filters_source,
            sorts_source,
        })
    }

    /// Mirror current state into the URL (if it differs) and session storage
    pub fn sync(&mut self, filters: &[FilterCondition], sorts: &[SortOption]) -> SyncOutcome {
        let filters_json = serialize_filters(filters);
        let sorts_json = serialize_sorts(sorts);

        let adopting = match &self.phase {
            SyncPhase::Unhydrated => {
                log::warn!("sync of '{}' before hydration ignored", self.key);
                return SyncOutcome::NotHydrated;
            }
            SyncPhase::Adopted {
                filters: adopted_filters,
                sorts: adopted_sorts,
            } => *adopted_filters == filters_json && *adopted_sorts == sorts_json,
            SyncPhase::Synced => false,
        };
        self.phase = SyncPhase::Synced;

        let filters_key = get_filters_param_key(&self.key);
        let sorts_key = get_sorts_param_key(&self.key);
        let search = self.location.search();
        let url_filters = get_param(&search, &filters_key);
        let url_sorts = get_param(&search, &sorts_key);

        // while adopting, params that already decode to the state are left alone
        let write_filters = if adopting {
            canonical(url_filters.as_deref(), deserialize_filters, serialize_filters).as_deref()
                != Some(filters_json.as_str())
        } else {
            url_filters.unwrap_or_default() != filters_json
        };
        let write_sorts = if adopting {
            canonical(url_sorts.as_deref(), deserialize_sorts, serialize_sorts).as_deref()
                != Some(sorts_json.as_str())
        } else {
            url_sorts.unwrap_or_default() != sorts_json
        };

        let mut outcome = SyncOutcome::SessionOnly;
        if write_filters || write_sorts {
            let mut updates: Vec<(&str, Option<&str>)> = Vec::with_capacity(2);
            if write_filters {
                updates.push((filters_key.as_str(), non_empty(&filters_json)));
            }
            if write_sorts {
                updates.push((sorts_key.as_str(), non_empty(&sorts_json)));
            }
            let mode = if adopting {
                HistoryMode::Replace
            } else {
                self.history_mode
            };
            let next = merge_query(&search, &updates);
            match self.location.write_search(&next, mode) {
                Ok(()) => outcome = SyncOutcome::UrlAndSession,
                Err(e) => log::warn!("URL update for '{}' failed: {}", self.key, e),
            }
        }

        self.write_session(&SessionSnapshot {
            filters: filters_json,
            sorts: sorts_json,
        });
        outcome
    }

    /// Handle an external URL change (back/forward, manual edit).
    ///
    /// `search` comes from the reactive source (popstate, router) rather than
    /// a fresh `window.location` read. The engine never writes an empty list,
    /// so an absent or blank param means "none" and is adopted as such. A
    /// param that does not decode is ignored and its field keeps the current
    /// value. Returns the state to adopt when it differs from the current one.
    pub fn on_location_change(
        &mut self,
        search: &str,
        current_filters: &[FilterCondition],
        current_sorts: &[SortOption],
    ) -> Option<(Vec<FilterCondition>, Vec<SortOption>)> {
        if self.phase == SyncPhase::Unhydrated {
            return None;
        }

        let filters = from_url(
            get_param(search, &get_filters_param_key(&self.key)),
            deserialize_filters,
        )
        .unwrap_or_else(|| current_filters.to_vec());
        let sorts = from_url(
            get_param(search, &get_sorts_param_key(&self.key)),
            deserialize_sorts,
        )
        .unwrap_or_else(|| current_sorts.to_vec());

        let filters_changed = serialize_filters(&filters) != serialize_filters(current_filters);
        let sorts_changed = serialize_sorts(&sorts) != serialize_sorts(current_sorts);
        if !filters_changed && !sorts_changed {
            return None;
        }

        log::debug!("adopting external URL state for '{}'", self.key);
        self.phase = SyncPhase::Adopted {
            filters: serialize_filters(&filters),
            sorts: serialize_sorts(&sorts),
        };
        Some((filters, sorts))
    }

    /// Remove this list's params from the URL and its session entry
    pub fn clear_persisted(&mut self) {
        let search = self.location.search();
        let filters_key = get_filters_param_key(&self.key);
        let sorts_key = get_sorts_param_key(&self.key);
        let next = merge_query(
            &search,
            &[(filters_key.as_str(), None), (sorts_key.as_str(), None)],
        );
        if !same_query(&next, &search) {
            if let Err(e) = self.location.write_search(&next, HistoryMode::Replace) {
                log::warn!("URL cleanup for '{}' failed: {}", self.key, e);
            }
        }
        if let Err(e) = self
            .session
            .remove_item(&get_filter_state_session_key(&self.key))
        {
            log::warn!("session cleanup for '{}' failed: {}", self.key, e);
        }
    }

    fn read_session(&self) -> Option<SessionSnapshot> {
        match self.session.get_item(&get_filter_state_session_key(&self.key)) {
            Ok(raw) => raw.as_deref().and_then(SessionSnapshot::decode),
            Err(e) => {
                log::warn!("session read for '{}' failed: {}", self.key, e);
                None
            }
        }
    }

    fn write_session(&self, snapshot: &SessionSnapshot) {
        let result = snapshot.encode().and_then(|raw| {
            self.session
                .set_item(&get_filter_state_session_key(&self.key), &raw)
        });
        if let Err(e) = result {
            log::warn!("session write for '{}' failed: {}", self.key, e);
        }
    }
}

fn pick<T: Clone>(
    url: Option<Vec<T>>,
    session: Option<Vec<T>>,
    defaults: &[T],
) -> (Vec<T>, HydrationSource) {
    match (url, session) {
        (Some(v), _) => (v, HydrationSource::Url),
        (None, Some(v)) => (v, HydrationSource::Session),
        (None, None) => (defaults.to_vec(), HydrationSource::Defaults),
    }
}

/// List named by a URL param: empty when absent or blank, `None` when the
/// param does not decode
fn from_url<T>(
    raw: Option<String>,
    decode: fn(Option<&str>) -> Option<Vec<T>>,
) -> Option<Vec<T>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => decode(Some(raw.as_str())),
        _ => Some(Vec::new()),
    }
}

/// Serialized form of a URL param as `sync` would write it
fn canonical<T>(
    raw: Option<&str>,
    decode: fn(Option<&str>) -> Option<Vec<T>>,
    encode: fn(&[T]) -> String,
) -> Option<String> {
    from_url(raw.map(str::to_string), decode).map(|items| encode(&items))
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_state::store::{MemoryLocation, MemorySessionStorage};
    use contracts::shared::list_query::{FilterDataType, FilterOperator, SortDirection};

    const KEY: &str = "fetchCustomers";

    fn status_filter(value: &str) -> FilterCondition {
        FilterCondition::new("status", FilterOperator::Equal, FilterDataType::String)
            .with_id("f-status")
            .with_string(value)
    }

    fn name_sort(direction: SortDirection) -> SortOption {
        SortOption::new("name", "Name", direction)
    }

    fn url_with(filters: &[FilterCondition], sorts: &[SortOption]) -> String {
        let f = serialize_filters(filters);
        let s = serialize_sorts(sorts);
        let mut updates: Vec<(&str, Option<&str>)> = Vec::new();
        let fk = get_filters_param_key(KEY);
        let sk = get_sorts_param_key(KEY);
        if !f.is_empty() {
            updates.push((fk.as_str(), Some(f.as_str())));
        }
        if !s.is_empty() {
            updates.push((sk.as_str(), Some(s.as_str())));
        }
        merge_query("", &updates)
    }

    fn controller(
        location: &MemoryLocation,
        session: &MemorySessionStorage,
    ) -> PersistenceController<MemoryLocation, MemorySessionStorage> {
        PersistenceController::new(KEY, location.clone(), session.clone(), HistoryMode::Replace)
    }

    fn session_snapshot(session: &MemorySessionStorage) -> Option<SessionSnapshot> {
        session
            .get_item(&get_filter_state_session_key(KEY))
            .unwrap()
            .as_deref()
            .and_then(SessionSnapshot::decode)
    }

    #[test]
    fn test_defaults_when_stores_are_empty() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);

        let defaults = vec![status_filter("")];
        let state = p.hydrate(&defaults, &[]).unwrap();
        assert_eq!(state.filters, defaults);
        assert_eq!(state.filters_source, HydrationSource::Defaults);
        assert_eq!(state.sorts_source, HydrationSource::Defaults);
        assert!(matches!(p.phase(), SyncPhase::Adopted { .. }));
    }

    #[test]
    fn test_mount_sync_never_pushes() {
        let location = MemoryLocation::new("page=2");
        let session = MemorySessionStorage::new();
        let mut p =
            PersistenceController::new(KEY, location.clone(), session.clone(), HistoryMode::Push);

        let defaults = vec![name_sort(SortDirection::Desc)];
        let state = p.hydrate(&[], &defaults).unwrap();
        assert_eq!(p.sync(&state.filters, &state.sorts), SyncOutcome::UrlAndSession);
        assert_eq!(location.pushes(), 0);
        assert_eq!(
            deserialize_sorts(get_param(&location.search(), &get_sorts_param_key(KEY)).as_deref()),
            Some(defaults)
        );

        // a real change afterwards follows the configured mode
        p.sync(&[status_filter("ARCHIVED")], &state.sorts);
        assert_eq!(location.pushes(), 1);
    }

    #[test]
    fn test_malformed_url_is_repaired_on_mount() {
        let location = MemoryLocation::new("fetchCustomers_filters=%7Bbroken&page=2");
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);

        let state = p.hydrate(&[], &[]).unwrap();
        assert_eq!(p.sync(&state.filters, &state.sorts), SyncOutcome::UrlAndSession);
        assert_eq!(location.search(), "page=2");
    }

    #[test]
    fn test_hydration_priority_is_per_field() {
        let location = MemoryLocation::new(&url_with(&[status_filter("PUBLISHED")], &[]));
        let session = MemorySessionStorage::new();
        session
            .set_item(
                &get_filter_state_session_key(KEY),
                &SessionSnapshot::new(
                    &[status_filter("ARCHIVED")],
                    &[name_sort(SortDirection::Asc)],
                )
                .encode()
                .unwrap(),
            )
            .unwrap();

        let mut p = controller(&location, &session);
        let state = p.hydrate(&[], &[]).unwrap();
        assert_eq!(state.filters, vec![status_filter("PUBLISHED")]);
        assert_eq!(state.filters_source, HydrationSource::Url);
        assert_eq!(state.sorts, vec![name_sort(SortDirection::Asc)]);
        assert_eq!(state.sorts_source, HydrationSource::Session);
    }

    #[test]
    fn test_session_used_when_url_is_empty() {
        let location = MemoryLocation::new("page=3");
        let session = MemorySessionStorage::new();
        session
            .set_item(
                &get_filter_state_session_key(KEY),
                &SessionSnapshot::new(&[status_filter("ARCHIVED")], &[])
                    .encode()
                    .unwrap(),
            )
            .unwrap();

        let defaults = vec![name_sort(SortDirection::Desc)];
        let mut p = controller(&location, &session);
        let state = p.hydrate(&[], &defaults).unwrap();
        assert_eq!(state.filters_source, HydrationSource::Session);
        assert_eq!(state.sorts, defaults);
        assert_eq!(state.sorts_source, HydrationSource::Defaults);

        // session-restored state is mirrored into the URL on the first sync
        assert_eq!(p.sync(&state.filters, &state.sorts), SyncOutcome::UrlAndSession);
        let search = location.search();
        assert!(search.starts_with("page=3&"));
        assert_eq!(
            deserialize_filters(get_param(&search, &get_filters_param_key(KEY)).as_deref()),
            Some(vec![status_filter("ARCHIVED")])
        );
    }

    #[test]
    fn test_malformed_stores_fall_back_to_defaults() {
        let location = MemoryLocation::new("fetchCustomers_filters=%7Bbroken");
        let session = MemorySessionStorage::new();
        session
            .set_item(&get_filter_state_session_key(KEY), "not json")
            .unwrap();

        let defaults = vec![status_filter("")];
        let mut p = controller(&location, &session);
        let state = p.hydrate(&defaults, &[]).unwrap();
        assert_eq!(state.filters, defaults);
        assert_eq!(state.filters_source, HydrationSource::Defaults);
    }

    #[test]
    fn test_hydrates_only_once() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);
        assert!(p.hydrate(&[], &[]).is_some());
        assert!(p.hydrate(&[], &[]).is_none());
    }

    #[test]
    fn test_sync_before_hydration_is_ignored() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);
        assert_eq!(p.sync(&[status_filter("X")], &[]), SyncOutcome::NotHydrated);
        assert!(location.writes().is_empty());
        assert_eq!(session_snapshot(&session), None);
    }

    #[test]
    fn test_adopted_state_is_not_written_back() {
        let filters = vec![status_filter("PUBLISHED")];
        let location = MemoryLocation::new(&format!("{}&page=2", url_with(&filters, &[])));
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);

        let state = p.hydrate(&[], &[]).unwrap();
        assert!(matches!(p.phase(), SyncPhase::Adopted { .. }));

        assert_eq!(p.sync(&state.filters, &state.sorts), SyncOutcome::SessionOnly);
        assert!(location.writes().is_empty());
        assert_eq!(p.phase(), &SyncPhase::Synced);
        assert_eq!(
            session_snapshot(&session).unwrap(),
            SessionSnapshot::new(&filters, &[])
        );
    }

    #[test]
    fn test_adoption_fills_params_missing_from_url() {
        let filters = vec![status_filter("PUBLISHED")];
        let location = MemoryLocation::new(&url_with(&filters, &[]));
        let session = MemorySessionStorage::new();
        session
            .set_item(
                &get_filter_state_session_key(KEY),
                &SessionSnapshot::new(&[], &[name_sort(SortDirection::Asc)])
                    .encode()
                    .unwrap(),
            )
            .unwrap();
        let mut p = controller(&location, &session);

        let state = p.hydrate(&[], &[]).unwrap();
        assert_eq!(p.sync(&state.filters, &state.sorts), SyncOutcome::UrlAndSession);

        let search = location.search();
        assert_eq!(
            get_param(&search, &get_filters_param_key(KEY)),
            Some(serialize_filters(&filters))
        );
        assert_eq!(
            deserialize_sorts(get_param(&search, &get_sorts_param_key(KEY)).as_deref()),
            Some(vec![name_sort(SortDirection::Asc)])
        );
    }

    #[test]
    fn test_change_writes_url_and_keeps_other_params() {
        let location = MemoryLocation::new("page=4&active=customers");
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);
        p.hydrate(&[], &[]);

        let filters = vec![status_filter("ARCHIVED")];
        assert_eq!(p.sync(&filters, &[]), SyncOutcome::UrlAndSession);
        let search = location.search();
        assert!(search.starts_with("page=4&active=customers&"));
        assert_eq!(
            get_param(&search, &get_filters_param_key(KEY)),
            Some(serialize_filters(&filters))
        );

        // same state again: URL untouched, session refreshed
        assert_eq!(p.sync(&filters, &[]), SyncOutcome::SessionOnly);
        assert_eq!(location.writes().len(), 1);
    }

    #[test]
    fn test_clearing_filters_removes_the_param() {
        let filters = vec![status_filter("ARCHIVED")];
        let location = MemoryLocation::new(&format!("page=1&{}", url_with(&filters, &[])));
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);
        let state = p.hydrate(&[], &[]).unwrap();
        p.sync(&state.filters, &state.sorts);

        assert_eq!(p.sync(&[], &[]), SyncOutcome::UrlAndSession);
        assert_eq!(location.search(), "page=1");
    }

    #[test]
    fn test_external_url_change_is_adopted_without_echo() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);
        p.hydrate(&[], &[]);

        let current = vec![status_filter("ARCHIVED")];
        p.sync(&current, &[]);
        let writes_before = location.writes().len();

        // back button restores an older URL
        let older = vec![status_filter("PUBLISHED")];
        location.navigate(&url_with(&older, &[name_sort(SortDirection::Desc)]));
        let search = location.search();

        let (filters, sorts) = p.on_location_change(&search, &current, &[]).unwrap();
        assert_eq!(filters, older);
        assert_eq!(sorts, vec![name_sort(SortDirection::Desc)]);

        assert_eq!(p.sync(&filters, &sorts), SyncOutcome::SessionOnly);
        assert_eq!(location.writes().len(), writes_before);

        // nothing new to adopt afterwards
        assert!(p.on_location_change(&search, &filters, &sorts).is_none());
    }

    #[test]
    fn test_url_without_params_clears_state() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::new();
        let mut p =
            PersistenceController::new(KEY, location.clone(), session.clone(), HistoryMode::Push);
        p.hydrate(&[], &[]);

        let current = vec![status_filter("ARCHIVED")];
        p.sync(&current, &[name_sort(SortDirection::Asc)]);
        let writes_before = location.writes().len();

        // back to the entry from before the filter was applied
        location.navigate("");
        let (filters, sorts) = p
            .on_location_change("", &current, &[name_sort(SortDirection::Asc)])
            .unwrap();
        assert!(filters.is_empty());
        assert!(sorts.is_empty());

        assert_eq!(p.sync(&filters, &sorts), SyncOutcome::SessionOnly);
        assert_eq!(location.writes().len(), writes_before);
        assert_eq!(session_snapshot(&session).unwrap(), SessionSnapshot::default());

        // blank values mean the same as absent ones
        let key = get_filters_param_key(KEY);
        let blank = merge_query("page=2", &[(key.as_str(), Some(""))]);
        assert_eq!(
            p.on_location_change(&blank, &current, &[]),
            Some((Vec::new(), Vec::new()))
        );
    }

    #[test]
    fn test_malformed_param_is_never_adopted() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);
        p.hydrate(&[], &[]);

        let current = vec![status_filter("ARCHIVED")];
        let broken = "fetchCustomers_filters=%7Bbroken";
        assert_eq!(p.on_location_change(broken, &current, &[]), None);
        assert_eq!(
            p.phase(),
            &SyncPhase::Adopted {
                filters: String::new(),
                sorts: String::new(),
            }
        );

        // the readable field is still adopted, the broken one keeps its value
        let sorts = vec![name_sort(SortDirection::Asc)];
        let key = get_sorts_param_key(KEY);
        let serialized = serialize_sorts(&sorts);
        let search = merge_query(broken, &[(key.as_str(), Some(serialized.as_str()))]);
        assert_eq!(
            p.on_location_change(&search, &current, &[]),
            Some((current.clone(), sorts))
        );
    }

    #[test]
    fn test_session_failures_are_swallowed() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::failing();
        let mut p = controller(&location, &session);
        p.hydrate(&[], &[]);

        let filters = vec![status_filter("PUBLISHED")];
        assert_eq!(p.sync(&filters, &[]), SyncOutcome::UrlAndSession);
        assert_eq!(
            deserialize_filters(
                get_param(&location.search(), &get_filters_param_key(KEY)).as_deref()
            ),
            Some(filters)
        );
    }

    #[test]
    fn test_clear_persisted() {
        let filters = vec![status_filter("ARCHIVED")];
        let location = MemoryLocation::new(&format!("page=2&{}", url_with(&filters, &[])));
        let session = MemorySessionStorage::new();
        let mut p = controller(&location, &session);
        let state = p.hydrate(&[], &[]).unwrap();
        p.sync(&state.filters, &state.sorts);
        assert!(session_snapshot(&session).is_some());

        p.clear_persisted();
        assert_eq!(location.search(), "page=2");
        assert_eq!(session_snapshot(&session), None);
    }

    #[test]
    fn test_keys_do_not_collide() {
        let location = MemoryLocation::default();
        let session = MemorySessionStorage::new();
        let mut customers = controller(&location, &session);
        let mut invoices = PersistenceController::new(
            "fetchInvoices",
            location.clone(),
            session.clone(),
            HistoryMode::Replace,
        );
        customers.hydrate(&[], &[]);
        invoices.hydrate(&[], &[]);

        customers.sync(&[status_filter("PUBLISHED")], &[]);
        invoices.sync(&[status_filter("DRAFT")], &[]);

        let search = location.search();
        assert_eq!(
            deserialize_filters(get_param(&search, "fetchCustomers_filters").as_deref()),
            Some(vec![status_filter("PUBLISHED")])
        );
        assert_eq!(
            deserialize_filters(get_param(&search, "fetchInvoices_filters").as_deref()),
            Some(vec![status_filter("DRAFT")])
        );
    }
}
