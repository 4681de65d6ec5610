//! Per-tab shared stores the engine mirrors state into: the URL query string
//! and session storage.
//!
//! Browser implementations talk to `window` directly; the memory ones back
//! tests and share state between clones so two controllers can see each
//! other's writes, like two hooks on one page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::config::HistoryMode;
use super::error::ListStateError;

pub trait LocationStore {
    /// Current query string, with or without the leading `?`
    fn search(&self) -> String;

    /// Replace the query string (path and hash stay as they are)
    fn write_search(&self, search: &str, mode: HistoryMode) -> Result<(), ListStateError>;
}

impl<L: LocationStore + ?Sized> LocationStore for Rc<L> {
    fn search(&self) -> String {
        (**self).search()
    }

    fn write_search(&self, search: &str, mode: HistoryMode) -> Result<(), ListStateError> {
        (**self).write_search(search, mode)
    }
}

pub trait SessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, ListStateError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), ListStateError>;
    fn remove_item(&self, key: &str) -> Result<(), ListStateError>;
}

/// `window.location` + `window.history`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

impl LocationStore for BrowserLocation {
    fn search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn write_search(&self, search: &str, mode: HistoryMode) -> Result<(), ListStateError> {
        let window =
            web_sys::window().ok_or_else(|| ListStateError::History("No window object".into()))?;
        let location = window.location();
        let path = location.pathname().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        let search = search.trim_start_matches('?');

        let url = if search.is_empty() {
            format!("{}{}", path, hash)
        } else {
            format!("{}?{}{}", path, search, hash)
        };

        let history = window
            .history()
            .map_err(|e| ListStateError::History(format!("{:?}", e)))?;
        let result = match mode {
            HistoryMode::Replace => {
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            }
            HistoryMode::Push => {
                history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            }
        };
        result.map_err(|e| ListStateError::History(format!("{:?}", e)))
    }
}

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage() -> Result<web_sys::Storage, ListStateError> {
        web_sys::window()
            .ok_or_else(|| ListStateError::Storage("No window object".into()))?
            .session_storage()
            .map_err(|e| ListStateError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| ListStateError::Storage("sessionStorage is unavailable".into()))
    }
}

impl SessionStore for BrowserSessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ListStateError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ListStateError::Storage(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ListStateError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ListStateError::Storage(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), ListStateError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| ListStateError::Storage(format!("{:?}", e)))
    }
}

/// In-memory location; clones share the same query string
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    search: Rc<RefCell<String>>,
    history: Rc<RefCell<Vec<(String, HistoryMode)>>>,
}

impl MemoryLocation {
    pub fn new(search: &str) -> Self {
        Self {
            search: Rc::new(RefCell::new(search.trim_start_matches('?').to_string())),
            history: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Build from a path like `/customers?page=2`
    pub fn from_url(url: &str) -> Self {
        match url.split_once('?') {
            Some((_, search)) => Self::new(search.split('#').next().unwrap_or_default()),
            None => Self::default(),
        }
    }

    /// Simulate an external navigation (back/forward, manual edit)
    pub fn navigate(&self, search: &str) {
        *self.search.borrow_mut() = search.trim_start_matches('?').to_string();
    }

    /// Query strings written through [`LocationStore::write_search`]
    pub fn writes(&self) -> Vec<String> {
        self.history
            .borrow()
            .iter()
            .map(|(search, _)| search.clone())
            .collect()
    }

    /// Number of writes that added a history entry
    pub fn pushes(&self) -> usize {
        self.history
            .borrow()
            .iter()
            .filter(|(_, mode)| *mode == HistoryMode::Push)
            .count()
    }
}

impl LocationStore for MemoryLocation {
    fn search(&self) -> String {
        self.search.borrow().clone()
    }

    fn write_search(&self, search: &str, mode: HistoryMode) -> Result<(), ListStateError> {
        let search = search.trim_start_matches('?').to_string();
        self.history.borrow_mut().push((search.clone(), mode));
        *self.search.borrow_mut() = search;
        Ok(())
    }
}

/// In-memory session storage; clones share the same map.
///
/// `failing()` builds one whose writes always error, like a locked-down
/// private window or an exceeded quota.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: bool,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            items: Rc::default(),
            fail_writes: true,
        }
    }
}

impl SessionStore for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ListStateError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ListStateError> {
        if self.fail_writes {
            return Err(ListStateError::Storage("QuotaExceededError".into()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), ListStateError> {
        if self.fail_writes {
            return Err(ListStateError::Storage("SecurityError".into()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
