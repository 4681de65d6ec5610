use serde::Deserialize;

use super::error::ListStateError;

/// How URL updates are recorded in the browser history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// history.replaceState, no new entry per edit
    #[default]
    Replace,
    /// history.pushState, each synced edit is a back/forward step
    Push,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListEngineConfig {
    /// Quiet window before edits propagate to sanitized state (ms)
    pub debounce_ms: u64,
    /// Rows per page
    pub page_size: usize,
    /// Rows requested by the empty-state probe
    pub probe_limit: usize,
    pub history_mode: HistoryMode,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
debounce_ms = 300
page_size = 10
probe_limit = 1
history_mode = "replace"
"#;

impl Default for ListEngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            page_size: 10,
            probe_limit: 1,
            history_mode: HistoryMode::Replace,
        }
    }
}

impl ListEngineConfig {
    /// Parse a TOML override; missing keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, ListStateError> {
        let config: ListEngineConfig = toml::from_str(raw)?;
        Ok(config.normalized())
    }

    /// Embedded defaults
    pub fn embedded() -> Self {
        match Self::from_toml_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Embedded list config is invalid, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.probe_limit = self.probe_limit.max(1);
        self
    }
}
