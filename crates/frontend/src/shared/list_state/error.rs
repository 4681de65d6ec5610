use thiserror::Error;

/// Errors inside the list-state engine.
///
/// None of these reach the UI as a failure: decode errors fall back to
/// defaults, storage/history errors are logged and swallowed, fetch errors are
/// exposed as flags.
#[derive(Debug, Error)]
pub enum ListStateError {
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}
