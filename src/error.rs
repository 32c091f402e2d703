//! Error types for page behavior initialization, storage and configuration.
//!
//! None of these ever reach the user. Each behavior turns its own failures
//! into a log line and the rest of the page keeps working.

/// A behavior could not be wired because the markup is missing something it
/// cannot work without.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// A required element was not found in the document.
    #[error("{behavior}: required element `{selector}` not found")]
    MissingRequiredElement { behavior: &'static str, selector: String },
}

impl InitError {
    pub(crate) fn missing(behavior: &'static str, selector: impl Into<String>) -> Self {
        Self::MissingRequiredElement { behavior, selector: selector.into() }
    }
}

/// The persisted preference slot could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled, blocked, or threw on access.
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by [`crate::config::Config::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The embedded configuration block is not valid JSON for [`crate::config::Config`].
    #[error("invalid page config: {0}")]
    Json(#[from] serde_json::Error),
}
