//! Search engine error types.

use crate::domain::ValidationError;

/// Why a search run stopped before completing normally.
///
/// Upstream query failures are not here: they are contained per
/// (date, origin) pair and never end a run.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request violates an invariant the engine relies on
    #[error("invalid search request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The client stopped listening
    #[error("client disconnected")]
    Disconnected,

    /// An event could not be serialized
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SearchError {
    /// Short machine-readable name for error responses and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::InvalidRequest(_) => "InvalidRequest",
            SearchError::Disconnected => "Disconnected",
            SearchError::Serialize(_) => "SerializeError",
        }
    }
}
