//! Airport dataset error types.

/// Errors that can occur when loading the airport dataset.
#[derive(Debug, thiserror::Error)]
pub enum AirportError {
    /// The dataset file could not be read
    #[error("failed to read airport dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON of the expected shape
    #[error("JSON parse error in airport dataset: {message}")]
    Json { message: String },
}
