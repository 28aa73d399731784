//! Domain error types.
//!
//! These errors represent malformed or missing search parameters. They are
//! raised before any upstream query is made and are never retried.

/// A search request that cannot be served as given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required parameter was absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A date parameter was not `YYYY-MM-DD`
    #[error("Invalid date format for {field}: {value}. Use YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    /// The date window is inverted
    #[error("Invalid date range: startDate {start} is after endDate {end}")]
    InvalidDateRange { start: String, end: String },

    /// An origin was not a 3-letter uppercase IATA code
    #[error("Invalid airport code: {0}")]
    InvalidAirportCode(String),

    /// A numeric parameter failed to parse or is out of range
    #[error("Invalid numeric value for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// The trip type tag is not one of the known kinds
    #[error("Invalid trip type: {0}")]
    InvalidTripType(String),

    /// No origin airports were supplied
    #[error("Origin airports cannot be empty")]
    EmptyOrigins,

    /// No destination countries were supplied
    #[error("Wanted countries cannot be empty")]
    EmptyCountries,
}
