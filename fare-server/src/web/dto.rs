//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters of the flight search endpoint.
///
/// Everything arrives as text; parsing and validation happen in
/// [`super::validate::parse_search`] so each failure gets its own message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFlightsParams {
    /// "oneWay", "return", "weekend" or "longWeekend"
    pub trip_type: Option<String>,

    /// First departure date, YYYY-MM-DD
    pub start_date: Option<String>,

    /// Last day of the travel window, YYYY-MM-DD
    pub end_date: Option<String>,

    /// Budget for the whole party
    pub max_price: Option<String>,

    /// Minimum nights away
    pub min_days: Option<String>,

    /// Maximum nights away
    pub max_days: Option<String>,

    /// Comma-separated IATA codes
    pub origin_airports: Option<String>,

    /// Comma-separated destination name fragments
    pub wanted_countries: Option<String>,

    pub adults: Option<String>,
    pub teens: Option<String>,
    pub children: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Error kind, only on internal errors
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
