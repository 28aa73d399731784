//! Fare finder HTTP client.
//!
//! Queries the cheapest-fare endpoints for one origin over a date window and
//! converts the answers to domain itineraries.

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{AirportCode, Itinerary, Passengers};
use crate::search::{DateWindow, FareQuery, FareSource, QueryError};

use super::convert::convert_fares;
use super::error::FareError;
use super::types::FaresResponse;

/// Default base URL for the fare finder API.
pub const DEFAULT_BASE_URL: &str = "https://services-api.ryanair.com/farfnd/v4";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the fare client.
#[derive(Debug, Clone)]
pub struct FareClientConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Currency fares are quoted in
    pub currency: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FareClientConfig {
    /// Create a config quoting fares in the given currency.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            currency: currency.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FareClientConfig {
    fn default() -> Self {
        Self::new("EUR")
    }
}

/// Fare finder API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct FareClient {
    http: reqwest::Client,
    base_url: String,
    currency: String,
    semaphore: Arc<Semaphore>,
}

impl FareClient {
    /// Create a new fare client with the given configuration.
    pub fn new(config: FareClientConfig) -> Result<Self, FareError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            currency: config.currency,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Cheapest one-way fares departing `origin` within `outbound`.
    pub async fn one_way_fares(
        &self,
        origin: AirportCode,
        outbound: DateWindow,
        passengers: Passengers,
    ) -> Result<Vec<Itinerary>, FareError> {
        let mut params = self.common_params(origin, passengers);
        params.extend(window_params(Direction::Outbound, outbound));

        self.fetch("oneWayFares", &params).await
    }

    /// Cheapest round trips leaving `origin` within `outbound` and coming
    /// back within `inbound`.
    pub async fn round_trip_fares(
        &self,
        origin: AirportCode,
        outbound: DateWindow,
        inbound: DateWindow,
        passengers: Passengers,
    ) -> Result<Vec<Itinerary>, FareError> {
        let mut params = self.common_params(origin, passengers);
        params.extend(window_params(Direction::Outbound, outbound));
        params.extend(window_params(Direction::Inbound, inbound));

        self.fetch("roundTripFares", &params).await
    }

    fn common_params(
        &self,
        origin: AirportCode,
        passengers: Passengers,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("departureAirportIataCode", origin.as_str().to_string()),
            ("currency", self.currency.clone()),
            ("adultPaxCount", passengers.adults.to_string()),
            ("teenPaxCount", passengers.teens.to_string()),
            ("childPaxCount", passengers.children.to_string()),
        ]
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<Itinerary>, FareError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FareError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "Querying fare API");

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FareError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FareError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let parsed: FaresResponse =
            serde_json::from_str(&body).map_err(|e| FareError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_fares(&parsed))
    }
}

impl FareSource for FareClient {
    async fn query(&self, query: &FareQuery) -> Result<Vec<Itinerary>, QueryError> {
        let result = match query.inbound {
            Some(inbound) => {
                self.round_trip_fares(query.origin, query.outbound, inbound, query.passengers)
                    .await
            }
            None => {
                self.one_way_fares(query.origin, query.outbound, query.passengers)
                    .await
            }
        };

        result.map_err(|e| QueryError::new(query.origin, e.to_string()))
    }
}

/// Which leg a date window constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// Query parameter names for date from/to and time from/to.
    fn keys(self) -> [&'static str; 4] {
        match self {
            Direction::Outbound => [
                "outboundDepartureDateFrom",
                "outboundDepartureDateTo",
                "outboundDepartureTimeFrom",
                "outboundDepartureTimeTo",
            ],
            Direction::Inbound => [
                "inboundDepartureDateFrom",
                "inboundDepartureDateTo",
                "inboundDepartureTimeFrom",
                "inboundDepartureTimeTo",
            ],
        }
    }
}

/// Date and time-of-day bounds for one direction.
fn window_params(direction: Direction, window: DateWindow) -> Vec<(&'static str, String)> {
    let [date_from, date_to, time_from, time_to] = direction.keys();
    vec![
        (date_from, window.from.format("%Y-%m-%d").to_string()),
        (date_to, window.to.format("%Y-%m-%d").to_string()),
        (time_from, "00:00".to_string()),
        (time_to, "23:59".to_string()),
    ]
}
