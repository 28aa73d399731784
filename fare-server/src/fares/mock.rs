//! Mock fare source for testing without API access.
//!
//! Holds itineraries in memory and answers queries the way the live API
//! does: only fares whose departure dates fall inside the query windows
//! come back. Fixtures can be loaded from JSON files in the API's own
//! response format.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{AirportCode, Itinerary};
use crate::search::{FareQuery, FareSource, QueryError};

use super::convert::convert_fares;
use super::error::FareError;
use super::types::FaresResponse;

/// Mock fare source serving canned itineraries.
#[derive(Debug, Default)]
pub struct MockFareSource {
    fares: HashMap<AirportCode, Vec<Itinerary>>,
    /// Queries for these (origin, outbound start) pairs fail.
    failing: HashSet<(AirportCode, NaiveDate)>,
    /// Queries from these origins never complete.
    hanging: HashSet<AirportCode>,
    /// Every query received, in arrival order.
    queries: Mutex<Vec<FareQuery>>,
}

impl MockFareSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a directory.
    ///
    /// Expects files named `{IATA}.json` (e.g., `DUB.json`), each holding a
    /// fare API response for that origin.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, FareError> {
        let data_dir = data_dir.as_ref();
        let mut source = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| FareError::ApiError {
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| FareError::ApiError {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let code_str =
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| FareError::ApiError {
                        status: 0,
                        message: format!("Invalid filename: {:?}", path),
                    })?;

            let origin = AirportCode::parse(code_str).map_err(|_| FareError::ApiError {
                status: 0,
                message: format!("Invalid airport code in filename: {}", code_str),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| FareError::ApiError {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            let response: FaresResponse =
                serde_json::from_str(&json).map_err(|e| FareError::Json {
                    message: format!("Failed to parse {:?}: {}", path, e),
                    body: None,
                })?;

            source.add_fares(origin, convert_fares(&response));
        }

        if source.fares.is_empty() {
            return Err(FareError::ApiError {
                status: 0,
                message: format!("No mock fare files found in {:?}", data_dir),
            });
        }

        Ok(source)
    }

    /// Add itineraries departing from `origin`.
    pub fn add_fares(&mut self, origin: AirportCode, fares: impl IntoIterator<Item = Itinerary>) {
        self.fares.entry(origin).or_default().extend(fares);
    }

    /// Make queries from `origin` whose outbound window starts on `date` fail.
    pub fn fail_on(&mut self, origin: AirportCode, date: NaiveDate) {
        self.failing.insert((origin, date));
    }

    /// Make every query from `origin` hang forever.
    pub fn hang_on(&mut self, origin: AirportCode) {
        self.hanging.insert(origin);
    }

    /// Origins with fixtures loaded.
    pub fn origins(&self) -> impl Iterator<Item = &AirportCode> {
        self.fares.keys()
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<FareQuery> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    fn record(&self, query: &FareQuery) {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
    }

    fn matching(&self, query: &FareQuery) -> Vec<Itinerary> {
        let Some(fares) = self.fares.get(&query.origin) else {
            return Vec::new();
        };

        fares
            .iter()
            .filter(|candidate| {
                if !query
                    .outbound
                    .contains(candidate.outbound().departure_time.date())
                {
                    return false;
                }
                match (query.inbound, candidate.inbound()) {
                    (None, None) => true,
                    (Some(window), Some(inbound)) => {
                        window.contains(inbound.departure_time.date())
                    }
                    _ => false,
                }
            })
            .cloned()
            .collect()
    }
}

impl FareSource for MockFareSource {
    async fn query(&self, query: &FareQuery) -> Result<Vec<Itinerary>, QueryError> {
        self.record(query);

        if self.hanging.contains(&query.origin) {
            return std::future::pending().await;
        }

        if self.failing.contains(&(query.origin, query.outbound.from)) {
            return Err(QueryError::new(query.origin, "mock failure"));
        }

        let found = self.matching(query);
        debug!(origin = %query.origin, found = found.len(), "Mock fare query");
        Ok(found)
    }
}
