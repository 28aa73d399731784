//! Validated search requests.

use chrono::NaiveDate;

use super::error::ValidationError;
use super::{AirportCode, TripType};

/// Passenger counts for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passengers {
    pub adults: u32,
    pub teens: u32,
    pub children: u32,
}

impl Passengers {
    /// Create a passenger breakdown.
    pub fn new(adults: u32, teens: u32, children: u32) -> Self {
        Self {
            adults,
            teens,
            children,
        }
    }

    /// Total head count. Fares are per person, so trip prices scale by this.
    ///
    /// Saturates; [`SearchRequest::validate`] rejects parties whose head
    /// count does not fit.
    pub fn total(&self) -> u32 {
        self.checked_total().unwrap_or(u32::MAX)
    }

    /// Total head count, or `None` if it overflows.
    pub fn checked_total(&self) -> Option<u32> {
        self.adults
            .checked_add(self.teens)?
            .checked_add(self.children)
    }
}

impl Default for Passengers {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Bounds on the number of nights between outbound and inbound departures.
///
/// Ignored for one-way trips. `min_days <= max_days` is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StayWindow {
    pub min_days: u32,
    pub max_days: u32,
}

impl StayWindow {
    pub fn new(min_days: u32, max_days: u32) -> Self {
        Self { min_days, max_days }
    }
}

/// A fully parsed flight search.
///
/// Built once per incoming request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// What kind of trip is wanted.
    pub trip_type: TripType,

    /// First candidate departure date (inclusive).
    pub start: NaiveDate,

    /// Last day of the travel window (inclusive).
    pub end: NaiveDate,

    /// Stay length bounds for return-family trips.
    pub stay: StayWindow,

    /// Origins to search from, in the order the caller gave them.
    pub origins: Vec<AirportCode>,

    /// Substrings matched against the destination display name.
    pub wanted_countries: Vec<String>,

    /// Who is travelling.
    pub passengers: Passengers,

    /// Budget for the whole party, not per person.
    pub max_price: f64,
}

impl SearchRequest {
    /// Check the invariants the search engine relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start > self.end {
            return Err(ValidationError::InvalidDateRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }

        if self.origins.is_empty() {
            return Err(ValidationError::EmptyOrigins);
        }

        if self.wanted_countries.iter().all(|c| c.is_empty()) {
            return Err(ValidationError::EmptyCountries);
        }

        if self.passengers.adults < 1 {
            return Err(ValidationError::InvalidNumber {
                field: "adults",
                value: self.passengers.adults.to_string(),
            });
        }

        if self.passengers.checked_total().is_none() {
            return Err(ValidationError::InvalidNumber {
                field: "passengers",
                value: format!(
                    "{} adults, {} teens, {} children",
                    self.passengers.adults, self.passengers.teens, self.passengers.children
                ),
            });
        }

        if !self.max_price.is_finite() || self.max_price < 0.0 {
            return Err(ValidationError::InvalidNumber {
                field: "maxPrice",
                value: self.max_price.to_string(),
            });
        }

        Ok(())
    }
}
