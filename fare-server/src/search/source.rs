//! The seam between the search engine and whatever supplies fares.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{AirportCode, Itinerary, Passengers};

/// Inclusive range of departure dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Create a window, or `None` if `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    /// A window covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// One request to the fare source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuery {
    pub origin: AirportCode,
    /// When the outbound leg may depart.
    pub outbound: DateWindow,
    /// When the inbound leg may depart; `None` asks for one-way fares.
    pub inbound: Option<DateWindow>,
    pub passengers: Passengers,
}

/// A single fare query that failed.
///
/// Contained by the search engine: logged, the pair is skipped, the run
/// continues.
#[derive(Debug, Clone, thiserror::Error)]
#[error("fare query from {origin} failed: {message}")]
pub struct QueryError {
    pub origin: AirportCode,
    pub message: String,
}

impl QueryError {
    pub fn new(origin: AirportCode, message: impl Into<String>) -> Self {
        Self {
            origin,
            message: message.into(),
        }
    }
}

/// Trait for providing candidate itineraries.
///
/// This abstraction allows the search engine to be tested with mock data.
/// Calls must be independent: any one of them may fail without affecting
/// the others.
pub trait FareSource: Send + Sync {
    /// Fetch candidate itineraries for one origin and date window.
    fn query(
        &self,
        query: &FareQuery,
    ) -> impl Future<Output = Result<Vec<Itinerary>, QueryError>> + Send;
}
