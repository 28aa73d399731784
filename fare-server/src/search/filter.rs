//! Per-candidate filtering predicates.

use std::fmt;

use crate::domain::{Itinerary, SearchRequest};

use super::calendar;

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OverBudget,
    UnwantedDestination,
    WeekendPattern,
    ReturnsAfterWindow,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::OverBudget => "over budget",
            Rejection::UnwantedDestination => "destination not wanted",
            Rejection::WeekendPattern => "outside weekend pattern",
            Rejection::ReturnsAfterWindow => "returns after end date",
        })
    }
}

/// Stateless predicates over a single candidate.
///
/// The passenger total is computed once per request and handed in; the
/// pipeline never recomputes it.
#[derive(Debug, Clone, Copy)]
pub struct FilterPipeline<'a> {
    request: &'a SearchRequest,
    total_passengers: u32,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(request: &'a SearchRequest, total_passengers: u32) -> Self {
        Self {
            request,
            total_passengers,
        }
    }

    /// Run every predicate, reporting the first one that fails.
    pub fn check(&self, candidate: &Itinerary) -> Result<(), Rejection> {
        if !self.within_budget(candidate) {
            return Err(Rejection::OverBudget);
        }
        if !self.wanted_destination(candidate) {
            return Err(Rejection::UnwantedDestination);
        }
        if !self.fits_weekend(candidate) {
            return Err(Rejection::WeekendPattern);
        }
        if !self.returns_in_window(candidate) {
            return Err(Rejection::ReturnsAfterWindow);
        }
        Ok(())
    }

    /// Whether the candidate survives all predicates.
    #[cfg(test)]
    pub fn admits(&self, candidate: &Itinerary) -> bool {
        self.check(candidate).is_ok()
    }

    /// Whole-party price is within the budget.
    pub fn within_budget(&self, candidate: &Itinerary) -> bool {
        candidate.total_price(self.total_passengers) <= self.request.max_price
    }

    /// Some wanted string occurs in the outbound destination's display name.
    ///
    /// Case-sensitive substring match, so "Spain" matches "Barcelona, Spain".
    pub fn wanted_destination(&self, candidate: &Itinerary) -> bool {
        let name = &candidate.outbound().destination_full;
        self.request
            .wanted_countries
            .iter()
            .filter(|c| !c.is_empty())
            .any(|c| name.contains(c.as_str()))
    }

    /// Outbound and inbound days fit the weekend mode, if the trip has one.
    pub fn fits_weekend(&self, candidate: &Itinerary) -> bool {
        let Some(mode) = self.request.trip_type.weekend_mode() else {
            return true;
        };
        let Some(inbound) = candidate.inbound() else {
            return false;
        };
        calendar::is_valid_pair(
            candidate.outbound().departure_time.date(),
            inbound.departure_time.date(),
            Some(mode),
        )
    }

    /// The inbound leg leaves no later than the request's end date.
    pub fn returns_in_window(&self, candidate: &Itinerary) -> bool {
        if !self.request.trip_type.is_return_family() {
            return true;
        }
        candidate
            .inbound()
            .is_some_and(|leg| leg.departure_time.date() <= self.request.end)
    }
}
