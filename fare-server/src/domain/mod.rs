//! Domain types for the fare search server.
//!
//! This module contains the core domain model types that represent
//! validated flight data and search parameters. Types enforce their
//! invariants at construction or through `validate`, so code that receives
//! them can trust their validity.

mod airport;
mod error;
mod flight;
mod request;
mod trip;

pub use airport::{AirportCode, InvalidAirportCode};
pub use error::ValidationError;
pub use flight::{DedupKey, FlightLeg, Itinerary};
pub use request::{Passengers, SearchRequest, StayWindow};
pub use trip::{TripType, UnknownTripType, WeekendMode};
