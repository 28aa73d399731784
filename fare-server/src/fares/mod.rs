//! Fare finder API client.
//!
//! This module provides an HTTP client for the low-cost carrier's public
//! fare finder, which returns the cheapest fare per destination for an
//! origin and departure window.
//!
//! Key characteristics of the API:
//! - One call covers every destination served from one origin
//! - Times are local to the departure or arrival airport, with no offset
//! - Prices are per person; round trips carry a combined summary price

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, FareClient, FareClientConfig};
pub use convert::{ConversionError, convert_fare, convert_fares};
pub use error::FareError;
pub use mock::MockFareSource;
pub use types::{AirportDto, FareDto, FaresResponse, LegDto, PriceDto, SummaryDto};
