//! Airport timezone lookup.
//!
//! Provides IATA code → IANA timezone mapping, loaded from a JSON dataset
//! on first use. Only used to report how long each leg takes; filtering
//! and pricing never depend on it.

mod directory;
mod error;

pub use directory::{AirportDirectory, AirportEntry};
pub use error::AirportError;
