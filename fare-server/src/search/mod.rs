//! Fare search engine.
//!
//! This module answers: "which itineraries, across these dates and origins,
//! fit the traveller's budget, destinations, stay length and weekday
//! pattern?" It drives queries against a [`FareSource`], filters and
//! deduplicates what comes back, and streams survivors through a
//! [`ResultEmitter`] as soon as each batch is ready.

pub mod calendar;
mod config;
mod dates;
mod dedup;
mod emitter;
mod error;
mod events;
mod filter;
mod orchestrator;
mod source;


pub use config::SearchConfig;
pub use dates::DateAxis;
pub use dedup::Deduplicator;
pub use emitter::ResultEmitter;
pub use error::SearchError;
pub use events::{END_SENTINEL, LegView, NO_FLIGHTS_MESSAGE, NoFlightsEvent, ResultEvent};
pub use filter::{FilterPipeline, Rejection};
pub use orchestrator::{Orchestrator, RunSummary, fare_query, select_batch};
pub use source::{DateWindow, FareQuery, FareSource, QueryError};
