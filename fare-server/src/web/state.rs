//! Application state for the web layer.

use std::sync::Arc;

use crate::airports::AirportDirectory;
use crate::search::{FareSource, SearchConfig};

/// Shared application state.
///
/// Generic over the fare source so the router can be driven by the live
/// client or a mock.
pub struct AppState<S> {
    /// Where fares come from
    pub source: Arc<S>,

    /// Airport timezone lookup for leg durations
    pub airports: Arc<AirportDirectory>,

    /// Search engine configuration
    pub config: Arc<SearchConfig>,
}

impl<S: FareSource> AppState<S> {
    /// Create a new app state.
    pub fn new(source: S, airports: AirportDirectory, config: SearchConfig) -> Self {
        Self {
            source: Arc::new(source),
            airports: Arc::new(airports),
            config: Arc::new(config),
        }
    }
}

// `S` need not be Clone: only the Arcs are cloned.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            airports: Arc::clone(&self.airports),
            config: Arc::clone(&self.config),
        }
    }
}
