//! Search configuration for the fare search engine.

use std::time::Duration;

/// Configuration parameters for a search run.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Delay inserted between consecutive emitted results (milliseconds).
    /// Smooths delivery for slow clients; zero disables pacing.
    pub emit_pace_ms: u64,

    /// How many origins of one date are queried concurrently.
    /// 1 queries one (date, origin) pair at a time.
    pub origin_batch_size: usize,

    /// Buffered events between the search task and the HTTP stream.
    pub channel_capacity: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(emit_pace_ms: u64, origin_batch_size: usize, channel_capacity: usize) -> Self {
        Self {
            emit_pace_ms,
            origin_batch_size,
            channel_capacity,
        }
    }

    /// Set the pacing delay.
    pub fn with_emit_pace_ms(mut self, ms: u64) -> Self {
        self.emit_pace_ms = ms;
        self
    }

    /// Set the per-date origin concurrency.
    pub fn with_origin_batch_size(mut self, n: usize) -> Self {
        self.origin_batch_size = n;
        self
    }

    /// Returns the pacing delay as a Duration.
    pub fn emit_pace(&self) -> Duration {
        Duration::from_millis(self.emit_pace_ms)
    }

    /// Batch size clamped to at least one origin.
    pub fn origin_batch(&self) -> usize {
        self.origin_batch_size.max(1)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            emit_pace_ms: 10,
            origin_batch_size: 1,
            channel_capacity: 32,
        }
    }
}
