//! Web layer for the fare search service.
//!
//! Provides the streaming search endpoint and a health check.

mod dto;
mod routes;
mod state;
mod validate;

pub use dto::{ErrorResponse, SearchFlightsParams};
pub use routes::{AppError, SEARCH_PATH, create_router};
pub use state::AppState;
pub use validate::parse_search;
