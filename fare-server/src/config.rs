//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::fares::FareClientConfig;
use crate::search::SearchConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Default location of the airport dataset.
const DEFAULT_AIRPORTS_PATH: &str = "data/airports.json";

/// An environment variable with an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub fares: FareClientConfig,
    /// Serve fares from fixture files in this directory instead of the API.
    pub mock_dir: Option<PathBuf>,
    pub airports_path: PathBuf,
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable lookup.
    ///
    /// Unset or blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse(
            "BIND_ADDR",
            &get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let mut fares = FareClientConfig::new(get("FARES_CURRENCY").unwrap_or_else(|| "EUR".into()));
        if let Some(url) = get("FARES_BASE_URL") {
            fares = fares.with_base_url(url);
        }
        if let Some(secs) = get("FARES_TIMEOUT_SECS") {
            fares = fares.with_timeout(parse("FARES_TIMEOUT_SECS", &secs)?);
        }

        let mut search = SearchConfig::default();
        if let Some(ms) = get("EMIT_PACE_MS") {
            search = search.with_emit_pace_ms(parse("EMIT_PACE_MS", &ms)?);
        }
        if let Some(n) = get("ORIGIN_BATCH_SIZE") {
            search = search.with_origin_batch_size(parse("ORIGIN_BATCH_SIZE", &n)?);
        }

        Ok(Self {
            bind_addr,
            fares,
            mock_dir: get("FARES_MOCK_DIR").map(PathBuf::from),
            airports_path: get("AIRPORTS_PATH")
                .unwrap_or_else(|| DEFAULT_AIRPORTS_PATH.to_string())
                .into(),
            search,
        })
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        var,
        value: value.to_string(),
    })
}
