//! Fare client error types.

use std::fmt;

/// Errors from the fare finder HTTP client.
#[derive(Debug)]
pub enum FareError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,
}

impl fmt::Display for FareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FareError::Http(e) => write!(f, "HTTP error: {e}"),
            FareError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            FareError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            FareError::RateLimited => write!(f, "rate limited by fare API"),
        }
    }
}

impl std::error::Error for FareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FareError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FareError {
    fn from(err: reqwest::Error) -> Self {
        FareError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FareError::RateLimited;
        assert_eq!(err.to_string(), "rate limited by fare API");

        let err = FareError::ApiError {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = FareError::Json {
            message: "missing field `outbound`".into(),
            body: Some("{\"fares\":[{}]}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("missing field"));
    }
}
