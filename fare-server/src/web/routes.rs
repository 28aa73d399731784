//! HTTP route handlers.

use std::any::Any;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{
        IntoResponse, Redirect, Response,
        sse::{Event, Sse},
    },
    routing::get,
};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::domain::{SearchRequest, ValidationError};
use crate::search::{FareSource, Orchestrator, ResultEmitter, SearchConfig, SearchError};

use super::dto::{ErrorResponse, SearchFlightsParams};
use super::state::AppState;
use super::validate::parse_search;

/// Path of the search endpoint.
pub const SEARCH_PATH: &str = "/api/search-flights";

/// Create the application router.
pub fn create_router<S: FareSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(SEARCH_PATH, get(search_flights::<S>))
        .route("/search-flights", get(legacy_search))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Old search path; forwards to the API path with the same query.
async fn legacy_search(RawQuery(query): RawQuery) -> Redirect {
    match query {
        Some(query) => Redirect::temporary(&format!("{SEARCH_PATH}?{query}")),
        None => Redirect::temporary(SEARCH_PATH),
    }
}

/// Search for flights, streaming results as server-sent events.
///
/// Validation happens before the stream opens, so bad parameters get a
/// plain 400. After that the search runs in its own task; dropping the
/// response body stops it.
async fn search_flights<S: FareSource + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchFlightsParams>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let request = parse_search(&params)?;

    let (tx, rx) = mpsc::channel(state.config.channel_capacity.max(1));
    let emitter = ResultEmitter::new(
        tx,
        Arc::clone(&state.airports),
        request.passengers.total(),
        state.config.emit_pace(),
    );

    tokio::spawn(run_search(
        Arc::clone(&state.source),
        Arc::clone(&state.config),
        request,
        emitter,
    ));

    let stream = ReceiverStream::new(rx).map(|data| Ok(Event::default().data(data)));
    Ok(Sse::new(stream))
}

/// Drive one search to completion in the background.
///
/// Ends by dropping the emitter, which closes the stream. A failure after
/// streaming began therefore ends the stream without the end sentinel.
async fn run_search<S: FareSource>(
    source: Arc<S>,
    config: Arc<SearchConfig>,
    request: SearchRequest,
    mut emitter: ResultEmitter,
) {
    let orchestrator = Orchestrator::new(source.as_ref(), config.as_ref());

    match orchestrator.run(&request, &mut emitter).await {
        Ok(_) => {}
        Err(SearchError::Disconnected) => debug!("Client disconnected, search abandoned"),
        Err(e) => error!(kind = e.kind(), error = %e, "Search failed mid-stream"),
    }
}

/// Convert a handler panic into the internal error response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal {
        message,
        kind: "panic",
    }
    .into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String, kind: &'static str },
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(v) => v.into(),
            _ => AppError::Internal {
                message: e.to_string(),
                kind: e.kind(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "Rejected search request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: message,
                        kind: None,
                    },
                )
            }
            AppError::Internal { message, kind } => {
                error!(%message, kind, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal server error".to_string(),
                        kind: Some(kind.to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    use super::*;
    use crate::airports::AirportDirectory;
    use crate::domain::{AirportCode, FlightLeg, Itinerary};
    use crate::fares::MockFareSource;

    const ONE_WAY_QUERY: &str = "tripType=oneWay&startDate=2024-06-01&maxPrice=100\
        &originAirports=DUB&wantedCountries=Spain&adults=1";

    fn flight(price: f64) -> Itinerary {
        let departure = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Itinerary::OneWay(FlightLeg {
            departure_time: departure,
            arrival_time: departure + chrono::Duration::minutes(150),
            flight_number: "FR6388".to_string(),
            price,
            currency: "EUR".to_string(),
            origin: AirportCode::parse("DUB").unwrap(),
            origin_full: "Dublin, Ireland".to_string(),
            destination: AirportCode::parse("BCN").unwrap(),
            destination_full: "Barcelona, Spain".to_string(),
        })
    }

    fn app(source: MockFareSource) -> Router {
        let config = SearchConfig::default().with_emit_pace_ms(0);
        create_router(AppState::new(source, AirportDirectory::disabled(), config))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let response = get(app(MockFareSource::new()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn search_streams_results_then_end() {
        let mut source = MockFareSource::new();
        source.add_fares(AirportCode::parse("DUB").unwrap(), [flight(80.0)]);

        let response = get(app(source), &format!("{SEARCH_PATH}?{ONE_WAY_QUERY}")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );

        let body = body_text(response).await;
        let frames: Vec<&str> = body
            .split("\n\n")
            .filter(|f| !f.is_empty())
            .collect();
        assert_eq!(frames.len(), 2);

        let result: serde_json::Value =
            serde_json::from_str(frames[0].strip_prefix("data: ").unwrap()).unwrap();
        assert_eq!(result["totalPrice"].as_f64(), Some(80.0));
        assert_eq!(result["outbound"]["destinationFull"], "Barcelona, Spain");
        assert_eq!(frames[1], "data: END");
    }

    #[tokio::test]
    async fn search_without_matches_reports_no_flights() {
        let response = get(
            app(MockFareSource::new()),
            &format!("{SEARCH_PATH}?{ONE_WAY_QUERY}"),
        )
        .await;

        let body = body_text(response).await;
        assert!(body.contains(r#""type":"NO_FLIGHTS""#));
        assert!(body.ends_with("data: END\n\n"));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let response = get(
            app(MockFareSource::new()),
            &format!("{SEARCH_PATH}?tripType=oneWay"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "Missing required field: startDate");
        assert!(body.get("type").is_none());
    }

    #[tokio::test]
    async fn uncountable_party_is_bad_request() {
        let mut source = MockFareSource::new();
        source.add_fares(AirportCode::parse("DUB").unwrap(), [flight(5000.0)]);
        let query = ONE_WAY_QUERY
            .replace("maxPrice=100", "maxPrice=1")
            .replace("adults=1", "adults=4294967295&teens=1");

        let response = get(app(source), &format!("{SEARCH_PATH}?{query}")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid numeric value for passengers")
        );
    }

    #[tokio::test]
    async fn invalid_airport_is_bad_request() {
        let query = ONE_WAY_QUERY.replace("originAirports=DUB", "originAirports=DUBLIN");
        let response = get(app(MockFareSource::new()), &format!("{SEARCH_PATH}?{query}")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "Invalid airport code: DUBLIN");
    }

    #[tokio::test]
    async fn legacy_path_redirects_with_query() {
        let response = get(
            app(MockFareSource::new()),
            &format!("/search-flights?{ONE_WAY_QUERY}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            format!("{SEARCH_PATH}?{ONE_WAY_QUERY}").as_str()
        );
    }

    #[tokio::test]
    async fn internal_error_shape() {
        let response = AppError::from(SearchError::Disconnected).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["type"], "Disconnected");
    }

    #[tokio::test]
    async fn panics_become_internal_errors() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["type"], "panic");
    }
}
