//! Wire payloads for the result stream.
//!
//! Every event travels as one `data: <payload>\n\n` frame. Results and the
//! no-flights notice are JSON objects; the end of the stream is the bare
//! word `END`.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{AirportCode, FlightLeg};

/// Payload of the final frame of every completed search.
pub const END_SENTINEL: &str = "END";

/// Message carried by the no-flights notice.
pub const NO_FLIGHTS_MESSAGE: &str = "No flights found matching your criteria";

/// One leg as shown to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegView {
    pub origin: AirportCode,
    pub origin_full: String,
    pub destination: AirportCode,
    pub destination_full: String,
    /// Local departure time, ISO-8601 without offset.
    pub departure_time: String,
    /// Local arrival time, ISO-8601 without offset.
    pub arrival_time: String,
    pub flight_number: String,
    /// Per-person price of this leg.
    pub price: f64,
    pub currency: String,
    /// Time in the air; 0 when the airports' timezones are unknown.
    pub duration_minutes: i64,
}

impl LegView {
    /// Show a leg as flown.
    pub fn from_leg(leg: &FlightLeg, duration_minutes: i64) -> Self {
        Self {
            origin: leg.origin,
            origin_full: leg.origin_full.clone(),
            destination: leg.destination,
            destination_full: leg.destination_full.clone(),
            departure_time: iso(leg.departure_time),
            arrival_time: iso(leg.arrival_time),
            flight_number: leg.flight_number.clone(),
            price: leg.price,
            currency: leg.currency.clone(),
            duration_minutes,
        }
    }

    /// Show a one-way leg reversed, as the display-only inbound half.
    ///
    /// Endpoints swap; times, flight number and price stay those of the
    /// outbound leg.
    pub fn mirrored(leg: &FlightLeg, duration_minutes: i64) -> Self {
        Self {
            origin: leg.destination,
            origin_full: leg.destination_full.clone(),
            destination: leg.origin,
            destination_full: leg.origin_full.clone(),
            ..Self::from_leg(leg, duration_minutes)
        }
    }
}

/// A matching itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEvent {
    pub outbound: LegView,
    pub inbound: Option<LegView>,
    /// Price for the whole party.
    pub total_price: f64,
}

/// Sent once, before the end sentinel, when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoFlightsEvent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: &'static str,
}

impl Default for NoFlightsEvent {
    fn default() -> Self {
        Self {
            kind: "NO_FLIGHTS",
            message: NO_FLIGHTS_MESSAGE,
        }
    }
}

fn iso(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S").to_string()
}
