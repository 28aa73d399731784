//! Flight legs and the itineraries built from them.

use chrono::NaiveDateTime;

use super::AirportCode;

/// One directional flight as offered by the fare source.
///
/// Timestamps are local to the airport they refer to; the fare API does not
/// carry offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightLeg {
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub flight_number: String,
    /// Price for one passenger.
    pub price: f64,
    pub currency: String,
    pub origin: AirportCode,
    /// Display name, e.g. "Dublin, Ireland".
    pub origin_full: String,
    pub destination: AirportCode,
    /// Display name, e.g. "Barcelona, Spain".
    pub destination_full: String,
}

/// Identity of a one-way flight across overlapping query windows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub departure_time: NaiveDateTime,
}

impl FlightLeg {
    /// The key identifying this leg regardless of which query surfaced it.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            origin: self.origin,
            destination: self.destination,
            departure_time: self.departure_time,
        }
    }
}

/// A candidate trip considered as a unit for filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum Itinerary {
    /// A single leg.
    OneWay(FlightLeg),
    /// An outbound and inbound pair with its combined per-person price.
    Return {
        outbound: FlightLeg,
        inbound: FlightLeg,
        price: f64,
    },
}

impl Itinerary {
    /// The leg leaving the origin.
    pub fn outbound(&self) -> &FlightLeg {
        match self {
            Itinerary::OneWay(leg) => leg,
            Itinerary::Return { outbound, .. } => outbound,
        }
    }

    /// The leg coming back, if this is a return trip.
    pub fn inbound(&self) -> Option<&FlightLeg> {
        match self {
            Itinerary::OneWay(_) => None,
            Itinerary::Return { inbound, .. } => Some(inbound),
        }
    }

    /// Price for one passenger.
    pub fn per_person_price(&self) -> f64 {
        match self {
            Itinerary::OneWay(leg) => leg.price,
            Itinerary::Return { price, .. } => *price,
        }
    }

    /// Price for the whole party.
    pub fn total_price(&self, passengers: u32) -> f64 {
        self.per_person_price() * f64::from(passengers)
    }
}
