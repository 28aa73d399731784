//! Suppression of one-way flights surfaced by overlapping query windows.

use std::collections::HashSet;

use crate::domain::{DedupKey, Itinerary};

/// Seen-set of one-way flight keys, scoped to a single search run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<DedupKey>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time a key is offered, false afterwards.
    ///
    /// Return itineraries are always admitted; they are not deduplicated.
    pub fn admit(&mut self, candidate: &Itinerary) -> bool {
        match candidate {
            Itinerary::OneWay(leg) => self.seen.insert(leg.dedup_key()),
            Itinerary::Return { .. } => true,
        }
    }

    /// Number of distinct one-way flights admitted so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AirportCode, FlightLeg};
    use chrono::NaiveDate;

    fn leg(to: &str, day: u32, hour: u32, price: f64) -> FlightLeg {
        let when = NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        FlightLeg {
            departure_time: when,
            arrival_time: when,
            flight_number: "FR1".to_string(),
            price,
            currency: "EUR".to_string(),
            origin: AirportCode::parse("DUB").unwrap(),
            origin_full: "Dublin, Ireland".to_string(),
            destination: AirportCode::parse(to).unwrap(),
            destination_full: "Somewhere, Spain".to_string(),
        }
    }

    #[test]
    fn admits_each_key_once() {
        let mut dedup = Deduplicator::new();
        let flight = Itinerary::OneWay(leg("BCN", 1, 8, 30.0));

        assert!(dedup.admit(&flight));
        assert!(!dedup.admit(&flight));
        assert!(!dedup.admit(&Itinerary::OneWay(leg("BCN", 1, 8, 25.0))));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn different_keys_are_independent() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit(&Itinerary::OneWay(leg("BCN", 1, 8, 30.0))));
        assert!(dedup.admit(&Itinerary::OneWay(leg("BCN", 1, 9, 30.0))));
        assert!(dedup.admit(&Itinerary::OneWay(leg("MAD", 1, 8, 30.0))));
        assert!(dedup.admit(&Itinerary::OneWay(leg("BCN", 2, 8, 30.0))));
        assert_eq!(dedup.len(), 4);
    }

    #[test]
    fn return_trips_pass_through() {
        let mut dedup = Deduplicator::new();
        let trip = Itinerary::Return {
            outbound: leg("BCN", 1, 8, 30.0),
            inbound: leg("BCN", 3, 8, 30.0),
            price: 60.0,
        };
        assert!(dedup.admit(&trip));
        assert!(dedup.admit(&trip));
        assert!(dedup.is_empty());
    }
}
