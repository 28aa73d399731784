//! Fare finder API response DTOs.
//!
//! These types map directly to the JSON returned by the `oneWayFares` and
//! `roundTripFares` endpoints. Fields the search never reads are left out;
//! serde ignores them.

use serde::{Deserialize, Serialize};

/// Top-level response of both fare endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaresResponse {
    /// Cheapest fares found, one per destination and date.
    #[serde(default)]
    pub fares: Vec<FareDto>,
}

/// One fare: a single leg, or an outbound/inbound pair.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareDto {
    pub outbound: LegDto,

    /// Present only on round-trip fares.
    pub inbound: Option<LegDto>,

    /// Combined price for round trips.
    pub summary: Option<SummaryDto>,
}

/// Fare summary block.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub price: Option<PriceDto>,
}

/// A single flight.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    pub departure_airport: AirportDto,
    pub arrival_airport: AirportDto,

    /// Local departure time, e.g. "2024-06-01T06:25:00".
    pub departure_date: String,

    /// Local arrival time.
    pub arrival_date: String,

    /// Per-person price; absent when the flight is sold out.
    pub price: Option<PriceDto>,

    pub flight_number: String,
}

/// Airport details embedded in a leg.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportDto {
    pub iata_code: String,
    pub name: String,
    pub country_name: String,
}

impl AirportDto {
    /// Display name in "{airport}, {country}" form.
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.name, self.country_name)
    }
}

/// A price in some currency.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDto {
    pub value: f64,
    pub currency_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_WAY: &str = r#"{
        "arrivalAirportCategories": null,
        "fares": [{
            "outbound": {
                "departureAirport": {"countryName": "Ireland", "iataCode": "DUB", "name": "Dublin", "seoName": "dublin", "city": {"name": "Dublin", "code": "DUBLIN", "countryCode": "ie"}},
                "arrivalAirport": {"countryName": "Spain", "iataCode": "BCN", "name": "Barcelona", "seoName": "barcelona", "city": {"name": "Barcelona", "code": "BARCELONA", "countryCode": "es"}},
                "departureDate": "2024-06-01T06:25:00",
                "arrivalDate": "2024-06-01T09:55:00",
                "price": {"value": 29.99, "valueMainUnit": "29", "valueFractionalUnit": "99", "currencyCode": "EUR", "currencySymbol": "€"},
                "flightKey": "FR~6388~ ~~DUB~06/01/2024 06:25~BCN~06/01/2024 09:55~~",
                "flightNumber": "FR6388",
                "previousPrice": null,
                "priceUpdated": 1717000000000
            },
            "summary": {"price": {"value": 29.99, "currencyCode": "EUR"}, "previousPrice": null, "newRoute": false},
            "inbound": null
        }],
        "nextPage": null,
        "size": 1
    }"#;

    #[test]
    fn parse_one_way_response() {
        let response: FaresResponse = serde_json::from_str(ONE_WAY).unwrap();

        assert_eq!(response.fares.len(), 1);
        let fare = &response.fares[0];
        assert!(fare.inbound.is_none());
        assert_eq!(fare.outbound.flight_number, "FR6388");
        assert_eq!(fare.outbound.arrival_airport.full_name(), "Barcelona, Spain");
        assert_eq!(fare.outbound.price.as_ref().unwrap().value, 29.99);
    }

    #[test]
    fn missing_fares_is_empty() {
        let response: FaresResponse = serde_json::from_str("{}").unwrap();
        assert!(response.fares.is_empty());
    }
}
