//! Conversion from fare API DTOs to domain types.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::domain::{AirportCode, FlightLeg, Itinerary};

use super::types::{FareDto, FaresResponse, LegDto};

/// A fare that could not be turned into a domain itinerary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid airport code: {0}")]
    InvalidAirport(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("no price for flight {0}")]
    MissingPrice(String),
}

/// Convert one leg.
pub fn convert_leg(dto: &LegDto) -> Result<FlightLeg, ConversionError> {
    let origin = parse_code(&dto.departure_airport.iata_code)?;
    let destination = parse_code(&dto.arrival_airport.iata_code)?;
    let price = dto
        .price
        .as_ref()
        .ok_or_else(|| ConversionError::MissingPrice(dto.flight_number.clone()))?;

    Ok(FlightLeg {
        departure_time: parse_timestamp(&dto.departure_date)?,
        arrival_time: parse_timestamp(&dto.arrival_date)?,
        flight_number: dto.flight_number.clone(),
        price: price.value,
        currency: price.currency_code.clone(),
        origin,
        origin_full: dto.departure_airport.full_name(),
        destination,
        destination_full: dto.arrival_airport.full_name(),
    })
}

/// Convert one fare.
///
/// A fare with an inbound leg becomes a return itinerary priced by its
/// summary, falling back to the sum of the legs when no summary is given.
pub fn convert_fare(dto: &FareDto) -> Result<Itinerary, ConversionError> {
    let outbound = convert_leg(&dto.outbound)?;

    let Some(inbound) = &dto.inbound else {
        return Ok(Itinerary::OneWay(outbound));
    };
    let inbound = convert_leg(inbound)?;

    let price = dto
        .summary
        .as_ref()
        .and_then(|s| s.price.as_ref())
        .map(|p| p.value)
        .unwrap_or(outbound.price + inbound.price);

    Ok(Itinerary::Return {
        outbound,
        inbound,
        price,
    })
}

/// Convert a whole response, dropping fares that fail to convert.
pub fn convert_fares(response: &FaresResponse) -> Vec<Itinerary> {
    response
        .fares
        .iter()
        .filter_map(|fare| match convert_fare(fare) {
            Ok(itinerary) => Some(itinerary),
            Err(e) => {
                warn!(flight = %fare.outbound.flight_number, error = %e, "Dropping unusable fare");
                None
            }
        })
        .collect()
}

fn parse_code(s: &str) -> Result<AirportCode, ConversionError> {
    AirportCode::parse(s).map_err(|_| ConversionError::InvalidAirport(s.to_string()))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ConversionError> {
    s.parse::<NaiveDateTime>()
        .map_err(|_| ConversionError::InvalidTimestamp(s.to_string()))
}
