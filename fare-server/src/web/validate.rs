//! Turning raw query parameters into a [`SearchRequest`].

use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::{
    AirportCode, Passengers, SearchRequest, StayWindow, TripType, ValidationError,
};

use super::dto::SearchFlightsParams;

/// Parse and validate search parameters.
///
/// `endDate`, `minDays` and `maxDays` are only required for trips with an
/// inbound leg; a one-way search without `endDate` covers `startDate` alone.
pub fn parse_search(params: &SearchFlightsParams) -> Result<SearchRequest, ValidationError> {
    let trip_type = required("tripType", &params.trip_type)?;
    let trip_type =
        TripType::from_str(trip_type).map_err(|e| ValidationError::InvalidTripType(e.0))?;

    let start = parse_date("startDate", required("startDate", &params.start_date)?)?;
    let max_price = parse_number::<f64>("maxPrice", required("maxPrice", &params.max_price)?)?;
    let origins = parse_origins(required("originAirports", &params.origin_airports)?)?;
    let wanted_countries = split_list(required("wantedCountries", &params.wanted_countries)?);
    let adults = parse_number::<u32>("adults", required("adults", &params.adults)?)?;

    let (end, stay) = if trip_type.is_return_family() {
        let end = parse_date("endDate", required("endDate", &params.end_date)?)?;
        let min_days = parse_number("minDays", required("minDays", &params.min_days)?)?;
        let max_days = parse_number("maxDays", required("maxDays", &params.max_days)?)?;
        (end, StayWindow::new(min_days, max_days))
    } else {
        let end = match optional(&params.end_date) {
            Some(s) => parse_date("endDate", s)?,
            None => start,
        };
        let min_days = optional_number("minDays", &params.min_days)?;
        let max_days = optional_number("maxDays", &params.max_days)?;
        (end, StayWindow::new(min_days, max_days))
    };

    let passengers = Passengers::new(
        adults,
        optional_number("teens", &params.teens)?,
        optional_number("children", &params.children)?,
    );

    let request = SearchRequest {
        trip_type,
        start,
        end,
        stay,
        origins,
        wanted_countries,
        passengers,
        max_price,
    };
    request.validate()?;
    Ok(request)
}

/// A present, non-blank parameter.
fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, ValidationError> {
    optional(value).ok_or(ValidationError::MissingField(field))
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    value.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn optional_number(field: &'static str, value: &Option<String>) -> Result<u32, ValidationError> {
    optional(value).map_or(Ok(0), |s| parse_number(field, s))
}

/// Split a comma-separated list, trimming entries and dropping blanks.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse origin codes in order, keeping only the first of any repeats.
fn parse_origins(value: &str) -> Result<Vec<AirportCode>, ValidationError> {
    let mut origins = Vec::new();
    for raw in split_list(value) {
        let code = AirportCode::parse(&raw).map_err(|_| ValidationError::InvalidAirportCode(raw))?;
        if !origins.contains(&code) {
            origins.push(code);
        }
    }
    Ok(origins)
}
