// Boundary-side construction of SearchRequest. The aggregator never re-validates.

use crate::error::ValidationError;
use crate::model::{Iata, SearchRequest};
use chrono::NaiveDate;
use serde::Deserialize;

pub const MIN_PASSENGERS: u32 = 1;
pub const MAX_PASSENGERS: u32 = 4;

impl SearchRequest {
    /// Builds a request, collecting every violated rule rather than stopping at the first.
    pub fn new(
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        passengers: u32,
    ) -> Result<Self, ValidationError> {
        let mut details = Vec::new();

        let origin_code = Iata::parse(origin);
        if origin_code.is_none() {
            details.push("IATA code for origin is invalid".to_string());
        }
        let destination_code = Iata::parse(destination);
        if destination_code.is_none() {
            details.push("IATA code for destination is invalid".to_string());
        }
        if origin == destination {
            details.push("Destination must be different than the origin".to_string());
        }
        if return_date < departure_date {
            details.push("Return date cannot be before departure date".to_string());
        }
        if passengers < MIN_PASSENGERS {
            details.push("There must be at least one passenger".to_string());
        }
        if passengers > MAX_PASSENGERS {
            details.push(format!("There may be maximum {MAX_PASSENGERS} passengers"));
        }

        match (origin_code, destination_code) {
            (Some(origin), Some(destination)) if details.is_empty() => Ok(Self {
                origin,
                destination,
                departure_date,
                return_date,
                passengers: passengers as u8,
            }),
            _ => Err(ValidationError::Invalid { details }),
        }
    }
}

/// Raw inbound search parameters, as a transport layer would decode them.
/// Every field is optional so an absent one can be reported by name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub number_of_passengers: Option<u32>,
}

impl TryFrom<SearchQuery> for SearchRequest {
    type Error = ValidationError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let mut require = |value: Option<String>, field: &str| {
            if value.is_none() {
                missing.push(format!("Missing request body parameter: {field}"));
            }
            value
        };
        let origin = require(query.origin, "origin");
        let destination = require(query.destination, "destination");
        let departure_date = require(query.departure_date, "departureDate");
        let return_date = require(query.return_date, "returnDate");
        if query.number_of_passengers.is_none() {
            missing.push("Missing request body parameter: numberOfPassengers".to_string());
        }

        match (
            origin,
            destination,
            departure_date,
            return_date,
            query.number_of_passengers,
        ) {
            (
                Some(origin),
                Some(destination),
                Some(departure),
                Some(return_date),
                Some(passengers),
            ) => {
                let departure = parse_date(&departure, "departureDate")?;
                let return_date = parse_date(&return_date, "returnDate")?;
                SearchRequest::new(&origin, &destination, departure, return_date, passengers)
            }
            _ => Err(ValidationError::Invalid { details: missing }),
        }
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::Invalid {
        details: vec![format!("Invalid format for parameter: {field}")],
    })
}
