use super::FlightSupplier;
use crate::client::{decode_records, SupplierTransport};
use crate::error::SupplierError;
use crate::model::{FlightOffer, SearchRequest};
use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

pub const CRAZY_AIR_SUPPLIER: &str = "CrazyAir";

// Wire record; timestamps are naive and assumed UTC
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrazyAirFlight {
    airline: String,
    price: Decimal,
    #[allow(dead_code)]
    #[serde(rename = "cabinclass")]
    cabin_class: String,
    departure_airport_code: String,
    destination_airport_code: String,
    departure_date: NaiveDateTime,
    arrival_date: NaiveDateTime,
}

#[derive(Debug, PartialEq)]
struct CrazyAirRequest {
    origin: String,
    destination: String,
    departure_date: String,
    return_date: String,
    passenger_count: String,
}

impl CrazyAirRequest {
    fn from_search(request: &SearchRequest) -> Self {
        Self {
            origin: request.origin().to_string(),
            destination: request.destination().to_string(),
            departure_date: request.departure_date().format("%Y-%m-%d").to_string(),
            return_date: request.return_date().format("%Y-%m-%d").to_string(),
            passenger_count: request.passengers().to_string(),
        }
    }

    fn into_query(self) -> [(&'static str, String); 5] {
        [
            ("origin", self.origin),
            ("destination", self.destination),
            ("departureDate", self.departure_date),
            ("returnDate", self.return_date),
            ("passengerCount", self.passenger_count),
        ]
    }
}

impl TryFrom<CrazyAirFlight> for FlightOffer {
    type Error = SupplierError;

    fn try_from(flight: CrazyAirFlight) -> Result<Self, Self::Error> {
        if flight.price.is_sign_negative() {
            return Err(SupplierError::InvalidRecord(format!(
                "negative price {}",
                flight.price
            )));
        }
        Ok(FlightOffer {
            airline: flight.airline,
            supplier: CRAZY_AIR_SUPPLIER.to_string(),
            fare: flight.price,
            departure_airport_code: flight.departure_airport_code,
            destination_airport_code: flight.destination_airport_code,
            departure_date: Utc.from_utc_datetime(&flight.departure_date),
            arrival_date: Utc.from_utc_datetime(&flight.arrival_date),
        })
    }
}

/// Adapter for CrazyAir, which quotes a single all-inclusive price.
pub struct CrazyAirSupplier {
    base_url: String,
    transport: Arc<dyn SupplierTransport>,
}

impl CrazyAirSupplier {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn SupplierTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }
}

#[async_trait]
impl FlightSupplier for CrazyAirSupplier {
    fn name(&self) -> &str {
        CRAZY_AIR_SUPPLIER
    }

    async fn search_flights(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<FlightOffer>, SupplierError> {
        let query = CrazyAirRequest::from_search(request).into_query();
        let body = self.transport.get(&self.base_url, &query).await?;
        let flights: Vec<CrazyAirFlight> = decode_records(&body)?;
        flights.into_iter().map(FlightOffer::try_from).collect()
    }
}
