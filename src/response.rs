// Presentation shape handed to whatever transport serves the results

use crate::model::FlightOffer;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSearchResponse {
    pub flights: Vec<FlightView>,
}

// Instants are rendered as naive UTC timestamps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightView {
    pub airline: String,
    pub supplier: String,
    pub fare: Decimal,
    pub departure_airport_code: String,
    pub destination_airport_code: String,
    pub departure_date: NaiveDateTime,
    pub arrival_date: NaiveDateTime,
}

impl From<FlightOffer> for FlightView {
    fn from(offer: FlightOffer) -> Self {
        Self {
            airline: offer.airline,
            supplier: offer.supplier,
            fare: offer.fare,
            departure_airport_code: offer.departure_airport_code,
            destination_airport_code: offer.destination_airport_code,
            departure_date: offer.departure_date.naive_utc(),
            arrival_date: offer.arrival_date.naive_utc(),
        }
    }
}

impl From<Vec<FlightOffer>> for FlightSearchResponse {
    fn from(offers: Vec<FlightOffer>) -> Self {
        Self {
            flights: offers.into_iter().map(FlightView::from).collect(),
        }
    }
}
