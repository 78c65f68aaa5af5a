use super::FlightSupplier;
use crate::client::{decode_records, SupplierTransport};
use crate::error::SupplierError;
use crate::model::{FlightOffer, SearchRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

pub const TOUGH_JET_SUPPLIER: &str = "ToughJet";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToughJetFlight {
    carrier: String,
    base_price: Decimal,
    tax: Decimal,
    // Percentage in [0, 100]
    discount: Decimal,
    departure_airport_name: String,
    arrival_airport_name: String,
    outbound_date_time: DateTime<Utc>,
    inbound_date_time: DateTime<Utc>,
}

/// Fare for a ToughJet record: the discount applies to the tax-inclusive total.
/// Negative amounts, a discount outside [0, 100] and arithmetic overflow are
/// rejected as invalid records.
pub fn tough_jet_fare(
    base_price: Decimal,
    tax: Decimal,
    discount_percent: Decimal,
) -> Result<Decimal, SupplierError> {
    if base_price.is_sign_negative() || tax.is_sign_negative() {
        return Err(SupplierError::InvalidRecord(format!(
            "negative amount: basePrice {base_price}, tax {tax}"
        )));
    }
    if discount_percent.is_sign_negative() || discount_percent > Decimal::ONE_HUNDRED {
        return Err(SupplierError::InvalidRecord(format!(
            "discount {discount_percent} outside [0, 100]"
        )));
    }

    let overflow = || SupplierError::InvalidRecord("fare out of range".to_string());
    let full_price = base_price.checked_add(tax).ok_or_else(overflow)?;
    let discount_amount = discount_percent
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|ratio| full_price.checked_mul(ratio))
        .ok_or_else(overflow)?;
    full_price.checked_sub(discount_amount).ok_or_else(overflow)
}

impl TryFrom<ToughJetFlight> for FlightOffer {
    type Error = SupplierError;

    fn try_from(flight: ToughJetFlight) -> Result<Self, Self::Error> {
        Ok(FlightOffer {
            airline: flight.carrier,
            supplier: TOUGH_JET_SUPPLIER.to_string(),
            fare: tough_jet_fare(flight.base_price, flight.tax, flight.discount)?,
            departure_airport_code: flight.departure_airport_name,
            destination_airport_code: flight.arrival_airport_name,
            departure_date: flight.outbound_date_time,
            arrival_date: flight.inbound_date_time,
        })
    }
}

fn tough_jet_query(request: &SearchRequest) -> [(&'static str, String); 5] {
    [
        ("from", request.origin().to_string()),
        ("to", request.destination().to_string()),
        ("outboundDate", request.departure_date().to_string()),
        ("inboundDate", request.return_date().to_string()),
        ("numberOfAdults", request.passengers().to_string()),
    ]
}

/// Adapter for ToughJet, which quotes base price, tax and a percentage discount.
pub struct ToughJetSupplier {
    base_url: String,
    transport: Arc<dyn SupplierTransport>,
}

impl ToughJetSupplier {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn SupplierTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }
}

#[async_trait]
impl FlightSupplier for ToughJetSupplier {
    fn name(&self) -> &str {
        TOUGH_JET_SUPPLIER
    }

    async fn search_flights(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<FlightOffer>, SupplierError> {
        let body = self
            .transport
            .get(&self.base_url, &tough_jet_query(request))
            .await?;
        let flights: Vec<ToughJetFlight> = decode_records(&body)?;
        flights.into_iter().map(FlightOffer::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::stub::StubTransport;
    use chrono::NaiveDate;
    use test_case::test_case;

    const URL: &str = "http://localhost:8095/toughjet/search";

    fn request() -> SearchRequest {
        SearchRequest::new(
            "LHR",
            "AMS",
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
            2,
        )
        .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test_case("300", "50", "10", "315" ; "discount applies to tax inclusive total")]
    #[test_case("400", "50", "10", "405" ; "second fixture")]
    #[test_case("120", "30", "0", "150" ; "no discount")]
    #[test_case("120", "30", "100", "0" ; "full discount")]
    #[test_case("99.99", "10.01", "12.5", "96.25" ; "fractional amounts")]
    fn test_tough_jet_fare(base: &str, tax: &str, discount: &str, expected: &str) {
        let fare = tough_jet_fare(dec(base), dec(tax), dec(discount)).unwrap();
        assert_eq!(fare, dec(expected));
    }

    #[test_case("300", "50", "150" ; "discount above one hundred")]
    #[test_case("300", "50", "-5" ; "negative discount")]
    #[test_case("-300", "50", "10" ; "negative base price")]
    #[test_case("300", "-50", "10" ; "negative tax")]
    #[test_case("79228162514264337593543950335", "1", "0" ; "sum overflows")]
    fn test_tough_jet_fare_rejects(base: &str, tax: &str, discount: &str) {
        let result = tough_jet_fare(dec(base), dec(tax), dec(discount));
        assert!(matches!(result, Err(SupplierError::InvalidRecord(_))));
    }

    #[test]
    fn test_fare_is_not_base_only_discount() {
        // Discounting just the base price would give 320
        let fare = tough_jet_fare(dec("300"), dec("50"), dec("10")).unwrap();
        assert_ne!(fare, dec("320"));
    }

    #[tokio::test]
    async fn test_search_returns_error_for_unrepresentable_fare() {
        let body = r#"[{
            "carrier": "ToughJet",
            "basePrice": "79228162514264337593543950335",
            "tax": "1",
            "discount": "0",
            "departureAirportName": "LHR",
            "arrivalAirportName": "AMS",
            "outboundDateTime": "2022-01-01T10:00:00Z",
            "inboundDateTime": "2022-01-01T12:00:00Z"
        }]"#;
        let supplier = ToughJetSupplier::new(URL, Arc::new(StubTransport::returning(body)));

        let result = supplier.search_flights(&request()).await;
        assert!(matches!(result, Err(SupplierError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_discount_above_one_hundred() {
        let body = r#"[{
            "carrier": "ToughJet",
            "basePrice": 100,
            "tax": 20,
            "discount": 150,
            "departureAirportName": "LHR",
            "arrivalAirportName": "AMS",
            "outboundDateTime": "2022-01-01T10:00:00Z",
            "inboundDateTime": "2022-01-01T12:00:00Z"
        }]"#;
        let supplier = ToughJetSupplier::new(URL, Arc::new(StubTransport::returning(body)));

        let result = supplier.search_flights(&request()).await;
        assert!(matches!(result, Err(SupplierError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_search_maps_flights() {
        let body = r#"[
            {
                "carrier": "ToughJet",
                "basePrice": 300.0,
                "tax": 50.0,
                "discount": 10.0,
                "departureAirportName": "LHR",
                "arrivalAirportName": "AMS",
                "outboundDateTime": "2022-01-01T10:00:00Z",
                "inboundDateTime": "2022-01-01T12:00:00Z"
            },
            {
                "carrier": "ToughJet",
                "basePrice": 400.0,
                "tax": 50.0,
                "discount": 10.0,
                "departureAirportName": "LHR",
                "arrivalAirportName": "AMS",
                "outboundDateTime": "2022-01-01T14:00:00Z",
                "inboundDateTime": "2022-01-01T16:00:00Z"
            }
        ]"#;
        let transport = Arc::new(StubTransport::returning(body));
        let supplier = ToughJetSupplier::new(URL, transport.clone());

        let offers = supplier.search_flights(&request()).await.unwrap();

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].airline, "ToughJet");
        assert_eq!(offers[0].supplier, TOUGH_JET_SUPPLIER);
        assert_eq!(offers[0].fare, dec("315.0"));
        assert_eq!(offers[0].departure_airport_code, "LHR");
        assert_eq!(offers[0].destination_airport_code, "AMS");
        assert_eq!(
            offers[0].departure_date,
            "2022-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(
            offers[0].arrival_date,
            "2022-01-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(offers[1].fare, dec("405.0"));

        assert_eq!(transport.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_search_sends_tough_jet_parameters() {
        let transport = Arc::new(StubTransport::returning("[]"));
        let supplier = ToughJetSupplier::new(URL, transport.clone());

        let offers = supplier.search_flights(&request()).await.unwrap();
        assert!(offers.is_empty());

        let query = transport.last_query();
        let params: Vec<(&str, &str)> = query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![
                ("from", "LHR"),
                ("to", "AMS"),
                ("outboundDate", "2022-01-01"),
                ("inboundDate", "2022-01-10"),
                ("numberOfAdults", "2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_offset_instants_are_normalized() {
        let body = r#"[{
            "carrier": "ToughJet",
            "basePrice": 100,
            "tax": 20,
            "discount": 0,
            "departureAirportName": "LHR",
            "arrivalAirportName": "AMS",
            "outboundDateTime": "2022-01-01T11:00:00+01:00",
            "inboundDateTime": "2022-01-01T14:30:00+01:00"
        }]"#;
        let supplier = ToughJetSupplier::new(URL, Arc::new(StubTransport::returning(body)));

        let offers = supplier.search_flights(&request()).await.unwrap();
        assert_eq!(
            offers[0].departure_date,
            "2022-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(offers[0].fare, dec("120"));
    }

    #[tokio::test]
    async fn test_search_propagates_malformed_body() {
        let supplier =
            ToughJetSupplier::new(URL, Arc::new(StubTransport::returning("not json")));
        let result = supplier.search_flights(&request()).await;
        assert!(matches!(result, Err(SupplierError::Decode(_))));
    }
}
