// Canonical, supplier-agnostic search and offer types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-letter uppercase airport code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iata(String);

impl Iata {
    pub fn parse(code: &str) -> Option<Self> {
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Some(Self(code.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Iata {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Iata::parse(&value).ok_or_else(|| format!("invalid IATA code: {value}"))
    }
}

impl From<Iata> for String {
    fn from(code: Iata) -> Self {
        code.0
    }
}

impl fmt::Display for Iata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated round-trip search. Only constructible through
/// [`SearchRequest::new`], so every holder may assume the invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub(crate) origin: Iata,
    pub(crate) destination: Iata,
    pub(crate) departure_date: NaiveDate,
    pub(crate) return_date: NaiveDate,
    pub(crate) passengers: u8,
}

impl SearchRequest {
    pub fn origin(&self) -> &Iata {
        &self.origin
    }

    pub fn destination(&self) -> &Iata {
        &self.destination
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn return_date(&self) -> NaiveDate {
        self.return_date
    }

    pub fn passengers(&self) -> u8 {
        self.passengers
    }
}

// One priced offer as produced by a supplier adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub airline: String,
    pub supplier: String,
    pub fare: Decimal,
    pub departure_airport_code: String,
    pub destination_airport_code: String,
    pub departure_date: DateTime<Utc>,
    pub arrival_date: DateTime<Utc>,
}
