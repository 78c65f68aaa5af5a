// Round-trip flight search aggregated across independent suppliers

pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod response;
pub mod supplier;
pub mod validation;

// Re-export key types for convenience
pub use aggregator::{merge_by_fare, AggregatedSearch, FlightAggregator, SupplierOutcome};
pub use client::{HttpTransport, SupplierTransport};
pub use config::AggregatorConfig;
pub use error::{ConfigError, SupplierError, ValidationError};
pub use model::{FlightOffer, Iata, SearchRequest};
pub use registry::SupplierRegistry;
pub use response::{FlightSearchResponse, FlightView};
pub use supplier::{CrazyAirSupplier, FlightSupplier, ToughJetSupplier};
pub use validation::SearchQuery;
