// Supplier adapters: one implementation of FlightSupplier per upstream API

pub mod crazy_air;
pub mod tough_jet;

use crate::error::SupplierError;
use crate::model::{FlightOffer, SearchRequest};
use async_trait::async_trait;

pub use crazy_air::CrazyAirSupplier;
pub use tough_jet::ToughJetSupplier;

/// Searches one supplier for offers matching an already validated request.
///
/// Implementations translate the request to their wire format, perform the
/// remote call and map every returned record to a [`FlightOffer`]. Failures
/// are returned, not swallowed; isolating them is the aggregator's job.
#[async_trait]
pub trait FlightSupplier: Send + Sync + 'static {
    fn name(&self) -> &str;

    async fn search_flights(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<FlightOffer>, SupplierError>;
}
