use crate::client::{HttpTransport, SupplierTransport};
use crate::config::AggregatorConfig;
use crate::error::ConfigError;
use crate::supplier::{CrazyAirSupplier, FlightSupplier, ToughJetSupplier};
use std::sync::Arc;

/// Ordered set of configured suppliers. Registration order is the tie-break
/// order for equal fares.
#[derive(Clone, Default)]
pub struct SupplierRegistry {
    suppliers: Vec<Arc<dyn FlightSupplier>>,
}

impl SupplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every supplier the configuration knows about, sharing one
    /// pooled HTTP client between them.
    pub fn from_config(config: &AggregatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport: Arc<dyn SupplierTransport> = Arc::new(HttpTransport::new(config)?);
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport(config: &AggregatorConfig, transport: Arc<dyn SupplierTransport>) -> Self {
        Self::new()
            .with_supplier(CrazyAirSupplier::new(
                config.crazy_air_url.clone(),
                transport.clone(),
            ))
            .with_supplier(ToughJetSupplier::new(config.tough_jet_url.clone(), transport))
    }

    pub fn with_supplier(mut self, supplier: impl FlightSupplier) -> Self {
        self.suppliers.push(Arc::new(supplier));
        self
    }

    pub fn register(&mut self, supplier: Arc<dyn FlightSupplier>) {
        self.suppliers.push(supplier);
    }

    pub fn suppliers(&self) -> &[Arc<dyn FlightSupplier>] {
        &self.suppliers
    }

    pub fn names(&self) -> Vec<&str> {
        self.suppliers.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }
}

impl std::fmt::Debug for SupplierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplierRegistry")
            .field("suppliers", &self.names())
            .finish()
    }
}
