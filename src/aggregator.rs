// Fan-out/fan-in search across every registered supplier

use crate::config::AggregatorConfig;
use crate::error::{ConfigError, SupplierError};
use crate::model::{FlightOffer, SearchRequest};
use crate::registry::SupplierRegistry;
use crate::supplier::FlightSupplier;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// What a single supplier contributed to one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplierOutcome {
    Succeeded {
        supplier: String,
        offers: usize,
        elapsed: Duration,
    },
    Failed {
        supplier: String,
        error: String,
    },
    TimedOut {
        supplier: String,
        after: Duration,
    },
}

impl SupplierOutcome {
    pub fn supplier(&self) -> &str {
        match self {
            SupplierOutcome::Succeeded { supplier, .. }
            | SupplierOutcome::Failed { supplier, .. }
            | SupplierOutcome::TimedOut { supplier, .. } => supplier,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SupplierOutcome::Succeeded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct AggregatedSearch {
    /// Every successful supplier's offers, ascending by fare.
    pub offers: Vec<FlightOffer>,
    /// One entry per registered supplier, in registry order.
    pub outcomes: Vec<SupplierOutcome>,
}

pub struct FlightAggregator {
    registry: SupplierRegistry,
    supplier_timeout: Duration,
}

impl FlightAggregator {
    pub fn new(registry: SupplierRegistry, supplier_timeout: Duration) -> Self {
        Self {
            registry,
            supplier_timeout,
        }
    }

    pub fn from_config(config: &AggregatorConfig) -> Result<Self, ConfigError> {
        let registry = SupplierRegistry::from_config(config)?;
        Ok(Self::new(registry, config.supplier_timeout()))
    }

    pub fn registry(&self) -> &SupplierRegistry {
        &self.registry
    }

    /// Searches all suppliers and returns their merged offers sorted by fare.
    /// Supplier failures and timeouts contribute nothing; this never fails.
    pub async fn search(&self, request: &SearchRequest) -> Vec<FlightOffer> {
        self.search_with_report(request).await.offers
    }

    /// Like [`search`](Self::search), with one outcome per supplier. Dropping
    /// the returned future aborts every supplier call still in flight.
    pub async fn search_with_report(&self, request: &SearchRequest) -> AggregatedSearch {
        let request = Arc::new(request.clone());
        let suppliers = self.registry.suppliers();

        let mut tasks = JoinSet::new();
        for (index, supplier) in suppliers.iter().enumerate() {
            let call = dispatch(
                Arc::clone(supplier),
                Arc::clone(&request),
                self.supplier_timeout,
            );
            tasks.spawn(async move { (index, AssertUnwindSafe(call).catch_unwind().await) });
        }

        let mut slots: Vec<Option<Contribution>> = suppliers.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(contribution))) => slots[index] = Some(contribution),
                Ok((index, Err(payload))) => {
                    let supplier = suppliers[index].name().to_string();
                    let error = panic_message(payload.as_ref());
                    tracing::warn!(supplier = %supplier, error = %error, "supplier search panicked");
                    slots[index] = Some((SupplierOutcome::Failed { supplier, error }, Vec::new()));
                }
                Err(join_error) => {
                    tracing::warn!(error = %join_error, "supplier task aborted");
                }
            }
        }

        let (outcomes, batches): (Vec<_>, Vec<_>) = slots
            .into_iter()
            .zip(suppliers)
            .map(|(slot, supplier)| {
                slot.unwrap_or_else(|| {
                    let outcome = SupplierOutcome::Failed {
                        supplier: supplier.name().to_string(),
                        error: "supplier task aborted".to_string(),
                    };
                    (outcome, Vec::new())
                })
            })
            .unzip();
        let offers = merge_by_fare(batches);

        tracing::info!(
            origin = %request.origin(),
            destination = %request.destination(),
            suppliers = outcomes.len(),
            failed = outcomes.iter().filter(|o| !o.is_success()).count(),
            offers = offers.len(),
            "flight search completed"
        );

        AggregatedSearch { offers, outcomes }
    }
}

type Contribution = (SupplierOutcome, Vec<FlightOffer>);

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("supplier panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("supplier panicked: {message}")
    } else {
        "supplier panicked".to_string()
    }
}

// Runs one supplier call and converts any failure into an empty contribution
async fn dispatch(
    supplier: Arc<dyn FlightSupplier>,
    request: Arc<SearchRequest>,
    timeout: Duration,
) -> Contribution {
    let name = supplier.name().to_string();
    tracing::debug!(supplier = %name, "dispatching search");

    let started = Instant::now();
    let result = tokio::time::timeout(timeout, supplier.search_flights(&request))
        .await
        .unwrap_or_else(|_| Err(SupplierError::Timeout(timeout)));
    let elapsed = started.elapsed();

    match result {
        Ok(offers) => {
            tracing::info!(
                supplier = %name,
                offers = offers.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "supplier search succeeded"
            );
            let outcome = SupplierOutcome::Succeeded {
                supplier: name,
                offers: offers.len(),
                elapsed,
            };
            (outcome, offers)
        }
        Err(SupplierError::Timeout(after)) => {
            tracing::warn!(supplier = %name, timeout_ms = after.as_millis() as u64, "supplier search timed out");
            (SupplierOutcome::TimedOut { supplier: name, after }, Vec::new())
        }
        Err(error) => {
            tracing::warn!(supplier = %name, error = %error, "supplier search failed");
            let outcome = SupplierOutcome::Failed {
                supplier: name,
                error: error.to_string(),
            };
            (outcome, Vec::new())
        }
    }
}

/// Concatenates per-supplier batches and sorts by fare ascending. The sort is
/// stable, so equal fares keep batch order and then in-batch order.
pub fn merge_by_fare(batches: Vec<Vec<FlightOffer>>) -> Vec<FlightOffer> {
    let mut offers: Vec<FlightOffer> = batches.into_iter().flatten().collect();
    offers.sort_by(|a, b| a.fare.cmp(&b.fare));
    offers
}
