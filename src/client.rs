// Outbound HTTP plumbing shared by the supplier adapters

use crate::config::AggregatorConfig;
use crate::error::{ConfigError, SupplierError};
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Issues one GET-style query against a supplier endpoint and hands back the raw body.
#[async_trait]
pub trait SupplierTransport: Send + Sync + 'static {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Bytes, SupplierError>;
}

// Pooled reqwest client; cheap to clone and safe to share across adapters
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &AggregatorConfig) -> Result<Self, ConfigError> {
        let timeout = config.supplier_timeout();
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InitError(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    /// Wraps an existing client; `timeout` must match the one it was built with.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    // Client-side timeouts are reported as such, not as transport failures
    fn classify(&self, err: reqwest::Error) -> SupplierError {
        if err.is_timeout() {
            SupplierError::Timeout(self.timeout)
        } else {
            SupplierError::from(err)
        }
    }
}

#[async_trait]
impl SupplierTransport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Bytes, SupplierError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SupplierError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        response.bytes().await.map_err(|e| self.classify(e))
    }
}

/// Decodes a supplier body that should be a JSON array of records. A `null`
/// body counts as no records.
pub fn decode_records<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, SupplierError> {
    let records: Option<Vec<T>> = serde_json::from_slice(body)?;
    Ok(records.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use parking_lot::Mutex;

    // Canned transport recording every query it receives
    pub struct StubTransport {
        response: Result<&'static str, u16>,
        pub calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl StubTransport {
        pub fn returning(body: &'static str) -> Self {
            Self {
                response: Ok(body),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status_code: u16) -> Self {
            Self {
                response: Err(status_code),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn last_query(&self) -> Vec<(String, String)> {
            self.calls
                .lock()
                .last()
                .map(|(_, query)| query.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl SupplierTransport for StubTransport {
        async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Bytes, SupplierError> {
            self.calls.lock().push((
                url.to_string(),
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            match self.response {
                Ok(body) => Ok(Bytes::from_static(body.as_bytes())),
                Err(status_code) => Err(SupplierError::Status {
                    status_code,
                    message: "Internal Server Error".to_string(),
                }),
            }
        }
    }
}
