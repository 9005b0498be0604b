//! Motorcycle data provider client
//!
//! Thin reqwest client for the external motorcycle specification API.
//! Stateless and idempotent per query; the retry policy lives one layer up
//! in [`crate::spin`], never here.

use async_trait::async_trait;
use motospin_common::config::Config;
use motospin_common::{Error, MotorcycleRecord, Result};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default timeout for provider requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Header carrying the provider credential
const API_KEY_HEADER: &str = "X-Api-Key";

/// Filter parameters for a provider query. Absent parameters are omitted
/// from the outbound request entirely, never sent as empty strings.
#[derive(Debug, Clone, Default)]
pub struct MotorcycleQuery {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

impl MotorcycleQuery {
    pub fn by_make(make: &str) -> Self {
        Self {
            make: Some(make.to_string()),
            ..Default::default()
        }
    }

    pub fn by_make_and_year(make: &str, year: i32) -> Self {
        Self {
            make: Some(make.to_string()),
            model: None,
            year: Some(year),
        }
    }

    /// The query parameter pairs actually supplied.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(make) = &self.make {
            params.push(("make", make.clone()));
        }
        if let Some(model) = &self.model {
            params.push(("model", model.clone()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        params
    }
}

/// Source of normalized motorcycle records.
///
/// Seam between the retry orchestrator and the outside world; tests script
/// this trait to drive the widening algorithm deterministically.
#[async_trait]
pub trait MotorcycleSource: Send + Sync {
    async fn search(&self, query: &MotorcycleQuery) -> Result<Vec<MotorcycleRecord>>;
}

/// HTTP client for the external data provider.
pub struct ProviderClient {
    http_client: Client,
    config: Arc<Config>,
}

impl ProviderClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    /// Fetch the raw provider response for a query and coerce it to a list.
    async fn fetch_raw(&self, query: &MotorcycleQuery) -> Result<Vec<Value>> {
        // Credential is re-resolved per request; absence is fatal, not retried
        let api_key = self.config.resolve_api_key()?;

        debug!(
            make = ?query.make,
            model = ?query.model,
            year = ?query.year,
            "Querying motorcycle data provider"
        );

        let response = self
            .http_client
            .get(&self.config.provider_url)
            .header(API_KEY_HEADER, api_key)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("provider request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "provider returned status {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("provider response was not JSON: {}", e)))?;

        // A single-object response becomes a one-element list
        let raw = match body {
            Value::Array(items) => items,
            other => vec![other],
        };

        Ok(raw)
    }
}

#[async_trait]
impl MotorcycleSource for ProviderClient {
    async fn search(&self, query: &MotorcycleQuery) -> Result<Vec<MotorcycleRecord>> {
        let raw = self.fetch_raw(query).await?;
        let records = raw
            .iter()
            .map(MotorcycleRecord::from_provider)
            .collect::<Vec<_>>();

        debug!(count = records.len(), "Provider query complete");
        Ok(records)
    }
}
