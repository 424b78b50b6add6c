use crate::error::ApiError;
use async_trait::async_trait;
use configuration::UpstreamConfig;
use core_types::Quotation;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

pub mod error;

/// The abstract interface for a source of currency quotations.
/// The server only talks to this trait, allowing the underlying
/// implementation (live or stub) to be swapped out.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches the latest quotation for the configured currency pair.
    ///
    /// Implementations make a single attempt and never retry.
    async fn fetch_quotation(&self) -> Result<Quotation, ApiError>;
}

/// A concrete implementation of `QuoteSource` for AwesomeAPI
/// (`economia.awesomeapi.com.br`).
#[derive(Debug, Clone)]
pub struct AwesomeApiClient {
    client: reqwest::Client,
    url: String,
    pair: String,
    timeout: Duration,
}

impl AwesomeApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            url: config.url.clone(),
            pair: config.pair.clone(),
            timeout: config.timeout(),
        })
    }

    /// The deadline applied to every fetch, body included.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl QuoteSource for AwesomeApiClient {
    async fn fetch_quotation(&self) -> Result<Quotation, ApiError> {
        tracing::debug!(url = %self.url, timeout_ms = self.timeout.as_millis() as u64, "Requesting quotation.");

        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let text = response.text().await?;
        decode_quotation(&text, &self.pair)
    }
}

/// Picks the entry for `pair` out of a `{"USDBRL": {...}}` style payload.
///
/// A body that is not a JSON object, or an entry with a missing or
/// non-numeric price, is a deserialization error. A well-formed body without
/// the requested pair is reported separately as `KeyNotFound`.
fn decode_quotation(body: &str, pair: &str) -> Result<Quotation, ApiError> {
    let mut pairs: BTreeMap<String, Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;

    let entry = pairs
        .remove(pair)
        .ok_or_else(|| ApiError::KeyNotFound(pair.to_string()))?;

    serde_json::from_value(entry).map_err(|e| ApiError::Deserialization(e.to_string()))
}
