use configuration::ClientConfig;
use core_types::Quotation;
use std::path::Path;
use std::time::Duration;

pub mod error;

pub use error::ClientError;

/// Calls the quotation server once under an outer deadline.
///
/// The deadline spans the whole exchange, from connecting to reading the last
/// byte of the body. It has to be longer than the server's fetch and record
/// deadlines together, which the configuration layer checks.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            url: config.server_url.clone(),
            timeout: config.timeout(),
        })
    }

    pub async fn fetch_quotation(&self) -> Result<Quotation, ClientError> {
        let exchange = async {
            let response = self.client.get(&self.url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status(status));
            }
            response
                .json::<Quotation>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
    }
}

/// Writes `Quote: <bid>` to `path`, replacing whatever was there.
pub async fn save_quotation(path: &Path, quotation: &Quotation) -> Result<(), ClientError> {
    tokio::fs::write(path, format!("Quote: {}", quotation.bid()))
        .await
        .map_err(|source| ClientError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Fetches one quotation and writes its bid to the configured file.
///
/// Nothing is written unless the fetch succeeded.
pub async fn run(config: &ClientConfig) -> Result<Quotation, ClientError> {
    let client = QuoteClient::new(config)?;

    tracing::info!(url = %config.server_url, timeout_ms = config.timeout_ms, "Fetching quotation.");
    let quotation = client.fetch_quotation().await?;
    tracing::info!(bid = %quotation.bid(), "Quotation received.");

    save_quotation(&config.output, &quotation).await?;
    tracing::info!(path = %config.output.display(), "Quotation saved.");

    Ok(quotation)
}
