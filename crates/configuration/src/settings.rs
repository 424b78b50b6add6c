use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing sections fall back to the
/// defaults below, which describe the USD/BRL setup against AwesomeAPI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Where the quotation server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

/// The third-party quote API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL of the quote endpoint.
    pub url: String,
    /// The key of the currency pair in the response map (e.g., "USDBRL").
    pub pair: String,
    /// Hard deadline for the whole outbound request, body included.
    pub timeout_ms: u64,
}

/// The embedded store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// An sqlx SQLite URL, e.g. `sqlite://database.db` or `sqlite::memory:`.
    pub url: String,
    /// Deadline for acquiring the connection and inserting one quotation.
    pub record_timeout_ms: u64,
}

/// The command-line client that fetches from our own server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    /// Outer deadline. Must cover the server's fetch and record deadlines.
    pub timeout_ms: u64,
    /// File the bid is written to, overwritten on every run.
    pub output: PathBuf,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl DatabaseConfig {
    pub fn record_timeout(&self) -> Duration {
        Duration::from_millis(self.record_timeout_ms)
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// --- Default Implementations ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://economia.awesomeapi.com.br/json/last/USD-BRL".to_string(),
            pair: "USDBRL".to_string(),
            timeout_ms: 200,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://database.db".to_string(),
            record_timeout_ms: 10,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/cotacao".to_string(),
            timeout_ms: 300,
            output: PathBuf::from("cotacao.txt"),
        }
    }
}
