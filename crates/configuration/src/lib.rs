use crate::error::ConfigError;
use std::path::Path;
use std::time::Duration;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{ClientConfig, Config, DatabaseConfig, ServerConfig, UpstreamConfig};

/// Headroom the client deadline must keep on top of the server's own
/// deadlines, covering connection setup, routing and response encoding.
pub const HTTP_OVERHEAD: Duration = Duration::from_millis(50);

/// Prefix for environment overrides, e.g. `CAMBIO__UPSTREAM__TIMEOUT_MS=150`.
const ENV_PREFIX: &str = "CAMBIO";

/// Loads the application configuration.
///
/// Sources are layered in this order, later ones winning:
/// 1. the built-in defaults of every section,
/// 2. the TOML file at `path`, or an optional `config.toml` in the working
///    directory when no path is given,
/// 3. `CAMBIO__<SECTION>__<KEY>` environment variables.
///
/// The merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let builder = config::Config::builder();
    let builder = match path {
        Some(path) => builder.add_source(config::File::from(path)),
        None => builder.add_source(config::File::with_name("config.toml").required(false)),
    };

    let config = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<Config>()?;

    validate(&config)?;
    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Checks that the configured deadlines form a valid chain.
///
/// The record deadline must be tighter than the fetch deadline, and the
/// client's outer deadline must cover both plus [`HTTP_OVERHEAD`]. A client
/// configured below that bound would time out even when the server succeeds.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let fetch = config.upstream.timeout();
    let record = config.database.record_timeout();
    let outer = config.client.timeout();

    if fetch.is_zero() || record.is_zero() || outer.is_zero() {
        return Err(ConfigError::ValidationError(
            "timeouts must be greater than zero".to_string(),
        ));
    }

    if record >= fetch {
        return Err(ConfigError::ValidationError(format!(
            "database.record_timeout_ms ({}) must be below upstream.timeout_ms ({})",
            record.as_millis(),
            fetch.as_millis()
        )));
    }

    let required = fetch + record + HTTP_OVERHEAD;
    if outer < required {
        return Err(ConfigError::ValidationError(format!(
            "client.timeout_ms ({}) must be at least {} ms (fetch {} + record {} + overhead {})",
            outer.as_millis(),
            required.as_millis(),
            fetch.as_millis(),
            record.as_millis(),
            HTTP_OVERHEAD.as_millis()
        )));
    }

    if config.upstream.pair.is_empty() {
        return Err(ConfigError::ValidationError(
            "upstream.pair must not be empty".to_string(),
        ));
    }

    Ok(())
}
