use anyhow::Context;
use api_client::{AwesomeApiClient, QuoteSource};
use axum::{Router, routing::get};
use configuration::Config;
use database::{QuoteRecorder, QuoteRepository, StoreHandle, ensure_schema};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod pipeline;

/// The shared application state that all handlers can access.
///
/// The store handle lives inside the recorder; it is the only resource shared
/// between concurrent requests.
pub struct AppState {
    pub source: Arc<dyn QuoteSource>,
    pub recorder: QuoteRecorder,
}

/// Builds the router with all application routes.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/cotacao", get(handlers::get_quotation))
        .with_state(state)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// The store is opened and the schema created before the listener is bound;
/// a failure in either aborts startup. The store is released on the way out,
/// whether serving ended cleanly or not.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    // Note: Tracing is already initialized in main.rs.
    let store = Arc::new(StoreHandle::new(config.database.url.clone()));

    let result = serve(config, Arc::clone(&store)).await;
    store.release().await;
    result
}

async fn serve(config: &Config, store: Arc<StoreHandle>) -> anyhow::Result<()> {
    let pool = store
        .acquire()
        .await
        .context("failed to open the quotation store")?;
    ensure_schema(&pool)
        .await
        .context("failed to create the quotation schema")?;
    let recorded = QuoteRepository::new(pool).count_quotations().await?;
    tracing::info!(recorded, "Quotation store ready.");

    let source = AwesomeApiClient::new(&config.upstream)?;
    let recorder = QuoteRecorder::new(store, config.database.record_timeout());
    tracing::info!(
        upstream = %config.upstream.url,
        fetch_timeout_ms = source.timeout().as_millis() as u64,
        record_timeout_ms = recorder.deadline().as_millis() as u64,
        "Quote pipeline configured."
    );

    let app_state = Arc::new(AppState {
        source: Arc::new(source),
        recorder,
    });
    let app = app_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.server.addr).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
