use crate::pipeline::QuotePipeline;
use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// # GET /cotacao
/// Fetches the current quotation upstream, records it, and returns it.
/// A quotation is only returned once it has been written to the store.
pub async fn get_quotation(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let mut pipeline = QuotePipeline::new(state.source.as_ref(), &state.recorder);
    let quotation = pipeline.run().await?;

    tracing::info!(
        pair = %format!("{}{}", quotation.code(), quotation.code_in()),
        bid = %quotation.bid(),
        ask = %quotation.ask(),
        "Quotation recorded and served."
    );

    let response = Json(quotation).into_response();
    pipeline.finish();
    Ok(response)
}

/// # GET /health
pub async fn health() -> &'static str {
    "OK"
}
