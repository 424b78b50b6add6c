use api_client::error::ApiError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Quote API error: {0}")]
    Fetch(#[from] ApiError),
    #[error("Database error: {0}")]
    Record(#[from] DbError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// The full error goes to the log. The caller only ever sees a fixed message,
/// so nothing from the upstream API or the store reaches the wire.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_message = match &self {
            AppError::Fetch(api_err) => {
                tracing::error!(error = ?api_err, timeout = api_err.is_timeout(), "Quotation fetch failed.");
                "Failed to fetch the quotation"
            }
            AppError::Record(db_err) => {
                tracing::error!(error = ?db_err, "Quotation recording failed.");
                "Failed to record the quotation"
            }
        };

        let body = Json(json!({ "error": error_message }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::Duration;

    async fn body_of(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn fetch_errors_are_opaque() {
        let err = AppError::Fetch(ApiError::Deserialization("secret upstream detail".into()));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Failed to fetch the quotation"}"#);
    }

    #[tokio::test]
    async fn record_errors_are_opaque() {
        let err = AppError::Record(DbError::Timeout(Duration::from_millis(10)));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("10ms"));
        assert!(body.contains("Failed to record the quotation"));
    }
}
