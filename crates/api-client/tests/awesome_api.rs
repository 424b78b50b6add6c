use api_client::error::ApiError;
use api_client::{AwesomeApiClient, QuoteSource};
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use configuration::UpstreamConfig;
use rust_decimal_macros::dec;
use std::time::Duration;
use tokio::net::TcpListener;

const PATH: &str = "/json/last/USD-BRL";
const BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.3562","low":"5.2998","varBid":"0.0214","pctChange":"0.4","bid":"5.31","ask":"5.32"}}"#;

async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}{}", addr, PATH)
}

fn client_for(url: String, timeout_ms: u64) -> AwesomeApiClient {
    AwesomeApiClient::new(&UpstreamConfig {
        url,
        pair: "USDBRL".to_string(),
        timeout_ms,
    })
    .unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_quotation() {
    let url = spawn_upstream(Router::new().route(PATH, get(|| async { BODY }))).await;
    let client = client_for(url, 500);

    let quotation = client.fetch_quotation().await.unwrap();

    assert_eq!(quotation.bid(), dec!(5.31));
    assert_eq!(quotation.ask(), dec!(5.32));
    assert_eq!(quotation.code(), "USD");
}

#[tokio::test]
async fn slow_upstream_hits_the_deadline() {
    let url = spawn_upstream(Router::new().route(
        PATH,
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            BODY
        }),
    ))
    .await;
    let client = client_for(url, 50);

    let err = client.fetch_quotation().await.unwrap_err();

    assert!(err.is_timeout(), "expected a timeout, got {err:?}");
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let url = spawn_upstream(Router::new().route(
        PATH,
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
    ))
    .await;
    let client = client_for(url, 500);

    let err = client.fetch_quotation().await.unwrap_err();

    assert!(matches!(err, ApiError::Status(StatusCode::SERVICE_UNAVAILABLE)));
}

#[tokio::test]
async fn response_without_pair_is_key_not_found() {
    let url = spawn_upstream(Router::new().route(
        PATH,
        get(|| async { r#"{"EURBRL":{"bid":"6.01","ask":"6.02"}}"# }),
    ))
    .await;
    let client = client_for(url, 500);

    let err = client.fetch_quotation().await.unwrap_err();

    assert!(matches!(err, ApiError::KeyNotFound(pair) if pair == "USDBRL"));
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client_for(format!("http://{}{}", addr, PATH), 500);

    let err = client.fetch_quotation().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}
