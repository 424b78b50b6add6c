use core_types::Quotation;
use database::{QuoteRecorder, QuoteRepository, StoreHandle, ensure_schema};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn quotation() -> Quotation {
    serde_json::from_value(json!({
        "code": "USD", "codein": "BRL", "name": "Dólar Americano/Real Brasileiro",
        "high": "5.3562", "low": "5.2998", "varBid": "0.0214", "pctChange": "0.4",
        "bid": "5.31", "ask": "5.32"
    }))
    .unwrap()
}

#[tokio::test]
async fn restart_with_existing_table_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("database.db").display());

    // First process lifetime: create the table and record one quotation.
    let store = Arc::new(StoreHandle::new(url.clone()));
    ensure_schema(&store.acquire().await.unwrap()).await.unwrap();
    QuoteRecorder::new(Arc::clone(&store), Duration::from_secs(1))
        .record(&quotation())
        .await
        .unwrap();
    store.release().await;

    // Second lifetime against the same file: schema creation is a no-op.
    let store = StoreHandle::new(url);
    let pool = store.acquire().await.unwrap();
    ensure_schema(&pool).await.unwrap();

    let count = QuoteRepository::new(pool).count_quotations().await.unwrap();
    assert_eq!(count, 1);
    assert_eq!(store.open_count(), 1);
}

#[tokio::test]
async fn concurrent_recorders_each_append_a_row() {
    let store = Arc::new(StoreHandle::new("sqlite::memory:"));
    ensure_schema(&store.acquire().await.unwrap()).await.unwrap();
    let recorder = QuoteRecorder::new(Arc::clone(&store), Duration::from_secs(2));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let recorder = recorder.clone();
            tokio::spawn(async move { recorder.record(&quotation()).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let count = QuoteRepository::new(store.acquire().await.unwrap())
        .count_quotations()
        .await
        .unwrap();
    assert_eq!(count, 8);
    assert_eq!(store.open_count(), 1);
}
