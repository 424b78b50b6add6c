use crate::error::DbError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// The single owned connection to the embedded SQLite store.
///
/// The handle is constructed once at startup and shared (behind an `Arc`)
/// with everything that needs the store. The physical connection is opened
/// lazily by the first `acquire` and reused by every later caller; concurrent
/// first callers queue on the internal lock, so exactly one open happens.
///
/// Underneath is an `SqlitePool` capped at one connection. SQLite allows a
/// single writer anyway, and the pool gives us a queue in front of it, so
/// concurrent requests are serialized by the store rather than by our code.
#[derive(Debug)]
pub struct StoreHandle {
    url: String,
    pool: Mutex<Option<SqlitePool>>,
    opens: AtomicUsize,
}

impl StoreHandle {
    /// Creates a handle for the given sqlx SQLite URL without connecting.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool: Mutex::new(None),
            opens: AtomicUsize::new(0),
        }
    }

    /// Returns the open connection pool, connecting on first use.
    ///
    /// A failure here means the store cannot be opened at all. Callers at
    /// startup treat it as fatal; nothing retries it.
    pub async fn acquire(&self) -> Result<SqlitePool, DbError> {
        let mut slot = self.pool.lock().await;
        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let pool = open(&self.url).await?;
        self.opens.fetch_add(1, Ordering::SeqCst);
        tracing::info!(url = %self.url, "Database connection opened.");

        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Closes the physical connection and forgets it.
    ///
    /// Safe to call repeatedly. A later `acquire` opens a fresh connection.
    pub async fn release(&self) {
        let pool = self.pool.lock().await.take();
        if let Some(pool) = pool {
            pool.close().await;
            tracing::info!(url = %self.url, "Database connection closed.");
        }
    }

    /// How many physical connections this handle has opened so far.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

async fn open(url: &str) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| DbError::ConnectionConfigError(e.to_string()))?
        .create_if_missing(true);

    // One connection that never idles out or expires: an in-memory store
    // lives exactly as long as its connection.
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(DbError::ConnectionError)
}
