use crate::error::DbError;
use crate::{QuoteRepository, StoreHandle};
use core_types::Quotation;
use std::sync::Arc;
use std::time::Duration;

/// Writes quotations to the store under a fixed deadline.
///
/// The deadline covers waiting for the shared connection as well as the
/// insert itself. A local write is expected to take a small fraction of the
/// upstream fetch, so the budget is much tighter; blowing it usually means
/// another writer is holding the connection.
#[derive(Debug, Clone)]
pub struct QuoteRecorder {
    store: Arc<StoreHandle>,
    deadline: Duration,
}

impl QuoteRecorder {
    pub fn new(store: Arc<StoreHandle>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    /// Inserts one row for `quotation`. Never retries.
    ///
    /// The insert is transactional. When the deadline fires, or the caller
    /// drops the future, before the commit, the transaction is rolled back:
    /// a write reported as failed never leaves a row. The statement itself
    /// may keep the connection busy until SQLite finishes it.
    pub async fn record(&self, quotation: &Quotation) -> Result<(), DbError> {
        let write = async {
            let pool = self.store.acquire().await?;
            QuoteRepository::new(pool).save_quotation(quotation).await
        };

        tokio::time::timeout(self.deadline, write)
            .await
            .map_err(|_| DbError::Timeout(self.deadline))?
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn store(&self) -> &Arc<StoreHandle> {
        &self.store
    }
}
