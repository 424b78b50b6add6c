use crate::DbError;
use chrono::Utc;
use core_types::Quotation;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::SqlitePool;

/// The `QuoteRepository` encapsulates the SQL for the `quotation` table.
/// The table is append-only: rows are inserted and counted, never updated.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts one row holding every field of the quotation.
    ///
    /// The insert runs in its own transaction. If the returned future is
    /// dropped before the commit, the transaction is rolled back once the
    /// connection is free again, so an abandoned write leaves no row.
    pub async fn save_quotation(&self, quotation: &Quotation) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from_write)?;

        sqlx::query(
            r#"
            INSERT INTO quotation (ask, bid, code, code_in, high, low, name, pct_change, var_bid, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(real("ask", quotation.ask())?)
        .bind(real("bid", quotation.bid())?)
        .bind(quotation.code())
        .bind(quotation.code_in())
        .bind(real("high", quotation.high())?)
        .bind(real("low", quotation.low())?)
        .bind(quotation.name())
        .bind(real("pct_change", quotation.pct_change())?)
        .bind(real("var_bid", quotation.var_bid())?)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(DbError::from_write)?;

        tx.commit().await.map_err(DbError::from_write)?;
        Ok(())
    }

    /// Number of quotations recorded so far.
    pub async fn count_quotations(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotation")
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::QueryError)?;
        Ok(count)
    }
}

fn real(column: &str, value: Decimal) -> Result<f64, DbError> {
    value
        .to_f64()
        .ok_or_else(|| DbError::InvalidValue(format!("{column} = {value} does not fit in REAL")))
}
