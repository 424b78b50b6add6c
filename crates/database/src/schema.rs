use crate::error::DbError;
use sqlx::SqlitePool;

/// One row per successfully served quotation. Prices are stored as REAL so
/// the table can be queried numerically; `recorded_at` is an RFC 3339 UTC
/// timestamp of the insert.
const CREATE_QUOTATION_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS quotation (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        ask         REAL    NOT NULL,
        bid         REAL    NOT NULL,
        code        TEXT    NOT NULL,
        code_in     TEXT    NOT NULL,
        high        REAL    NOT NULL,
        low         REAL    NOT NULL,
        name        TEXT    NOT NULL,
        pct_change  REAL    NOT NULL,
        var_bid     REAL    NOT NULL,
        recorded_at TEXT    NOT NULL
    )
"#;

/// Creates the `quotation` table if it does not exist yet.
///
/// Must run before the server accepts traffic. Running it against a store
/// that already has the table changes nothing.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(CREATE_QUOTATION_TABLE)
        .execute(pool)
        .await
        .map_err(DbError::SchemaError)?;
    Ok(())
}
