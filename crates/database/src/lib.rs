//! # Cambio Database Crate
//!
//! This crate is the application's interface to its embedded SQLite store, the
//! permanent record of every quotation the server has handed out.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application sees a
//!   handle, a schema function and a recorder, never a query string.
//! - **One Connection:** `StoreHandle` owns the single physical connection.
//!   It is passed around explicitly instead of living in a global.
//! - **Bounded Writes:** `QuoteRecorder` puts its own deadline around every
//!   insert, independent of whatever deadline the caller is running under.
//!
//! ## Public API
//!
//! - `StoreHandle`: lazily opened, idempotently released connection.
//! - `ensure_schema`: creates the `quotation` table if it is missing.
//! - `QuoteRecorder`: inserts one quotation under a deadline.
//! - `QuoteRepository`: the raw table operations.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod recorder;
pub mod repository;
pub mod schema;

// Re-export the key components to create a clean, public-facing API.
pub use connection::StoreHandle;
pub use error::DbError;
pub use recorder::QuoteRecorder;
pub use repository::QuoteRepository;
pub use schema::ensure_schema;
