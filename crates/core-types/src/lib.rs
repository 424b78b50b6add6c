pub mod quotation;

// Re-export the core types to provide a clean public API.
pub use quotation::Quotation;
