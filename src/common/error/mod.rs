//! Unified error types for the csvtables engine.
//!
//! Configuration problems, tokenization failures and I/O errors from the
//! underlying stream all surface through the single [`Error`] type.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, ParseErrorKind, Result};
