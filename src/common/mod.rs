//! Types and helpers shared across the engine.

// Submodule declarations
pub mod bom;
pub mod error;

// Re-exports for convenience
pub use bom::{BomKind, detect_bom, strip_utf8_bom};
pub use error::{Error, ParseErrorKind, Result};
