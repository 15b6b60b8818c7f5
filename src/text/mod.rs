//! Streaming reader for delimited text (CSV, TSV, pipe-separated, ...)
//!
//! This module turns a line-oriented byte stream into [`Row`]s. It is the
//! shared engine behind tools that load delimited files into a query engine or
//! re-align their columns.
//!
//! # Features
//!
//! - **Delimiter guessing**: the most frequent character of an ordered candidate set, per stream
//! - **Multi-character delimiters**: explicit delimiters such as `::` or `<>`
//! - **Quote handling**: quoted fields with doubled-quote escapes and embedded line breaks
//! - **Headers**: name-based field access through a per-segment [`Header`]
//! - **Multi-table streams**: blank lines split one input into independent tables
//!
//! # Example
//!
//! ```rust,no_run
//! use csvtables::text::{ReaderConfig, RowReader};
//!
//! // Guess the delimiter and treat blank lines as table boundaries
//! let config = ReaderConfig::new().with_multitable(true);
//! let reader = RowReader::open("data.csv", config)?;
//!
//! for row in reader {
//!     let row = row?;
//!     if let Some(name) = row.get_by_name("name") {
//!         println!("table {} line {}: {}", row.table_index(), row.line_number(), name);
//!     }
//! }
//! # Ok::<(), csvtables::Error>(())
//! ```

pub mod config;
pub mod escape;
pub mod guess;
pub mod header;
pub mod reader;
pub mod row;
pub mod tokenizer;

pub use config::{DEFAULT_CANDIDATES, ReaderConfig};
pub use guess::guess;
pub use header::Header;
pub use reader::{ReaderState, RowReader};
pub use row::{Cell, Row};
pub use tokenizer::FieldTokenizer;
