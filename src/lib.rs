//! csvtables - a streaming reader for delimited text with delimiter guessing
//!
//! This library reads CSV-like files line by line and hands out one [`Row`] at
//! a time. It does not need to be told the delimiter and it can split a single
//! stream into several independent tables.
//!
//! # Features
//!
//! - **Delimiter inference**: picks the delimiter from an ordered candidate set using the first line
//! - **Escapes and shorthands**: delimiters like `\t`, `\x01`, `tab` or `pipe` as typed on a command line
//! - **CSV quoting**: quoted fields, doubled quotes, delimiters and newlines inside quotes
//! - **Header rows**: field access by name, tolerant of short and long rows
//! - **Multi-table mode**: a blank line ends one table and the next line starts a fresh header
//!
//! # Example - Reading with a guessed delimiter
//!
//! ```
//! use csvtables::{ReaderConfig, RowReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = "name;age\nalice;30\nbob;41\n";
//! let mut reader = RowReader::from_bytes(input.as_bytes(), ReaderConfig::new())?;
//!
//! while let Some(row) = reader.next_row()? {
//!     assert_eq!(row.delim(), ";");
//!     println!("{} is {}", row.get_by_name("name").unwrap(), row.get_by_name("age").unwrap());
//! }
//! assert_eq!(reader.delimiter(), Some(";"));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Explicit multi-character delimiter
//!
//! ```
//! use csvtables::{ReaderConfig, RowReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReaderConfig::new().with_delimiter("::").with_headers(false);
//! let rows: Vec<_> = RowReader::from_bytes(b"a::b::\"c::d\"\n", config)?
//!     .map(|row| row.map(|r| r.into_values()))
//!     .collect::<Result<_, _>>()?;
//!
//! assert_eq!(rows, vec![vec!["a", "b", "c::d"]]);
//! # Ok(())
//! # }
//! ```

/// Shared error type and byte order mark handling
pub mod common;

/// Delimited text reader: configuration, delimiter guessing, tokenizing,
/// headers and rows
pub mod text;

// Re-export commonly used types for convenience
pub use common::{Error, ParseErrorKind, Result};
pub use text::{Cell, FieldTokenizer, Header, ReaderConfig, ReaderState, Row, RowReader};
