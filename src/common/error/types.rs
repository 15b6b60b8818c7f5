//! Error type shared by every stage of the reader.
use thiserror::Error;

/// Main error type for csvtables operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error from the underlying input, passed through untouched
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid reader configuration, reported before any row is produced
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed record
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        /// 1-based physical line on which the failing record started
        line: u64,
        kind: ParseErrorKind,
    },
}

/// What went wrong while tokenizing a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ended while a quoted field was still open
    #[error("unterminated quoted field")]
    UnterminatedQuote,

    /// A closing quote was followed by something other than a delimiter or line end
    #[error("unexpected character {0:?} after closing quote")]
    UnexpectedCharAfterQuote(char),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Returns the parse failure kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Result type for csvtables operations.
pub type Result<T> = std::result::Result<T, Error>;
