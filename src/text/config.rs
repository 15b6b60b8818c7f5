//! Reader configuration

use serde::{Deserialize, Serialize};

use super::escape::{normalize_candidates, normalize_delimiter};
use crate::common::{Error, Result};

/// Candidate delimiters tried when none is given, in order of preference.
pub const DEFAULT_CANDIDATES: &str = ",\t;|";

/// Configuration for a [`RowReader`](super::RowReader)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Explicit field delimiter; `None` guesses one from the first line
    pub delimiter: Option<String>,
    /// Ordered candidate characters used only when guessing
    pub candidates: String,
    /// Whether the first line of each table segment holds field names
    pub has_header: bool,
    /// Whether blank lines split the stream into independent tables
    pub is_multitable: bool,
    /// Quote character for quoted fields
    pub quote: char,
    /// Comment character (records starting with this are skipped)
    pub comment: Option<char>,
    /// Whether to drop a UTF-8 byte order mark from the first line
    pub strip_bom: bool,
    /// Buffer size for reading files
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None, // Guess per stream
            candidates: DEFAULT_CANDIDATES.to_string(),
            has_header: true, // Assume first row is headers
            is_multitable: false,
            quote: '"', // Standard CSV quoting
            comment: None,
            strip_bom: true,
            buffer_size: 8192, // 8KB buffer
        }
    }
}

impl ReaderConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit field delimiter, disabling guessing
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Clear the explicit delimiter so it is guessed from the input
    pub fn with_guessed_delimiter(mut self) -> Self {
        self.delimiter = None;
        self
    }

    /// Set the ordered candidate set used for guessing
    pub fn with_candidates(mut self, candidates: impl Into<String>) -> Self {
        self.candidates = candidates.into();
        self
    }

    /// Set whether the first row of each segment contains headers
    pub fn with_headers(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Enable/disable blank-line table boundaries
    pub fn with_multitable(mut self, is_multitable: bool) -> Self {
        self.is_multitable = is_multitable;
        self
    }

    /// Set the quote character
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Set the comment character (None to disable comments)
    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    /// Enable/disable UTF-8 BOM stripping
    pub fn with_strip_bom(mut self, strip_bom: bool) -> Self {
        self.strip_bom = strip_bom;
        self
    }

    /// Set buffer size
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Create CSV (comma-separated) configuration
    pub fn csv() -> Self {
        Self::new().with_delimiter(",")
    }

    /// Create TSV (tab-separated) configuration
    pub fn tsv() -> Self {
        Self::new().with_delimiter("\t")
    }

    /// Create pipe-separated configuration
    pub fn pipe() -> Self {
        Self::new().with_delimiter("|")
    }

    /// The candidate set as an ordered list of characters.
    pub fn candidate_chars(&self) -> Vec<char> {
        self.candidates.chars().collect()
    }

    /// Returns a copy with shorthand names and backslash escapes in the
    /// delimiter turned into literal characters.
    ///
    /// The candidate set is only translated when the delimiter is guessed;
    /// with an explicit delimiter it is kept as given.
    pub fn resolved(&self) -> Result<Self> {
        match &self.delimiter {
            Some(raw) => Ok(Self {
                delimiter: Some(normalize_delimiter(raw)?),
                ..self.clone()
            }),
            None => Ok(Self {
                candidates: normalize_candidates(&self.candidates)?,
                ..self.clone()
            }),
        }
    }

    /// Checks the configuration for errors that would make reading impossible.
    pub fn validate(&self) -> Result<()> {
        match &self.delimiter {
            Some(delimiter) if delimiter.is_empty() => {
                Err(Error::config("explicit delimiter must not be empty"))
            },
            Some(delimiter) if delimiter.contains(['\n', '\r']) => {
                Err(Error::config("delimiter must not contain a line terminator"))
            },
            Some(delimiter) if delimiter.contains(self.quote) => Err(Error::config(format!(
                "delimiter {delimiter:?} contains the quote character {:?}",
                self.quote
            ))),
            Some(_) => Ok(()),
            None if self.candidates.is_empty() => Err(Error::config(
                "candidate delimiter set is empty and no delimiter was given",
            )),
            None if self.candidates.contains(['\n', '\r']) => Err(Error::config(
                "candidate delimiters must not contain a line terminator",
            )),
            None if self.candidates.contains(self.quote) => Err(Error::config(format!(
                "candidate delimiters {:?} contain the quote character {:?}",
                self.candidates, self.quote
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.delimiter, None);
        assert_eq!(config.candidate_chars(), vec![',', '\t', ';', '|']);
        assert!(config.has_header);
        assert!(!config.is_multitable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_candidates_without_delimiter() {
        let config = ReaderConfig::new().with_candidates("");
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        // An explicit delimiter makes the candidate set irrelevant
        let config = config.with_delimiter(";");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_explicit_delimiters() {
        assert!(ReaderConfig::new().with_delimiter("").validate().is_err());
        assert!(ReaderConfig::new().with_delimiter("\n").validate().is_err());
        assert!(ReaderConfig::new().with_delimiter("\"|").validate().is_err());
        assert!(ReaderConfig::new().with_delimiter("::").validate().is_ok());
    }

    #[test]
    fn test_candidates_must_not_hold_quote_or_terminator() {
        let config = ReaderConfig::new().with_candidates("\",");
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ReaderConfig::new().with_candidates(",\n");
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        // Only the configured quote is a conflict
        let config = ReaderConfig::new().with_candidates("\",").with_quote('\'');
        assert!(config.validate().is_ok());

        // Candidates are irrelevant once the delimiter is explicit
        let config = ReaderConfig::new().with_candidates("\",").with_delimiter(",");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolved_translates_user_input() {
        let config = ReaderConfig::new()
            .with_candidates(r",\t")
            .resolved()
            .unwrap();
        assert_eq!(config.delimiter, None);
        assert_eq!(config.candidate_chars(), vec![',', '\t']);

        let config = ReaderConfig::new().with_delimiter("pipe").resolved().unwrap();
        assert_eq!(config.delimiter.as_deref(), Some("|"));

        let config = ReaderConfig::new().with_delimiter(r"\x01").resolved().unwrap();
        assert_eq!(config.delimiter.as_deref(), Some("\u{01}"));

        assert!(ReaderConfig::new().with_delimiter(r"\u12").resolved().is_err());
    }

    #[test]
    fn test_explicit_delimiter_ignores_bad_candidates() {
        let config = ReaderConfig::new()
            .with_delimiter(";")
            .with_candidates(r"\x")
            .resolved()
            .unwrap();
        assert_eq!(config.delimiter.as_deref(), Some(";"));
        assert_eq!(config.candidates, r"\x");
        assert!(config.validate().is_ok());

        // The same candidates fail once they are needed for guessing
        assert!(ReaderConfig::new().with_candidates(r"\x").resolved().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{"delimiter": "|", "is_multitable": true}"#).unwrap();
        assert_eq!(config.delimiter.as_deref(), Some("|"));
        assert!(config.is_multitable);
        assert!(config.has_header);
        assert_eq!(config.quote, '"');
    }
}
