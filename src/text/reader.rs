//! Streaming row reader

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::Arc;

use super::config::ReaderConfig;
use super::guess::guess;
use super::header::Header;
use super::row::Row;
use super::tokenizer::{FieldTokenizer, split_terminator};
use crate::common::{BomKind, Result, strip_utf8_bom};

/// Position of a [`RowReader`] in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// No line has been read yet; the delimiter may still need guessing
    Uninitialized,
    /// The next record is the header of a new segment
    AwaitingHeader,
    /// Records are data rows of the current segment
    Streaming,
    /// Input is used up
    Exhausted,
    /// A pull failed; the reader yields nothing more
    Failed,
}

/// Physical lines of the input, numbered from 1.
struct LineSource<R> {
    input: R,
    buffer: Vec<u8>,
    line_number: u64,
    strip_bom: bool,
}

impl<R: BufRead> LineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.input.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let mut bytes = self.buffer.as_slice();
        if self.line_number == 1 && self.strip_bom {
            let (bom, rest) = strip_utf8_bom(bytes);
            match bom {
                Some(BomKind::Utf8) | None => {},
                Some(other) => {
                    tracing::warn!(bom = ?other, "input starts with a non UTF-8 byte order mark")
                },
            }
            bytes = rest;
        }

        Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
    }
}

/// Lazy, forward-only reader producing [`Row`]s from delimited text.
///
/// The delimiter is either taken from the configuration or guessed once from
/// the first non-blank line. With headers enabled the first record of every
/// table segment becomes that segment's [`Header`]; in multi-table mode a
/// blank line ends the current segment.
///
/// # Example
///
/// ```
/// use csvtables::text::{ReaderConfig, RowReader};
///
/// let input = "name,age\nalice,30\n\nname,city\nbob,nyc\n";
/// let config = ReaderConfig::new().with_multitable(true);
/// let rows = RowReader::from_bytes(input.as_bytes(), config)?
///     .collect::<csvtables::Result<Vec<_>>>()?;
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].get_by_name("age").map(|c| c.value()), Some("30"));
/// assert_eq!(rows[1].get_by_name("city").map(|c| c.value()), Some("nyc"));
/// assert_eq!(rows[1].table_index(), 1);
/// # Ok::<(), csvtables::Error>(())
/// ```
pub struct RowReader<R> {
    source: LineSource<R>,
    config: ReaderConfig,
    candidates: Vec<char>,
    tokenizer: Option<FieldTokenizer>,
    header: Option<Arc<Header>>,
    state: ReaderState,
    table: usize,
    segment_started: bool,
}

impl RowReader<BufReader<File>> {
    /// Open a file for reading; the handle is closed when the reader is dropped
    pub fn open<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(config.buffer_size, file);
        Self::new(reader, config)
    }
}

impl<'a> RowReader<&'a [u8]> {
    /// Read rows from an in-memory buffer
    pub fn from_bytes(bytes: &'a [u8], config: ReaderConfig) -> Result<Self> {
        Self::new(bytes, config)
    }
}

impl<R: BufRead> RowReader<R> {
    /// Create a reader over `input`.
    ///
    /// Shorthands and escapes in the delimiter settings are resolved and the
    /// configuration is validated here, so an unusable delimiter setup fails
    /// before any input is read.
    pub fn new(input: R, config: ReaderConfig) -> Result<Self> {
        let config = config.resolved()?;
        config.validate()?;

        let tokenizer = match &config.delimiter {
            Some(delimiter) => Some(FieldTokenizer::new(delimiter.clone(), config.quote)?),
            None => None,
        };

        Ok(RowReader {
            source: LineSource {
                input,
                buffer: Vec::new(),
                line_number: 0,
                strip_bom: config.strip_bom,
            },
            candidates: config.candidate_chars(),
            config,
            tokenizer,
            header: None,
            state: ReaderState::Uninitialized,
            table: 0,
            segment_started: false,
        })
    }

    /// Produce the next row, or `None` once the input is exhausted.
    ///
    /// After an error the reader is left in [`ReaderState::Failed`] and every
    /// later call returns `Ok(None)`.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        match self.advance() {
            Ok(row) => Ok(row),
            Err(e) => {
                self.state = ReaderState::Failed;
                Err(e)
            },
        }
    }

    fn advance(&mut self) -> Result<Option<Row>> {
        loop {
            if matches!(self.state, ReaderState::Exhausted | ReaderState::Failed) {
                return Ok(None);
            }

            let Some(line) = self.source.next_line()? else {
                tracing::debug!(
                    lines = self.source.line_number,
                    tables = self.table + 1,
                    "end of input"
                );
                self.state = ReaderState::Exhausted;
                return Ok(None);
            };
            let start_line = self.source.line_number;

            let (body, _) = split_terminator(&line);
            if body.is_empty() {
                if self.config.is_multitable {
                    self.end_segment();
                }
                continue;
            }
            if let Some(comment) = self.config.comment {
                if body.starts_with(comment) {
                    continue;
                }
            }

            if self.state == ReaderState::Uninitialized {
                self.state = self.segment_start_state();
            }

            let tokenizer = match self.tokenizer {
                Some(ref tokenizer) => tokenizer,
                None => {
                    let guessed = guess(body, &self.candidates)?;
                    tracing::debug!(delimiter = ?guessed, line = start_line, "guessed delimiter");
                    let tokenizer = FieldTokenizer::new(guessed.to_string(), self.config.quote)?;
                    &*self.tokenizer.insert(tokenizer)
                },
            };

            let source = &mut self.source;
            let values = tokenizer.split_continued(&line, start_line, || source.next_line())?;
            self.segment_started = true;

            if self.state == ReaderState::AwaitingHeader {
                let header = Header::from_row(values);
                tracing::debug!(
                    table = self.table,
                    fields = header.len(),
                    line = start_line,
                    "read segment header"
                );
                self.header = Some(Arc::new(header));
                self.state = ReaderState::Streaming;
                continue;
            }

            return Ok(Some(Row::new(
                values,
                self.header.clone(),
                tokenizer.shared_delimiter(),
                start_line,
                self.table,
            )));
        }
    }

    /// Close the current segment at a blank line. Runs of blank lines, and
    /// blank lines before any record, do not open empty segments.
    fn end_segment(&mut self) {
        if !self.segment_started {
            return;
        }
        tracing::trace!(table = self.table, line = self.source.line_number, "table boundary");
        self.table += 1;
        self.header = None;
        self.segment_started = false;
        self.state = self.segment_start_state();
    }

    fn segment_start_state(&self) -> ReaderState {
        if self.config.has_header {
            ReaderState::AwaitingHeader
        } else {
            ReaderState::Streaming
        }
    }

    /// The resolved delimiter, `None` until it has been guessed
    pub fn delimiter(&self) -> Option<&str> {
        self.tokenizer.as_ref().map(FieldTokenizer::delimiter)
    }

    /// Header of the current segment
    pub fn header(&self) -> Option<&Arc<Header>> {
        self.header.as_ref()
    }

    /// Zero-based ordinal of the current segment
    pub fn table_index(&self) -> usize {
        self.table
    }

    /// Number of physical lines consumed so far
    pub fn line_number(&self) -> u64 {
        self.source.line_number
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// The configuration in effect, with delimiter settings resolved
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

impl<R: BufRead> FusedIterator for RowReader<R> {}
