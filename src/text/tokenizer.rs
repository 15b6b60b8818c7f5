//! Field tokenizer for delimited records

use std::borrow::Cow;
use std::sync::Arc;

use crate::common::{Error, ParseErrorKind, Result};

/// Where the tokenizer is within the current field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Nothing consumed for this field yet
    FieldStart,
    /// Inside a field that did not open with a quote
    Unquoted,
    /// Inside a quoted field
    Quoted,
    /// A quote was seen inside a quoted field: either a doubled quote or the close
    QuoteInQuoted,
}

/// Accumulated state of one logical record.
struct RecordState {
    fields: Vec<String>,
    field: String,
    mode: Mode,
}

impl RecordState {
    fn new() -> Self {
        RecordState {
            fields: Vec::new(),
            field: String::new(),
            mode: Mode::FieldStart,
        }
    }

    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
        self.mode = Mode::FieldStart;
    }

    fn finish(mut self) -> Vec<String> {
        self.end_field();
        self.fields
    }
}

/// Splits lines into fields on a (possibly multi-character) delimiter.
///
/// A field opening with the quote character may contain the delimiter and
/// line breaks; a doubled quote inside it stands for one quote. A quote in the
/// middle of an unquoted field is an ordinary character.
#[derive(Debug, Clone)]
pub struct FieldTokenizer {
    delimiter: Arc<str>,
    quote: char,
}

impl FieldTokenizer {
    /// Create a tokenizer for `delimiter` with the given quote character
    pub fn new(delimiter: impl Into<String>, quote: char) -> Result<Self> {
        let delimiter: String = delimiter.into();
        if delimiter.is_empty() {
            return Err(Error::config("delimiter must not be empty"));
        }
        Ok(FieldTokenizer {
            delimiter: Arc::from(delimiter),
            quote,
        })
    }

    /// The delimiter this tokenizer splits on
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// The delimiter as a shared handle, as attached to each row
    pub fn shared_delimiter(&self) -> Arc<str> {
        Arc::clone(&self.delimiter)
    }

    /// The quote character
    pub fn quote(&self) -> char {
        self.quote
    }

    /// Tokenize a single self-contained line.
    ///
    /// A quoted field left open at the end of `line` is an
    /// [`ParseErrorKind::UnterminatedQuote`] error reported on line 1.
    pub fn split(&self, line: &str) -> Result<Vec<String>> {
        self.split_continued(line, 1, || Ok(None))
    }

    /// Tokenize a record starting at `line`, pulling more physical lines from
    /// `more` while a quoted field is still open.
    ///
    /// Lines are expected with their terminator attached; inside a quoted
    /// field the terminator is kept as part of the value. `start_line` is
    /// only used to label parse errors.
    pub fn split_continued<F>(&self, line: &str, start_line: u64, mut more: F) -> Result<Vec<String>>
    where
        F: FnMut() -> Result<Option<String>>,
    {
        let (body, _) = split_terminator(line);
        if !self.contains_quote(body) {
            return Ok(body.split(&*self.delimiter).map(String::from).collect());
        }

        let mut state = RecordState::new();
        let mut current = Cow::Borrowed(line);

        loop {
            let (body, terminator) = split_terminator(&current);
            self.feed(&mut state, body)
                .map_err(|kind| Error::Parse { line: start_line, kind })?;

            if state.mode != Mode::Quoted {
                return Ok(state.finish());
            }

            // The record continues on the next physical line
            state.field.push_str(terminator);
            match more()? {
                Some(next) => current = Cow::Owned(next),
                None => {
                    return Err(Error::Parse {
                        line: start_line,
                        kind: ParseErrorKind::UnterminatedQuote,
                    });
                },
            }
        }
    }

    /// Run the state machine over one line body (terminator excluded).
    fn feed(&self, state: &mut RecordState, body: &str) -> std::result::Result<(), ParseErrorKind> {
        let delimiter = &*self.delimiter;
        let mut pos = 0;

        while pos < body.len() {
            let rest = &body[pos..];

            if state.mode != Mode::Quoted && rest.starts_with(delimiter) {
                state.end_field();
                pos += delimiter.len();
                continue;
            }

            let Some(c) = rest.chars().next() else {
                break;
            };
            pos += c.len_utf8();

            match state.mode {
                Mode::FieldStart if c == self.quote => state.mode = Mode::Quoted,
                Mode::FieldStart | Mode::Unquoted => {
                    state.field.push(c);
                    state.mode = Mode::Unquoted;
                },
                Mode::Quoted if c == self.quote => state.mode = Mode::QuoteInQuoted,
                Mode::Quoted => state.field.push(c),
                Mode::QuoteInQuoted if c == self.quote => {
                    // Doubled quote
                    state.field.push(c);
                    state.mode = Mode::Quoted;
                },
                Mode::QuoteInQuoted => return Err(ParseErrorKind::UnexpectedCharAfterQuote(c)),
            }
        }

        Ok(())
    }

    fn contains_quote(&self, s: &str) -> bool {
        if self.quote.is_ascii() {
            memchr::memchr(self.quote as u8, s.as_bytes()).is_some()
        } else {
            s.contains(self.quote)
        }
    }
}

/// Separates a line from its `\n` or `\r\n` terminator.
pub(crate) fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, &line[body.len()..])
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, &line[body.len()..])
    } else {
        (line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn comma() -> FieldTokenizer {
        FieldTokenizer::new(",", '"').unwrap()
    }

    #[test]
    fn test_simple_split() {
        assert_eq!(comma().split("a,b,c\n").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(comma().split("a,,c").unwrap(), vec!["a", "", "c"]);
        assert_eq!(comma().split("").unwrap(), vec![""]);
        assert_eq!(comma().split("x\r\n").unwrap(), vec!["x"]);
    }

    #[test]
    fn test_quoted_fields() {
        let fields = comma()
            .split("\"Hello, World\",\"Value with \"\"quotes\"\"\",\"Normal\"")
            .unwrap();
        assert_eq!(fields, vec!["Hello, World", "Value with \"quotes\"", "Normal"]);

        assert_eq!(comma().split("\"a,b\",c").unwrap(), vec!["a,b", "c"]);
        assert_eq!(comma().split("\"\"").unwrap(), vec![""]);
        assert_eq!(comma().split("\"\"\"\"").unwrap(), vec!["\""]);
        assert_eq!(comma().split("a,\"\"\n").unwrap(), vec!["a", ""]);
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_literal() {
        assert_eq!(comma().split("ab\"c,d").unwrap(), vec!["ab\"c", "d"]);
    }

    #[test]
    fn test_multi_character_delimiter() {
        let tokenizer = FieldTokenizer::new("::", '"').unwrap();
        assert_eq!(tokenizer.split("a::b:c::d").unwrap(), vec!["a", "b:c", "d"]);
        assert_eq!(tokenizer.split("\"x::y\"::z").unwrap(), vec!["x::y", "z"]);
        assert_eq!(tokenizer.split("a:::b").unwrap(), vec!["a", ":b"]);
    }

    #[test]
    fn test_custom_quote() {
        let tokenizer = FieldTokenizer::new(";", '\'').unwrap();
        assert_eq!(tokenizer.split("'a;b';\"c\"").unwrap(), vec!["a;b", "\"c\""]);
    }

    #[test]
    fn test_continuation_lines() {
        let mut rest = vec!["line two\n".to_string(), "end\",x\n".to_string()].into_iter();
        let fields = comma()
            .split_continued("a,\"line one\n", 3, || Ok(rest.next()))
            .unwrap();
        assert_eq!(fields, vec!["a", "line one\nline two\nend", "x"]);
        assert!(rest.next().is_none());
    }

    #[test]
    fn test_continuation_keeps_crlf() {
        let mut rest = vec!["b\"\r\n".to_string()].into_iter();
        let fields = comma()
            .split_continued("\"a\r\n", 1, || Ok(rest.next()))
            .unwrap();
        assert_eq!(fields, vec!["a\r\nb"]);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = comma().split("a,\"open").unwrap_err();
        assert_eq!(err.parse_kind(), Some(&ParseErrorKind::UnterminatedQuote));

        let mut rest = vec!["still open\n".to_string()].into_iter();
        let err = comma()
            .split_continued("\"x\n", 7, || Ok(rest.next()))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Parse { line: 7, kind: ParseErrorKind::UnterminatedQuote }
        ));
    }

    #[test]
    fn test_text_after_closing_quote() {
        let err = comma().split("\"a,\"b").unwrap_err();
        assert_eq!(
            err.parse_kind(),
            Some(&ParseErrorKind::UnexpectedCharAfterQuote('b'))
        );
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        assert!(matches!(FieldTokenizer::new("", '"'), Err(Error::Config(_))));
    }

    proptest! {
        #[test]
        fn prop_join_then_split(
            values in proptest::collection::vec("[a-z0-9 ._-]{0,8}", 1..12),
            delimiter in prop::sample::select(vec![",", "\t", ";", "|", "::", "<>"]),
        ) {
            let tokenizer = FieldTokenizer::new(delimiter, '"').unwrap();
            let line = format!("{}\n", values.join(delimiter));
            prop_assert_eq!(tokenizer.split(&line).unwrap(), values);
        }
    }
}
