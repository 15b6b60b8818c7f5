//! Normalization of user-supplied delimiter and candidate strings.
//!
//! Two separate steps turn what a user typed into the characters the reader
//! splits on:
//!
//! 1. A whole token may be a shorthand name (`tab`, `pipe`, `soh`, ...),
//!    resolved by [`resolve_shorthand`].
//! 2. Anything that is not a shorthand goes through [`translate`], which
//!    decodes backslash escapes such as `\t` or `\u00e9`.
//!
//! Shorthands are never escape-translated and translated text is never
//! looked up as a shorthand. None of this is applied to data content.

use crate::common::{Error, Result};

/// Named delimiters accepted in place of the literal character.
const SHORTHANDS: &[(&str, char)] = &[
    ("comma", ','),
    ("tab", '\t'),
    ("pipe", '|'),
    ("semicolon", ';'),
    ("colon", ':'),
    ("space", ' '),
    ("soh", '\u{01}'),
    ("rs", '\u{1E}'),
    ("us", '\u{1F}'),
];

/// Resolves a shorthand delimiter name, case-insensitively.
pub fn resolve_shorthand(token: &str) -> Option<char> {
    SHORTHANDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|&(_, c)| c)
}

/// Decodes backslash escape sequences in `raw`.
///
/// Unknown escapes such as `\q` are kept verbatim, backslash included.
pub fn translate(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(next) = chars.next() else {
            // Trailing lone backslash
            out.push('\\');
            break;
        };

        match next {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            'x' => out.push(hex_escape(&mut chars, 2, raw)?),
            'u' => out.push(hex_escape(&mut chars, 4, raw)?),
            'U' => out.push(hex_escape(&mut chars, 8, raw)?),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        },
                        None => break,
                    }
                }
                out.push(scalar(value, raw)?);
            },
            other => {
                out.push('\\');
                out.push(other);
            },
        }
    }

    Ok(out)
}

fn hex_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
    raw: &str,
) -> Result<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| Error::config(format!("truncated escape sequence in {raw:?}")))?;
        value = value * 16 + digit;
    }
    scalar(value, raw)
}

fn scalar(value: u32, raw: &str) -> Result<char> {
    char::from_u32(value).ok_or_else(|| {
        Error::config(format!(
            "escape sequence in {raw:?} is not a valid character (U+{value:04X})"
        ))
    })
}

/// Turns a user-supplied delimiter into the literal string to split on.
pub fn normalize_delimiter(raw: &str) -> Result<String> {
    let delimiter = match resolve_shorthand(raw) {
        Some(c) => c.to_string(),
        None => translate(raw)?,
    };
    if delimiter.is_empty() {
        return Err(Error::config("delimiter must not be empty"));
    }
    Ok(delimiter)
}

/// Turns a user-supplied candidate set into its ordered characters.
pub fn normalize_candidates(raw: &str) -> Result<String> {
    match resolve_shorthand(raw) {
        Some(c) => Ok(c.to_string()),
        None => translate(raw),
    }
}
