//! Byte Order Mark (BOM) detection for the first line of a text stream.
//!
//! Only a UTF-8 BOM is ever removed: the reader decodes lines as UTF-8, so a
//! UTF-16 or UTF-32 mark is reported to the caller and the bytes are left alone.

/// Encodings that can be announced by a leading BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
            BomKind::Utf32Le => &UTF32_LE_BOM,
            BomKind::Utf32Be => &UTF32_BE_BOM,
        }
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-32 little-endian BOM bytes.
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
/// UTF-32 big-endian BOM bytes.
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];

/// Identifies the BOM at the start of `bytes`, if any.
///
/// The 4-byte UTF-32 marks are checked before UTF-16 since `FF FE` is a
/// prefix of the UTF-32 little-endian mark.
pub fn detect_bom(bytes: &[u8]) -> Option<BomKind> {
    [
        BomKind::Utf32Be,
        BomKind::Utf32Le,
        BomKind::Utf8,
        BomKind::Utf16Be,
        BomKind::Utf16Le,
    ]
    .into_iter()
    .find(|kind| bytes.starts_with(kind.as_bytes()))
}

/// Removes a leading UTF-8 BOM from `bytes`.
///
/// Returns the detected BOM (of any kind) together with the remaining bytes.
pub fn strip_utf8_bom(bytes: &[u8]) -> (Option<BomKind>, &[u8]) {
    match detect_bom(bytes) {
        Some(BomKind::Utf8) => (Some(BomKind::Utf8), &bytes[UTF8_BOM.len()..]),
        other => (other, bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_utf8_bom() {
        let line = b"\xEF\xBB\xBFname,age\n";
        let (kind, rest) = strip_utf8_bom(line);
        assert_eq!(kind, Some(BomKind::Utf8));
        assert_eq!(rest, b"name,age\n");
    }

    #[test]
    fn test_utf16_bom_is_reported_not_stripped() {
        let line = [0xFF, 0xFE, b'a', 0x00];
        let (kind, rest) = strip_utf8_bom(&line);
        assert_eq!(kind, Some(BomKind::Utf16Le));
        assert_eq!(rest, &line);
    }

    #[test]
    fn test_utf32_le_wins_over_utf16_le() {
        assert_eq!(detect_bom(&UTF32_LE_BOM), Some(BomKind::Utf32Le));
    }

    #[test]
    fn test_no_bom() {
        assert_eq!(detect_bom(b"a,b"), None);
        assert_eq!(strip_utf8_bom(b""), (None, &b""[..]));
    }
}
