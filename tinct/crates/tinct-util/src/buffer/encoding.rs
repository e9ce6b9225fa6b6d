//! Text encodings and best-effort decoding.
//!
//! Decoding never fails. Bytes that are not valid under the chosen encoding
//! become one character each (the Latin-1 value of the byte) and an
//! [`EncodingIssue`] records where that happened.

use std::fmt;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Number of leading bytes inspected when sniffing BOM-less UTF-16.
const SNIFF_LEN: usize = 512;

/// Encoding of a buffer's raw bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// 7-bit ASCII
    Ascii,
    /// UTF-8, with or without a BOM
    Utf8,
    /// UTF-16 little endian
    Utf16Le,
    /// UTF-16 big endian
    Utf16Be,
}

impl Encoding {
    /// Detects the encoding of `bytes`.
    ///
    /// A byte order mark decides outright. Without one, a sample where every
    /// other byte is NUL is taken as UTF-16 of the matching endianness; pure
    /// 7-bit input is ASCII and everything else is UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinct_util::Encoding;
    ///
    /// assert_eq!(Encoding::detect(b"plain"), Encoding::Ascii);
    /// assert_eq!(Encoding::detect("caf\u{e9}".as_bytes()), Encoding::Utf8);
    /// assert_eq!(Encoding::detect(&[0xFF, 0xFE, b'a', 0]), Encoding::Utf16Le);
    /// assert_eq!(Encoding::detect(&[0, b'h', 0, b'i']), Encoding::Utf16Be);
    /// ```
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&UTF8_BOM) {
            return Self::Utf8;
        }
        if bytes.starts_with(&UTF16_LE_BOM) {
            return Self::Utf16Le;
        }
        if bytes.starts_with(&UTF16_BE_BOM) {
            return Self::Utf16Be;
        }
        if let Some(encoding) = sniff_utf16(bytes) {
            return encoding;
        }
        if bytes.is_ascii() {
            Self::Ascii
        } else {
            Self::Utf8
        }
    }

    /// Length of this encoding's byte order mark at the start of `bytes`,
    /// or 0 when there is none.
    pub fn bom_len(self, bytes: &[u8]) -> usize {
        match self {
            Self::Utf8 if bytes.starts_with(&UTF8_BOM) => UTF8_BOM.len(),
            Self::Utf16Le if bytes.starts_with(&UTF16_LE_BOM) => UTF16_LE_BOM.len(),
            Self::Utf16Be if bytes.starts_with(&UTF16_BE_BOM) => UTF16_BE_BOM.len(),
            _ => 0,
        }
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn sniff_utf16(bytes: &[u8]) -> Option<Encoding> {
    let sample = &bytes[..bytes.len().min(SNIFF_LEN)];
    let pairs = sample.len() / 2;
    if pairs == 0 {
        return None;
    }

    let mut even_nul = 0;
    let mut odd_nul = 0;
    for (i, &b) in sample[..pairs * 2].iter().enumerate() {
        if b == 0 {
            if i % 2 == 0 {
                even_nul += 1;
            } else {
                odd_nul += 1;
            }
        }
    }

    // Latin text in UTF-16LE carries its NUL in the high (odd) byte.
    if even_nul == 0 && odd_nul * 2 >= pairs {
        Some(Encoding::Utf16Le)
    } else if odd_nul == 0 && even_nul * 2 >= pairs {
        Some(Encoding::Utf16Be)
    } else {
        None
    }
}

/// Kind of decoding problem found in a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// Byte not valid at this position (non-ASCII in ASCII, bad UTF-8)
    InvalidByte,
    /// Multi-byte UTF-8 sequence cut off by the end of the buffer
    TruncatedSequence,
    /// UTF-16 surrogate without its partner
    UnpairedSurrogate,
    /// Single byte left over at the end of UTF-16 input
    OddTrailingByte,
}

/// A decoding problem and where it landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    /// What went wrong.
    pub kind: EncodingIssueKind,
    /// Character offset of the replacement character.
    pub offset: usize,
    /// Byte position of the offending input.
    pub byte_pos: usize,
}

pub(crate) struct Decoded {
    pub chars: Vec<char>,
    pub issues: Vec<EncodingIssue>,
}

/// Decodes `bytes` as `encoding`, skipping a leading BOM.
pub(crate) fn decode(bytes: &[u8], encoding: Encoding) -> Decoded {
    let start = encoding.bom_len(bytes);
    let mut out = Decoded {
        chars: Vec::with_capacity(bytes.len() - start),
        issues: Vec::new(),
    };

    match encoding {
        Encoding::Ascii => decode_ascii(bytes, start, &mut out),
        Encoding::Utf8 => decode_utf8(bytes, start, &mut out),
        Encoding::Utf16Le => decode_utf16(bytes, start, u16::from_le_bytes, &mut out),
        Encoding::Utf16Be => decode_utf16(bytes, start, u16::from_be_bytes, &mut out),
    }

    out
}

impl Decoded {
    fn push_raw(&mut self, byte: u8, byte_pos: usize, kind: EncodingIssueKind) {
        self.issues.push(EncodingIssue {
            kind,
            offset: self.chars.len(),
            byte_pos,
        });
        self.chars.push(char::from(byte));
    }
}

fn decode_ascii(bytes: &[u8], start: usize, out: &mut Decoded) {
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if b.is_ascii() {
            out.chars.push(char::from(b));
        } else {
            out.push_raw(b, i, EncodingIssueKind::InvalidByte);
        }
    }
}

fn decode_utf8(bytes: &[u8], start: usize, out: &mut Decoded) {
    let mut pos = start;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        match std::str::from_utf8(rest) {
            Ok(text) => {
                out.chars.extend(text.chars());
                return;
            },
            Err(e) => {
                let valid = e.valid_up_to();
                if let Ok(text) = std::str::from_utf8(&rest[..valid]) {
                    out.chars.extend(text.chars());
                }
                let (bad_len, kind) = match e.error_len() {
                    Some(len) => (len, EncodingIssueKind::InvalidByte),
                    None => (rest.len() - valid, EncodingIssueKind::TruncatedSequence),
                };
                for i in 0..bad_len {
                    let at = pos + valid + i;
                    out.push_raw(bytes[at], at, kind);
                }
                pos += valid + bad_len;
            },
        }
    }
}

fn decode_utf16(bytes: &[u8], start: usize, unit: fn([u8; 2]) -> u16, out: &mut Decoded) {
    let body = &bytes[start..];
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();

    let mut i = 0;
    while i < units.len() {
        let u = units[i];
        let byte_pos = start + i * 2;
        match u {
            0xD800..=0xDBFF => {
                let low = units.get(i + 1).copied().filter(|l| (0xDC00..=0xDFFF).contains(l));
                if let Some(low) = low {
                    let cp = 0x10000 + ((u32::from(u) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    out.chars.push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
                    i += 2;
                    continue;
                }
                push_unpaired(out, byte_pos);
            },
            0xDC00..=0xDFFF => push_unpaired(out, byte_pos),
            _ => out
                .chars
                .push(char::from_u32(u32::from(u)).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
        i += 1;
    }

    if body.len() % 2 == 1 {
        let at = bytes.len() - 1;
        out.push_raw(bytes[at], at, EncodingIssueKind::OddTrailingByte);
    }
}

fn push_unpaired(out: &mut Decoded, byte_pos: usize) {
    out.issues.push(EncodingIssue {
        kind: EncodingIssueKind::UnpairedSurrogate,
        offset: out.chars.len(),
        byte_pos,
    });
    out.chars.push(char::REPLACEMENT_CHARACTER);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    fn utf16be(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect()
    }

    #[test]
    fn test_detect_boms() {
        assert_eq!(Encoding::detect(&[0xEF, 0xBB, 0xBF, b'x']), Encoding::Utf8);
        assert_eq!(Encoding::detect(&[0xFF, 0xFE]), Encoding::Utf16Le);
        assert_eq!(Encoding::detect(&[0xFE, 0xFF]), Encoding::Utf16Be);
    }

    #[test]
    fn test_detect_without_bom() {
        assert_eq!(Encoding::detect(b""), Encoding::Ascii);
        assert_eq!(Encoding::detect(b"int x;"), Encoding::Ascii);
        assert_eq!(Encoding::detect("λ".as_bytes()), Encoding::Utf8);
        assert_eq!(Encoding::detect(&utf16le("int x;")), Encoding::Utf16Le);
        assert_eq!(Encoding::detect(&utf16be("int x;")), Encoding::Utf16Be);
    }

    #[test]
    fn test_decode_utf8_skips_bom() {
        let decoded = decode(&[0xEF, 0xBB, 0xBF, b'o', b'k'], Encoding::Utf8);
        assert_eq!(decoded.chars, vec!['o', 'k']);
        assert!(decoded.issues.is_empty());
    }

    #[test]
    fn test_decode_utf8_invalid_byte() {
        let decoded = decode(&[b'a', 0xFF, b'b'], Encoding::Utf8);
        assert_eq!(decoded.chars, vec!['a', '\u{FF}', 'b']);
        assert_eq!(
            decoded.issues,
            vec![EncodingIssue {
                kind: EncodingIssueKind::InvalidByte,
                offset: 1,
                byte_pos: 1,
            }]
        );
    }

    #[test]
    fn test_decode_utf8_truncated_tail() {
        // First two bytes of a three-byte sequence.
        let decoded = decode(&[b'a', 0xE2, 0x82], Encoding::Utf8);
        assert_eq!(decoded.chars.len(), 3);
        assert_eq!(decoded.issues.len(), 2);
        assert!(decoded
            .issues
            .iter()
            .all(|i| i.kind == EncodingIssueKind::TruncatedSequence));
    }

    #[test]
    fn test_decode_ascii_high_byte() {
        let decoded = decode(&[b'a', 0xE9], Encoding::Ascii);
        assert_eq!(decoded.chars, vec!['a', 'é']);
        assert_eq!(decoded.issues[0].kind, EncodingIssueKind::InvalidByte);
    }

    #[test]
    fn test_decode_utf16_surrogate_pair() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(utf16le("a😀b"));
        let decoded = decode(&bytes, Encoding::Utf16Le);
        assert_eq!(decoded.chars, vec!['a', '😀', 'b']);
        assert!(decoded.issues.is_empty());
    }

    #[test]
    fn test_decode_utf16_unpaired_surrogate() {
        let bytes = [0x00, 0xD8, b'a', 0x00];
        let decoded = decode(&bytes, Encoding::Utf16Le);
        assert_eq!(decoded.chars, vec![char::REPLACEMENT_CHARACTER, 'a']);
        assert_eq!(decoded.issues[0].kind, EncodingIssueKind::UnpairedSurrogate);
        assert_eq!(decoded.issues[0].byte_pos, 0);
    }

    #[test]
    fn test_decode_utf16_odd_trailing_byte() {
        let decoded = decode(&[0, b'a', b'b'], Encoding::Utf16Be);
        assert_eq!(decoded.chars, vec!['a', 'b']);
        assert_eq!(decoded.issues[0].kind, EncodingIssueKind::OddTrailingByte);
        assert_eq!(decoded.issues[0].byte_pos, 2);
    }
}
