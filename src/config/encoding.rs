//! Text decoding for configuration files of unknown encoding.
//!
//! Files are decoded by [`decode`], a pure function from bytes to text. A
//! byte-order mark, when present, nominates the first candidate; UTF-8,
//! UTF-16 and Windows-1252 are then tried in that order and the first one
//! that decodes without error wins.

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use std::fmt;

/// An encoding a configuration file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 preceded by `EF BB BF`.
    Utf8Bom,
    /// UTF-8 without a signature.
    Utf8,
    /// UTF-16 honoring a leading signature, little endian otherwise.
    Utf16,
    /// UTF-16 little endian preceded by `FF FE`.
    Utf16Le,
    /// UTF-16 big endian preceded by `FE FF`.
    Utf16Be,
    /// UTF-32 little endian preceded by `FF FE 00 00`.
    Utf32Le,
    /// UTF-32 big endian preceded by `00 00 FE FF`.
    Utf32Be,
    /// The legacy Windows western code page.
    Windows1252,
}

// Longest first: the UTF-32 LE mark starts with the UTF-16 LE one.
const SIGNATURES: [(&[u8], TextEncoding); 5] = [
    (&[0xFF, 0xFE, 0x00, 0x00], TextEncoding::Utf32Le),
    (&[0x00, 0x00, 0xFE, 0xFF], TextEncoding::Utf32Be),
    (&[0xEF, 0xBB, 0xBF], TextEncoding::Utf8Bom),
    (&[0xFF, 0xFE], TextEncoding::Utf16Le),
    (&[0xFE, 0xFF], TextEncoding::Utf16Be),
];

/// Encodings tried after the signature hint, in order.
const FALLBACKS: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Utf16,
    TextEncoding::Windows1252,
];

/// Bytes Windows-1252 leaves unassigned.
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

impl TextEncoding {
    /// The byte-order mark of this encoding, if it has one.
    pub fn signature(self) -> Option<&'static [u8]> {
        SIGNATURES
            .iter()
            .find(|(_, encoding)| *encoding == self)
            .map(|(bom, _)| *bom)
    }

    /// Decode `bytes`, returning `None` on the first malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => strict(UTF_8, bytes),
            TextEncoding::Utf8Bom => strict(UTF_8, strip(bytes, self)?),
            TextEncoding::Utf16Le => strict(UTF_16LE, strip(bytes, self)?),
            TextEncoding::Utf16Be => strict(UTF_16BE, strip(bytes, self)?),
            TextEncoding::Utf16 => match sniff_bom(bytes) {
                Some(TextEncoding::Utf16Be) => TextEncoding::Utf16Be.decode(bytes),
                Some(TextEncoding::Utf16Le) => TextEncoding::Utf16Le.decode(bytes),
                _ => strict(UTF_16LE, bytes),
            },
            TextEncoding::Utf32Le => utf32(strip(bytes, self)?, u32::from_le_bytes),
            TextEncoding::Utf32Be => utf32(strip(bytes, self)?, u32::from_be_bytes),
            TextEncoding::Windows1252 => {
                if bytes.iter().any(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
                    return None;
                }
                strict(WINDOWS_1252, bytes)
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf16Le => "utf-16-le",
            TextEncoding::Utf16Be => "utf-16-be",
            TextEncoding::Utf32Le => "utf-32-le",
            TextEncoding::Utf32Be => "utf-32-be",
            TextEncoding::Windows1252 => "cp1252",
        };
        f.write_str(label)
    }
}

/// Find the encoding announced by a leading byte-order mark.
pub fn sniff_bom(bytes: &[u8]) -> Option<TextEncoding> {
    SIGNATURES
        .iter()
        .find(|(bom, _)| bytes.starts_with(bom))
        .map(|(_, encoding)| *encoding)
}

/// The ordered encodings to try for a file whose signature hinted `hint`.
pub fn candidates(hint: Option<TextEncoding>) -> Vec<TextEncoding> {
    hint.into_iter().chain(FALLBACKS).collect()
}

/// Decode `bytes` with the first candidate that accepts them.
///
/// Returns the text together with the encoding that produced it, or `None`
/// when every candidate rejects the input.
pub fn decode(bytes: &[u8]) -> Option<(String, TextEncoding)> {
    candidates(sniff_bom(bytes))
        .into_iter()
        .find_map(|encoding| encoding.decode(bytes).map(|text| (text, encoding)))
}

fn strip(bytes: &[u8], encoding: TextEncoding) -> Option<&[u8]> {
    encoding.signature().and_then(|bom| bytes.strip_prefix(bom))
}

fn strict(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

fn utf32(bytes: &[u8], word: fn([u8; 4]) -> u32) -> Option<String> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    bytes
        .chunks_exact(4)
        .map(|chunk| char::from_u32(word([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect()
}
