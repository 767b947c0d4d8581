//! Special display byte decoding
//!
//! The simulator sends CDU lines as bytes where eight codes in the
//! 0xA1..=0xBB range are glyph substitutes. Every other byte is UTF-8.
//! Substitution happens before text interpretation, so a substitute byte
//! can never be part of a multi-byte sequence.

use core::fmt;

use heapless::String;

/// Substitute bytes and the glyphs they stand for
pub const GLYPHS: [(u8, char); 8] = [
    (0xB6, '\u{2588}'), // cursor block
    (0xBB, '\u{2192}'), // right arrow
    (0xAB, '\u{2190}'), // left arrow
    (0xA1, '\u{2591}'), // data entry box
    (0xA9, '\u{2022}'), // bullet
    (0xB1, '\u{00B1}'), // plus-minus
    (0xAE, '\u{2195}'), // up-down arrow
    (0xB0, '\u{00B0}'), // degree
];

/// Errors from line decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphError {
    /// Payload is not valid UTF-8 once substitutes are removed
    InvalidUtf8,
    /// Output buffer too small for the requested width
    BufferTooSmall,
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphError::InvalidUtf8 => write!(f, "invalid UTF-8 in line payload"),
            GlyphError::BufferTooSmall => write!(f, "line buffer too small"),
        }
    }
}

/// Look up the glyph for a substitute byte
pub fn glyph_for(byte: u8) -> Option<char> {
    GLYPHS
        .iter()
        .find(|(code, _)| *code == byte)
        .map(|(_, glyph)| *glyph)
}

/// Decode a raw line payload into display text
///
/// At most `max_chars` characters are kept. The whole payload is validated
/// even past that point: a payload with any invalid sequence is rejected
/// as a unit.
pub fn decode_line<const N: usize>(payload: &[u8], max_chars: usize) -> Result<String<N>, GlyphError> {
    let mut out = String::new();
    let mut kept = 0usize;

    for segment in payload.split_inclusive(|b| glyph_for(*b).is_some()) {
        // Each segment ends with at most one substitute byte
        let (text, glyph) = match segment.split_last() {
            Some((last, head)) => match glyph_for(*last) {
                Some(glyph) => (head, Some(glyph)),
                None => (segment, None),
            },
            None => continue,
        };

        let text = core::str::from_utf8(text).map_err(|_| GlyphError::InvalidUtf8)?;
        for c in text.chars().chain(glyph) {
            if kept < max_chars {
                out.push(c).map_err(|_| GlyphError::BufferTooSmall)?;
                kept += 1;
            }
        }
    }

    Ok(out)
}
