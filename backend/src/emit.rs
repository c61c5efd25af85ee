//! Record emitter
//!
//! Copies one record from the text file to an output stream. Authors put
//! the delimiter on a line of its own, so the line break right after it is
//! layout: at most one leading `\n`, `\r` or `\r\n` is dropped.

use crate::source::GlyphReader;
use std::io::{self, Read, Seek, Write};

/// Write the record starting at `offset` to `out`, stopping before the next
/// `delimiter` or at end of stream. Returns the number of bytes written.
///
/// Bytes are copied exactly as stored, including undecodable ones. A
/// delimiter directly after a dropped `\r` ends the record; the scan never
/// continues into the following record.
pub fn emit<R: Read + Seek, W: Write>(
    reader: &mut GlyphReader<R>,
    offset: u64,
    delimiter: char,
    out: &mut W,
) -> io::Result<u64> {
    reader.seek(offset)?;

    let mut first = match reader.next_glyph()? {
        Some(glyph) if !glyph.is(delimiter) => glyph,
        _ => return Ok(0),
    };
    if first.is('\r') {
        first = match reader.next_glyph()? {
            Some(glyph) if !glyph.is(delimiter) => glyph,
            _ => return Ok(0),
        };
    }

    let mut written = 0u64;
    if !first.is('\n') {
        out.write_all(first.as_bytes())?;
        written += first.as_bytes().len() as u64;
    }
    while let Some(glyph) = reader.next_glyph()? {
        if glyph.is(delimiter) {
            break;
        }
        out.write_all(glyph.as_bytes())?;
        written += glyph.as_bytes().len() as u64;
    }
    Ok(written)
}
