//! Character-at-a-time access to the motto text file
//!
//! Scanning and emission both walk the text one code point at a time while
//! tracking the byte offset, so index entries always point at the first byte
//! of a record regardless of how wide the delimiter is encoded.

use crate::error::{MotdError, MotdResult};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const BUF_SIZE: usize = 8 * 1024;

/// Character encoding of the motto text file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-8; invalid bytes are passed through as opaque single-byte units
    #[default]
    Utf8,

    /// ISO-8859-1; every byte is the code point of the same value
    Latin1,
}

impl TextEncoding {
    /// Whether `c` can appear as a single unit in this encoding.
    pub fn can_encode(self, c: char) -> bool {
        match self {
            TextEncoding::Utf8 => true,
            TextEncoding::Latin1 => u32::from(c) <= 0xFF,
        }
    }
}

/// One decoded unit of text together with the bytes it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    code: Option<char>,
    raw: [u8; 4],
    len: u8,
}

impl Glyph {
    fn new(bytes: &[u8], code: Option<char>) -> Self {
        let mut raw = [0u8; 4];
        raw[..bytes.len()].copy_from_slice(bytes);
        Self {
            code,
            raw,
            len: bytes.len() as u8,
        }
    }

    /// Decoded code point; `None` for an undecodable byte.
    pub fn code(&self) -> Option<char> {
        self.code
    }

    pub fn is(&self, c: char) -> bool {
        self.code == Some(c)
    }

    /// The bytes exactly as they appear in the file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..usize::from(self.len)]
    }
}

/// Buffered glyph reader over a seekable byte stream
///
/// Keeps its own byte position so [`GlyphReader::position`] never needs a
/// syscall and always reflects the glyphs consumed so far.
#[derive(Debug)]
pub struct GlyphReader<R> {
    inner: R,
    encoding: TextEncoding,
    buf: Box<[u8]>,
    start: usize,
    end: usize,
    pos: u64,
    eof: bool,
}

impl<R: Read + Seek> GlyphReader<R> {
    pub fn new(inner: R, encoding: TextEncoding) -> Self {
        Self {
            inner,
            encoding,
            buf: vec![0u8; BUF_SIZE].into_boxed_slice(),
            start: 0,
            end: 0,
            pos: 0,
            eof: false,
        }
    }

    /// Byte offset of the next glyph.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.start = 0;
        self.end = 0;
        self.eof = false;
        self.pos = offset;
        Ok(())
    }

    pub fn rewind(&mut self) -> io::Result<()> {
        self.seek(0)
    }

    /// Read the next glyph, or `None` at end of stream.
    pub fn next_glyph(&mut self) -> io::Result<Option<Glyph>> {
        self.fill(1)?;
        if self.start == self.end {
            return Ok(None);
        }
        let lead = self.buf[self.start];
        let glyph = match self.encoding {
            TextEncoding::Latin1 => Glyph::new(&[lead], Some(char::from(lead))),
            TextEncoding::Utf8 => {
                let width = utf8_width(lead);
                if width > 1 {
                    self.fill(width)?;
                }
                let avail = &self.buf[self.start..self.end];
                match avail
                    .get(..width)
                    .and_then(|bytes| std::str::from_utf8(bytes).ok())
                    .and_then(|s| s.chars().next())
                {
                    Some(c) => Glyph::new(&avail[..width], Some(c)),
                    None => Glyph::new(&[lead], None),
                }
            }
        };
        let consumed = usize::from(glyph.len);
        self.start += consumed;
        self.pos += consumed as u64;
        Ok(Some(glyph))
    }

    /// Consume glyphs through the next `delimiter`.
    ///
    /// Returns `false` if end of stream was reached instead.
    pub fn skip_record(&mut self, delimiter: char) -> io::Result<bool> {
        while let Some(glyph) = self.next_glyph()? {
            if glyph.is(delimiter) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Make at least `want` bytes available unless the stream ends first.
    fn fill(&mut self, want: usize) -> io::Result<()> {
        if self.end - self.start >= want || self.eof {
            return Ok(());
        }
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;
        while self.end < want {
            match self.inner.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => self.end += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Sequence length announced by a UTF-8 lead byte; 0 if it cannot start one.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// The opened motto text file
#[derive(Debug)]
pub struct TextSource {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
    reader: GlyphReader<File>,
}

impl TextSource {
    /// Open `path` for reading.
    ///
    /// # Errors
    /// [`MotdError::MissingSource`] if the path does not exist, is not a
    /// regular file, or cannot be opened.
    pub fn open(path: &Path, encoding: TextEncoding) -> MotdResult<Self> {
        let missing = |source| MotdError::MissingSource {
            path: path.to_path_buf(),
            source,
        };
        let meta = fs::metadata(path).map_err(missing)?;
        if !meta.is_file() {
            return Err(missing(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let file = File::open(path).map_err(missing)?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
            reader: GlyphReader::new(file, encoding),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time, if the platform reports one.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Size in bytes at open time.
    pub fn byte_len(&self) -> u64 {
        self.len
    }

    pub fn reader(&mut self) -> &mut GlyphReader<File> {
        &mut self.reader
    }

    /// Wrap an I/O failure on this file as [`MotdError::SourceRead`].
    pub(crate) fn read_error(&self, source: io::Error) -> MotdError {
        MotdError::SourceRead {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(bytes: &[u8], encoding: TextEncoding) -> GlyphReader<Cursor<Vec<u8>>> {
        GlyphReader::new(Cursor::new(bytes.to_vec()), encoding)
    }

    #[test]
    fn test_utf8_multibyte_advances_position() {
        let mut r = reader("a÷b".as_bytes(), TextEncoding::Utf8);
        assert!(r.next_glyph().unwrap().unwrap().is('a'));
        assert_eq!(r.position(), 1);
        let div = r.next_glyph().unwrap().unwrap();
        assert!(div.is('÷'));
        assert_eq!(div.as_bytes(), "÷".as_bytes());
        assert_eq!(r.position(), 3);
        assert!(r.next_glyph().unwrap().unwrap().is('b'));
        assert!(r.next_glyph().unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_single_opaque_byte() {
        let mut r = reader(&[0xFF, b'x'], TextEncoding::Utf8);
        let bad = r.next_glyph().unwrap().unwrap();
        assert_eq!(bad.code(), None);
        assert_eq!(bad.as_bytes(), &[0xFF]);
        assert_eq!(r.position(), 1);
        assert!(r.next_glyph().unwrap().unwrap().is('x'));
    }

    #[test]
    fn test_truncated_utf8_sequence_at_eof() {
        // First two bytes of a three-byte sequence
        let mut r = reader(&[0xE2, 0x82], TextEncoding::Utf8);
        assert_eq!(r.next_glyph().unwrap().unwrap().as_bytes(), &[0xE2]);
        assert_eq!(r.next_glyph().unwrap().unwrap().as_bytes(), &[0x82]);
        assert!(r.next_glyph().unwrap().is_none());
    }

    #[test]
    fn test_latin1_maps_bytes_to_code_points() {
        let mut r = reader(&[b'a', 0xF7, b'b'], TextEncoding::Latin1);
        r.next_glyph().unwrap();
        let div = r.next_glyph().unwrap().unwrap();
        assert!(div.is('\u{F7}'));
        assert_eq!(div.as_bytes(), &[0xF7]);
    }

    #[test]
    fn test_sequence_spanning_buffer_boundary() {
        let mut text = vec![b'x'; BUF_SIZE - 1];
        text.extend_from_slice("÷".as_bytes());
        let mut r = reader(&text, TextEncoding::Utf8);
        assert!(r.skip_record('÷').unwrap());
        assert_eq!(r.position(), text.len() as u64);
    }

    #[test]
    fn test_seek_resets_buffer() {
        let mut r = reader(b"abcdef", TextEncoding::Utf8);
        r.next_glyph().unwrap();
        r.seek(4).unwrap();
        assert!(r.next_glyph().unwrap().unwrap().is('e'));
        assert_eq!(r.position(), 5);
    }

    #[test]
    fn test_open_directory_is_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextSource::open(dir.path(), TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, MotdError::MissingSource { .. }));
    }
}
