//! Offset index builder
//!
//! One linear pass over the text file records where every record starts.
//! Writing the index is best-effort; the record count it returns is not.

use super::OFFSET_BYTES;
use crate::source::GlyphReader;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Scan the whole text and write one offset per record to `index_path`.
///
/// Returns the number of records, which is never less than 1: a file
/// without any delimiter (including an empty file) holds one record.
///
/// The index is only written when `index_path` is absent or a regular file.
/// If it cannot be created, or a write fails midway, scanning continues and
/// the count is still accurate. The reader is left at end of stream.
///
/// # Errors
/// Only read errors on the text stream are returned.
pub fn build<R: Read + Seek>(
    reader: &mut GlyphReader<R>,
    index_path: &Path,
    delimiter: char,
) -> io::Result<u64> {
    let mut sink = open_sink(index_path);
    reader.rewind()?;

    let mut count = 0u64;
    loop {
        let offset = reader.position();
        let found = reader.skip_record(delimiter)?;
        count += 1;

        let failed = match sink.as_mut() {
            Some(w) => w.write_all(&(offset as i64).to_ne_bytes()).err(),
            None => None,
        };
        if let Some(e) = failed {
            warn!(
                path = %index_path.display(),
                error = %e,
                "index write failed, continuing count only"
            );
            sink = None;
        }

        if !found {
            break;
        }
    }

    if let Some(mut w) = sink {
        match w.flush() {
            Ok(()) => debug!(
                path = %index_path.display(),
                records = count,
                bytes = count * OFFSET_BYTES,
                "index written"
            ),
            Err(e) => warn!(path = %index_path.display(), error = %e, "index flush failed"),
        }
    }
    Ok(count)
}

fn open_sink(path: &Path) -> Option<BufWriter<File>> {
    if let Ok(meta) = fs::metadata(path) {
        if !meta.is_file() {
            warn!(path = %path.display(), "index path is not a regular file, not writing");
            return None;
        }
    }
    match File::create(path) {
        Ok(file) => Some(BufWriter::new(file)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot create index file");
            None
        }
    }
}
