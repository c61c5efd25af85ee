//! Index validation and record selection
//!
//! Decides whether the on-disk index can be trusted, draws a record number
//! and resolves it to a byte offset in the text file. Up to two record
//! counts can be known by the time an offset is needed:
//!
//! - `built`: returned by a rebuild triggered in this call
//! - `indexed`: derived from the size of the index file
//!
//! Either one alone is trusted. If both exist they must agree, otherwise the
//! index is reported corrupt; this is the only integrity check on the index.
//!
//! # Fallback
//!
//! When no offset can be read from the index, or the offset cannot be
//! applied to the text file, the record is located by a linear scan that
//! wraps to the start of the file if it runs out of text early.

use super::{builder, is_fresh, read_entry, OFFSET_BYTES};
use crate::error::{MotdError, MotdResult};
use crate::rng::RngContext;
use crate::source::{GlyphReader, TextSource};
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, warn};

/// How the selected offset was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedVia {
    /// Read from the offset index
    Index,

    /// Found by scanning the text file
    Scan,
}

/// Result of a successful selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Zero-based record number
    pub record: u64,

    /// Byte offset of the record in the text file
    pub offset: u64,

    /// Authoritative number of records
    pub record_count: u64,

    pub via: ResolvedVia,
}

/// What reading the index produced.
///
/// `index_count` survives a failed entry read; `pick` does not.
#[derive(Debug, Default)]
struct Probe {
    index_count: Option<u64>,
    pick: Option<(u64, i64)>,
}

/// Pick a uniformly random record of `source` and position its reader at
/// the record's first byte.
///
/// The index at `index_path` is rebuilt first when `force_rebuild` is set or
/// it is missing, not a regular file, or older than the text.
///
/// # Errors
/// - [`MotdError::NoCandidates`] if no record count can be derived
/// - [`MotdError::CorruptIndex`] if the rebuilt and indexed counts differ
/// - [`MotdError::SourceRead`] if scanning the text fails
pub fn select(
    source: &mut TextSource,
    index_path: &Path,
    delimiter: char,
    force_rebuild: bool,
    rng: &mut RngContext,
) -> MotdResult<Selection> {
    let text_modified = source.modified();

    let built_count = if force_rebuild || !is_fresh(index_path, text_modified) {
        debug!(path = %index_path.display(), force_rebuild, "rebuilding index");
        let count = builder::build(source.reader(), index_path, delimiter)
            .map_err(|e| source.read_error(e))?;
        Some(count)
    } else {
        None
    };

    let probe = probe_index(index_path, text_modified, rng);
    let record_count = reconcile(built_count, probe.index_count)?;
    debug!(
        built = ?built_count,
        indexed = ?probe.index_count,
        record_count,
        "record count settled"
    );

    if let Some((record, offset)) = probe.pick {
        if let Some(offset) = seek_to_offset(source, offset) {
            return Ok(Selection {
                record,
                offset,
                record_count,
                via: ResolvedVia::Index,
            });
        }
    }

    let record = match probe.pick {
        Some((record, _)) => record,
        None => rng.uniform(record_count),
    };
    debug!(record, record_count, "locating record by scan");
    let offset = scan_to_record(source.reader(), record, delimiter)
        .map_err(|e| source.read_error(e))?;

    Ok(Selection {
        record,
        offset,
        record_count,
        via: ResolvedVia::Scan,
    })
}

/// Settle the record count from a rebuild count and an index-derived count.
///
/// A zero count is treated as unknown.
///
/// # Example
/// ```
/// use motd_core::index::reconcile;
///
/// assert_eq!(reconcile(Some(3), None).unwrap(), 3);
/// assert_eq!(reconcile(None, Some(3)).unwrap(), 3);
/// assert!(reconcile(Some(3), Some(4)).is_err());
/// assert!(reconcile(None, None).is_err());
/// ```
pub fn reconcile(built: Option<u64>, indexed: Option<u64>) -> MotdResult<u64> {
    let built = built.filter(|&n| n > 0);
    let indexed = indexed.filter(|&n| n > 0);
    match (built, indexed) {
        (None, None) => Err(MotdError::NoCandidates),
        (Some(n), None) | (None, Some(n)) => Ok(n),
        (Some(built), Some(indexed)) if built != indexed => {
            Err(MotdError::CorruptIndex { built, indexed })
        }
        (Some(built), Some(_)) => Ok(built),
    }
}

fn probe_index(
    index_path: &Path,
    text_modified: Option<SystemTime>,
    rng: &mut RngContext,
) -> Probe {
    if !is_fresh(index_path, text_modified) {
        debug!(path = %index_path.display(), "no usable index");
        return Probe::default();
    }
    let mut file = match File::open(index_path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %index_path.display(), error = %e, "cannot open index");
            return Probe::default();
        }
    };
    let len = match file.metadata() {
        Ok(meta) => meta.len(),
        Err(_) => return Probe::default(),
    };
    if len == 0 || len % OFFSET_BYTES != 0 {
        warn!(path = %index_path.display(), len, "index size is not a whole number of entries");
        return Probe::default();
    }

    let index_count = len / OFFSET_BYTES;
    let record = rng.uniform(index_count);
    match read_entry(&mut file, record) {
        Ok(offset) => Probe {
            index_count: Some(index_count),
            pick: Some((record, offset)),
        },
        Err(e) => {
            warn!(path = %index_path.display(), record, error = %e, "index entry unreadable");
            Probe {
                index_count: Some(index_count),
                pick: None,
            }
        }
    }
}

/// Position the reader at an offset taken from the index, if it is usable.
fn seek_to_offset(source: &mut TextSource, offset: i64) -> Option<u64> {
    let offset = match u64::try_from(offset) {
        Ok(offset) if offset <= source.byte_len() => offset,
        _ => {
            warn!(offset, len = source.byte_len(), "index offset outside text file");
            return None;
        }
    };
    match source.reader().seek(offset) {
        Ok(()) => Some(offset),
        Err(e) => {
            warn!(offset, error = %e, "seek to indexed offset failed");
            None
        }
    }
}

/// Rewind and skip `record` delimiters, wrapping at end of stream.
fn scan_to_record<R: Read + Seek>(
    reader: &mut GlyphReader<R>,
    record: u64,
    delimiter: char,
) -> io::Result<u64> {
    reader.rewind()?;
    for _ in 0..record {
        if !reader.skip_record(delimiter)? {
            debug!("scan hit end of text, wrapping");
            reader.rewind()?;
        }
    }
    Ok(reader.position())
}
