//! Persisted byte-offset index
//!
//! The index file is a headerless sequence of native-endian `i64` words, one
//! per record, each the byte offset at which that record starts. The record
//! count is implied by the file size.
//!
//! # Critical Invariants
//!
//! - **Consistency**: a fresh index holds exactly one entry per record
//! - **Wholesale rebuild**: a stale index is rewritten, never patched
//! - **Single corruption check**: two independently derived record counts
//!   must agree, otherwise selection fails

pub mod builder;
pub mod selector;

pub use builder::build;
pub use selector::{reconcile, select, ResolvedVia, Selection};

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::time::SystemTime;

/// Width of one index entry in bytes.
pub const OFFSET_BYTES: u64 = std::mem::size_of::<i64>() as u64;

/// Whether the index at `path` may be used for a text file last modified at
/// `text_modified`: it must be a regular file not older than the text.
pub fn is_fresh(path: &Path, text_modified: Option<SystemTime>) -> bool {
    let meta = match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta,
        _ => return false,
    };
    match (meta.modified().ok(), text_modified) {
        (Some(index_mtime), Some(text_mtime)) => index_mtime >= text_mtime,
        _ => false,
    }
}

/// Read entry `record` from an open index file.
pub fn read_entry(file: &mut File, record: u64) -> io::Result<i64> {
    file.seek(SeekFrom::Start(record * OFFSET_BYTES))?;
    let mut word = [0u8; OFFSET_BYTES as usize];
    file.read_exact(&mut word)?;
    Ok(i64::from_ne_bytes(word))
}

/// Load every entry of the index at `path`.
///
/// Trailing bytes that do not form a whole entry are ignored.
pub fn read_offsets(path: &Path) -> io::Result<Vec<i64>> {
    let bytes = fs::read(path)?;
    Ok(bytes
        .chunks_exact(OFFSET_BYTES as usize)
        .map(|chunk| {
            let mut word = [0u8; OFFSET_BYTES as usize];
            word.copy_from_slice(chunk);
            i64::from_ne_bytes(word)
        })
        .collect())
}
