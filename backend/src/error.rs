//! Error taxonomy for motto selection
//!
//! Every variant is fatal to the current invocation. Degraded paths (an
//! unwritable index, a missing index, a failed single-entry read) are not
//! errors; they fall through to a rebuild or the scan fallback.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a motto selection
#[derive(Debug, Error)]
pub enum MotdError {
    #[error("Opening {} for reading", path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Reading {}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Copying motto from {}", path.display())]
    Emit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No motto candidate eligible; check your text and index files and try -r!")]
    NoCandidates,

    #[error("Motto index corrupt ({indexed} indexed, {built} counted); try -r!")]
    CorruptIndex { built: u64, indexed: u64 },

    #[error("Could not write PRNG state to {}", path.display())]
    PersistenceWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    #[error("Could not remove cache directory {}", path.display())]
    CacheClear {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type MotdResult<T> = Result<T, MotdError>;
