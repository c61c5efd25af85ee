//! Motto of the day - one full invocation
//!
//! Ties the components together:
//!
//! ```text
//! load PRNG state → open text → select (rebuild index if stale)
//!     → emit record → save PRNG state
//! ```
//!
//! PRNG state is saved only after the record was written, so a failed
//! selection leaves the previous state on disk.
//!
//! # Example
//!
//! ```no_run
//! use motd_core::{engine, CachePaths, MotdConfig};
//! use std::path::Path;
//!
//! let config = MotdConfig::from_paths(&CachePaths::under_home(Path::new("/home/ada")));
//! let mut stdout = std::io::stdout().lock();
//! let outcome = engine::run(&config, &mut stdout)?;
//! eprintln!("record {} of {}", outcome.selection.record, outcome.selection.record_count);
//! # Ok::<(), motd_core::MotdError>(())
//! ```

use crate::config::MotdConfig;
use crate::emit::emit;
use crate::error::{MotdError, MotdResult};
use crate::index::{self, Selection};
use crate::rng::{state, RngContext};
use crate::source::TextSource;
use std::io::Write;
use tracing::{debug, info};

/// What a completed invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub selection: Selection,

    /// Bytes of record text written to the output
    pub bytes_written: u64,
}

/// Select one record, write it to `out` and persist the advanced PRNG state.
///
/// # Errors
/// Any [`MotdError`] from selection or emission, or
/// [`MotdError::PersistenceWriteFailure`] if the state cannot be saved.
pub fn run<W: Write>(config: &MotdConfig, out: &mut W) -> MotdResult<Outcome> {
    config.validate()?;
    let mut rng = state::load(&config.state_path);
    let outcome = pick(config, &mut rng, out)?;
    state::save(&config.state_path, &rng)?;
    Ok(outcome)
}

/// Select and emit one record using the caller's PRNG context.
///
/// Nothing is persisted; `rng` is advanced by the draws made.
pub fn pick<W: Write>(
    config: &MotdConfig,
    rng: &mut RngContext,
    out: &mut W,
) -> MotdResult<Outcome> {
    let mut text = TextSource::open(&config.text_path, config.encoding)?;
    let selection = index::select(
        &mut text,
        &config.index_path,
        config.delimiter,
        config.force_rebuild,
        rng,
    )?;
    debug!(
        record = selection.record,
        offset = selection.offset,
        via = ?selection.via,
        "record selected"
    );

    let bytes_written = emit(text.reader(), selection.offset, config.delimiter, out)
        .and_then(|n| out.flush().map(|()| n))
        .map_err(|source| MotdError::Emit {
            path: text.path().to_path_buf(),
            source,
        })?;

    info!(
        record = selection.record,
        record_count = selection.record_count,
        bytes = bytes_written,
        "motto emitted"
    );
    Ok(Outcome {
        selection,
        bytes_written,
    })
}
