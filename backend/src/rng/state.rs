//! PRNG state persistence
//!
//! The context is stored verbatim as a single [`CONTEXT_BYTES`] blob and
//! overwritten after every successful run, so consecutive invocations keep
//! walking one sequence instead of reseeding.

use super::{RngContext, CONTEXT_BYTES};
use crate::error::{MotdError, MotdResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Restore the context saved at `path`, or seed a fresh one.
///
/// A missing, unreadable or short state file is not an error: the context
/// is then seeded from [`entropy_seed`].
pub fn load(path: &Path) -> RngContext {
    match read_blob(path) {
        Some(ctx) => {
            debug!(path = %path.display(), "restored PRNG state");
            ctx
        }
        None => {
            let seed = entropy_seed();
            debug!(path = %path.display(), seed, "no usable PRNG state, seeding fresh");
            RngContext::seeded(seed)
        }
    }
}

fn read_blob(path: &Path) -> Option<RngContext> {
    let mut file = File::open(path).ok()?;
    let mut blob = [0u8; CONTEXT_BYTES];
    file.read_exact(&mut blob).ok()?;
    RngContext::from_bytes(&blob)
}

/// Persist the full context blob to `path`, replacing any previous state.
///
/// # Errors
/// [`MotdError::PersistenceWriteFailure`] if the file cannot be created or
/// the blob cannot be written completely.
pub fn save(path: &Path, ctx: &RngContext) -> MotdResult<()> {
    std::fs::write(path, ctx.to_bytes()).map_err(|source| MotdError::PersistenceWriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "saved PRNG state");
    Ok(())
}

/// Seed mixing wall-clock seconds, the sub-second clock and the process id,
/// so processes started in the same second still diverge.
pub fn entropy_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs()
        .wrapping_add(u64::from(now.subsec_nanos()))
        .wrapping_add(u64::from(std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_seeds_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = load(&dir.path().join("absent.rng"));
        assert_ne!(ctx, RngContext::default(), "fresh context must be seeded");
    }

    #[test]
    fn test_load_short_file_seeds_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.rng");
        std::fs::write(&path, [0xAAu8; CONTEXT_BYTES - 1]).unwrap();

        let ctx = load(&path);
        assert_ne!(ctx.to_bytes(), [0xAAu8; CONTEXT_BYTES]);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/motd.rng");

        let err = save(&path, &RngContext::seeded(1)).unwrap_err();
        assert!(matches!(err, MotdError::PersistenceWriteFailure { .. }));
    }
}
