//! Tests for PRNG state persistence across runs

use motd_core::rng::{state, CONTEXT_BYTES};
use motd_core::{MotdError, RngContext};
use std::fs;

#[test]
fn test_save_then_load_restores_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.rng");

    let mut rng = RngContext::seeded(4242);
    rng.next();
    state::save(&path, &rng).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), CONTEXT_BYTES as u64);
    assert_eq!(state::load(&path), rng);
}

#[test]
fn test_save_overwrites_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.rng");

    state::save(&path, &RngContext::seeded(1)).unwrap();
    state::save(&path, &RngContext::seeded(2)).unwrap();

    assert_eq!(state::load(&path), RngContext::seeded(2));
}

#[test]
fn test_load_uses_leading_blob_of_longer_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.rng");

    let rng = RngContext::seeded(77);
    let mut bytes = rng.to_bytes().to_vec();
    bytes.extend_from_slice(b"trailing junk");
    fs::write(&path, bytes).unwrap();

    assert_eq!(state::load(&path), rng);
}

#[test]
fn test_consecutive_runs_continue_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.rng");

    let mut reference = RngContext::seeded(9);
    let expected: Vec<u64> = (0..4).map(|_| reference.uniform(1000)).collect();

    state::save(&path, &RngContext::seeded(9)).unwrap();
    let mut drawn = Vec::new();
    for _ in 0..4 {
        let mut rng = state::load(&path);
        drawn.push(rng.uniform(1000));
        state::save(&path, &rng).unwrap();
    }

    assert_eq!(drawn, expected);
}

#[test]
fn test_save_to_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = state::save(dir.path(), &RngContext::seeded(1)).unwrap_err();
    assert!(matches!(err, MotdError::PersistenceWriteFailure { .. }));
}
