//! Motd Core - indexed random motto selection
//!
//! Picks one pseudo-random record from a large delimiter-separated text
//! file without rescanning it on every run.
//!
//! # Architecture
//!
//! - **rng**: Seedable PRNG with unbiased range reduction, plus state persistence
//! - **source**: Character-at-a-time reader over the text file
//! - **index**: Offset index builder, freshness check and record selector
//! - **emit**: Record emitter
//! - **engine**: select → emit → persist for one invocation
//! - **config**: Inputs and default file locations
//!
//! # Critical Invariants
//!
//! 1. Every file holds at least one record (an empty file holds one empty record)
//! 2. A fresh index has exactly one entry per record
//! 3. Two independently derived record counts must agree, or selection fails
//! 4. PRNG state carries over between runs verbatim

// Module declarations
pub mod config;
pub mod emit;
pub mod engine;
pub mod error;
pub mod index;
pub mod rng;
pub mod source;

// Re-exports for convenience
pub use config::{CachePaths, MotdConfig, DEFAULT_DELIMITER};
pub use engine::Outcome;
pub use error::{MotdError, MotdResult};
pub use index::{ResolvedVia, Selection};
pub use rng::RngContext;
pub use source::{GlyphReader, TextEncoding, TextSource};
