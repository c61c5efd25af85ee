//! Seedable pseudo-random number generation
//!
//! Uses a 64-bit three-rotate variant of Bob Jenkins' small fast generator.
//! All randomness in the selector MUST go through an explicit [`RngContext`];
//! there is no process-wide ambient generator.
//!
//! NOTE: unfit for cryptographic purposes.

mod jsf;
pub mod state;

pub use jsf::{RngContext, CONTEXT_BYTES, RANDOM_MAX, SEED_CONSTANT, WARMUP_ROUNDS};
