//! Small fast PRNG (64-bit, three rotations)
//!
//! Based on Robert J. Jenkins Jr.'s public domain "smallprng". The state is
//! four 64-bit words, mixed with three fixed rotations per step.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. A context restored from its
//! persisted 32-byte blob continues exactly where the saved one stopped.

use serde::{Deserialize, Serialize};

/// Largest value returned by [`RngContext::next`], and one more than the
/// largest value returned by [`RngContext::uniform`].
pub const RANDOM_MAX: u64 = u64::MAX;

/// First state word after seeding.
pub const SEED_CONSTANT: u64 = 0xf1ea_5eed;

/// Outputs discarded after seeding before the context is handed out.
pub const WARMUP_ROUNDS: usize = 20;

/// Size of a serialized context: four 64-bit words.
pub const CONTEXT_BYTES: usize = 4 * std::mem::size_of::<u64>();

/// Complete generator state.
///
/// # Example
/// ```
/// use motd_core::RngContext;
///
/// let mut rng = RngContext::seeded(12345);
/// let raw = rng.next();
/// let pick = rng.uniform(10); // [0, 10)
/// assert!(pick < 10);
/// # let _ = raw;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngContext {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl Default for RngContext {
    /// The unseeded initializer: seed constant followed by zero words.
    fn default() -> Self {
        Self {
            a: SEED_CONSTANT,
            b: 0,
            c: 0,
            d: 0,
        }
    }
}

impl RngContext {
    /// Create a context seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        let mut ctx = Self::default();
        ctx.seed(seed);
        ctx
    }

    /// Reset the context deterministically from `seed`, then discard
    /// [`WARMUP_ROUNDS`] outputs.
    pub fn seed(&mut self, seed: u64) {
        self.a = SEED_CONSTANT;
        self.b = seed;
        self.c = seed;
        self.d = seed;
        for _ in 0..WARMUP_ROUNDS {
            self.next();
        }
    }

    /// Advance one step and return a value in `[0, RANDOM_MAX]`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let e = self.a.wrapping_sub(self.b.rotate_left(7));
        self.a = self.b ^ self.c.rotate_left(13);
        self.b = self.c.wrapping_add(self.d.rotate_left(37));
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d & RANDOM_MAX
    }

    /// Unbiased value in `[0, upper)`; returns 0 without drawing when
    /// `upper < 2`.
    ///
    /// Raw draws at or above the largest multiple of `upper` that fits below
    /// [`RANDOM_MAX`] are rejected, so the final modulo cannot favor low
    /// values. There is no iteration cap; rejection odds decay geometrically.
    pub fn uniform(&mut self, upper: u64) -> u64 {
        if upper < 2 {
            return 0;
        }
        let limit = RANDOM_MAX - (RANDOM_MAX % upper);
        loop {
            let r = self.next();
            if r < limit {
                return r % upper;
            }
        }
    }

    /// State words in persisted order.
    pub fn words(&self) -> [u64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Rebuild a context verbatim from its state words.
    pub fn from_words(words: [u64; 4]) -> Self {
        let [a, b, c, d] = words;
        Self { a, b, c, d }
    }

    /// Native-endian blob of [`CONTEXT_BYTES`] bytes.
    pub fn to_bytes(&self) -> [u8; CONTEXT_BYTES] {
        let mut out = [0u8; CONTEXT_BYTES];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.words()) {
            chunk.copy_from_slice(&word.to_ne_bytes());
        }
        out
    }

    /// Restore from the leading [`CONTEXT_BYTES`] bytes of `bytes`.
    ///
    /// Returns `None` if fewer bytes are available.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let blob = bytes.get(..CONTEXT_BYTES)?;
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(blob.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_ne_bytes(buf);
        }
        Some(Self::from_words(words))
    }
}
