//! Injectable randomness for the game engines.
//!
//! ## Key Features
//!
//! - **Injectable**: engines are generic over [`RandomSource`], so tests can
//!   script exact outcomes with [`ScriptedRng`]
//! - **Deterministic**: same seed produces identical sequence
//! - **Context streams**: each game draws from its own independent stream
//!
//! ## Usage
//!
//! ```
//! use pocket_arcade::core::{GameRng, RandomSource};
//!
//! let rng = GameRng::new(42);
//!
//! // Independent streams per game
//! let mut shell = rng.for_context("shellgame");
//! let mut coin = rng.for_context("coinflip");
//!
//! assert!(shell.below(3) < 3);
//! assert!(coin.below(2) < 2);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer source used by every engine.
///
/// The games only ever need small ranges ({0,1} and {0,1,2} plus picking
/// among a handful of board cells), so the whole interface is one method.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. Callers never pass `bound == 0`.
    fn below(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }
}

/// Pick one element of `items` uniformly, or `None` when empty.
pub fn pick<T: Copy, R: RandomSource + ?Sized>(rng: &mut R, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.below(items.len())])
}

/// Seedable RNG backing production sessions.
///
/// Uses ChaCha8 for speed while keeping a well-distributed stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The derived seed depends only on this seed and the context bytes, so
    /// it is the same on every platform and toolchain.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        Self::new(self.seed.wrapping_add(context_hash(context).wrapping_mul(CONTEXT_MIX)))
    }
}

/// Golden-ratio multiplier spreading context hashes across the seed space.
const CONTEXT_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// 64-bit FNV-1a over the context name.
fn context_hash(context: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    context
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

impl RandomSource for GameRng {
    fn below(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound, so a script written for
/// one range stays valid for another.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a scripted source. An empty script always yields 0.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn below(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.below(1000), rng2.below(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.below(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.below(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_below_stays_in_range() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 3];

        for _ in 0..200 {
            let value = rng.below(3);
            assert!(value < 3);
            seen[value] = true;
        }

        assert!(seen.iter().all(|&s| s), "all of 0..3 should appear");
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("shellgame");
        let mut ctx2 = rng.for_context("coinflip");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.below(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.below(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut ctx1 = GameRng::new(42).for_context("test");
        let mut ctx2 = GameRng::new(42).for_context("test");

        for _ in 0..10 {
            assert_eq!(ctx1.below(1000), ctx2.below(1000));
        }
    }

    #[test]
    fn test_context_seed_is_pinned() {
        // Replaying a logged seed must not depend on the toolchain
        assert_eq!(context_hash("coinflip"), 0x77fe_71d8_2762_dec7);
        assert_eq!(GameRng::new(42).for_context("coinflip").seed(), 1_984_264_132_891_421_309);
        assert_eq!(GameRng::new(42).for_context("shellgame").seed(), 13_173_681_999_990_496_945);
    }

    #[test]
    fn test_scripted_cycles_and_reduces() {
        let mut rng = ScriptedRng::new(vec![0, 4, 2]);

        assert_eq!(rng.below(3), 0);
        assert_eq!(rng.below(3), 1); // 4 % 3
        assert_eq!(rng.below(3), 2);
        assert_eq!(rng.below(3), 0); // wraps
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_scripted_empty_yields_zero() {
        let mut rng = ScriptedRng::new(Vec::new());
        assert_eq!(rng.below(9), 0);
    }

    #[test]
    fn test_pick() {
        let mut rng = ScriptedRng::new(vec![1]);
        assert_eq!(pick(&mut rng, &[10, 20, 30]), Some(20));

        let empty: [u8; 0] = [];
        assert_eq!(pick(&mut rng, &empty), None);
    }
}
