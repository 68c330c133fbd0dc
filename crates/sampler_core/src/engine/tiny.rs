//! Two-word bit-mixing engine.
//!
//! [`Tiny`] keeps two words of state and mixes them with a half-width
//! rotation and two additions per step:
//!
//! ```text
//! w1 += rotate_left(w0, BITS / 2)
//! w0 += w1 + LUCKY
//! return w1
//! ```
//!
//! All arithmetic wraps. The generator is fast and small, and its output is
//! fully determined by `(w0, w1)`, which makes it convenient for replayable
//! simulations. It is not suitable for cryptographic use.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore, SeedableRng};
use rand_core::impls;

use super::{Engine, Word};
use crate::error::{StateError, StateResult};
use crate::state::{self, TextState, Tokens};

/// Two-word bit-mixing engine.
///
/// `LUCKY` is the odd constant folded into every step; it is truncated to
/// the word width.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engine::{Engine, Tiny};
///
/// let mut engine = Tiny::<u64>::from_words([1, 2]);
/// assert_eq!(engine.generate(), 4_294_967_298);
///
/// // The state prints as "<w0> <w1>" and parses back exactly.
/// let saved = engine.to_string();
/// let mut restored: Tiny<u64> = saved.parse().unwrap();
/// assert_eq!(engine.generate(), restored.generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tiny<W: Word, const LUCKY: u64 = 13> {
    words: [W; 2],
}

impl<W: Word, const LUCKY: u64> Tiny<W, LUCKY> {
    /// Creates an engine with `w0 = seed` and `w1 = 0`.
    #[inline]
    pub fn new(seed: W) -> Self {
        Self {
            words: [seed, W::zero()],
        }
    }

    /// Creates an engine from both state words.
    #[inline]
    pub fn from_words(words: [W; 2]) -> Self {
        Self { words }
    }

    /// Creates an engine whose words are bulk-filled from a `rand` generator.
    pub fn from_generator<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut engine = Self::default();
        engine.seed_from_generator(rng);
        engine
    }

    /// Creates an engine by drawing two words from another engine.
    pub fn from_engine<E>(source: &mut E) -> Self
    where
        E: Engine + ?Sized,
        E::Output: Into<W>,
    {
        let mut engine = Self::default();
        engine.seed_from_engine(source);
        engine
    }

    /// Replaces `w0`, leaving `w1` untouched.
    #[inline]
    pub fn seed(&mut self, seed: W) {
        self.words[0] = seed;
    }

    /// Replaces both state words.
    #[inline]
    pub fn seed_words(&mut self, words: [W; 2]) {
        self.words = words;
    }

    /// Refills both words from a `rand` generator.
    pub fn seed_from_generator<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        W::fill_from(rng, &mut self.words);
        tracing::trace!(w0 = %self.words[0], w1 = %self.words[1], "reseeded from generator");
    }

    /// Draws `w0` then `w1` from another engine.
    pub fn seed_from_engine<E>(&mut self, source: &mut E)
    where
        E: Engine + ?Sized,
        E::Output: Into<W>,
    {
        for word in self.words.iter_mut() {
            *word = source.generate().into();
        }
        tracing::trace!(w0 = %self.words[0], w1 = %self.words[1], "reseeded from engine");
    }

    /// Returns the state words `[w0, w1]`.
    #[inline]
    pub fn words(&self) -> [W; 2] {
        self.words
    }

    /// Advances the state `count` times, discarding the output.
    pub fn discard(&mut self, count: u64) {
        for _ in 0..count {
            self.step();
        }
    }

    #[inline]
    fn step(&mut self) -> W {
        let [w0, w1] = self.words;
        let w1 = w1.wrapping_add(&w0.rotate_left(W::BITS / 2));
        let w0 = w0
            .wrapping_add(&w1)
            .wrapping_add(&W::truncate_u64(LUCKY));
        self.words = [w0, w1];
        w1
    }
}

impl<W: Word, const LUCKY: u64> Engine for Tiny<W, LUCKY> {
    type Output = W;

    #[inline]
    fn generate(&mut self) -> W {
        self.step()
    }
}

impl<W: Word, const LUCKY: u64> TextState for Tiny<W, LUCKY> {
    fn write_state<O: fmt::Write>(&self, out: &mut O) -> fmt::Result {
        write!(out, "{} {}", self.words[0], self.words[1])
    }

    fn read_state(tokens: &mut Tokens<'_>) -> StateResult<Self> {
        let w0 = tokens.parse("engine word w0")?;
        let w1 = tokens.parse("engine word w1")?;
        Ok(Self::from_words([w0, w1]))
    }
}

impl<W: Word, const LUCKY: u64> fmt::Display for Tiny<W, LUCKY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_state(f)
    }
}

impl<W: Word, const LUCKY: u64> FromStr for Tiny<W, LUCKY> {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        state::decode(s)
    }
}

impl<const LUCKY: u64> RngCore for Tiny<u64, LUCKY> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.step() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<const LUCKY: u64> RngCore for Tiny<u32, LUCKY> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Little-endian: bytes `0..8` become `w0`, bytes `8..16` become `w1`.
impl<const LUCKY: u64> SeedableRng for Tiny<u64, LUCKY> {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut w0 = [0u8; 8];
        let mut w1 = [0u8; 8];
        w0.copy_from_slice(&seed[..8]);
        w1.copy_from_slice(&seed[8..]);
        Self::from_words([u64::from_le_bytes(w0), u64::from_le_bytes(w1)])
    }
}

/// Little-endian: bytes `0..4` become `w0`, bytes `4..8` become `w1`.
impl<const LUCKY: u64> SeedableRng for Tiny<u32, LUCKY> {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut w0 = [0u8; 4];
        let mut w1 = [0u8; 4];
        w0.copy_from_slice(&seed[..4]);
        w1.copy_from_slice(&seed[4..]);
        Self::from_words([u32::from_le_bytes(w0), u32::from_le_bytes(w1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_known_sequence() {
        let mut engine = Tiny::<u64>::from_words([1, 2]);
        assert_eq!(engine.generate(), 4_294_967_298);
        assert_eq!(engine.words(), [4_294_967_312, 4_294_967_298]);
        assert_eq!(engine.generate(), 73_014_444_035);
    }

    #[test]
    fn test_narrow_word_rotation() {
        // 0x12 rotated by 4 bits is 0x21.
        let mut engine = Tiny::<u8>::from_words([0x12, 0x00]);
        assert_eq!(engine.generate(), 0x21);
        assert_eq!(engine.words()[0], 0x12u8.wrapping_add(0x21).wrapping_add(13));
    }

    #[test]
    fn test_lucky_constant_changes_stream() {
        let mut plain = Tiny::<u32>::new(9);
        let mut lucky = Tiny::<u32, 7>::new(9);
        assert_eq!(plain.generate(), lucky.generate());
        assert_ne!(plain.generate(), lucky.generate());
    }

    #[test]
    fn test_seed_keeps_second_word() {
        let mut engine = Tiny::<u64>::from_words([5, 6]);
        engine.seed(11);
        assert_eq!(engine.words(), [11, 6]);
        assert_eq!(Tiny::<u64>::new(11).words(), [11, 0]);
    }

    #[test]
    fn test_seed_from_engine_draws_in_order() {
        let mut source = Tiny::<u64>::new(99);
        let mut replay = source.clone();
        let expected = [replay.generate(), replay.generate()];

        let engine = Tiny::<u64>::from_engine(&mut source);
        assert_eq!(engine.words(), expected);
        assert_eq!(source, replay);
    }

    #[test]
    fn test_seed_from_narrower_engine() {
        let mut source = Tiny::<u32>::new(4);
        let mut replay = source.clone();
        let engine = Tiny::<u64>::from_engine(&mut source);
        assert_eq!(
            engine.words(),
            [u64::from(replay.generate()), u64::from(replay.generate())]
        );
    }

    #[test]
    fn test_seed_from_generator_is_deterministic() {
        let a = Tiny::<u64>::from_generator(&mut StdRng::seed_from_u64(3));
        let b = Tiny::<u64>::from_generator(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_ne!(a, Tiny::default());
    }

    #[test]
    fn test_discard_matches_calls() {
        let mut skipped = Tiny::<u64>::new(1234);
        let mut stepped = skipped.clone();
        skipped.discard(1000);
        for _ in 0..1000 {
            stepped.generate();
        }
        assert_eq!(skipped, stepped);
        assert_eq!(skipped.generate(), stepped.generate());
    }

    #[test]
    fn test_text_state_round_trip() {
        let mut engine = Tiny::<u64>::new(77);
        engine.discard(10);
        let text = engine.to_string();
        assert_eq!(text, format!("{} {}", engine.words()[0], engine.words()[1]));

        let restored: Tiny<u64> = text.parse().unwrap();
        assert_eq!(restored, engine);
    }

    #[test]
    fn test_parse_literal_state() {
        let parsed: Tiny<u64> = "1 2".parse().unwrap();
        assert_eq!(parsed, Tiny::from_words([1, 2]));
    }

    #[test]
    fn test_parse_rejects_bad_state() {
        assert!("1".parse::<Tiny<u64>>().is_err());
        assert!("1 x".parse::<Tiny<u64>>().is_err());
        assert!("1 2 3".parse::<Tiny<u64>>().is_err());
        assert!("256 0".parse::<Tiny<u8>>().is_err());
    }

    #[test]
    fn test_seedable_little_endian() {
        let mut seed = [0u8; 16];
        seed[0] = 1;
        seed[8] = 2;
        assert_eq!(Tiny::<u64>::from_seed(seed), Tiny::from_words([1, 2]));

        let small = Tiny::<u32>::from_seed([3, 0, 0, 0, 4, 0, 0, 0]);
        assert_eq!(small.words(), [3, 4]);
    }

    #[test]
    fn test_rng_core_fill_bytes() {
        let mut engine = Tiny::<u64>::from_words([1, 2]);
        let mut replay = engine.clone();
        let mut bytes = [0u8; 12];
        engine.fill_bytes(&mut bytes);

        let first = replay.generate().to_le_bytes();
        let second = replay.generate().to_le_bytes();
        assert_eq!(&bytes[..8], &first);
        assert_eq!(&bytes[8..], &second[..4]);
    }

    #[test]
    fn test_rng_core_u32_combines_two_words() {
        let mut engine = Tiny::<u32>::new(8);
        let mut replay = engine.clone();
        let low = u64::from(replay.generate());
        let high = u64::from(replay.generate());
        assert_eq!(engine.next_u64(), (high << 32) | low);
    }

    #[test]
    fn test_usable_as_rand_rng() {
        let mut engine = Tiny::<u64>::new(21);
        for _ in 0..1000 {
            let x: f64 = engine.gen();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
