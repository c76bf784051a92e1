//! Random number source abstraction
//!
//! This is an internal seam, not a public random-number API: the masked
//! permutation needs a fast, frequently-reseeded source of masking
//! material, and the PRNG module needs a one-shot seed. Applications
//! should bring their own `Trng` impl backed by whatever system source
//! fits their target; no platform-specific backend is built in here.

/// Number of bytes requested from a `Trng` to seed a PRNG.
pub const SYSTEM_SEED_SIZE: usize = 32;

/// A source of random bytes.
///
/// Implementors plug in whatever system facility is available
/// (`getrandom`, RDRAND, a hardware TRNG peripheral, ...). The trait
/// is deliberately minimal: one fallible bulk-generate call. Fast
/// per-word generation for masking is provided on top of this by
/// [`MixerTrng`], which whitens a possibly slow or low-quality source
/// through the Ascon-p permutation rather than requiring every
/// implementor to provide a fast path itself.
pub trait Trng {
    /// Fill `out` with random bytes. Returns `false` if the source is
    /// unavailable or failed; callers must not use `out` in that case.
    #[must_use]
    fn generate(&mut self, out: &mut [u8]) -> bool;
}

/// Wraps a (possibly slow, possibly low-quality) [`Trng`] with an
/// Ascon-p duplex that whitens its output and serves random 32- and
/// 64-bit words quickly between reseeds.
///
/// Mirrors the role of the "mixer" source: squeeze a little entropy
/// out of the underlying source, absorb it into a permutation state,
/// and then serve masking material by repeatedly squeezing and
/// permuting that state, reseeding only periodically.
pub struct MixerTrng<T: Trng> {
    source: T,
    lanes: [u64; 5],
    posn: usize,
}

const MIXER_RATE: usize = 8;

impl<T: Trng> MixerTrng<T> {
    /// Create a mixer around `source`, performing an initial reseed.
    ///
    /// Returns `None` if the initial reseed fails (the underlying
    /// source reported failure on its very first call).
    pub fn new(source: T) -> Option<Self> {
        let mut mixer = Self {
            source,
            lanes: [0u64; 5],
            posn: MIXER_RATE,
        };
        if mixer.reseed() {
            Some(mixer)
        } else {
            None
        }
    }

    /// Pull fresh entropy from the underlying source and absorb it,
    /// discarding any buffered output from the previous seed.
    #[must_use]
    pub fn reseed(&mut self) -> bool {
        let mut seed = [0u8; crate::trng::SYSTEM_SEED_SIZE];
        if !self.source.generate(&mut seed) {
            return false;
        }
        for (lane, chunk) in self.lanes.iter_mut().zip(seed.chunks_exact(8)) {
            *lane ^= crate::util::be_load_u64(chunk);
        }
        crate::core::permute_lanes(&mut self.lanes, 0);
        self.posn = MIXER_RATE;
        true
    }

    fn refill_if_needed(&mut self) {
        if self.posn >= MIXER_RATE {
            crate::core::permute_lanes(&mut self.lanes, 0);
            self.posn = 0;
        }
    }

    /// Generate a fast 32-bit word of masking material.
    pub fn generate_32(&mut self) -> u32 {
        self.refill_if_needed();
        let word = self.lanes[self.posn / 8] as u32;
        self.posn += 4;
        word
    }

    /// Generate a fast 64-bit word of masking material.
    pub fn generate_64(&mut self) -> u64 {
        self.refill_if_needed();
        let lane = self.lanes[self.posn / 8];
        self.posn += 8;
        lane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingTrng(u8);

    impl Trng for CountingTrng {
        fn generate(&mut self, out: &mut [u8]) -> bool {
            for b in out.iter_mut() {
                self.0 = self.0.wrapping_add(1);
                *b = self.0;
            }
            true
        }
    }

    #[test]
    fn mixer_produces_distinct_words_between_reseeds() {
        let mut mixer = MixerTrng::new(CountingTrng(0)).expect("source never fails");
        let a = mixer.generate_64();
        let b = mixer.generate_64();
        assert_ne!(a, b);
    }

    #[test]
    fn mixer_reports_failure_from_a_dead_source() {
        struct DeadTrng;
        impl Trng for DeadTrng {
            fn generate(&mut self, _out: &mut [u8]) -> bool {
                false
            }
        }
        assert!(MixerTrng::new(DeadTrng).is_none());
    }
}
