//! Sponge-based PRNG with forward security
//!
//! A cXOF("SpongePRNG") instance seeded from a TRNG. After every fetch (and
//! after every reseed or feed), the rate is destroyed and re-permuted
//! several times — the SpongePRNG paper's forward-security ritual: an
//! attacker who recovers the state after a fetch cannot roll it backwards
//! to recover output already delivered, since the rate bytes that would
//! let them do so have been overwritten.

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::trng::Trng;
use crate::xof::XofEngine;

/// Force a reseed after this many bytes have been generated since the
/// last one.
const RESEED_LIMIT: usize = 16384;

/// Rate of the underlying cXOF, in bytes.
const RATE: usize = 8;

/// Seed size drawn from the TRNG at `init`/`reseed`.
const SEED_SIZE: usize = crate::trng::SYSTEM_SEED_SIZE;

/// Size of a saved/loaded seed blob (one rate-aligned PRNG output).
pub const SAVED_SEED_SIZE: usize = 40;

/// A re-seedable, forward-secure sponge PRNG.
pub struct SpongePrng<T: Trng> {
    xof: XofEngine,
    counter: usize,
    trng: T,
}

impl<T: Trng> SpongePrng<T> {
    /// Initialize a new PRNG, drawing its first seed from `trng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrngFailure`] if the initial seed draw fails.
    pub fn new(mut trng: T) -> Result<Self> {
        let mut xof = XofEngine::init_custom(0, "SpongePRNG", &[], 0);
        let mut seed = [0u8; SEED_SIZE];
        if !trng.generate(&mut seed) {
            return Err(Error::TrngFailure);
        }
        xof.absorb(&seed);
        crate::util::secure_zero(&mut seed);

        let mut prng = Self {
            xof,
            counter: 0,
            trng,
        };
        prng.rekey();
        Ok(prng)
    }

    /// The SpongePRNG paper's forward-security ritual: align to a block
    /// boundary, then zero the rate and permute `ceil((40 - rate) / rate)`
    /// times so recovering the post-fetch state cannot reveal output
    /// already delivered.
    fn rekey(&mut self) {
        self.xof.pad();
        let mut destroyed = RATE;
        while destroyed < 40 {
            self.xof.zero_rate_and_permute();
            destroyed += RATE;
        }
    }

    /// Squeeze `out.len()` bytes of output, forcing a reseed first if the
    /// reseed limit has been reached since the last one, and rekeying
    /// afterwards for forward security.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrngFailure`] if a forced reseed's TRNG draw fails.
    pub fn fetch(&mut self, out: &mut [u8]) -> Result<()> {
        if self.counter >= RESEED_LIMIT {
            self.reseed()?;
        }
        self.xof.squeeze(out);
        self.counter = (self.counter + out.len()).min(RESEED_LIMIT);
        self.rekey();
        Ok(())
    }

    /// Draw fresh entropy from the TRNG, absorb it, reset the reseed
    /// counter, and rekey.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrngFailure`] if the TRNG draw fails.
    pub fn reseed(&mut self) -> Result<()> {
        let mut seed = [0u8; SEED_SIZE];
        let ok = self.trng.generate(&mut seed);
        self.xof.absorb(&seed);
        crate::util::secure_zero(&mut seed);
        self.counter = 0;
        self.rekey();
        if ok {
            Ok(())
        } else {
            Err(Error::TrngFailure)
        }
    }

    /// Mix caller-supplied entropy into the generator, then rekey.
    pub fn feed(&mut self, entropy: &[u8]) {
        self.xof.absorb(entropy);
        self.xof.pad();
        self.rekey();
    }

    /// Fetch a 40-byte seed and persist it to `storage` at offset 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrngFailure`] if the implicit fetch forces a
    /// reseed that fails, or [`Error::StorageFailure`] if the write is
    /// rejected or short.
    pub fn save_seed(&mut self, storage: &mut impl Storage) -> Result<()> {
        if storage.size() < SAVED_SEED_SIZE {
            return Err(Error::StorageFailure);
        }
        let mut seed = [0u8; SAVED_SEED_SIZE];
        self.fetch(&mut seed)?;
        let written = storage.write(0, &seed, storage.erase_size() != 0);
        crate::util::secure_zero(&mut seed);
        match written {
            Some(n) if n == SAVED_SEED_SIZE => Ok(()),
            _ => Err(Error::StorageFailure),
        }
    }

    /// Load a previously saved seed from `storage`, feed it in, reseed
    /// from the TRNG on top of it, and write a fresh seed back — so that
    /// losing power before the next explicit save never replays the same
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageFailure`] if the region is too small or the
    /// read is short, or [`Error::TrngFailure`] if the reseed draw fails.
    pub fn load_seed(&mut self, storage: &mut impl Storage) -> Result<()> {
        if storage.size() < SAVED_SEED_SIZE {
            return Err(Error::StorageFailure);
        }
        let mut seed = [0u8; SAVED_SEED_SIZE];
        let read = storage.read(0, &mut seed);
        if read == Some(SAVED_SEED_SIZE) {
            self.feed(&seed);
        }
        let reseeded = self.reseed();

        self.fetch(&mut seed)?;
        storage.write(0, &seed, storage.erase_size() != 0);
        crate::util::secure_zero(&mut seed);

        if read != Some(SAVED_SEED_SIZE) {
            return Err(Error::StorageFailure);
        }
        reseeded
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
    fn successive_fetches_differ() {
        let mut prng = SpongePrng::new(CountingTrng(0)).expect("trng never fails");
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        prng.fetch(&mut a).unwrap();
        prng.fetch(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn feed_changes_subsequent_output() {
        let mut prng_a = SpongePrng::new(CountingTrng(0)).expect("trng never fails");
        let mut prng_b = SpongePrng::new(CountingTrng(0)).expect("trng never fails");
        prng_b.feed(b"extra entropy");

        let mut out_a = [0u8; 16];
        let mut out_b = [0u8; 16];
        prng_a.fetch(&mut out_a).unwrap();
        prng_b.fetch(&mut out_b).unwrap();
        assert_ne!(out_a, out_b);
    }

    struct FailingTrng;
    impl Trng for FailingTrng {
        fn generate(&mut self, _out: &mut [u8]) -> bool {
            false
        }
    }

    #[test]
    fn init_reports_trng_failure() {
        assert_eq!(SpongePrng::new(FailingTrng).unwrap_err(), Error::TrngFailure);
    }
}
