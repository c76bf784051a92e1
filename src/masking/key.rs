//! Masked key layout
//!
//! ASCON-128 keys are stored as 2 masked words covering the key's two
//! 8-byte halves. ASCON-80pq keys are stored as 6 masked words in two
//! overlapping arrangements, because the unmasked 160-bit key schedule
//! absorbs the key twice at byte offsets that don't line up with 8-byte
//! lane boundaries (see [`crate::aead::ascon80pq`]): `k[2]`/`k[3]` each
//! hold one 4-byte half of the key padded out to a full word with
//! [`MaskedWord::load_32`] so the straddling bytes can still be XORed
//! into a lane as a single masked operation.

use super::word::MaskedWord;
use crate::trng::{MixerTrng, Trng};

/// A masked ASCON-128/128a key: two non-overlapping 8-byte halves.
#[derive(Clone)]
pub struct MaskedKey128<W: MaskedWord> {
    k: [W; 2],
}

impl<W: MaskedWord> MaskedKey128<W> {
    /// Split a 16-byte key into masked shares.
    pub fn load<T: Trng>(key: &[u8; 16], trng: &mut MixerTrng<T>) -> Self {
        Self {
            k: [W::load(&key[..8], trng), W::load(&key[8..16], trng)],
        }
    }

    /// Recombine the shares back into the 16-byte key.
    pub fn extract(&self) -> [u8; 16] {
        let mut key = [0u8; 16];
        self.k[0].store(&mut key[..8]);
        self.k[1].store(&mut key[8..16]);
        key
    }

    /// Re-randomize every word's shares without changing the key value.
    pub fn randomize<T: Trng>(&mut self, trng: &mut MixerTrng<T>) {
        for word in &mut self.k {
            word.randomize(trng);
        }
    }

    /// XOR the first half into the lane at `offset` and the second half
    /// into the lane 8 bytes further along.
    pub fn xor_into(&self, lane0: &mut W, lane1: &mut W) {
        lane0.xor(&self.k[0]);
        lane1.xor(&self.k[1]);
    }

    /// Securely wipe every share.
    pub fn free(&mut self) {
        for word in &mut self.k {
            word.wipe();
        }
    }
}

/// A masked ASCON-80pq key: 6 masked words covering the 20-byte key in
/// the two byte arrangements the unmasked schedule absorbs it in.
///
/// `k[0]` = `key[0..8]`, `k[1]` = `key[8..16]`, `k[2]` = `key[16..20]`
/// zero-extended low, `k[3]` = `key[0..4]` zero-extended high, `k[4]` =
/// `key[4..12]`, `k[5]` = `key[12..20]`.
#[derive(Clone)]
pub struct MaskedKey80pq<W: MaskedWord> {
    k: [W; 6],
}

impl<W: MaskedWord> MaskedKey80pq<W> {
    /// Split a 20-byte key into masked shares.
    pub fn load<T: Trng>(key: &[u8; 20], trng: &mut MixerTrng<T>) -> Self {
        let zeroes = [0u8; 4];
        Self {
            k: [
                W::load(&key[0..8], trng),
                W::load(&key[8..16], trng),
                W::load_32(&key[16..20], &zeroes, trng),
                W::load_32(&zeroes, &key[0..4], trng),
                W::load(&key[4..12], trng),
                W::load(&key[12..20], trng),
            ],
        }
    }

    /// Recombine the shares back into the 20-byte key.
    pub fn extract(&self) -> [u8; 20] {
        let mut key = [0u8; 20];
        self.k[0].store(&mut key[0..8]);
        self.k[1].store(&mut key[8..16]);
        self.k[2].store_partial(&mut key[16..20], 4);
        key
    }

    /// Re-randomize every word's shares without changing the key value.
    ///
    /// Unlike the reference implementation (whose 3- and 4-share
    /// branches call the 2-share randomizer on every word by mistake),
    /// each word here is re-randomized with its own share count's
    /// circuit, since `W::randomize` is resolved once for the whole key
    /// by the type parameter rather than picked per call.
    pub fn randomize<T: Trng>(&mut self, trng: &mut MixerTrng<T>) {
        for word in &mut self.k {
            word.randomize(trng);
        }
    }

    /// The six masked words in absorption order, for the masked AEAD
    /// construction to XOR into the permutation state at the right
    /// offsets.
    pub fn words(&self) -> &[W; 6] {
        &self.k
    }

    /// Securely wipe every share.
    pub fn free(&mut self) {
        for word in &mut self.k {
            word.wipe();
        }
    }
}
