//! `digest`-crate trait integration
//!
//! Wraps [`crate::xof::XofEngine`] (ASCON-HASH/HASHA) and [`crate::prf`]
//! (ASCON-MAC) so they compose with the wider RustCrypto ecosystem: code
//! written against `digest::Digest` or `digest::Mac` can use these types
//! without depending on this crate's native API, mirroring the teacher's
//! `TachyonHasher` trait-impl block structure.

use crate::xof::{XofEngine, HASH_SIZE};

use digest::typenum::{U16, U32};
use digest::{Key, KeySizeUser, Output};
use digest::{FixedOutput, HashMarker, KeyInit, MacMarker, OutputSizeUser, Reset, Update};

/// `digest::Digest`-compatible wrapper around ASCON-HASH (fixed 32-byte
/// output, full 12 rounds between blocks).
pub struct HashDigest {
    engine: XofEngine,
}

impl HashDigest {
    /// Start a fresh ASCON-HASH computation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: XofEngine::hash(),
        }
    }

    /// Absorb more input.
    pub fn update(&mut self, data: &[u8]) {
        self.engine.absorb(data);
    }

    /// Consume the hasher and return the 32-byte digest.
    #[must_use]
    pub fn finalize(mut self) -> [u8; HASH_SIZE] {
        let mut out = [0u8; HASH_SIZE];
        self.engine.squeeze(&mut out);
        out
    }

    /// Reset to the initial ASCON-HASH state, discarding absorbed input.
    pub fn reset(&mut self) {
        self.engine = XofEngine::hash();
    }
}

impl Default for HashDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HashDigest {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl OutputSizeUser for HashDigest {
    type OutputSize = U32;
}

impl Update for HashDigest {
    fn update(&mut self, data: &[u8]) {
        self.update(data);
    }
}

impl FixedOutput for HashDigest {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize());
    }
}

impl Reset for HashDigest {
    fn reset(&mut self) {
        self.reset();
    }
}

impl HashMarker for HashDigest {}

/// `digest::Digest`-compatible wrapper around ASCON-HASHA (fixed
/// 32-byte output, 8 rounds between steady-state blocks).
pub struct HashADigest {
    engine: XofEngine,
}

impl HashADigest {
    /// Start a fresh ASCON-HASHA computation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: XofEngine::hasha(),
        }
    }

    /// Absorb more input.
    pub fn update(&mut self, data: &[u8]) {
        self.engine.absorb(data);
    }

    /// Consume the hasher and return the 32-byte digest.
    #[must_use]
    pub fn finalize(mut self) -> [u8; HASH_SIZE] {
        let mut out = [0u8; HASH_SIZE];
        self.engine.squeeze(&mut out);
        out
    }

    /// Reset to the initial ASCON-HASHA state, discarding absorbed input.
    pub fn reset(&mut self) {
        self.engine = XofEngine::hasha();
    }
}

impl Default for HashADigest {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HashADigest {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}

impl OutputSizeUser for HashADigest {
    type OutputSize = U32;
}

impl Update for HashADigest {
    fn update(&mut self, data: &[u8]) {
        self.update(data);
    }
}

impl FixedOutput for HashADigest {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.finalize());
    }
}

impl Reset for HashADigest {
    fn reset(&mut self) {
        self.reset();
    }
}

impl HashMarker for HashADigest {}

/// `digest::Mac`-compatible wrapper around [`crate::prf::mac`] (ASCON-MAC,
/// 16-byte key, 16-byte tag). Buffers input with the native [`crate::prf::Prf`]
/// duplex rather than re-absorbing from scratch on every `update`.
pub struct MacDigest {
    prf: crate::prf::Prf,
}

impl OutputSizeUser for MacDigest {
    type OutputSize = U16;
}

impl KeySizeUser for MacDigest {
    type KeySize = U16;
}

impl KeyInit for MacDigest {
    fn new(key: &Key<Self>) -> Self {
        let mut key_bytes = [0u8; crate::prf::PRF_KEY_SIZE];
        key_bytes.copy_from_slice(key.as_slice());
        Self {
            prf: crate::prf::Prf::new(&key_bytes, crate::prf::MAC_TAG_SIZE),
        }
    }
}

impl Update for MacDigest {
    fn update(&mut self, data: &[u8]) {
        self.prf.absorb(data);
    }
}

impl FixedOutput for MacDigest {
    fn finalize_into(mut self, out: &mut Output<Self>) {
        let mut tag = [0u8; crate::prf::MAC_TAG_SIZE];
        self.prf.squeeze(&mut tag);
        out.copy_from_slice(&tag);
    }
}

impl MacMarker for MacDigest {}

#[cfg(test)]
mod tests {
    use super::*;
    use digest::Digest;

    fn hash_generic<D: Digest>(input: &[u8]) -> alloc::vec::Vec<u8> {
        let mut h = D::new();
        h.update(input);
        h.finalize().to_vec()
    }

    #[test]
    fn digest_trait_matches_native_hash() {
        let native = crate::xof::hash(b"test");
        let via_trait = hash_generic::<HashDigest>(b"test");
        assert_eq!(native.as_slice(), via_trait.as_slice());
    }

    #[test]
    fn digest_trait_matches_native_hasha() {
        let native = crate::xof::hasha(b"test");
        let via_trait = hash_generic::<HashADigest>(b"test");
        assert_eq!(native.as_slice(), via_trait.as_slice());
    }

    #[test]
    fn mac_digest_matches_native_mac() {
        use digest::Mac;

        let key = [0x42u8; crate::prf::PRF_KEY_SIZE];
        let native = crate::prf::mac(&key, b"message");

        let mut keyed = <MacDigest as KeyInit>::new(Key::<MacDigest>::from_slice(&key));
        keyed.update(b"message");
        let via_trait = keyed.finalize_fixed();

        assert_eq!(native.as_slice(), via_trait.as_slice());
    }

    #[test]
    fn reset_returns_to_the_empty_state() {
        let mut a = HashDigest::new();
        a.update(b"some input");
        a.reset();
        let mut b = HashDigest::new();
        b.update(b"");
        assert_eq!(a.finalize(), b.finalize());
    }
}
