//! ISAP: leakage-resistant AEAD
//!
//! Unlike the regular AEAD family, ISAP never runs the permutation over
//! state that holds the long-term key directly. Instead every use of the
//! key re-derives a short-lived session key by absorbing a nonce (for
//! encryption) or a data-dependent intermediate value (for the MAC) one
//! bit at a time, permuting between every bit. An implementation leaking
//! some side-channel signal about the permutation's internal state still
//! only leaks information about a key that is discarded after one
//! message, which is what makes the construction leakage-resistant
//! rather than merely leakage-tolerant.
//!
//! Grounded on `original_source/src/isap/ascon-isap-common.h`,
//! `ascon-isap-128.c`, `ascon-isap-128a.c`: both variants share the same
//! 16-byte key/nonce/tag and 8-byte rate, differing only in the four
//! round-count knobs (`sH`, `sE`, `sB`, `sK`).

use crate::core::{Sliced64State, StateRepr};
use crate::error::{Error, Result};

/// Key size in bytes (shared by both variants).
pub const KEY_SIZE: usize = 16;
/// Nonce size in bytes (shared by both variants).
pub const NONCE_SIZE: usize = 16;
/// Tag size in bytes (shared by both variants).
pub const TAG_SIZE: usize = 16;
/// Permutation state size in bytes.
const STATE_SIZE: usize = 40;
/// Absorption rate in bytes (shared by both variants).
const RATE: usize = 8;

/// Per-variant round-count configuration. Every other parameter (key,
/// nonce, tag, rate, state sizes) is shared between variants.
pub trait IsapVariant {
    /// Rounds used for the associated-data/ciphertext hashing phase.
    const S_H: u8;
    /// Rounds used between payload encryption blocks.
    const S_E: u8;
    /// Rounds used for each non-final bit of a rekeying absorption.
    const S_B: u8;
    /// Rounds used for the final bit of a rekeying absorption.
    const S_K: u8;
}

/// ASCON-128-ISAP: all four round knobs run the full 12 rounds.
pub struct Ascon128Isap;

impl IsapVariant for Ascon128Isap {
    const S_H: u8 = 12;
    const S_E: u8 = 12;
    const S_B: u8 = 12;
    const S_K: u8 = 12;
}

/// ASCON-128a-ISAP: cheaper steady-state rounds, still a full permutation
/// at every key-bit absorption boundary and at keying.
pub struct Ascon128aIsap;

impl IsapVariant for Ascon128aIsap {
    const S_H: u8 = 12;
    const S_E: u8 = 6;
    const S_B: u8 = 1;
    const S_K: u8 = 12;
}

/// `IV_A` used to seed the associated-data/ciphertext hashing phase:
/// `{0x01, key_bits, rate_bits, 1, sH, sB, sE, sK}`, zero-padded to fill
/// the state bytes left over after the 16-byte nonce.
fn iv_a<V: IsapVariant>() -> [u8; STATE_SIZE - NONCE_SIZE] {
    let mut iv = [0u8; STATE_SIZE - NONCE_SIZE];
    iv[0] = 0x01;
    iv[1] = (KEY_SIZE * 8) as u8;
    iv[2] = (RATE * 8) as u8;
    iv[3] = 1;
    iv[4] = V::S_H;
    iv[5] = V::S_B;
    iv[6] = V::S_E;
    iv[7] = V::S_K;
    iv
}

/// `IV_KA`/`IV_KE` used to pre-expand the authentication/encryption keys:
/// `{tag, key_bits, rate_bits, 1, sH, sB, sE, sK}`, zero-padded to fill
/// the state bytes left over after the 16-byte key.
fn iv_k<V: IsapVariant>(tag: u8) -> [u8; STATE_SIZE - KEY_SIZE] {
    let mut iv = [0u8; STATE_SIZE - KEY_SIZE];
    iv[0] = tag;
    iv[1] = (KEY_SIZE * 8) as u8;
    iv[2] = (RATE * 8) as u8;
    iv[3] = 1;
    iv[4] = V::S_H;
    iv[5] = V::S_B;
    iv[6] = V::S_E;
    iv[7] = V::S_K;
    iv
}

/// The pre-expanded key material derived once from the long-term key:
/// two permutation states holding `key || IV_KE` and `key || IV_KA`,
/// each already run through `12 - sK` rounds. Every encryption or MAC
/// call rekeys a fresh copy of one of these rather than touching the
/// long-term key again.
pub struct IsapKey<V: IsapVariant> {
    ke: Sliced64State,
    ka: Sliced64State,
    _variant: core::marker::PhantomData<V>,
}

impl<V: IsapVariant> Clone for IsapKey<V> {
    fn clone(&self) -> Self {
        Self {
            ke: self.ke.clone(),
            ka: self.ka.clone(),
            _variant: core::marker::PhantomData,
        }
    }
}

impl<V: IsapVariant> IsapKey<V> {
    /// Pre-expand `key` into the encryption and authentication key
    /// states.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        let mut ke = Sliced64State::init();
        ke.overwrite_bytes(key, 0, KEY_SIZE);
        ke.overwrite_bytes(&iv_k::<V>(0x03), KEY_SIZE, STATE_SIZE - KEY_SIZE);
        ke.permute(12 - V::S_K);

        let mut ka = Sliced64State::init();
        ka.overwrite_bytes(key, 0, KEY_SIZE);
        ka.overwrite_bytes(&iv_k::<V>(0x02), KEY_SIZE, STATE_SIZE - KEY_SIZE);
        ka.permute(12 - V::S_K);

        Self {
            ke,
            ka,
            _variant: core::marker::PhantomData,
        }
    }

    /// Securely wipe both pre-expanded key states.
    pub fn free(&mut self) {
        self.ke.free();
        self.ka.free();
    }
}

/// Absorb one bit (MSB-first within each byte, across `data` in order)
/// at the top of the state, matching `ISAP_ADD_BIT`'s default byte-serial
/// expansion from `ascon-isap-common.h`.
fn add_bit(state: &mut Sliced64State, byte: u8, sub_bit: u32) {
    let absorb = (byte << sub_bit) & 0x80;
    state.add_bytes(&[absorb], 0, 1);
}

/// Re-key the permutation from a pre-expanded key state, absorbing
/// `data` one bit at a time with a permutation between every bit. The
/// rekeyed output key is left in the leading bytes of the returned
/// state.
fn rekey<V: IsapVariant>(pk: &Sliced64State, data: &[u8]) -> Sliced64State {
    let mut state = pk.clone();
    let num_bits = data.len() * 8 - 1;
    for bit in 0..num_bits {
        add_bit(&mut state, data[bit / 8], (bit % 8) as u32);
        state.permute(12 - V::S_B);
    }
    add_bit(&mut state, data[num_bits / 8], (num_bits % 8) as u32);
    state.permute(12 - V::S_K);
    state
}

/// Encrypt (or decrypt — the stream cipher is an involution) `buffer` in
/// place under the pre-expanded encryption key and `nonce`.
fn encrypt<V: IsapVariant>(ke: &Sliced64State, nonce: &[u8; NONCE_SIZE], buffer: &mut [u8]) {
    let mut state = rekey::<V>(ke, nonce);
    state.overwrite_bytes(nonce, STATE_SIZE - NONCE_SIZE, NONCE_SIZE);

    let mut offset = 0;
    while buffer.len() - offset >= RATE {
        state.permute(12 - V::S_E);
        let mut input = [0u8; RATE];
        input.copy_from_slice(&buffer[offset..offset + RATE]);
        let mut out = [0u8; RATE];
        state.extract_and_add_bytes(&input, &mut out, 0, RATE);
        buffer[offset..offset + RATE].copy_from_slice(&out);
        offset += RATE;
    }
    let tail_len = buffer.len() - offset;
    if tail_len > 0 {
        state.permute(12 - V::S_E);
        let mut input = [0u8; RATE];
        input[..tail_len].copy_from_slice(&buffer[offset..]);
        let mut out = [0u8; RATE];
        state.extract_and_add_bytes(&input, &mut out[..tail_len], 0, tail_len);
        buffer[offset..].copy_from_slice(&out[..tail_len]);
    }
}

/// Authenticate `nonce`, `ad`, and `ciphertext` under `key`, producing
/// the 16-byte tag.
fn mac<V: IsapVariant>(
    key: &IsapKey<V>,
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    ciphertext: &[u8],
) -> [u8; TAG_SIZE] {
    let mut state = Sliced64State::init();
    state.overwrite_bytes(nonce, 0, NONCE_SIZE);
    state.overwrite_bytes(&iv_a::<V>(), NONCE_SIZE, STATE_SIZE - NONCE_SIZE);
    state.permute(12 - V::S_H);

    absorb_hashed::<V>(&mut state, ad);
    state.add_bytes(&[0x01], 39, 1);
    absorb_hashed::<V>(&mut state, ciphertext);

    let mut intermediate_key = [0u8; KEY_SIZE];
    state.extract_bytes(&mut intermediate_key, 0, KEY_SIZE);
    let mut preserve = [0u8; STATE_SIZE - KEY_SIZE];
    state.extract_bytes(&mut preserve, KEY_SIZE, STATE_SIZE - KEY_SIZE);

    let mut state = rekey::<V>(&key.ka, &intermediate_key);
    state.overwrite_bytes(&preserve, KEY_SIZE, STATE_SIZE - KEY_SIZE);
    state.permute(12 - V::S_H);

    crate::util::secure_zero(&mut intermediate_key);
    crate::util::secure_zero(&mut preserve);

    let mut tag = [0u8; TAG_SIZE];
    state.extract_bytes(&mut tag, 0, TAG_SIZE);
    tag
}

/// Absorb `data` into the hashing phase: full rate blocks permuted with
/// `sH` rounds between them, a padded (possibly empty) final block, and
/// a trailing `sH`-round permute.
fn absorb_hashed<V: IsapVariant>(state: &mut Sliced64State, data: &[u8]) {
    let full_len = (data.len() / RATE) * RATE;
    for chunk in data[..full_len].chunks_exact(RATE) {
        state.add_bytes(chunk, 0, RATE);
        state.permute(12 - V::S_H);
    }
    let tail = &data[full_len..];
    if !tail.is_empty() {
        state.add_bytes(tail, 0, tail.len());
    }
    state.add_bytes(&[0x80], tail.len(), 1);
    state.permute(12 - V::S_H);
}

/// One-shot ISAP AEAD encryption: `buffer` becomes the ciphertext in
/// place, and the 16-byte tag is returned.
pub fn encrypt_in_place<V: IsapVariant>(
    key: &IsapKey<V>,
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
) -> [u8; TAG_SIZE] {
    encrypt::<V>(&key.ke, nonce, buffer);
    mac::<V>(key, nonce, ad, buffer)
}

/// One-shot ISAP AEAD decryption: `buffer` becomes the plaintext in
/// place on success. On authentication failure `buffer` is zeroed and
/// [`Error::AuthenticationFailure`] is returned.
pub fn decrypt_in_place<V: IsapVariant>(
    key: &IsapKey<V>,
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_SIZE],
) -> Result<()> {
    let computed = mac::<V>(key, nonce, ad, buffer);
    encrypt::<V>(&key.ke, nonce, buffer);

    if crate::util::ct_eq(&computed, tag) {
        Ok(())
    } else {
        for byte in buffer.iter_mut() {
            *byte = 0;
        }
        Err(Error::AuthenticationFailure)
    }
}

/// One-shot ASCON-128-ISAP encryption.
pub fn ascon128_isap_encrypt(
    key: &IsapKey<Ascon128Isap>,
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
) -> [u8; TAG_SIZE] {
    encrypt_in_place(key, nonce, ad, buffer)
}

/// One-shot ASCON-128-ISAP decryption.
pub fn ascon128_isap_decrypt(
    key: &IsapKey<Ascon128Isap>,
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_SIZE],
) -> Result<()> {
    decrypt_in_place(key, nonce, ad, buffer, tag)
}

/// One-shot ASCON-128a-ISAP encryption.
pub fn ascon128a_isap_encrypt(
    key: &IsapKey<Ascon128aIsap>,
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
) -> [u8; TAG_SIZE] {
    encrypt_in_place(key, nonce, ad, buffer)
}

/// One-shot ASCON-128a-ISAP decryption.
pub fn ascon128a_isap_decrypt(
    key: &IsapKey<Ascon128aIsap>,
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_SIZE],
) -> Result<()> {
    decrypt_in_place(key, nonce, ad, buffer, tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_128_isap() {
        let key = IsapKey::<Ascon128Isap>::new(&[0x11u8; KEY_SIZE]);
        let nonce = [0x22u8; NONCE_SIZE];
        let ad = b"header";
        let mut buffer = *b"hello, leakage-resistant world!";
        let plaintext = buffer;

        let tag = ascon128_isap_encrypt(&key, &nonce, ad, &mut buffer);
        assert_ne!(buffer, plaintext);

        ascon128_isap_decrypt(&key, &nonce, ad, &mut buffer, &tag).unwrap();
        assert_eq!(buffer, plaintext);
    }

    #[test]
    fn round_trips_128a_isap_with_empty_ad_and_short_tail() {
        let key = IsapKey::<Ascon128aIsap>::new(&[0x33u8; KEY_SIZE]);
        let nonce = [0x44u8; NONCE_SIZE];
        let ad = b"";
        let mut buffer = *b"seventeen bytes!!";
        let plaintext = buffer;

        let tag = ascon128a_isap_encrypt(&key, &nonce, ad, &mut buffer);
        ascon128a_isap_decrypt(&key, &nonce, ad, &mut buffer, &tag).unwrap();
        assert_eq!(buffer, plaintext);
    }

    #[test]
    fn tampered_ciphertext_fails_and_zeroes_output() {
        let key = IsapKey::<Ascon128Isap>::new(&[0x55u8; KEY_SIZE]);
        let nonce = [0x66u8; NONCE_SIZE];
        let ad = b"ad";
        let mut buffer = *b"secret message!!";

        let tag = ascon128_isap_encrypt(&key, &nonce, ad, &mut buffer);
        buffer[0] ^= 1;

        let err = ascon128_isap_decrypt(&key, &nonce, ad, &mut buffer, &tag).unwrap_err();
        assert_eq!(err, Error::AuthenticationFailure);
        assert_eq!(buffer, [0u8; 16]);
    }

    #[test]
    fn tampered_tag_fails() {
        let key = IsapKey::<Ascon128Isap>::new(&[0x77u8; KEY_SIZE]);
        let nonce = [0x88u8; NONCE_SIZE];
        let ad = b"ad";
        let mut buffer = *b"another secret!!";

        let mut tag = ascon128_isap_encrypt(&key, &nonce, ad, &mut buffer);
        tag[0] ^= 1;

        assert_eq!(
            ascon128_isap_decrypt(&key, &nonce, ad, &mut buffer, &tag).unwrap_err(),
            Error::AuthenticationFailure
        );
    }

    #[test]
    fn different_nonces_give_different_ciphertext() {
        let key = IsapKey::<Ascon128Isap>::new(&[0x99u8; KEY_SIZE]);
        let ad = b"";
        let mut a = *b"identical payload values";
        let mut b = *b"identical payload values";

        ascon128_isap_encrypt(&key, &[0x01u8; NONCE_SIZE], ad, &mut a);
        ascon128_isap_encrypt(&key, &[0x02u8; NONCE_SIZE], ad, &mut b);

        assert_ne!(a, b);
    }
}
