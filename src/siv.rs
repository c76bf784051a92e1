//! SIV: nonce-misuse-resistant AEAD
//!
//! A two-pass construction built from the same permutation and IV/key
//! schedule as the regular AEAD family, but immune to nonce reuse: the
//! first pass authenticates the associated data and plaintext and derives
//! a 16-byte synthetic IV from them (so the same nonce/key/plaintext
//! always produces the same synthetic IV, and a different plaintext
//! almost certainly produces a different one); the second pass runs the
//! permutation in output-feedback mode, keyed by that synthetic IV rather
//! than the caller's nonce, to actually mask the plaintext. Reusing a
//! nonce therefore only reveals whether two messages were identical, not
//! any of their content — unlike the regular AEAD family, where nonce
//! reuse breaks confidentiality outright.

use crate::core::{Sliced64State, StateRepr};
use crate::error::{Error, Result};
use crate::sponge::{Rounds, Sponge};

/// Tag (and synthetic IV) size in bytes.
pub const TAG_SIZE: usize = 16;

/// Nonce size in bytes.
pub const NONCE_SIZE: usize = 16;

/// Per-variant configuration for the SIV construction. Both variants use
/// a 16-byte key; they differ only in rate and round count, same as their
/// regular-AEAD counterparts.
pub trait SivVariant {
    /// Key size in bytes (always 16 for the variants defined here).
    const KEY_SIZE: usize;
    /// Absorption rate in bytes (8 for ASCON-128-SIV, 16 for ASCON-128a-SIV).
    const RATE: usize;
    /// Round count used between absorbed/keystream blocks.
    const ROUNDS_B: u8;
    /// IV for the first (authentication) pass.
    const IV1: [u8; 8];
    /// IV for the second (encryption) pass.
    const IV2: [u8; 8];
}

/// ASCON-128-SIV: 8-byte rate, 6 steady-state rounds.
pub struct Ascon128Siv;

impl SivVariant for Ascon128Siv {
    const KEY_SIZE: usize = 16;
    const RATE: usize = 8;
    const ROUNDS_B: u8 = 6;
    const IV1: [u8; 8] = [0x81, 0x40, 0x0c, 0x06, 0x00, 0x00, 0x00, 0x00];
    const IV2: [u8; 8] = [0x82, 0x40, 0x0c, 0x06, 0x00, 0x00, 0x00, 0x00];
}

/// ASCON-128a-SIV: 16-byte rate, 4 steady-state rounds.
pub struct Ascon128aSiv;

impl SivVariant for Ascon128aSiv {
    const KEY_SIZE: usize = 16;
    const RATE: usize = 16;
    const ROUNDS_B: u8 = 4;
    const IV1: [u8; 8] = [0x81, 0x80, 0x0c, 0x08, 0x00, 0x00, 0x00, 0x00];
    const IV2: [u8; 8] = [0x82, 0x80, 0x0c, 0x08, 0x00, 0x00, 0x00, 0x00];
}

fn rounds<V: SivVariant>() -> Rounds {
    Rounds {
        a: 12,
        b: V::ROUNDS_B,
    }
}

/// Build the initial state for either pass: load `iv`/key/nonce, permute
/// 12 rounds, then absorb the key a second time at the rate boundary —
/// identical to [`crate::aead::AeadVariant::init`]'s schedule, just with a
/// caller-supplied IV instead of a fixed one (the two passes use
/// different IVs to keep their duplex states from colliding).
fn init_state<V: SivVariant>(iv: [u8; 8], key: &[u8], nonce: &[u8; NONCE_SIZE]) -> Sliced64State {
    let mut state = Sliced64State::init();
    state.overwrite_bytes(&iv, 0, 8);
    state.overwrite_bytes(key, 8, V::KEY_SIZE);
    state.overwrite_bytes(nonce, 24, NONCE_SIZE);
    state.permute(0);
    state.add_bytes(key, 24, V::KEY_SIZE);
    state
}

/// Derive the 16-byte tag (pass 1) or synthetic IV (also pass 1 — they're
/// the same computation): absorb the key a third time, permute 12
/// rounds, absorb the key a fourth time, squeeze 16 bytes. Structurally
/// identical to the regular AEAD family's finalize step.
fn finalize<V: SivVariant>(state: &mut Sliced64State, key: &[u8]) -> [u8; TAG_SIZE] {
    state.add_bytes(key, V::RATE, V::KEY_SIZE);
    state.permute(0);
    state.add_bytes(key, 24, V::KEY_SIZE);
    let mut out = [0u8; TAG_SIZE];
    state.extract_bytes(&mut out, 24, TAG_SIZE);
    out
}

/// Absorb `data` into the authentication-phase duplex: full rate blocks,
/// a padded final (possibly empty) block, and an optional trailing
/// permute. Always runs, even for empty `data` — used for the plaintext,
/// which must be absorbed (and thus padded) regardless of length.
fn absorb<V: SivVariant>(sponge: &mut Sponge<Sliced64State>, data: &[u8], last_permute: bool) {
    let rate = V::RATE;
    let full_len = (data.len() / rate) * rate;
    sponge.absorb_full_blocks(&data[..full_len]);
    sponge.absorb_last_block(&data[full_len..]);
    if last_permute {
        sponge.permute_b();
    }
}

/// Absorb the associated data, skipped entirely when empty (unlike the
/// plaintext absorb, which always runs).
fn absorb_ad<V: SivVariant>(sponge: &mut Sponge<Sliced64State>, ad: &[u8]) {
    if !ad.is_empty() {
        absorb::<V>(sponge, ad, true);
    }
}

/// Authenticate `ad` and `plaintext` under `key`/`nonce`, returning the
/// 16-byte synthetic IV that both seeds the encryption pass and doubles
/// as the tag.
fn authenticate<V: SivVariant>(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    plaintext: &[u8],
) -> [u8; TAG_SIZE] {
    let state = init_state::<V>(V::IV1, key, nonce);
    let mut sponge = Sponge::new(state, V::RATE, rounds::<V>());

    absorb_ad::<V>(&mut sponge, ad);
    sponge.state_mut().add_bytes(&[0x01], 39, 1);
    absorb::<V>(&mut sponge, plaintext, false);

    let mut state = sponge.into_state();
    finalize::<V>(&mut state, key)
}

/// Run the permutation in output-feedback mode, XORing a keystream block
/// derived by repeated permute-then-squeeze into `buffer` in place. Never
/// feeds `buffer`'s contents back into the state — that's what makes this
/// genuinely OFB rather than a duplex.
fn ofb_xor<V: SivVariant>(state: &mut Sliced64State, buffer: &mut [u8]) {
    let rate = V::RATE;
    let mut chunks = buffer.chunks_mut(rate);
    for chunk in &mut chunks {
        state.permute(12 - V::ROUNDS_B);
        let mut block = [0u8; 16];
        state.extract_bytes(&mut block[..chunk.len()], 0, chunk.len());
        crate::util::xor_block(chunk, &block[..chunk.len()]);
    }
}

fn check_tag(computed: &[u8; TAG_SIZE], received: &[u8]) -> bool {
    let mut accum: u8 = 0;
    for (a, b) in computed.iter().zip(received.iter()) {
        accum |= a ^ b;
    }
    let mask = (u16::from(accum).wrapping_sub(1) >> 8) as u8;
    mask == 0xff
}

/// Encrypt `buffer` in place under `key` and `nonce`, authenticating
/// `ad`, and return the 16-byte tag. Unlike the regular AEAD family,
/// reusing `nonce` across calls with the same key and plaintext is safe
/// (it reveals only that the messages were identical); reusing it across
/// calls with *different* plaintext is safe for confidentiality (each
/// message still gets its own synthetic IV) but is not recommended, since
/// it degrades the construction's misuse resistance to its AEAD
/// baseline.
pub fn encrypt_in_place<V: SivVariant>(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
) -> [u8; TAG_SIZE] {
    assert_eq!(key.len(), V::KEY_SIZE);
    let synthetic_iv = authenticate::<V>(key, nonce, ad, buffer);

    let mut state = init_state::<V>(V::IV2, key, &synthetic_iv);
    ofb_xor::<V>(&mut state, buffer);

    synthetic_iv
}

/// Decrypt `buffer` in place under `key` and `nonce`, checking `ad` and
/// `tag`. On failure `buffer` is zeroed and
/// [`Error::AuthenticationFailure`] is returned.
pub fn decrypt_in_place<V: SivVariant>(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_SIZE],
) -> Result<()> {
    assert_eq!(key.len(), V::KEY_SIZE);

    let mut state = init_state::<V>(V::IV2, key, tag);
    ofb_xor::<V>(&mut state, buffer);

    let computed = authenticate::<V>(key, nonce, ad, buffer);

    if check_tag(&computed, tag) {
        Ok(())
    } else {
        for byte in buffer.iter_mut() {
            *byte = 0;
        }
        Err(Error::AuthenticationFailure)
    }
}

/// One-shot ASCON-128-SIV encryption. Returns the tag; `buffer` becomes
/// the ciphertext.
pub fn ascon128_siv_encrypt(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
) -> [u8; TAG_SIZE] {
    encrypt_in_place::<Ascon128Siv>(key, nonce, ad, buffer)
}

/// One-shot ASCON-128-SIV decryption. `buffer` becomes the plaintext on
/// success; zeroed on authentication failure.
pub fn ascon128_siv_decrypt(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_SIZE],
) -> Result<()> {
    decrypt_in_place::<Ascon128Siv>(key, nonce, ad, buffer, tag)
}

/// One-shot ASCON-128a-SIV encryption. Returns the tag; `buffer` becomes
/// the ciphertext.
pub fn ascon128a_siv_encrypt(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
) -> [u8; TAG_SIZE] {
    encrypt_in_place::<Ascon128aSiv>(key, nonce, ad, buffer)
}

/// One-shot ASCON-128a-SIV decryption. `buffer` becomes the plaintext on
/// success; zeroed on authentication failure.
pub fn ascon128a_siv_decrypt(
    key: &[u8],
    nonce: &[u8; NONCE_SIZE],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; TAG_SIZE],
) -> Result<()> {
    decrypt_in_place::<Ascon128aSiv>(key, nonce, ad, buffer, tag)
}
