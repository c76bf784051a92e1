//! Shared encrypt/decrypt/incremental skeleton for the AEAD family
//!
//! Every variant differs only in its initialization vector, key size,
//! absorption rate, and per-phase round counts; this module carries the
//! actual absorb/encrypt/decrypt/finalize control flow once and lets
//! each variant plug in through [`AeadVariant`].

use crate::core::{Sliced64State, StateRepr};
use crate::error::{Error, Result};
use crate::sponge::{Rounds, Sponge};

/// Per-variant configuration consumed by the shared encrypt/decrypt path.
///
/// Implementors describe how to build the initial state from a key and
/// nonce and how to derive the tag once the payload has been processed;
/// the block-by-block absorb/encrypt/decrypt loop itself never varies.
pub trait AeadVariant {
    /// Key size in bytes (16 for ASCON-128/128a, 20 for ASCON-80pq).
    const KEY_SIZE: usize;
    /// Absorption rate in bytes (8 for ASCON-128/80pq, 16 for ASCON-128a).
    const RATE: usize;
    /// Round count used between AD blocks.
    const AD_ROUNDS: u8;
    /// Round count used between payload blocks.
    const PAYLOAD_ROUNDS: u8;

    /// Build the initial state: load IV/key/nonce, permute 12 rounds,
    /// and absorb the key a first time per the variant's key schedule.
    fn init(key: &[u8], nonce: &[u8; 16]) -> Sliced64State;

    /// Derive the 16-byte tag from the post-payload state, consuming
    /// the variant's finalization key schedule (a second, offset-shifted
    /// key absorption, a 12-round permute, and a third key absorption).
    fn finalize(state: &mut Sliced64State, key: &[u8]) -> [u8; 16];
}

fn rounds<V: AeadVariant>() -> Rounds {
    Rounds {
        a: 12,
        b: V::AD_ROUNDS,
    }
}

/// Constant-time tag check mirroring the reference accumulate-then-mask
/// pattern: every tag byte pair is XORed into a running accumulator, the
/// accumulator is collapsed to an all-ones or all-zeros mask, and that
/// mask is ANDed into every plaintext byte so a failed check leaves the
/// caller with all-zero plaintext rather than ever exposing it.
fn check_tag_and_mask(plaintext: &mut [u8], computed: &[u8; 16], received: &[u8]) -> bool {
    let mut accum: u8 = 0;
    for (a, b) in computed.iter().zip(received.iter()) {
        accum |= a ^ b;
    }
    // mask = 0xff if accum == 0 (match), 0x00 otherwise.
    let mask = (u16::from(accum).wrapping_sub(1) >> 8) as u8;
    for byte in plaintext.iter_mut() {
        *byte &= mask;
    }
    mask == 0xff
}

/// Encrypt `buffer` in place (plaintext in, ciphertext out) under `key`
/// and `nonce`, authenticating `ad`, and return the 16-byte tag.
pub fn encrypt_in_place<V: AeadVariant>(
    key: &[u8],
    nonce: &[u8; 16],
    ad: &[u8],
    buffer: &mut [u8],
) -> [u8; 16] {
    assert_eq!(key.len(), V::KEY_SIZE);
    let state = V::init(key, nonce);
    let mut sponge = Sponge::new(state, V::RATE, rounds::<V>());

    absorb_ad(&mut sponge, ad);

    let rate = V::RATE;
    let mut chunks = buffer.chunks_exact_mut(rate);
    let full_len = (buffer.len() / rate) * rate;
    for chunk in &mut chunks {
        let mut out = [0u8; 32];
        sponge.duplex_encrypt_block(chunk, &mut out[..rate]);
        chunk.copy_from_slice(&out[..rate]);
        sponge.state_mut().permute(12 - V::PAYLOAD_ROUNDS);
    }
    let tail = &mut buffer[full_len..];
    {
        let mut out = [0u8; 16];
        let n = tail.len();
        sponge.duplex_encrypt_last(tail, &mut out[..n]);
        tail.copy_from_slice(&out[..n]);
    }

    let mut state = sponge.into_state();
    V::finalize(&mut state, key)
}

/// Decrypt `buffer` in place (ciphertext in, plaintext out) under `key`
/// and `nonce`, checking `ad` and `tag`. On failure `buffer` is zeroed
/// and [`Error::AuthenticationFailure`] is returned.
pub fn decrypt_in_place<V: AeadVariant>(
    key: &[u8],
    nonce: &[u8; 16],
    ad: &[u8],
    buffer: &mut [u8],
    tag: &[u8; 16],
) -> Result<()> {
    assert_eq!(key.len(), V::KEY_SIZE);
    let state = V::init(key, nonce);
    let mut sponge = Sponge::new(state, V::RATE, rounds::<V>());

    absorb_ad(&mut sponge, ad);

    let rate = V::RATE;
    let full_len = (buffer.len() / rate) * rate;
    {
        let mut chunks = buffer[..full_len].chunks_exact_mut(rate);
        for chunk in &mut chunks {
            let mut out = [0u8; 32];
            sponge.duplex_decrypt_block(chunk, &mut out[..rate]);
            chunk.copy_from_slice(&out[..rate]);
            sponge.state_mut().permute(12 - V::PAYLOAD_ROUNDS);
        }
    }
    let tail = &mut buffer[full_len..];
    {
        let mut out = [0u8; 16];
        let n = tail.len();
        sponge.duplex_decrypt_last(tail, &mut out[..n]);
        tail.copy_from_slice(&out[..n]);
    }

    let mut state = sponge.into_state();
    let computed = V::finalize(&mut state, key);

    if check_tag_and_mask(buffer, &computed, tag) {
        Ok(())
    } else {
        for byte in buffer.iter_mut() {
            *byte = 0;
        }
        Err(Error::AuthenticationFailure)
    }
}

/// Absorb the associated data (if any) and apply the domain-separation
/// bit that marks the end of the AD phase. The separator is applied
/// unconditionally, even when `ad` is empty: it XORs bit 0 of the last
/// state byte (offset 39), distinct from the `0x80` block-padding byte.
fn absorb_ad<V: AeadVariant>(sponge: &mut Sponge<Sliced64State>, ad: &[u8]) {
    if !ad.is_empty() {
        let rate = V::RATE;
        let full_len = (ad.len() / rate) * rate;
        sponge.absorb_full_blocks(&ad[..full_len]);
        sponge.absorb_last_block(&ad[full_len..]);
        sponge.permute_b();
    }
    sponge.state_mut().add_bytes(&[0x01], 39, 1);
}

/// Incremental AEAD session. Callers call [`AeadState::start`] once AD is
/// known, then repeated [`AeadState::encrypt_block`]/[`decrypt_block`]
/// calls for rate-multiple chunks (final chunk may be short), then
/// [`AeadState::encrypt_finalize`]/[`decrypt_finalize`].
///
/// [`decrypt_block`]: AeadState::decrypt_block
pub struct AeadState<V: AeadVariant> {
    sponge: Sponge<Sliced64State>,
    key: [u8; 20],
    key_len: usize,
    nonce: [u8; 16],
    _variant: core::marker::PhantomData<V>,
}

impl<V: AeadVariant> AeadState<V> {
    /// Initialize incremental state from `key` and `nonce`, absorbing
    /// neither AD nor payload yet.
    pub fn init(key: &[u8], nonce: [u8; 16]) -> Self {
        assert_eq!(key.len(), V::KEY_SIZE);
        let mut key_buf = [0u8; 20];
        key_buf[..key.len()].copy_from_slice(key);
        let state = V::init(key, &nonce);
        Self {
            sponge: Sponge::new(state, V::RATE, rounds::<V>()),
            key: key_buf,
            key_len: key.len(),
            nonce,
            _variant: core::marker::PhantomData,
        }
    }

    fn key(&self) -> &[u8] {
        &self.key[..self.key_len]
    }

    /// Absorb the associated data and transition to payload processing.
    /// `start` also advances the stored nonce by one (little-endian
    /// 128-bit increment) so a subsequent `init` with the same key
    /// produces a fresh nonce for the next packet.
    pub fn start(&mut self, ad: &[u8]) {
        absorb_ad::<V>(&mut self.sponge, ad);
        let mut carry = 1u16;
        for byte in self.nonce.iter_mut() {
            let sum = u16::from(*byte) + carry;
            *byte = sum as u8;
            carry = sum >> 8;
        }
    }

    /// Encrypt one rate-multiple (or final short) block in place.
    pub fn encrypt_block(&mut self, block: &mut [u8]) {
        let rate = V::RATE;
        if block.len() == rate {
            let mut out = [0u8; 32];
            self.sponge.duplex_encrypt_block(block, &mut out[..rate]);
            block.copy_from_slice(&out[..rate]);
            self.sponge.state_mut().permute(12 - V::PAYLOAD_ROUNDS);
        } else {
            let mut out = [0u8; 16];
            let n = block.len();
            self.sponge.duplex_encrypt_last(block, &mut out[..n]);
            block.copy_from_slice(&out[..n]);
        }
    }

    /// Decrypt one rate-multiple (or final short) block in place.
    pub fn decrypt_block(&mut self, block: &mut [u8]) {
        let rate = V::RATE;
        if block.len() == rate {
            let mut out = [0u8; 32];
            self.sponge.duplex_decrypt_block(block, &mut out[..rate]);
            block.copy_from_slice(&out[..rate]);
            self.sponge.state_mut().permute(12 - V::PAYLOAD_ROUNDS);
        } else {
            let mut out = [0u8; 16];
            let n = block.len();
            self.sponge.duplex_decrypt_last(block, &mut out[..n]);
            block.copy_from_slice(&out[..n]);
        }
    }

    /// Finalize an encrypt session, returning the tag.
    pub fn encrypt_finalize(mut self) -> [u8; 16] {
        let key_len = self.key_len;
        let mut key = [0u8; 20];
        key[..key_len].copy_from_slice(self.key());
        V::finalize(self.sponge.state_mut(), &key[..key_len])
    }

    /// Finalize a decrypt session, checking `tag` against `plaintext_so_far`.
    pub fn decrypt_finalize(mut self, plaintext_so_far: &mut [u8], tag: &[u8; 16]) -> Result<()> {
        let key_len = self.key_len;
        let mut key = [0u8; 20];
        key[..key_len].copy_from_slice(self.key());
        let computed = V::finalize(self.sponge.state_mut(), &key[..key_len]);
        if check_tag_and_mask(plaintext_so_far, &computed, tag) {
            Ok(())
        } else {
            for byte in plaintext_so_far.iter_mut() {
                *byte = 0;
            }
            Err(Error::AuthenticationFailure)
        }
    }
}
