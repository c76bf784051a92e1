//! The duplex sponge construction
//!
//! Absorb, squeeze, and duplex operations shared by every mode built on
//! top of Ascon-p (AEAD, XOF, hashing, KDF/MAC/PRF, SIV, PBKDF2). A
//! `Sponge` owns a `StateRepr` plus the bookkeeping (rate, permutation
//! round counts, buffered partial-block byte count) that the modes above
//! it configure differently.

use crate::core::StateRepr;

/// IV bytes occupy lane 0; AD/plaintext absorption always starts at
/// byte offset 0 of the rate portion.
pub const RATE_OFFSET: usize = 0;

/// Controls how many rounds of the permutation run between absorbed
/// blocks versus around the start/end of a message (AEAD variants use a
/// cheaper "b" round count for the steady-state duplex and the full "a"
/// round count only at the key/nonce setup and finalization boundary).
#[derive(Clone, Copy)]
pub struct Rounds {
    /// Rounds run at initialization and finalization.
    pub a: u8,
    /// Rounds run between absorbed/squeezed blocks.
    pub b: u8,
}

/// A duplex sponge over a 320-bit Ascon-p state.
#[derive(Clone)]
pub struct Sponge<S: StateRepr> {
    state: S,
    rate: usize,
    rounds: Rounds,
}

impl<S: StateRepr> Sponge<S> {
    /// Build a sponge around an already-initialized state (IV, key, and
    /// nonce already absorbed and permuted by the caller).
    pub fn new(state: S, rate: usize, rounds: Rounds) -> Self {
        Self {
            state,
            rate,
            rounds,
        }
    }

    /// Borrow the underlying state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutably borrow the underlying state.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Consume the sponge, returning the underlying state.
    pub fn into_state(self) -> S {
        self.state
    }

    pub(crate) fn rate(&self) -> usize {
        self.rate
    }

    /// Run the permutation for the steady-state round count (`rounds.b`).
    pub fn permute_b(&mut self) {
        self.state.permute(12 - self.rounds.b);
    }

    /// Run the permutation for the full round count (`rounds.a`).
    pub fn permute_a(&mut self) {
        self.state.permute(12 - self.rounds.a);
    }

    /// Absorb `data` in rate-sized blocks, permuting with `rounds.b`
    /// between blocks. `data.len()` need not be a multiple of the rate;
    /// the caller is responsible for padding before the final call if
    /// the mode requires it.
    pub fn absorb_full_blocks(&mut self, data: &[u8]) {
        let rate = self.rate;
        let mut chunks = data.chunks_exact(rate);
        for chunk in &mut chunks {
            self.state.add_bytes(chunk, RATE_OFFSET, rate);
            self.permute_b();
        }
    }

    /// Absorb a final, possibly-short block with Ascon's `0x80` domain
    /// padding byte appended right after the data (standard sponge
    /// padding: pad-then-permute is left to the caller via
    /// `permute_a`/`permute_b` as the mode requires).
    pub fn absorb_last_block(&mut self, data: &[u8]) {
        let rate = self.rate;
        debug_assert!(data.len() < rate);
        self.state.add_bytes(data, RATE_OFFSET, data.len());
        self.state.add_bytes(&[0x80], RATE_OFFSET + data.len(), 1);
    }

    /// Squeeze `rate`-sized blocks of output, permuting with `rounds.b`
    /// between blocks except after the final one.
    pub fn squeeze_full_blocks(&mut self, out: &mut [u8]) {
        let rate = self.rate;
        let mut chunks = out.chunks_exact_mut(rate);
        let n = chunks.len();
        for (i, chunk) in (&mut chunks).enumerate() {
            self.state.extract_bytes(chunk, RATE_OFFSET, rate);
            if i + 1 < n {
                self.permute_b();
            }
        }
    }

    /// Squeeze a final, possibly-short block with no trailing permute.
    pub fn squeeze_last_block(&mut self, out: &mut [u8]) {
        self.state.extract_bytes(out, RATE_OFFSET, out.len());
    }

    /// Duplex-encrypt: absorb a rate-sized plaintext block and emit the
    /// corresponding ciphertext block, in one step.
    pub fn duplex_encrypt_block(&mut self, plaintext: &[u8], ciphertext: &mut [u8]) {
        let rate = self.rate;
        self.state
            .extract_and_add_bytes(plaintext, ciphertext, RATE_OFFSET, rate);
    }

    /// Duplex-decrypt: absorb a rate-sized ciphertext block and emit the
    /// corresponding plaintext block, in one step.
    pub fn duplex_decrypt_block(&mut self, ciphertext: &[u8], plaintext: &mut [u8]) {
        let rate = self.rate;
        self.state
            .extract_and_overwrite_bytes(ciphertext, plaintext, RATE_OFFSET, rate);
    }

    /// Duplex-encrypt a final, short block and apply the domain-padding
    /// byte right after it.
    pub fn duplex_encrypt_last(&mut self, plaintext: &[u8], ciphertext: &mut [u8]) {
        let len = plaintext.len();
        self.state
            .extract_and_add_bytes(plaintext, ciphertext, RATE_OFFSET, len);
        self.state.add_bytes(&[0x80], RATE_OFFSET + len, 1);
    }

    /// Duplex-decrypt a final, short block and apply the domain-padding
    /// byte right after it.
    pub fn duplex_decrypt_last(&mut self, ciphertext: &[u8], plaintext: &mut [u8]) {
        let len = ciphertext.len();
        self.state
            .extract_and_overwrite_bytes(ciphertext, plaintext, RATE_OFFSET, len);
        self.state.add_bytes(&[0x80], RATE_OFFSET + len, 1);
    }

    /// Zero the underlying state.
    pub fn free(&mut self) {
        self.state.free();
    }
}
