//! Extendable-output functions and fixed-length hashing
//!
//! `Xof`/`XofA` are arbitrary-output-length sponge hashes; `Hash`/`HashA`
//! are the same construction pre-configured for a 32-byte digest, reusing
//! the "outlen == 32" precomputed IV shortcut the reference library takes
//! rather than running the general variable-length initialization for
//! the common case. A `XofA`-style cXOF engine (function-name + custom
//! string domain separation, RFC 8018 §5.2-style) backs [`crate::kdf`],
//! [`crate::kmac`], and [`crate::pbkdf2`].

use crate::core::{Sliced64State, StateRepr};

const RATE: usize = 8;

/// IV for ASCON-XOF (variable-length output), already run through the
/// permutation once.
const XOF_IV: [u64; 5] = [
    0xb57e_273b_814c_d416,
    0x2b51_0425_62ae_2420,
    0x66a3_a776_8ddf_2218,
    0x5aad_0a7a_8153_650c,
    0x4f3e_0e32_5394_93b6,
];

/// IV for ASCON-HASH (fixed 32-byte output), already run through the
/// permutation once.
const HASH_IV: [u64; 5] = [
    0xee93_98aa_db67_f03d,
    0x8bb2_1831_c60f_1002,
    0xb48a_92db_98d5_da62,
    0x4318_9921_b8f8_e3e8,
    0x348f_a5c9_d525_e140,
];

/// IV for ASCON-XOFA (variable-length output), already run through the
/// permutation once.
const XOFA_IV: [u64; 5] = [
    0x4490_6568_b77b_9832,
    0xcd8d_6cae_5345_5532,
    0xf7b5_2127_5642_2129,
    0x2468_85e1_de0d_225b,
    0xa8cb_5ce3_3449_973f,
];

/// IV for ASCON-HASHA (fixed 32-byte output), already run through the
/// permutation once.
const HASHA_IV: [u64; 5] = [
    0x0147_0194_fc65_28a6,
    0x738e_c38a_c0ad_ffa7,
    0x2ec8_e329_6c76_384c,
    0xd6f6_a54d_7f52_377d,
    0xa13c_42a2_23be_8d87,
];

/// Digest size of `Hash`/`HashA`, in bytes.
pub const HASH_SIZE: usize = 32;

/// A sponge-based XOF: variable round count per steady-state block, fixed
/// 8-byte rate, `count`/`mode` bookkeeping for arbitrary chunk boundaries
/// across repeated `absorb`/`squeeze` calls.
#[derive(Clone)]
pub struct XofEngine {
    state: Sliced64State,
    count: usize,
    mode: bool,
    rounds_b: u8,
}

impl XofEngine {
    fn from_lanes(lanes: [u64; 5], rounds_b: u8) -> Self {
        Self {
            state: Sliced64State::from_lanes(lanes),
            count: 0,
            mode: false,
            rounds_b,
        }
    }

    /// Variable-length ASCON-XOF (full 12 rounds between every block).
    pub fn xof() -> Self {
        Self::from_lanes(XOF_IV, 0)
    }

    /// Variable-length ASCON-XOFA (8 rounds between steady-state blocks).
    pub fn xofa() -> Self {
        Self::from_lanes(XOFA_IV, 4)
    }

    /// Fixed 32-byte ASCON-HASH.
    pub fn hash() -> Self {
        Self::from_lanes(HASH_IV, 0)
    }

    /// Fixed 32-byte ASCON-HASHA.
    pub fn hasha() -> Self {
        Self::from_lanes(HASHA_IV, 4)
    }

    /// Build an engine directly from a precomputed IV (the state that
    /// results from running a cXOF initialization block through the
    /// permutation once), skipping that permutation. Used for the
    /// `KMAC_SIZE`-output fast path in [`crate::kmac`].
    pub(crate) fn from_precomputed_iv(lanes: [u64; 5], rounds_b: u8) -> Self {
        Self::from_lanes(lanes, rounds_b)
    }

    /// Absorb a customization string and align back onto a fresh block
    /// boundary: pads the partial block, permutes with the full round
    /// count, and applies the domain separator bit. A no-op when
    /// `custom` is empty.
    pub fn absorb_custom(&mut self, custom: &[u8]) {
        if !custom.is_empty() {
            self.absorb(custom);
            self.state.add_bytes(&[0x80], self.count, 1);
            self.state.permute(0);
            self.state.add_bytes(&[0x01], 39, 1);
            self.count = 0;
        }
    }

    /// Build a customization-string-keyed ("cXOF") instance: absorbs a
    /// function-name block (hashed down if longer than 32 bytes) and an
    /// explicit output length into the initial permutation input, then
    /// absorbs `custom` as the domain-separation string.
    ///
    /// Used by [`crate::kdf`] and [`crate::kmac`] with `function_name`
    /// `"KDF"`/`"KMAC"`, and by [`crate::pbkdf2`] with `"PBKDF2"`.
    pub fn init_custom(rounds_b: u8, function_name: &str, custom: &[u8], outlen: usize) -> Self {
        let mut temp = [0u8; HASH_SIZE];
        let name = function_name.as_bytes();
        if name.len() <= HASH_SIZE {
            temp[..name.len()].copy_from_slice(name);
        } else {
            let mut hasher = if rounds_b == 0 {
                Self::xof()
            } else {
                Self::xofa()
            };
            hasher.absorb(name);
            hasher.squeeze(&mut temp);
        }

        let mut state = Sliced64State::init();
        state.overwrite_bytes(&temp, 8, HASH_SIZE);
        let domain = if rounds_b == 0 {
            0x0040_0c00_0000_0000u64
        } else {
            0x0040_0c04_0000_0000u64
        };
        let mut iv = [0u8; 8];
        crate::util::be_store_u64(&mut iv, domain | (outlen as u64 * 8));
        state.overwrite_bytes(&iv, 0, 8);
        state.permute(0);

        let mut engine = Self {
            state,
            count: 0,
            mode: false,
            rounds_b,
        };
        engine.absorb_custom(custom);
        engine
    }

    fn permute_b(&mut self) {
        self.state.permute(12 - self.rounds_b);
    }

    /// Force alignment onto a fresh block boundary without emitting any
    /// output. If currently squeezing, re-enter the absorb phase with an
    /// empty absorb (which pads and transitions as usual). Otherwise, if a
    /// partial block is buffered, run the full-round permutation directly
    /// (no `0x80` padding byte — this is not a domain transition, just a
    /// forced block boundary) and reset the buffered count.
    ///
    /// Used by [`crate::prng`] to align the sponge before its rekeying
    /// ritual zeroes the rate.
    pub fn pad(&mut self) {
        if self.mode {
            self.absorb(&[]);
        } else if self.count != 0 {
            self.state.permute(0);
            self.count = 0;
        }
    }

    /// Zero the rate portion of the state and run the full-round
    /// permutation once. Used only by [`crate::prng`]'s forward-security
    /// rekeying ritual, which must reach into the raw state rather than go
    /// through `absorb`/`squeeze`.
    pub(crate) fn zero_rate_and_permute(&mut self) {
        self.state.overwrite_with_zeroes(0, RATE);
        self.state.permute(0);
    }

    /// Absorb more input. May be called any number of times; switches
    /// back from the squeeze phase (re-permuting) if output was already
    /// produced, matching the reference library's re-entrant behavior.
    pub fn absorb(&mut self, mut data: &[u8]) {
        if self.mode {
            self.mode = false;
            self.count = 0;
            self.state.permute(0);
        }

        if self.count != 0 {
            let room = RATE - self.count;
            if room > data.len() {
                self.state.add_bytes(data, self.count, data.len());
                self.count += data.len();
                return;
            }
            self.state.add_bytes(&data[..room], self.count, room);
            self.count = 0;
            data = &data[room..];
            self.permute_b();
        }

        while data.len() >= RATE {
            self.state.add_bytes(&data[..RATE], 0, RATE);
            data = &data[RATE..];
            self.permute_b();
        }

        if !data.is_empty() {
            self.state.add_bytes(data, 0, data.len());
            self.count = data.len();
        }
    }

    /// Squeeze output. May be called repeatedly to extend the output
    /// stream; the first call after any `absorb` pads and transitions.
    pub fn squeeze(&mut self, mut out: &mut [u8]) {
        if !self.mode {
            self.state.add_bytes(&[0x80], self.count, 1);
            self.count = 0;
            self.mode = true;
        }

        if self.count != 0 {
            let room = RATE - self.count;
            if room > out.len() {
                let n = out.len();
                self.state.extract_bytes(out, self.count, n);
                self.count += n;
                return;
            }
            let (head, tail) = out.split_at_mut(room);
            self.state.extract_bytes(head, self.count, room);
            out = tail;
            self.count = 0;
        }

        while out.len() >= RATE {
            self.permute_b();
            let (head, tail) = out.split_at_mut(RATE);
            self.state.extract_bytes(head, 0, RATE);
            out = tail;
        }

        if !out.is_empty() {
            self.permute_b();
            let n = out.len();
            self.state.extract_bytes(out, 0, n);
            self.count = n;
        }
    }
}

/// One-shot ASCON-XOF.
pub fn xof(input: &[u8], out: &mut [u8]) {
    let mut engine = XofEngine::xof();
    engine.absorb(input);
    engine.squeeze(out);
}

/// One-shot ASCON-XOFA.
pub fn xofa(input: &[u8], out: &mut [u8]) {
    let mut engine = XofEngine::xofa();
    engine.absorb(input);
    engine.squeeze(out);
}

/// One-shot ASCON-HASH, producing a 32-byte digest.
pub fn hash(input: &[u8]) -> [u8; HASH_SIZE] {
    let mut engine = XofEngine::hash();
    engine.absorb(input);
    let mut out = [0u8; HASH_SIZE];
    engine.squeeze(&mut out);
    out
}

/// One-shot ASCON-HASHA, producing a 32-byte digest.
pub fn hasha(input: &[u8]) -> [u8; HASH_SIZE] {
    let mut engine = XofEngine::hasha();
    engine.absorb(input);
    let mut out = [0u8; HASH_SIZE];
    engine.squeeze(&mut out);
    out
}
