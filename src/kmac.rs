//! Keyed MAC: ASCON-KMAC and ASCON-KMACA
//!
//! Structurally cXOF("KMAC", custom) with the key absorbed first and the
//! message second, squeezed to `outlen` bytes. When `outlen` is exactly
//! [`KMAC_SIZE`] (the common case), a precomputed IV is used instead of
//! running the cXOF initialization block through the permutation, the
//! same shortcut ASCON-HASH takes over the general ASCON-XOF path.

use crate::xof::XofEngine;

/// Default KMAC output size in bytes, eligible for the precomputed-IV
/// fast path.
pub const KMAC_SIZE: usize = 32;

const KMAC_IV: [u64; 5] = [
    0x7a09_1324_95df_a176,
    0x1b19_e04f_31cc_4cae,
    0x64ba_72af_aa61_d2b1,
    0xd296_4e09_a516_9084,
    0x05bc_6c86_5abe_514b,
];

const KMACA_IV: [u64; 5] = [
    0x47d4_5e03_4222_e472,
    0xed0d_a2bb_5580_c30a,
    0xedce_ed89_ce04_c765,
    0xffe0_52a5_533e_aa30,
    0xc8be_4956_f967_f91a,
];

fn init(rounds_b: u8, key: &[u8], custom: &[u8], outlen: usize) -> XofEngine {
    let mut engine = if outlen == KMAC_SIZE {
        let iv = if rounds_b == 0 { KMAC_IV } else { KMACA_IV };
        let mut engine = XofEngine::from_precomputed_iv(iv, rounds_b);
        if !custom.is_empty() {
            engine.absorb_custom(custom);
        }
        engine
    } else {
        XofEngine::init_custom(rounds_b, "KMAC", custom, outlen)
    };
    engine.absorb(key);
    engine
}

fn compute(rounds_b: u8, key: &[u8], message: &[u8], custom: &[u8], out: &mut [u8]) {
    let mut engine = init(rounds_b, key, custom, out.len());
    engine.absorb(message);
    engine.squeeze(out);
}

/// ASCON-KMAC: full-round (ASCON-XOF-based) keyed MAC.
pub fn kmac(key: &[u8], message: &[u8], custom: &[u8], out: &mut [u8]) {
    compute(0, key, message, custom, out);
}

/// ASCON-KMACA: fast-round (ASCON-XOFA-based) keyed MAC.
pub fn kmaca(key: &[u8], message: &[u8], custom: &[u8], out: &mut [u8]) {
    compute(4, key, message, custom, out);
}
