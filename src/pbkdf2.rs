//! PBKDF2 password-based key derivation (RFC 8018 §5.2) over the cXOF PRF
//!
//! The reference construction replaces RFC 8018's HMAC-based PRF with
//! `PRF(P, X) = ASCON-cXOF(X, 256, "PBKDF2", P)`: the password is the cXOF
//! *customization string*, fixed for the whole derivation, while the salt
//! and a big-endian block counter are what gets absorbed as the body of
//! each call to `F`.

use crate::util::be_store_u32;
use crate::xof::XofEngine;

const BLOCK_SIZE: usize = 32;

/// `F(i)` from RFC 8018 §5.2: `count` repeated applications of the PRF,
/// each iteration's output XORed into the running total, starting from a
/// shared `base` state that has already absorbed the password as its
/// customization string.
fn f(base: &XofEngine, salt: &[u8], count: u64, blocknum: u32, t: &mut [u8; BLOCK_SIZE]) {
    let mut u = [0u8; BLOCK_SIZE];
    let mut block = [0u8; 4];
    be_store_u32(&mut block, blocknum);

    let mut engine = base.clone();
    engine.absorb(salt);
    engine.absorb(&block);
    engine.squeeze(t);

    if count > 1 {
        let mut engine = base.clone();
        engine.absorb(t);
        engine.squeeze(&mut u);
        crate::util::xor_block(t, &u);

        for _ in 2..count {
            let mut engine = base.clone();
            engine.absorb(&u);
            engine.squeeze(&mut u);
            crate::util::xor_block(t, &u);
        }
    }
}

/// Derive `out.len()` bytes from `password`/`salt`/`count` per RFC 8018
/// §5.2, using the ASCON cXOF as the underlying PRF in place of HMAC.
pub fn pbkdf2(out: &mut [u8], password: &[u8], salt: &[u8], count: u64) {
    let base = XofEngine::init_custom(0, "PBKDF2", password, BLOCK_SIZE);

    let mut blocknum: u32 = 1;
    let mut chunks = out.chunks_exact_mut(BLOCK_SIZE);
    for chunk in &mut chunks {
        let block: &mut [u8; BLOCK_SIZE] = chunk.try_into().expect("chunk is exactly BLOCK_SIZE");
        f(&base, salt, count, blocknum, block);
        blocknum += 1;
    }
    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let mut t = [0u8; BLOCK_SIZE];
        f(&base, salt, count, blocknum, &mut t);
        tail.copy_from_slice(&t[..tail.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differs_between_iteration_counts() {
        let mut one = [0u8; 32];
        let mut two = [0u8; 32];
        pbkdf2(&mut one, b"password", b"salt", 1);
        pbkdf2(&mut two, b"password", b"salt", 2);
        assert_ne!(one, two);
    }

    #[test]
    fn truncated_output_is_a_stable_prefix() {
        let mut full = [0u8; 32];
        let mut short = [0u8; 10];
        pbkdf2(&mut full, b"password", b"salt", 1);
        pbkdf2(&mut short, b"password", b"salt", 1);
        assert_eq!(short, full[..10]);
    }

    #[test]
    fn different_salts_diverge() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        pbkdf2(&mut a, b"password", b"salt", 1);
        pbkdf2(&mut b, b"password", b"pepper", 1);
        assert_ne!(a, b);
    }
}
