//! Consistency tests
//!
//! Verifies internal invariants that are easy to get wrong when a
//! sponge-based construction is fed in odd-sized pieces: absorbing a
//! message split across many small `update` calls must match absorbing
//! it in one shot, regardless of where the splits fall relative to the
//! 8-byte rate.

#![allow(clippy::unwrap_used)]

use ascon_suite::prf::Prf;
use ascon_suite::xof::{hash, XofEngine, HASH_SIZE};

const RATE: usize = 8;

// =============================================================================
// CHUNKED ABSORB MATCHES ONE-SHOT ABSORB
// =============================================================================

#[test]
fn xof_engine_absorb_in_arbitrary_chunks_matches_one_shot() {
    let message: Vec<u8> = (0..200u32).map(|i| (i % 251) as u8).collect();

    let one_shot = hash(&message);

    // split sizes chosen to straddle the rate boundary in every possible way
    for split_sizes in [
        vec![1usize; message.len()],
        vec![3, 5, 7, 200],
        vec![RATE, RATE, RATE - 1, 1, 1000],
        vec![message.len()],
    ] {
        let mut engine = XofEngine::hash();
        let mut offset = 0;
        for &size in &split_sizes {
            let end = (offset + size).min(message.len());
            if offset >= message.len() {
                break;
            }
            engine.absorb(&message[offset..end]);
            offset = end;
        }
        if offset < message.len() {
            engine.absorb(&message[offset..]);
        }
        let mut out = [0u8; HASH_SIZE];
        engine.squeeze(&mut out);
        assert_eq!(out, one_shot, "chunking {split_sizes:?} diverged from one-shot hash");
    }
}

#[test]
fn xof_engine_squeeze_in_arbitrary_chunks_matches_one_shot_output() {
    let mut full = [0u8; 97];
    let mut engine = XofEngine::xof();
    engine.absorb(b"squeeze in pieces");
    engine.squeeze(&mut full);

    let mut pieced = [0u8; 97];
    let mut engine = XofEngine::xof();
    engine.absorb(b"squeeze in pieces");
    let mut offset = 0;
    for size in [1usize, 2, 3, RATE, RATE + 1, 40] {
        let end = (offset + size).min(pieced.len());
        if offset >= pieced.len() {
            break;
        }
        engine.squeeze(&mut pieced[offset..end]);
        offset = end;
    }
    if offset < pieced.len() {
        engine.squeeze(&mut pieced[offset..]);
    }

    assert_eq!(pieced, full);
}

#[test]
fn prf_absorb_in_arbitrary_chunks_matches_one_shot() {
    let key = [0x7cu8; 16];
    let input: Vec<u8> = (0..150u32).map(|i| (i % 200) as u8).collect();

    let mut one_shot = Prf::new(&key, 24);
    one_shot.absorb(&input);
    let mut one_shot_out = [0u8; 24];
    one_shot.squeeze(&mut one_shot_out);

    let mut pieced = Prf::new(&key, 24);
    let mut offset = 0;
    for size in [1usize, 31, 32, 33, 1000] {
        let end = (offset + size).min(input.len());
        if offset >= input.len() {
            break;
        }
        pieced.absorb(&input[offset..end]);
        offset = end;
    }
    if offset < input.len() {
        pieced.absorb(&input[offset..]);
    }
    let mut pieced_out = [0u8; 24];
    pieced.squeeze(&mut pieced_out);

    assert_eq!(pieced_out, one_shot_out);
}

// =============================================================================
// BOUNDARY CONDITIONS AROUND THE RATE
// =============================================================================

#[test]
fn hash_is_deterministic_and_non_trivial_across_rate_boundary_sizes() {
    let sizes = [0, 1, RATE - 1, RATE, RATE + 1, 2 * RATE, 100, 1000];
    for size in sizes {
        let input = vec![0u8; size];
        let h1 = hash(&input);
        let h2 = hash(&input);
        assert_eq!(h1, h2, "hash not deterministic for size {size}");
        assert_ne!(h1, [0u8; HASH_SIZE], "hash is all-zero for size {size}");
    }
}

#[test]
fn padding_distinguishes_messages_that_differ_only_by_a_trailing_zero_byte() {
    let h1 = hash(b"A");
    let h2 = hash(b"A\0");
    assert_ne!(h1, h2, "length injection via padding failed to separate these messages");
}

#[test]
fn hash_depends_on_full_length_not_just_absorbed_rate_blocks() {
    let input = vec![0u8; 2 * RATE];
    let h1 = hash(&input);
    let h2 = hash(&input[..RATE]);
    assert_ne!(h1, h2);
}

// =============================================================================
// AVALANCHE
// =============================================================================

#[test]
fn single_bit_flip_diffuses_across_the_whole_digest() {
    let a = vec![0u8; 200];
    let mut b = a.clone();
    b[0] ^= 1;

    let ha = hash(&a);
    let hb = hash(&b);
    assert_ne!(ha, hb);

    let flips: u32 = ha.iter().zip(hb.iter()).map(|(x, y)| (x ^ y).count_ones()).sum();
    assert!(flips > 64, "insufficient diffusion: only {flips} bits flipped out of 256");
}
