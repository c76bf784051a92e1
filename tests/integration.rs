//! Integration tests
//!
//! Exercises the public API of every construction in the crate end to
//! end: round-trip correctness for every AEAD/SIV/ISAP variant, XOF
//! prefix-stability, one-shot/incremental agreement, and masked AEAD
//! agreeing byte-for-byte with its unmasked counterpart at every
//! supported share count.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ascon_suite::aead::{AeadState, Ascon128, Ascon128a, Ascon80pq};
use ascon_suite::isap::{
    ascon128_isap_decrypt, ascon128_isap_encrypt, ascon128a_isap_decrypt,
    ascon128a_isap_encrypt, Ascon128Isap, Ascon128aIsap, IsapKey,
};
use ascon_suite::masking::word::{MaskedWord2, MaskedWord3, MaskedWord4};
use ascon_suite::masking::{aead as masked_aead, MaskedPermute};
use ascon_suite::prf::{mac, mac_verify, prf};
use ascon_suite::siv::{
    ascon128_siv_decrypt, ascon128_siv_encrypt, ascon128a_siv_decrypt, ascon128a_siv_encrypt,
};
use ascon_suite::trng::{MixerTrng, Trng};
use ascon_suite::xof::{hash, hasha, xof, xofa};

struct CountingTrng(u8);
impl Trng for CountingTrng {
    fn generate(&mut self, out: &mut [u8]) -> bool {
        for b in out.iter_mut() {
            self.0 = self.0.wrapping_add(1);
            *b = self.0;
        }
        true
    }
}

fn mixer() -> MixerTrng<CountingTrng> {
    MixerTrng::new(CountingTrng(0)).expect("counting source never fails")
}

// =============================================================================
// AEAD ROUND TRIPS (ONE-SHOT VIA THE INCREMENTAL API)
// =============================================================================

fn aead_round_trip<V: ascon_suite::aead::AeadVariant>(key: &[u8], rate: usize) {
    let nonce = [0x24u8; 16];
    let ad = b"associated metadata";
    let plaintext = b"a message that spans more than a single rate block of input";
    let mut buffer = plaintext.to_vec();

    let mut enc = AeadState::<V>::init(key, nonce);
    enc.start(ad);
    {
        let full_len = (buffer.len() / rate) * rate;
        let (head, tail) = buffer.split_at_mut(full_len);
        for chunk in head.chunks_mut(rate) {
            enc.encrypt_block(chunk);
        }
        enc.encrypt_block(tail);
    }
    let tag = enc.encrypt_finalize();
    assert_ne!(buffer, plaintext, "ciphertext must differ from plaintext");

    let mut dec = AeadState::<V>::init(key, nonce);
    dec.start(ad);
    {
        let full_len = (buffer.len() / rate) * rate;
        let (head, tail) = buffer.split_at_mut(full_len);
        for chunk in head.chunks_mut(rate) {
            dec.decrypt_block(chunk);
        }
        dec.decrypt_block(tail);
    }
    dec.decrypt_finalize(&mut buffer, &tag).unwrap();
    assert_eq!(buffer, plaintext);
}

#[test]
fn ascon128_round_trips() {
    aead_round_trip::<Ascon128>(&[0x11u8; 16], 8);
}

#[test]
fn ascon128a_round_trips() {
    aead_round_trip::<Ascon128a>(&[0x22u8; 16], 16);
}

#[test]
fn ascon80pq_round_trips() {
    aead_round_trip::<Ascon80pq>(&[0x33u8; 20], 8);
}

#[test]
fn aead_nonce_advances_across_successive_starts_on_one_session_key() {
    // `AeadState::start` increments the stored nonce so a caller that
    // reuses one `AeadState` across packets gets a fresh nonce each time.
    let key = [0x44u8; 16];
    let nonce = [0u8; 16];
    let mut state = AeadState::<Ascon128>::init(&key, nonce);
    state.start(b"");
    let tag_first = state.encrypt_finalize();

    let mut state_explicit_next_nonce = AeadState::<Ascon128>::init(&key, {
        let mut n = [0u8; 16];
        n[0] = 1;
        n
    });
    state_explicit_next_nonce.start(b"");
    let tag_second = state_explicit_next_nonce.encrypt_finalize();

    assert_ne!(tag_first, tag_second);
}

// =============================================================================
// SIV
// =============================================================================

#[test]
fn siv_round_trips_and_is_deterministic() {
    let key = [0x55u8; 16];
    let nonce = [0x66u8; 16];
    let ad = b"header";
    let plaintext = *b"misuse-resistant payload bytes!!";

    let mut a = plaintext;
    let mut b = plaintext;
    let tag_a = ascon128_siv_encrypt(&key, &nonce, ad, &mut a);
    let tag_b = ascon128_siv_encrypt(&key, &nonce, ad, &mut b);
    assert_eq!(a, b, "SIV encryption of identical inputs must be deterministic");
    assert_eq!(tag_a, tag_b);

    ascon128_siv_decrypt(&key, &nonce, ad, &mut a, &tag_a).unwrap();
    assert_eq!(a, plaintext);
}

#[test]
fn siv_128a_round_trips() {
    let key = [0x77u8; 16];
    let nonce = [0x88u8; 16];
    let ad = b"";
    let mut buffer = *b"a payload long enough to span a 16-byte rate block twice over";
    let plaintext = buffer;

    let tag = ascon128a_siv_encrypt(&key, &nonce, ad, &mut buffer);
    ascon128a_siv_decrypt(&key, &nonce, ad, &mut buffer, &tag).unwrap();
    assert_eq!(buffer, plaintext);
}

// =============================================================================
// ISAP
// =============================================================================

#[test]
fn isap_128_round_trips() {
    let key = IsapKey::<Ascon128Isap>::new(&[0x99u8; 16]);
    let nonce = [0xaau8; 16];
    let ad = b"leakage-resistant header";
    let mut buffer = *b"rekeyed bit by bit before every use";
    let plaintext = buffer;

    let tag = ascon128_isap_encrypt(&key, &nonce, ad, &mut buffer);
    ascon128_isap_decrypt(&key, &nonce, ad, &mut buffer, &tag).unwrap();
    assert_eq!(buffer, plaintext);
}

#[test]
fn isap_128a_round_trips() {
    let key = IsapKey::<Ascon128aIsap>::new(&[0xbbu8; 16]);
    let nonce = [0xccu8; 16];
    let ad = b"";
    let mut buffer = *b"shorter payload";
    let plaintext = buffer;

    let tag = ascon128a_isap_encrypt(&key, &nonce, ad, &mut buffer);
    ascon128a_isap_decrypt(&key, &nonce, ad, &mut buffer, &tag).unwrap();
    assert_eq!(buffer, plaintext);
}

// =============================================================================
// XOF / HASH
// =============================================================================

#[test]
fn xof_output_extends_as_a_stable_prefix() {
    let mut short = [0u8; 16];
    let mut long = [0u8; 128];
    xof(b"streaming output", &mut short);
    xof(b"streaming output", &mut long);
    assert_eq!(short, long[..16]);
}

#[test]
fn hash_hasha_xof_xofa_are_pairwise_distinct_for_the_same_input() {
    let input = b"distinguish every variant";
    let h = hash(input);
    let ha = hasha(input);
    let mut x = [0u8; 32];
    let mut xa = [0u8; 32];
    xof(input, &mut x);
    xofa(input, &mut xa);

    assert_ne!(h, ha);
    assert_ne!(h, x);
    assert_ne!(ha, xa);
    assert_ne!(x, xa);
}

// =============================================================================
// PRF / MAC
// =============================================================================

#[test]
fn mac_round_trips_and_rejects_tamper() {
    let key = [0xddu8; 16];
    let tag = mac(&key, b"authenticate me");
    assert!(mac_verify(&tag, &key, b"authenticate me"));
    assert!(!mac_verify(&tag, &key, b"authenticate you"));
}

#[test]
fn prf_is_deterministic_for_a_fixed_key_and_input() {
    let key = [0xeeu8; 16];
    let mut a = [0u8; 40];
    let mut b = [0u8; 40];
    prf(&key, b"variable output prf", &mut a);
    prf(&key, b"variable output prf", &mut b);
    assert_eq!(a, b);
}

// =============================================================================
// MASKED AEAD AGREES WITH UNMASKED AEAD AT EVERY SHARE COUNT
// =============================================================================

fn masked_matches_unmasked<W: MaskedPermute>() {
    let key = *b"twenty-byte-80pq-key";
    let nonce = [0x12u8; 16];
    let ad = b"masked header";
    let plaintext = b"the value the side channel must never see in the clear";

    let mut unmasked = plaintext.to_vec();
    let mut state = AeadState::<Ascon80pq>::init(&key, nonce);
    state.start(ad);
    {
        let full_len = (unmasked.len() / 8) * 8;
        let (head, tail) = unmasked.split_at_mut(full_len);
        for chunk in head.chunks_mut(8) {
            state.encrypt_block(chunk);
        }
        state.encrypt_block(tail);
    }
    let tag = state.encrypt_finalize();
    unmasked.extend_from_slice(&tag);

    let mut trng = mixer();
    let mut masked_ct = vec![0u8; plaintext.len() + 16];
    masked_aead::encrypt::<W, _>(&key, &nonce, ad, plaintext, &mut masked_ct, &mut trng);

    assert_eq!(masked_ct, unmasked);

    let mut recovered = vec![0u8; plaintext.len()];
    let ok = masked_aead::decrypt::<W, _>(&key, &nonce, ad, &masked_ct, &mut recovered, &mut trng);
    assert!(ok);
    assert_eq!(recovered, plaintext);
}

#[test]
fn masked_aead_matches_unmasked_with_2_shares() {
    masked_matches_unmasked::<MaskedWord2>();
}

#[test]
fn masked_aead_matches_unmasked_with_3_shares() {
    masked_matches_unmasked::<MaskedWord3>();
}

#[test]
fn masked_aead_matches_unmasked_with_4_shares() {
    masked_matches_unmasked::<MaskedWord4>();
}
