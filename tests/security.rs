//! Security property tests
//!
//! Tamper detection and failure hygiene across every authenticated
//! construction: a corrupted tag, nonce, or associated data must be
//! rejected and must leave no partial plaintext behind. Also checks
//! that the keyed/derived constructions (KDF, KMAC, PRF/MAC) actually
//! separate on the inputs they claim to separate on.

#![allow(clippy::unwrap_used)]

use ascon_suite::aead::{AeadState, Ascon128, Ascon128a, Ascon80pq};
use ascon_suite::isap::{ascon128_isap_decrypt, ascon128_isap_encrypt, Ascon128Isap, IsapKey};
use ascon_suite::kdf::kdf;
use ascon_suite::kmac::kmac;
use ascon_suite::prf::{mac, mac_verify};
use ascon_suite::siv::{ascon128_siv_decrypt, ascon128_siv_encrypt};
use ascon_suite::Error;

fn encrypt_once<V: ascon_suite::aead::AeadVariant>(
    key: &[u8],
    nonce: [u8; 16],
    ad: &[u8],
    plaintext: &[u8],
) -> (Vec<u8>, [u8; 16]) {
    let mut buffer = plaintext.to_vec();
    let mut state = AeadState::<V>::init(key, nonce);
    state.start(ad);
    state.encrypt_block(&mut buffer);
    let tag = state.encrypt_finalize();
    (buffer, tag)
}

fn decrypt_once<V: ascon_suite::aead::AeadVariant>(
    key: &[u8],
    nonce: [u8; 16],
    ad: &[u8],
    ciphertext: &[u8],
    tag: &[u8; 16],
) -> Result<Vec<u8>, Error> {
    let mut buffer = ciphertext.to_vec();
    let mut state = AeadState::<V>::init(key, nonce);
    state.start(ad);
    state.decrypt_block(&mut buffer);
    state.decrypt_finalize(&mut buffer, tag)?;
    Ok(buffer)
}

// =============================================================================
// AEAD TAMPER DETECTION
// =============================================================================

#[test]
fn flipped_tag_bit_is_rejected_for_every_aead_variant() {
    let (ct, mut tag) = encrypt_once::<Ascon128>(&[1u8; 16], [2u8; 16], b"ad", b"payload");
    tag[0] ^= 1;
    assert_eq!(
        decrypt_once::<Ascon128>(&[1u8; 16], [2u8; 16], b"ad", &ct, &tag),
        Err(Error::AuthenticationFailure)
    );

    let (ct, mut tag) = encrypt_once::<Ascon128a>(&[3u8; 16], [4u8; 16], b"ad", b"payload");
    tag[0] ^= 1;
    assert_eq!(
        decrypt_once::<Ascon128a>(&[3u8; 16], [4u8; 16], b"ad", &ct, &tag),
        Err(Error::AuthenticationFailure)
    );

    let (ct, mut tag) =
        encrypt_once::<Ascon80pq>(b"01234567890123456789", [5u8; 16], b"ad", b"payload");
    tag[0] ^= 1;
    assert_eq!(
        decrypt_once::<Ascon80pq>(b"01234567890123456789", [5u8; 16], b"ad", &ct, &tag),
        Err(Error::AuthenticationFailure)
    );
}

#[test]
fn flipped_ciphertext_byte_is_rejected() {
    let (mut ct, tag) = encrypt_once::<Ascon128>(&[9u8; 16], [8u8; 16], b"ad", b"the payload");
    ct[0] ^= 1;
    assert_eq!(
        decrypt_once::<Ascon128>(&[9u8; 16], [8u8; 16], b"ad", &ct, &tag),
        Err(Error::AuthenticationFailure)
    );
}

#[test]
fn wrong_associated_data_is_rejected() {
    let (ct, tag) = encrypt_once::<Ascon128>(&[7u8; 16], [6u8; 16], b"correct ad", b"payload");
    assert_eq!(
        decrypt_once::<Ascon128>(&[7u8; 16], [6u8; 16], b"wrong ad", &ct, &tag),
        Err(Error::AuthenticationFailure)
    );
}

#[test]
fn wrong_nonce_is_rejected() {
    let (ct, tag) = encrypt_once::<Ascon128>(&[7u8; 16], [6u8; 16], b"ad", b"payload");
    assert_eq!(
        decrypt_once::<Ascon128>(&[7u8; 16], [1u8; 16], b"ad", &ct, &tag),
        Err(Error::AuthenticationFailure)
    );
}

#[test]
fn failed_decryption_zeroes_the_output_buffer() {
    let (ct, mut tag) = encrypt_once::<Ascon128>(&[2u8; 16], [3u8; 16], b"ad", b"secret payload");
    tag[0] ^= 1;

    let mut buffer = ct.clone();
    let mut state = AeadState::<Ascon128>::init(&[2u8; 16], [3u8; 16]);
    state.start(b"ad");
    state.decrypt_block(&mut buffer);
    let err = state.decrypt_finalize(&mut buffer, &tag).unwrap_err();

    assert_eq!(err, Error::AuthenticationFailure);
    assert!(buffer.iter().all(|&b| b == 0), "plaintext must be zeroed on auth failure");
}

// =============================================================================
// SIV / ISAP TAMPER DETECTION
// =============================================================================

#[test]
fn siv_rejects_tampered_ciphertext_and_zeroes_output() {
    let key = [0x11u8; 16];
    let nonce = [0x22u8; 16];
    let mut buffer = *b"misuse resistant";
    let tag = ascon128_siv_encrypt(&key, &nonce, b"ad", &mut buffer);
    buffer[0] ^= 1;

    let err = ascon128_siv_decrypt(&key, &nonce, b"ad", &mut buffer, &tag).unwrap_err();
    assert_eq!(err, Error::AuthenticationFailure);
    assert!(buffer.iter().all(|&b| b == 0));
}

#[test]
fn isap_rejects_tampered_tag_and_zeroes_output() {
    let key = IsapKey::<Ascon128Isap>::new(&[0x33u8; 16]);
    let nonce = [0x44u8; 16];
    let mut buffer = *b"leakage resistant payload";
    let mut tag = ascon128_isap_encrypt(&key, &nonce, b"ad", &mut buffer);
    tag[0] ^= 1;

    let err = ascon128_isap_decrypt(&key, &nonce, b"ad", &mut buffer, &tag).unwrap_err();
    assert_eq!(err, Error::AuthenticationFailure);
    assert!(buffer.iter().all(|&b| b == 0));
}

// =============================================================================
// MAC
// =============================================================================

#[test]
fn mac_rejects_wrong_key_wrong_message_and_corrupted_tag() {
    let key = [0x55u8; 16];
    let tag = mac(&key, b"authenticated message");

    assert!(mac_verify(&tag, &key, b"authenticated message"));
    assert!(!mac_verify(&tag, &[0x56u8; 16], b"authenticated message"));
    assert!(!mac_verify(&tag, &key, b"tampered message"));

    let mut bad_tag = tag;
    bad_tag[0] ^= 1;
    assert!(!mac_verify(&bad_tag, &key, b"authenticated message"));
}

// =============================================================================
// KEYED-CONSTRUCTION SEPARATION
// =============================================================================

#[test]
fn kdf_separates_on_key_and_custom_string() {
    let mut key_a = [0u8; 32];
    let mut key_b = [0u8; 32];
    kdf(b"master secret one", b"session-key", &mut key_a);
    kdf(b"master secret two", b"session-key", &mut key_b);
    assert_ne!(key_a, key_b, "different master secrets must diverge");

    let mut custom_a = [0u8; 32];
    let mut custom_b = [0u8; 32];
    kdf(b"master secret", b"context-a", &mut custom_a);
    kdf(b"master secret", b"context-b", &mut custom_b);
    assert_ne!(custom_a, custom_b, "different custom strings must diverge");
}

#[test]
fn kdf_is_deterministic_for_fixed_inputs() {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    kdf(b"key material", b"custom", &mut a);
    kdf(b"key material", b"custom", &mut b);
    assert_eq!(a, b);
}

#[test]
fn kmac_separates_on_key() {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    kmac(&[1u8; 32], b"message", b"", &mut a);
    kmac(&[2u8; 32], b"message", b"", &mut b);
    assert_ne!(a, b);
}

#[test]
fn repeated_calls_with_identical_inputs_are_reproducible() {
    let key = [0x99u8; 16];
    for _ in 0..5 {
        assert_eq!(mac(&key, b"stable"), mac(&key, b"stable"));
    }
}
