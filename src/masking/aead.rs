//! Masked ASCON-80pq AEAD
//!
//! The only AEAD variant the reference library masks end to end: the
//! key is held as a [`MaskedKey80pq`] and absorbed straight into the
//! masked permutation state, so plaintext, ciphertext, and the key
//! never coexist as a single unmasked 64-bit word anywhere in this
//! path. Every share count `W` produces byte-identical output to
//! [`crate::aead::ascon80pq`]'s unmasked implementation — that
//! agreement, not any stronger claim about physical side channels, is
//! what the test suite checks.
//!
//! Associated data and payload each use an 8-byte rate (`M[0]` only),
//! matching the unmasked variant's single-lane rate.

use super::key::MaskedKey80pq;
use super::permute::MaskedPermute;
use super::state::MaskedState;
use super::word::MaskedWord;
use crate::trng::{MixerTrng, Trng};

/// Tag size, in bytes, matching [`crate::aead::ascon80pq`].
pub const TAG_SIZE: usize = 16;

const IV: [u8; 4] = [0xa0, 0x40, 0x0c, 0x06];
const AD_ROUNDS: u8 = 6;
const PAYLOAD_ROUNDS: u8 = 6;

fn init<W: MaskedPermute, T: Trng>(
    key: &MaskedKey80pq<W>,
    nonce: &[u8; 16],
    trng: &mut MixerTrng<T>,
) -> (MaskedState<W>, W::Preserve) {
    let mut preserve = W::fresh_preserve(trng);
    let mut state = MaskedState::<W>::init(trng);

    let iv_word = W::load_32(&IV, &[0u8; 4], trng);
    state.add_word(&iv_word, 0);
    state.add_word(&key.words()[3], 0);
    state.add_word(&key.words()[4], 8);
    state.add_word(&key.words()[5], 16);
    let nonce_lo = W::load(&nonce[..8], trng);
    state.add_word(&nonce_lo, 24);
    let nonce_hi = W::load(&nonce[8..], trng);
    state.add_word(&nonce_hi, 32);

    W::permute(&mut state, 0, &mut preserve);

    state.add_word(&key.words()[3], 16);
    state.add_word(&key.words()[4], 24);
    state.add_word(&key.words()[5], 32);

    (state, preserve)
}

fn finalize<W: MaskedPermute, T: Trng>(
    state: &mut MaskedState<W>,
    key: &MaskedKey80pq<W>,
    preserve: &mut W::Preserve,
    trng: &mut MixerTrng<T>,
) -> [u8; TAG_SIZE] {
    *preserve = W::fresh_preserve(trng);

    state.add_word(&key.words()[0], 8);
    state.add_word(&key.words()[1], 16);
    state.add_word(&key.words()[2], 24);

    W::permute(state, 0, preserve);

    state.add_word(&key.words()[4], 24);
    state.add_word(&key.words()[5], 32);

    let mut tag = [0u8; TAG_SIZE];
    state.extract_word(24).store(&mut tag[..8]);
    state.extract_word(32).store(&mut tag[8..]);
    tag
}

fn absorb_ad<W: MaskedPermute, T: Trng>(
    state: &mut MaskedState<W>,
    mut data: &[u8],
    preserve: &mut W::Preserve,
    trng: &mut MixerTrng<T>,
) {
    while data.len() >= 8 {
        let word = W::load(&data[..8], trng);
        state.add_word(&word, 0);
        W::permute(state, AD_ROUNDS, preserve);
        data = &data[8..];
    }
    if !data.is_empty() {
        let word = W::load_partial(data, data.len(), trng);
        state.add_word(&word, 0);
    }
    state.m[0].pad(data.len());
    W::permute(state, AD_ROUNDS, preserve);
}

fn encrypt_payload<W: MaskedPermute, T: Trng>(
    state: &mut MaskedState<W>,
    dest: &mut [u8],
    mut src: &[u8],
    preserve: &mut W::Preserve,
    trng: &mut MixerTrng<T>,
) {
    let mut dest = dest;
    while src.len() >= 8 {
        let word = W::load(&src[..8], trng);
        state.add_word(&word, 0);
        state.extract_word(0).store(&mut dest[..8]);
        W::permute(state, PAYLOAD_ROUNDS, preserve);
        src = &src[8..];
        dest = &mut dest[8..];
    }
    if !src.is_empty() {
        let word = W::load_partial(src, src.len(), trng);
        state.add_word(&word, 0);
        state.extract_word(0).store_partial(dest, src.len());
    }
    state.m[0].pad(src.len());
}

fn decrypt_payload<W: MaskedPermute, T: Trng>(
    state: &mut MaskedState<W>,
    dest: &mut [u8],
    mut src: &[u8],
    preserve: &mut W::Preserve,
    trng: &mut MixerTrng<T>,
) {
    let mut dest = dest;
    while src.len() >= 8 {
        let word = W::load(&src[..8], trng);
        let plain = state.extract_and_overwrite_word(&word, 0);
        // `extract_and_overwrite_word` above already installed the
        // ciphertext word as the new rate lane (the masked analogue of
        // "state.M[0] = *word"); XOR `word` into a copy to recover the
        // plaintext bytes without disturbing that assignment.
        let mut recovered = plain;
        recovered.xor(&word);
        recovered.store(&mut dest[..8]);
        W::permute(state, PAYLOAD_ROUNDS, preserve);
        src = &src[8..];
        dest = &mut dest[8..];
    }
    if !src.is_empty() {
        let word = W::load_partial(src, src.len(), trng);
        let plain = state.extract_word(0);
        let mut recovered = plain;
        recovered.xor(&word);
        recovered.store_partial(dest, src.len());
        state.m[0].replace(&word, src.len());
    }
    state.m[0].pad(src.len());
}

/// Encrypt and authenticate with masked ASCON-80pq.
///
/// `ciphertext` must be exactly `plaintext.len() + TAG_SIZE` bytes.
pub fn encrypt<W: MaskedPermute, T: Trng>(
    key: &[u8; 20],
    nonce: &[u8; 16],
    ad: &[u8],
    plaintext: &[u8],
    ciphertext: &mut [u8],
    trng: &mut MixerTrng<T>,
) {
    assert_eq!(ciphertext.len(), plaintext.len() + TAG_SIZE);
    let mut masked_key = MaskedKey80pq::<W>::load(key, trng);
    let (mut state, mut preserve) = init(&masked_key, nonce, trng);

    if !ad.is_empty() {
        absorb_ad(&mut state, ad, &mut preserve, trng);
    }
    state.m[4].separator();

    let (body, tag_slot) = ciphertext.split_at_mut(plaintext.len());
    encrypt_payload(&mut state, body, plaintext, &mut preserve, trng);

    let tag = finalize(&mut state, &masked_key, &mut preserve, trng);
    tag_slot.copy_from_slice(&tag);

    state.free();
    masked_key.free();
}

/// Decrypt and verify with masked ASCON-80pq.
///
/// Returns `true` and writes the recovered plaintext into `plaintext`
/// if the tag is valid, `false` (and zeroes `plaintext`) otherwise.
/// `ciphertext` must be exactly `plaintext.len() + TAG_SIZE` bytes.
#[must_use]
pub fn decrypt<W: MaskedPermute, T: Trng>(
    key: &[u8; 20],
    nonce: &[u8; 16],
    ad: &[u8],
    ciphertext: &[u8],
    plaintext: &mut [u8],
    trng: &mut MixerTrng<T>,
) -> bool {
    assert_eq!(ciphertext.len(), plaintext.len() + TAG_SIZE);
    let mut masked_key = MaskedKey80pq::<W>::load(key, trng);
    let (mut state, mut preserve) = init(&masked_key, nonce, trng);

    if !ad.is_empty() {
        absorb_ad(&mut state, ad, &mut preserve, trng);
    }
    state.m[4].separator();

    let (body, expected_tag) = ciphertext.split_at(plaintext.len());
    decrypt_payload(&mut state, plaintext, body, &mut preserve, trng);

    let tag = finalize(&mut state, &masked_key, &mut preserve, trng);
    let ok = crate::util::ct_eq(&tag, expected_tag);
    if !ok {
        crate::util::secure_zero(plaintext);
    }

    state.free();
    masked_key.free();
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::word::{MaskedWord2, MaskedWord3, MaskedWord4};

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
        MixerTrng::new(CountingTrng(0)).unwrap()
    }

    fn unmasked_reference(key: &[u8; 20], nonce: &[u8; 16], ad: &[u8], plaintext: &[u8]) -> alloc::vec::Vec<u8> {
        use crate::aead::{AeadState, Ascon80pq};
        let rate = 8usize;
        let mut aead_state = AeadState::<Ascon80pq>::init(key, *nonce);
        aead_state.start(ad);
        let mut buf = alloc::vec::Vec::from(plaintext);
        let full_len = (buf.len() / rate) * rate;
        {
            let mut chunks = buf[..full_len].chunks_mut(rate);
            for chunk in &mut chunks {
                aead_state.encrypt_block(chunk);
            }
        }
        aead_state.encrypt_block(&mut buf[full_len..]);
        let tag = aead_state.encrypt_finalize();
        buf.extend_from_slice(&tag);
        buf
    }

    fn run_matches_unmasked<W: MaskedPermute>() {
        let key = *b"0123456789abcdefghij";
        let nonce = *b"nonce-sixteen-byt";
        let nonce: [u8; 16] = nonce[..16].try_into().unwrap();
        let ad = b"associated data";
        let plaintext = b"the quick brown fox jumps";

        let expected = unmasked_reference(&key, &nonce, ad, plaintext);

        let mut trng = mixer();
        let mut ciphertext = alloc::vec![0u8; plaintext.len() + TAG_SIZE];
        encrypt::<W, _>(&key, &nonce, ad, plaintext, &mut ciphertext, &mut trng);
        assert_eq!(ciphertext, expected);

        let mut recovered = alloc::vec![0u8; plaintext.len()];
        let ok = decrypt::<W, _>(&key, &nonce, ad, &ciphertext, &mut recovered, &mut trng);
        assert!(ok);
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn x2_matches_unmasked_aead() {
        run_matches_unmasked::<MaskedWord2>();
    }

    #[test]
    fn x3_matches_unmasked_aead() {
        run_matches_unmasked::<MaskedWord3>();
    }

    #[test]
    fn x4_matches_unmasked_aead() {
        run_matches_unmasked::<MaskedWord4>();
    }

    #[test]
    fn tampered_tag_is_rejected() {
        let key = [0x11u8; 20];
        let nonce = [0x22u8; 16];
        let plaintext = b"secret message";
        let mut trng = mixer();
        let mut ciphertext = alloc::vec![0u8; plaintext.len() + TAG_SIZE];
        encrypt::<MaskedWord2, _>(&key, &nonce, b"", plaintext, &mut ciphertext, &mut trng);
        *ciphertext.last_mut().unwrap() ^= 1;

        let mut recovered = alloc::vec![0u8; plaintext.len()];
        let ok = decrypt::<MaskedWord2, _>(&key, &nonce, b"", &ciphertext, &mut recovered, &mut trng);
        assert!(!ok);
        assert!(recovered.iter().all(|&b| b == 0));
    }
}
