//! Masked permutation state container
//!
//! A 320-bit Ascon-p state where every lane is held as a [`MaskedWord`]
//! rather than a plain `u64`. This is the masked analogue of
//! [`crate::core::state::StateRepr`]: the same `init`/`add_word`/
//! `overwrite_word`/`extract_word` shape, but every operation works a
//! share at a time so the real lane value never exists as a single
//! machine word.

use super::word::MaskedWord;
use crate::trng::{MixerTrng, Trng};

/// Five masked lanes, each split into `W`'s share count.
#[derive(Clone)]
pub struct MaskedState<W: MaskedWord> {
    pub(crate) m: [W; 5],
}

impl<W: MaskedWord> MaskedState<W> {
    /// A state whose lanes are all zero, but whose shares are already
    /// well-formed random splits of zero rather than literal zero bytes.
    pub fn init<T: Trng>(trng: &mut MixerTrng<T>) -> Self {
        Self {
            m: [
                W::zero(trng),
                W::zero(trng),
                W::zero(trng),
                W::zero(trng),
                W::zero(trng),
            ],
        }
    }

    /// Re-randomize every lane's shares without changing the values they
    /// sum to. Called before each masked permutation so the Chi5 gadget
    /// never reuses randomness across unrelated operations.
    pub fn randomize<T: Trng>(&mut self, trng: &mut MixerTrng<T>) {
        for word in &mut self.m {
            word.randomize(trng);
        }
    }

    /// XOR `word` into the lane starting at byte `offset` (a multiple of
    /// 8, naming one of the five lanes).
    pub fn add_word(&mut self, word: &W, offset: usize) {
        self.m[offset / 8].xor(word);
    }

    /// Replace the lane at byte `offset` with `word`.
    pub fn overwrite_word(&mut self, word: &W, offset: usize) {
        self.m[offset / 8] = word.clone();
    }

    /// Read back the lane at byte `offset` without disturbing it.
    pub fn extract_word(&self, offset: usize) -> W {
        self.m[offset / 8].clone()
    }

    /// Read back the lane at `offset`, then overwrite it with `input`,
    /// in one step (used by the duplex construction so a ciphertext
    /// block can be derived from a plaintext block and the rate
    /// simultaneously updated).
    pub fn extract_and_overwrite_word(&mut self, input: &W, offset: usize) -> W {
        let output = self.m[offset / 8].clone();
        self.m[offset / 8] = input.clone();
        output
    }

    /// Mask a plain 320-bit state (5 lanes) into fresh shares.
    pub fn from_unmasked<T: Trng>(lanes: &[u64; 5], trng: &mut MixerTrng<T>) -> Self {
        Self {
            m: [
                W::mask(lanes[0], trng),
                W::mask(lanes[1], trng),
                W::mask(lanes[2], trng),
                W::mask(lanes[3], trng),
                W::mask(lanes[4], trng),
            ],
        }
    }

    /// Recombine every lane's shares back into a plain 320-bit state.
    pub fn to_unmasked(&self) -> [u64; 5] {
        [
            self.m[0].unmask(),
            self.m[1].unmask(),
            self.m[2].unmask(),
            self.m[3].unmask(),
            self.m[4].unmask(),
        ]
    }

    /// Securely wipe every share of every lane.
    pub fn free(&mut self) {
        for word in &mut self.m {
            word.wipe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::word::MaskedWord2;

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

    #[test]
    fn round_trip_preserves_lanes() {
        let mut trng = mixer();
        let lanes = [1u64, 2, 3, 4, 5];
        let masked = MaskedState::<MaskedWord2>::from_unmasked(&lanes, &mut trng);
        assert_eq!(masked.to_unmasked(), lanes);
    }

    #[test]
    fn add_and_overwrite_word_affect_only_their_lane() {
        let mut trng = mixer();
        let lanes = [0u64; 5];
        let mut masked = MaskedState::<MaskedWord2>::from_unmasked(&lanes, &mut trng);
        let word = MaskedWord2::mask(0x1122_3344_5566_7788, &mut trng);
        masked.add_word(&word, 8);
        let unmasked = masked.to_unmasked();
        assert_eq!(unmasked[1], 0x1122_3344_5566_7788);
        assert_eq!(unmasked[0], 0);
        assert_eq!(unmasked[2], 0);
    }

    #[test]
    fn extract_and_overwrite_returns_previous_value() {
        let mut trng = mixer();
        let lanes = [0xaaaa_aaaa_aaaa_aaaau64, 0, 0, 0, 0];
        let mut masked = MaskedState::<MaskedWord2>::from_unmasked(&lanes, &mut trng);
        let input = MaskedWord2::mask(0xbbbb_bbbb_bbbb_bbbb, &mut trng);
        let output = masked.extract_and_overwrite_word(&input, 0);
        assert_eq!(output.unmask(), 0xaaaa_aaaa_aaaa_aaaa);
        assert_eq!(masked.extract_word(0).unmask(), 0xbbbb_bbbb_bbbb_bbbb);
    }

    #[test]
    fn randomize_preserves_unmasked_value() {
        let mut trng = mixer();
        let lanes = [7u64, 8, 9, 10, 11];
        let mut masked = MaskedState::<MaskedWord2>::from_unmasked(&lanes, &mut trng);
        masked.randomize(&mut trng);
        assert_eq!(masked.to_unmasked(), lanes);
    }
}
