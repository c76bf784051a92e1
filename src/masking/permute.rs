//! Masked Ascon-p: 2/3/4-share round functions
//!
//! Each of `x2_permute`/`x3_permute`/`x4_permute` is a distinct Boolean
//! circuit, not a loop parametrized by share count — the secure
//! AND-NOT-XOR gadget that replaces the unmasked `x ^= (~y) & z` step
//! needs a different set of cross-share correction terms at each share
//! count, so the three round functions are written out separately here
//! exactly as they are share-count by share-count.
//!
//! `preserve` carries one "extra" masking word across calls so that a
//! single long message can be processed in several separate permutation
//! calls (one per absorbed block) without the Chi5 gadget ever reusing
//! the same randomness twice in a row.

use super::state::MaskedState;
use super::word::{MaskedWord2, MaskedWord3, MaskedWord4};
use crate::core::ROUND_CONSTANTS;
use crate::trng::{MixerTrng, Trng};
use crate::util::rotr64;

fn right_rotate13(x: u64) -> u64 {
    rotr64(x, 13)
}
fn right_rotate29(x: u64) -> u64 {
    rotr64(x, 29)
}
fn right_rotate59(x: u64) -> u64 {
    rotr64(x, 59)
}

fn rotate_share1_0(x: u64) -> u64 {
    rotr64(x, 11)
}
fn unrotate_share1_0(x: u64) -> u64 {
    rotr64(x, 53)
}
fn rotate_share2_0(x: u64) -> u64 {
    rotr64(x, 22)
}
fn rotate_share2_1(x: u64) -> u64 {
    rotr64(x, 11)
}
fn unrotate_share2_0(x: u64) -> u64 {
    rotr64(x, 42)
}
fn unrotate_share2_1(x: u64) -> u64 {
    rotr64(x, 53)
}
fn rotate_share3_0(x: u64) -> u64 {
    rotr64(x, 33)
}
fn rotate_share3_1(x: u64) -> u64 {
    rotr64(x, 22)
}
fn rotate_share3_2(x: u64) -> u64 {
    rotr64(x, 11)
}
fn unrotate_share3_0(x: u64) -> u64 {
    rotr64(x, 31)
}
fn unrotate_share3_1(x: u64) -> u64 {
    rotr64(x, 42)
}
fn unrotate_share3_2(x: u64) -> u64 {
    rotr64(x, 53)
}

/// Associates a masked word type with its own permutation round function
/// and the preserved-randomness shape that function threads across
/// calls, so callers that are generic over share count (see
/// [`super::aead`]) can invoke the right Boolean circuit without a
/// runtime branch on share count.
pub trait MaskedPermute: super::word::MaskedWord {
    /// Randomness carried across permutation calls; each share count
    /// needs one fewer `u64` of preserved randomness than it has shares.
    type Preserve: Clone;

    /// Run the masked permutation starting at `first_round`.
    fn permute(state: &mut MaskedState<Self>, first_round: u8, preserve: &mut Self::Preserve);

    /// Draw fresh preserved randomness, e.g. before the first permutation
    /// call of a new masked operation.
    fn fresh_preserve<T: Trng>(trng: &mut MixerTrng<T>) -> Self::Preserve;
}

impl MaskedPermute for MaskedWord2 {
    type Preserve = u64;
    fn permute(state: &mut MaskedState<Self>, first_round: u8, preserve: &mut u64) {
        x2_permute(state, first_round, preserve);
    }
    fn fresh_preserve<T: Trng>(trng: &mut MixerTrng<T>) -> u64 {
        trng.generate_64()
    }
}

impl MaskedPermute for MaskedWord3 {
    type Preserve = [u64; 2];
    fn permute(state: &mut MaskedState<Self>, first_round: u8, preserve: &mut [u64; 2]) {
        x3_permute(state, first_round, preserve);
    }
    fn fresh_preserve<T: Trng>(trng: &mut MixerTrng<T>) -> [u64; 2] {
        [trng.generate_64(), trng.generate_64()]
    }
}

impl MaskedPermute for MaskedWord4 {
    type Preserve = [u64; 3];
    fn permute(state: &mut MaskedState<Self>, first_round: u8, preserve: &mut [u64; 3]) {
        x4_permute(state, first_round, preserve);
    }
    fn fresh_preserve<T: Trng>(trng: &mut MixerTrng<T>) -> [u64; 3] {
        [trng.generate_64(), trng.generate_64(), trng.generate_64()]
    }
}

fn diffuse(x: &mut [u64; 5]) {
    x[0] ^= rotr64(x[0], 19) ^ rotr64(x[0], 28);
    x[1] ^= rotr64(x[1], 61) ^ rotr64(x[1], 39);
    x[2] ^= rotr64(x[2], 1) ^ rotr64(x[2], 6);
    x[3] ^= rotr64(x[3], 10) ^ rotr64(x[3], 17);
    x[4] ^= rotr64(x[4], 7) ^ rotr64(x[4], 41);
}

// =============================================================================
// 2 shares
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn and_not_xor2(x: &mut [u64; 2], y: &[u64; 2], z: &[u64; 2]) {
    x[0] ^= (!y[0]) & unrotate_share1_0(z[1]);
    x[0] ^= (!y[0]) & z[0];
    x[1] ^= y[1] & z[1];
    x[1] ^= y[1] & rotate_share1_0(z[0]);
}

/// 2-share masked permutation. `preserve` carries the shared randomness
/// word across calls.
pub fn x2_permute(state: &mut MaskedState<MaskedWord2>, first_round: u8, preserve: &mut u64) {
    let mut a = [
        state.m[0].s[0],
        state.m[1].s[0],
        state.m[2].s[0],
        state.m[3].s[0],
        state.m[4].s[0],
    ];
    let mut b = [
        state.m[0].s[1],
        state.m[1].s[1],
        state.m[2].s[1],
        state.m[3].s[1],
        state.m[4].s[1],
    ];
    let mut t0_a = *preserve;

    a[2] = !a[2];

    for &rc in &ROUND_CONSTANTS[first_round as usize..12] {
        a[2] ^= rc;
        a[0] ^= a[4];
        a[4] ^= a[3];
        a[2] ^= a[1];
        let t1_a = a[0];

        b[0] ^= b[4];
        b[4] ^= b[3];
        b[2] ^= b[1];
        let t1_b = b[0];

        let mut t0 = [t0_a, rotate_share1_0(t0_a)];
        let x0 = [a[0], b[0]];
        let x1 = [a[1], b[1]];
        let x2 = [a[2], b[2]];
        let x3 = [a[3], b[3]];
        let x4 = [a[4], b[4]];
        let t1 = [t1_a, t1_b];

        and_not_xor2(&mut t0, &x0, &x1);
        let mut new0 = x0;
        and_not_xor2(&mut new0, &x1, &x2);
        let mut new1 = x1;
        and_not_xor2(&mut new1, &x2, &x3);
        let mut new2 = x2;
        and_not_xor2(&mut new2, &x3, &x4);
        let mut new3 = x3;
        and_not_xor2(&mut new3, &x4, &t1);

        a[0] = new0[0];
        b[0] = new0[1];
        a[1] = new1[0];
        b[1] = new1[1];
        a[2] = new2[0];
        b[2] = new2[1];
        a[3] = new3[0];
        b[3] = new3[1];
        a[4] ^= t0[0];
        b[4] ^= t0[1];

        a[1] ^= a[0];
        a[0] ^= a[4];
        a[3] ^= a[2];
        b[1] ^= b[0];
        b[0] ^= b[4];
        b[3] ^= b[2];

        diffuse(&mut b);
        diffuse(&mut a);

        t0_a = right_rotate13(t0_a);
    }

    *preserve = t0_a;

    a[2] = !a[2];
    for i in 0..5 {
        state.m[i].s = [a[i], b[i]];
    }
}

// =============================================================================
// 3 shares
// =============================================================================

fn and_not_xor3(x: &mut [u64; 3], y: &[u64; 3], z: &[u64; 3]) {
    x[0] ^= (!y[0]) & z[0];
    x[0] ^= y[0] & unrotate_share1_0(z[1]);
    x[0] ^= y[0] & unrotate_share2_0(z[2]);

    x[1] ^= y[1] & rotate_share1_0(z[0]);
    x[1] ^= (!y[1]) & z[1];
    x[1] ^= y[1] & unrotate_share2_1(z[2]);

    x[2] ^= y[2] & rotate_share2_0(!z[0]);
    x[2] ^= y[2] & rotate_share2_1(z[1]);
    x[2] ^= y[2] | z[2];
}

/// 3-share masked permutation.
pub fn x3_permute(state: &mut MaskedState<MaskedWord3>, first_round: u8, preserve: &mut [u64; 2]) {
    let mut a = [
        state.m[0].s[0],
        state.m[1].s[0],
        state.m[2].s[0],
        state.m[3].s[0],
        state.m[4].s[0],
    ];
    let mut b = [
        state.m[0].s[1],
        state.m[1].s[1],
        state.m[2].s[1],
        state.m[3].s[1],
        state.m[4].s[1],
    ];
    let mut c = [
        state.m[0].s[2],
        state.m[1].s[2],
        state.m[2].s[2],
        state.m[3].s[2],
        state.m[4].s[2],
    ];
    let mut t0_a = preserve[0];
    let mut t0_b = preserve[1];

    a[2] = !a[2];

    for &rc in &ROUND_CONSTANTS[first_round as usize..12] {
        a[2] ^= rc;
        a[0] ^= a[4];
        a[4] ^= a[3];
        a[2] ^= a[1];
        let t1_a = a[0];

        b[0] ^= b[4];
        b[4] ^= b[3];
        b[2] ^= b[1];
        let t1_b = b[0];

        c[0] ^= c[4];
        c[4] ^= c[3];
        c[2] ^= c[1];
        let t1_c = c[0];

        let t0_c = rotate_share2_0(t0_a) ^ rotate_share2_1(t0_b);
        let mut t0 = [t0_a, t0_b, t0_c];

        let x0 = [a[0], b[0], c[0]];
        let x1 = [a[1], b[1], c[1]];
        let x2 = [a[2], b[2], c[2]];
        let x3 = [a[3], b[3], c[3]];
        let x4 = [a[4], b[4], c[4]];
        let t1 = [t1_a, t1_b, t1_c];

        and_not_xor3(&mut t0, &x0, &x1);
        let mut new0 = x0;
        and_not_xor3(&mut new0, &x1, &x2);
        let mut new1 = x1;
        and_not_xor3(&mut new1, &x2, &x3);
        let mut new2 = x2;
        and_not_xor3(&mut new2, &x3, &x4);
        let mut new3 = x3;
        and_not_xor3(&mut new3, &x4, &t1);

        a[0] = new0[0];
        b[0] = new0[1];
        c[0] = new0[2];
        a[1] = new1[0];
        b[1] = new1[1];
        c[1] = new1[2];
        a[2] = new2[0];
        b[2] = new2[1];
        c[2] = new2[2];
        a[3] = new3[0];
        b[3] = new3[1];
        c[3] = new3[2];
        a[4] ^= t0[0];
        b[4] ^= t0[1];
        c[4] ^= t0[2];

        a[1] ^= a[0];
        a[0] ^= a[4];
        a[3] ^= a[2];
        b[1] ^= b[0];
        b[0] ^= b[4];
        b[3] ^= b[2];
        c[1] ^= c[0];
        c[0] ^= c[4];
        c[3] ^= c[2];

        diffuse(&mut c);
        diffuse(&mut b);
        diffuse(&mut a);

        t0_a = right_rotate13(t0_a);
        t0_b = right_rotate29(t0_b);
    }

    preserve[0] = t0_a;
    preserve[1] = t0_b;

    a[2] = !a[2];
    for i in 0..5 {
        state.m[i].s = [a[i], b[i], c[i]];
    }
}

// =============================================================================
// 4 shares
// =============================================================================

fn and_not_xor4(x: &mut [u64; 4], y: &[u64; 4], z: &[u64; 4]) {
    x[0] ^= (!y[0]) & z[0];
    x[0] ^= unrotate_share1_0(y[1]) & z[0];
    x[0] ^= unrotate_share2_0(y[2]) & z[0];
    x[0] ^= unrotate_share3_0(y[3]) & z[0];

    x[1] ^= rotate_share1_0(!y[0]) & z[1];
    x[1] ^= y[1] & z[1];
    x[1] ^= unrotate_share2_1(y[2]) & z[1];
    x[1] ^= unrotate_share3_1(y[3]) & z[1];

    x[2] ^= rotate_share2_0(!y[0]) & z[2];
    x[2] ^= rotate_share2_1(y[1]) & z[2];
    x[2] ^= y[2] & z[2];
    x[2] ^= unrotate_share3_2(y[3]) & z[2];

    x[3] ^= rotate_share3_0(!y[0]) & z[3];
    x[3] ^= rotate_share3_1(y[1]) & z[3];
    x[3] ^= rotate_share3_2(y[2]) & z[3];
    x[3] ^= y[3] & z[3];
}

/// 4-share masked permutation.
pub fn x4_permute(state: &mut MaskedState<MaskedWord4>, first_round: u8, preserve: &mut [u64; 3]) {
    let mut a = [
        state.m[0].s[0],
        state.m[1].s[0],
        state.m[2].s[0],
        state.m[3].s[0],
        state.m[4].s[0],
    ];
    let mut b = [
        state.m[0].s[1],
        state.m[1].s[1],
        state.m[2].s[1],
        state.m[3].s[1],
        state.m[4].s[1],
    ];
    let mut c = [
        state.m[0].s[2],
        state.m[1].s[2],
        state.m[2].s[2],
        state.m[3].s[2],
        state.m[4].s[2],
    ];
    let mut d = [
        state.m[0].s[3],
        state.m[1].s[3],
        state.m[2].s[3],
        state.m[3].s[3],
        state.m[4].s[3],
    ];
    let mut t0_a = preserve[0];
    let mut t0_b = preserve[1];
    let mut t0_c = preserve[2];

    a[2] = !a[2];

    for &rc in &ROUND_CONSTANTS[first_round as usize..12] {
        a[2] ^= rc;
        a[0] ^= a[4];
        a[4] ^= a[3];
        a[2] ^= a[1];
        let t1_a = a[0];

        b[0] ^= b[4];
        b[4] ^= b[3];
        b[2] ^= b[1];
        let t1_b = b[0];

        c[0] ^= c[4];
        c[4] ^= c[3];
        c[2] ^= c[1];
        let t1_c = c[0];

        d[0] ^= d[4];
        d[4] ^= d[3];
        d[2] ^= d[1];
        let t1_d = d[0];

        let t0_d = rotate_share3_0(t0_a) ^ rotate_share3_1(t0_b) ^ rotate_share3_2(t0_c);
        let mut t0 = [t0_a, t0_b, t0_c, t0_d];

        let x0 = [a[0], b[0], c[0], d[0]];
        let x1 = [a[1], b[1], c[1], d[1]];
        let x2 = [a[2], b[2], c[2], d[2]];
        let x3 = [a[3], b[3], c[3], d[3]];
        let x4 = [a[4], b[4], c[4], d[4]];
        let t1 = [t1_a, t1_b, t1_c, t1_d];

        and_not_xor4(&mut t0, &x0, &x1);
        let mut new0 = x0;
        and_not_xor4(&mut new0, &x1, &x2);
        let mut new1 = x1;
        and_not_xor4(&mut new1, &x2, &x3);
        let mut new2 = x2;
        and_not_xor4(&mut new2, &x3, &x4);
        let mut new3 = x3;
        and_not_xor4(&mut new3, &x4, &t1);

        a[0] = new0[0];
        b[0] = new0[1];
        c[0] = new0[2];
        d[0] = new0[3];
        a[1] = new1[0];
        b[1] = new1[1];
        c[1] = new1[2];
        d[1] = new1[3];
        a[2] = new2[0];
        b[2] = new2[1];
        c[2] = new2[2];
        d[2] = new2[3];
        a[3] = new3[0];
        b[3] = new3[1];
        c[3] = new3[2];
        d[3] = new3[3];
        a[4] ^= t0[0];
        b[4] ^= t0[1];
        c[4] ^= t0[2];
        d[4] ^= t0[3];

        a[1] ^= a[0];
        a[0] ^= a[4];
        a[3] ^= a[2];
        b[1] ^= b[0];
        b[0] ^= b[4];
        b[3] ^= b[2];
        c[1] ^= c[0];
        c[0] ^= c[4];
        c[3] ^= c[2];
        d[1] ^= d[0];
        d[0] ^= d[4];
        d[3] ^= d[2];

        diffuse(&mut d);
        diffuse(&mut c);
        diffuse(&mut b);
        diffuse(&mut a);

        t0_a = right_rotate13(t0_a);
        t0_b = right_rotate29(t0_b);
        t0_c = right_rotate59(t0_c);
    }

    preserve[0] = t0_a;
    preserve[1] = t0_b;
    preserve[2] = t0_c;

    a[2] = !a[2];
    for i in 0..5 {
        state.m[i].s = [a[i], b[i], c[i], d[i]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trng::{MixerTrng, Trng};

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

    fn unmasked_permute(lanes: &mut [u64; 5]) {
        crate::core::permute_lanes(lanes, 0);
    }

    #[test]
    fn x2_permute_matches_unmasked() {
        let mut trng = mixer();
        let mut lanes = [1u64, 2, 3, 4, 5];
        let mut masked = MaskedState::<MaskedWord2>::from_unmasked(&lanes, &mut trng);
        let mut preserve = trng.generate_64();
        x2_permute(&mut masked, 0, &mut preserve);
        unmasked_permute(&mut lanes);
        assert_eq!(masked.to_unmasked(), lanes);
    }

    #[test]
    fn x3_permute_matches_unmasked() {
        let mut trng = mixer();
        let mut lanes = [10u64, 20, 30, 40, 50];
        let mut masked = MaskedState::<MaskedWord3>::from_unmasked(&lanes, &mut trng);
        let mut preserve = [trng.generate_64(), trng.generate_64()];
        x3_permute(&mut masked, 0, &mut preserve);
        unmasked_permute(&mut lanes);
        assert_eq!(masked.to_unmasked(), lanes);
    }

    #[test]
    fn x4_permute_matches_unmasked() {
        let mut trng = mixer();
        let mut lanes = [100u64, 200, 300, 400, 500];
        let mut masked = MaskedState::<MaskedWord4>::from_unmasked(&lanes, &mut trng);
        let mut preserve = [trng.generate_64(), trng.generate_64(), trng.generate_64()];
        x4_permute(&mut masked, 0, &mut preserve);
        unmasked_permute(&mut lanes);
        assert_eq!(masked.to_unmasked(), lanes);
    }
}
