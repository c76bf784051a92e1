//! Boolean-masked 64-bit words
//!
//! Each lane of the permutation state is split into `N` shares whose XOR
//! recovers the real value; every share beyond the first is also rotated
//! by a fixed, share-pair-specific amount before being folded in, so that
//! XORing two shares together directly (without first undoing the
//! rotation) never reconstructs anything meaningful. This is what lets
//! [`super::permute`]'s round function borrow a share's bits as
//! "preserved randomness" between rounds without it ever equaling the
//! unmasked state.
//!
//! `MaskedWord2`/`MaskedWord3`/`MaskedWord4` are three concrete,
//! independent implementations rather than one struct generic over `N`:
//! the reference algorithms for 2, 3, and 4 shares are genuinely
//! different Boolean circuits (not a loop over shares), so triplicating
//! the code here mirrors triplicating it in the reference sources.

use crate::trng::{MixerTrng, Trng};
use crate::util::rotr64;
use zeroize::Zeroize;

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

/// Shared capability set across `MaskedWord2`/`3`/`4`: everything that
/// doesn't need to reach across a share-count boundary.
pub trait MaskedWord: Sized + Clone {
    /// All-zero shares summing to a random value (used to seed a fresh
    /// masked state with meaningless but well-formed shares).
    fn zero<T: Trng>(trng: &mut MixerTrng<T>) -> Self;

    /// Split an 8-byte big-endian value into shares.
    fn load<T: Trng>(data: &[u8], trng: &mut MixerTrng<T>) -> Self;

    /// Split fewer than 8 big-endian bytes into shares, rotated down to
    /// byte 0 the way the reference "partial" loads are (used for the
    /// last, short block of a duplex absorb).
    fn load_partial<T: Trng>(data: &[u8], size: usize, trng: &mut MixerTrng<T>) -> Self;

    /// Split a word built from two 4-byte big-endian halves into shares.
    /// Used by the ASCON-80pq masked key schedule, whose key words
    /// straddle byte boundaries that don't land on an 8-byte lane.
    fn load_32<T: Trng>(hi: &[u8], lo: &[u8], trng: &mut MixerTrng<T>) -> Self;

    /// Recombine shares and store as 8 big-endian bytes.
    fn store(&self, data: &mut [u8]);

    /// Recombine shares and store as `size < 8` big-endian bytes.
    fn store_partial(&self, data: &mut [u8], size: usize);

    /// Mask an already-known 64-bit value (used when converting an
    /// unmasked permutation state into masked form).
    fn mask<T: Trng>(data: u64, trng: &mut MixerTrng<T>) -> Self;

    /// Recombine shares back into a plain 64-bit value.
    fn unmask(&self) -> u64;

    /// Re-randomize the shares in place without changing the value they
    /// sum to.
    fn randomize<T: Trng>(&mut self, trng: &mut MixerTrng<T>);

    /// XOR another masked word's shares into this one (sums the values).
    fn xor(&mut self, other: &Self);

    /// Replace the low `size` bytes' worth of shares with `other`'s,
    /// leaving the rest of this word untouched. Used to splice a partial
    /// final block into an otherwise-unmodified rate lane.
    fn replace(&mut self, other: &Self, size: usize);

    /// XOR in the Ascon `0x80` domain-padding bit at byte `offset`.
    fn pad(&mut self, offset: usize);

    /// XOR in the AEAD domain-separator bit (bit 0 of byte 7).
    fn separator(&mut self);

    /// Overwrite every share with zero using a write the compiler cannot
    /// optimize away, so key- or state-derived randomness doesn't linger
    /// after a masked container is freed.
    fn wipe(&mut self);
}

macro_rules! partial_load_body {
    ($data:expr, $size:expr, $masked:ident, $random:ident, $rot8:ident, $rot16:ident, $rot32:ident) => {{
        let mut size = $size;
        if size >= 4 {
            $masked ^= crate::util::be_load_u32(&$data[size - 4..]) as u64;
            $masked = $rot32($masked);
            $random = $rot32($random);
            size -= 4;
        }
        if size >= 2 {
            $masked ^= crate::util::be_load_u16(&$data[size - 2..]) as u64;
            $masked = $rot16($masked);
            $random = $rot16($random);
            size -= 2;
        }
        if size > 0 {
            $masked ^= $data[0] as u64;
            $masked = $rot8($masked);
            $random = $rot8($random);
        }
    }};
}

fn right_rotate32(x: u64) -> u64 {
    rotr64(x, 32)
}
fn right_rotate16(x: u64) -> u64 {
    rotr64(x, 16)
}
fn right_rotate8(x: u64) -> u64 {
    rotr64(x, 8)
}
fn left_rotate32(x: u64) -> u64 {
    rotr64(x, 32)
}
fn left_rotate16(x: u64) -> u64 {
    rotr64(x, 48)
}
fn left_rotate8(x: u64) -> u64 {
    rotr64(x, 56)
}

// =============================================================================
// 2-share words
// =============================================================================

/// A lane split into 2 Boolean shares.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaskedWord2 {
    pub(crate) s: [u64; 2],
}

impl MaskedWord for MaskedWord2 {
    fn zero<T: Trng>(trng: &mut MixerTrng<T>) -> Self {
        let random = trng.generate_64();
        Self {
            s: [random, rotate_share1_0(random)],
        }
    }

    fn load<T: Trng>(data: &[u8], trng: &mut MixerTrng<T>) -> Self {
        let random = trng.generate_64();
        Self {
            s: [random ^ crate::util::be_load_u64(data), rotate_share1_0(random)],
        }
    }

    fn load_partial<T: Trng>(data: &[u8], size: usize, trng: &mut MixerTrng<T>) -> Self {
        let random0 = trng.generate_64();
        let mut masked = random0;
        let mut random = rotate_share1_0(random0);
        partial_load_body!(
            data,
            size,
            masked,
            random,
            right_rotate8,
            right_rotate16,
            right_rotate32
        );
        Self { s: [masked, random] }
    }

    fn load_32<T: Trng>(hi: &[u8], lo: &[u8], trng: &mut MixerTrng<T>) -> Self {
        let random = trng.generate_64();
        let value = ((crate::util::be_load_u32(hi) as u64) << 32) | crate::util::be_load_u32(lo) as u64;
        Self {
            s: [random ^ value, rotate_share1_0(random)],
        }
    }

    fn store(&self, data: &mut [u8]) {
        crate::util::be_store_u64(data, self.s[0] ^ unrotate_share1_0(self.s[1]));
    }

    fn store_partial(&self, data: &mut [u8], size: usize) {
        let mut m1 = self.s[0];
        let mut m2 = unrotate_share1_0(self.s[1]);
        let mut size = size;
        let mut data = data;
        if size >= 4 {
            m1 = left_rotate32(m1);
            m2 = left_rotate32(m2);
            crate::util::be_store_u32(data, (m1 ^ m2) as u32);
            data = &mut data[4..];
            size -= 4;
        }
        if size >= 2 {
            m1 = left_rotate16(m1);
            m2 = left_rotate16(m2);
            crate::util::be_store_u16(data, (m1 ^ m2) as u16);
            data = &mut data[2..];
            size -= 2;
        }
        if size > 0 {
            m1 = left_rotate8(m1);
            m2 = left_rotate8(m2);
            data[0] = (m1 ^ m2) as u8;
        }
    }

    fn mask<T: Trng>(data: u64, trng: &mut MixerTrng<T>) -> Self {
        let random = trng.generate_64();
        Self {
            s: [random ^ data, rotate_share1_0(random)],
        }
    }

    fn unmask(&self) -> u64 {
        self.s[0] ^ unrotate_share1_0(self.s[1])
    }

    fn randomize<T: Trng>(&mut self, trng: &mut MixerTrng<T>) {
        let random = trng.generate_64();
        self.s[0] ^= random;
        self.s[1] ^= rotate_share1_0(random);
    }

    fn xor(&mut self, other: &Self) {
        self.s[0] ^= other.s[0];
        self.s[1] ^= other.s[1];
    }

    fn replace(&mut self, other: &Self, size: usize) {
        let mask1 = u64::MAX >> (size * 8);
        let mask2 = !mask1;
        self.s[0] = (self.s[0] & mask1) | (other.s[0] & mask2);
        self.s[1] = (self.s[1] & rotate_share1_0(mask1)) | (other.s[1] & rotate_share1_0(mask2));
    }

    fn pad(&mut self, offset: usize) {
        self.s[0] ^= 0x8000_0000_0000_0000u64 >> (offset * 8);
    }

    fn separator(&mut self) {
        self.s[0] ^= 1;
    }

    fn wipe(&mut self) {
        self.s.zeroize();
    }
}

// =============================================================================
// 3-share words
// =============================================================================

/// A lane split into 3 Boolean shares.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaskedWord3 {
    pub(crate) s: [u64; 3],
}

impl MaskedWord for MaskedWord3 {
    fn zero<T: Trng>(trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        Self {
            s: [r1 ^ r2, rotate_share1_0(r1), rotate_share2_0(r2)],
        }
    }

    fn load<T: Trng>(data: &[u8], trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        Self {
            s: [
                r1 ^ r2 ^ crate::util::be_load_u64(data),
                rotate_share1_0(r1),
                rotate_share2_0(r2),
            ],
        }
    }

    fn load_partial<T: Trng>(data: &[u8], size: usize, trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let mut masked = r1;
        let mut random = rotate_share1_0(r1);
        partial_load_body!(
            data,
            size,
            masked,
            random,
            right_rotate8,
            right_rotate16,
            right_rotate32
        );
        Self {
            s: [masked ^ r2, random, rotate_share2_0(r2)],
        }
    }

    fn load_32<T: Trng>(hi: &[u8], lo: &[u8], trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let value = ((crate::util::be_load_u32(hi) as u64) << 32) | crate::util::be_load_u32(lo) as u64;
        Self {
            s: [r1 ^ r2 ^ value, rotate_share1_0(r1), rotate_share2_0(r2)],
        }
    }

    fn store(&self, data: &mut [u8]) {
        crate::util::be_store_u64(
            data,
            self.s[0] ^ unrotate_share1_0(self.s[1]) ^ unrotate_share2_0(self.s[2]),
        );
    }

    fn store_partial(&self, data: &mut [u8], size: usize) {
        let mut m1 = self.s[0];
        let mut m2 = unrotate_share1_0(self.s[1]);
        let mut m3 = unrotate_share2_0(self.s[2]);
        let mut size = size;
        let mut data = data;
        if size >= 4 {
            m1 = left_rotate32(m1);
            m2 = left_rotate32(m2);
            m3 = left_rotate32(m3);
            crate::util::be_store_u32(data, (m1 ^ m2 ^ m3) as u32);
            data = &mut data[4..];
            size -= 4;
        }
        if size >= 2 {
            m1 = left_rotate16(m1);
            m2 = left_rotate16(m2);
            m3 = left_rotate16(m3);
            crate::util::be_store_u16(data, (m1 ^ m2 ^ m3) as u16);
            data = &mut data[2..];
            size -= 2;
        }
        if size > 0 {
            m1 = left_rotate8(m1);
            m2 = left_rotate8(m2);
            m3 = left_rotate8(m3);
            data[0] = (m1 ^ m2 ^ m3) as u8;
        }
    }

    fn mask<T: Trng>(data: u64, trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        Self {
            s: [r1 ^ r2 ^ data, rotate_share1_0(r1), rotate_share2_0(r2)],
        }
    }

    fn unmask(&self) -> u64 {
        self.s[0] ^ unrotate_share1_0(self.s[1]) ^ unrotate_share2_0(self.s[2])
    }

    fn randomize<T: Trng>(&mut self, trng: &mut MixerTrng<T>) {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        self.s[0] ^= r1 ^ r2;
        self.s[1] ^= rotate_share1_0(r1);
        self.s[2] ^= rotate_share2_0(r2);
    }

    fn xor(&mut self, other: &Self) {
        for i in 0..3 {
            self.s[i] ^= other.s[i];
        }
    }

    fn replace(&mut self, other: &Self, size: usize) {
        let mask1 = u64::MAX >> (size * 8);
        let mask2 = !mask1;
        self.s[0] = (self.s[0] & mask1) | (other.s[0] & mask2);
        self.s[1] = (self.s[1] & rotate_share1_0(mask1)) | (other.s[1] & rotate_share1_0(mask2));
        self.s[2] = (self.s[2] & rotate_share2_0(mask1)) | (other.s[2] & rotate_share2_0(mask2));
    }

    fn pad(&mut self, offset: usize) {
        self.s[0] ^= 0x8000_0000_0000_0000u64 >> (offset * 8);
    }

    fn separator(&mut self) {
        self.s[0] ^= 1;
    }

    fn wipe(&mut self) {
        self.s.zeroize();
    }
}

// =============================================================================
// 4-share words
// =============================================================================

/// A lane split into 4 Boolean shares.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaskedWord4 {
    pub(crate) s: [u64; 4],
}

impl MaskedWord for MaskedWord4 {
    fn zero<T: Trng>(trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let r3 = trng.generate_64();
        Self {
            s: [
                r1 ^ r2 ^ r3,
                rotate_share1_0(r1),
                rotate_share2_0(r2),
                rotate_share3_0(r3),
            ],
        }
    }

    fn load<T: Trng>(data: &[u8], trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let r3 = trng.generate_64();
        Self {
            s: [
                r1 ^ r2 ^ r3 ^ crate::util::be_load_u64(data),
                rotate_share1_0(r1),
                rotate_share2_0(r2),
                rotate_share3_0(r3),
            ],
        }
    }

    fn load_partial<T: Trng>(data: &[u8], size: usize, trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let r3 = trng.generate_64();
        let mut masked = r1;
        let mut random = rotate_share1_0(r1);
        partial_load_body!(
            data,
            size,
            masked,
            random,
            right_rotate8,
            right_rotate16,
            right_rotate32
        );
        Self {
            s: [masked ^ r2 ^ r3, random, rotate_share2_0(r2), rotate_share3_0(r3)],
        }
    }

    fn load_32<T: Trng>(hi: &[u8], lo: &[u8], trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let r3 = trng.generate_64();
        let value = ((crate::util::be_load_u32(hi) as u64) << 32) | crate::util::be_load_u32(lo) as u64;
        Self {
            s: [
                r1 ^ r2 ^ r3 ^ value,
                rotate_share1_0(r1),
                rotate_share2_0(r2),
                rotate_share3_0(r3),
            ],
        }
    }

    fn store(&self, data: &mut [u8]) {
        crate::util::be_store_u64(
            data,
            self.s[0] ^ unrotate_share1_0(self.s[1]) ^ unrotate_share2_0(self.s[2]) ^ unrotate_share3_0(self.s[3]),
        );
    }

    fn store_partial(&self, data: &mut [u8], size: usize) {
        let mut m1 = self.s[0];
        let mut m2 = unrotate_share1_0(self.s[1]);
        let mut m3 = unrotate_share2_0(self.s[2]);
        let mut m4 = unrotate_share3_0(self.s[3]);
        let mut size = size;
        let mut data = data;
        if size >= 4 {
            m1 = left_rotate32(m1);
            m2 = left_rotate32(m2);
            m3 = left_rotate32(m3);
            m4 = left_rotate32(m4);
            crate::util::be_store_u32(data, (m1 ^ m2 ^ m3 ^ m4) as u32);
            data = &mut data[4..];
            size -= 4;
        }
        if size >= 2 {
            m1 = left_rotate16(m1);
            m2 = left_rotate16(m2);
            m3 = left_rotate16(m3);
            m4 = left_rotate16(m4);
            crate::util::be_store_u16(data, (m1 ^ m2 ^ m3 ^ m4) as u16);
            data = &mut data[2..];
            size -= 2;
        }
        if size > 0 {
            m1 = left_rotate8(m1);
            m2 = left_rotate8(m2);
            m3 = left_rotate8(m3);
            m4 = left_rotate8(m4);
            data[0] = (m1 ^ m2 ^ m3 ^ m4) as u8;
        }
    }

    fn mask<T: Trng>(data: u64, trng: &mut MixerTrng<T>) -> Self {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let r3 = trng.generate_64();
        Self {
            s: [
                r1 ^ r2 ^ r3 ^ data,
                rotate_share1_0(r1),
                rotate_share2_0(r2),
                rotate_share3_0(r3),
            ],
        }
    }

    fn unmask(&self) -> u64 {
        self.s[0] ^ unrotate_share1_0(self.s[1]) ^ unrotate_share2_0(self.s[2]) ^ unrotate_share3_0(self.s[3])
    }

    fn randomize<T: Trng>(&mut self, trng: &mut MixerTrng<T>) {
        let r1 = trng.generate_64();
        let r2 = trng.generate_64();
        let r3 = trng.generate_64();
        self.s[0] ^= r1 ^ r2 ^ r3;
        self.s[1] ^= rotate_share1_0(r1);
        self.s[2] ^= rotate_share2_0(r2);
        self.s[3] ^= rotate_share3_0(r3);
    }

    fn xor(&mut self, other: &Self) {
        for i in 0..4 {
            self.s[i] ^= other.s[i];
        }
    }

    fn replace(&mut self, other: &Self, size: usize) {
        let mask1 = u64::MAX >> (size * 8);
        let mask2 = !mask1;
        self.s[0] = (self.s[0] & mask1) | (other.s[0] & mask2);
        self.s[1] = (self.s[1] & rotate_share1_0(mask1)) | (other.s[1] & rotate_share1_0(mask2));
        self.s[2] = (self.s[2] & rotate_share2_0(mask1)) | (other.s[2] & rotate_share2_0(mask2));
        self.s[3] = (self.s[3] & rotate_share3_0(mask1)) | (other.s[3] & rotate_share3_0(mask2));
    }

    fn pad(&mut self, offset: usize) {
        self.s[0] ^= 0x8000_0000_0000_0000u64 >> (offset * 8);
    }

    fn separator(&mut self) {
        self.s[0] ^= 1;
    }

    fn wipe(&mut self) {
        self.s.zeroize();
    }
}

// =============================================================================
// Cross-share-count conversions
// =============================================================================

/// Drop from 3 shares to 2, re-randomizing what remains. Used when a
/// 3-share session needs to interoperate with 2-share state (e.g.
/// comparing against an unmasked reference at a different share count).
pub fn x2_from_x3<T: Trng>(src: &MaskedWord3, trng: &mut MixerTrng<T>) -> MaskedWord2 {
    let random = trng.generate_64();
    MaskedWord2 {
        s: [
            random ^ src.s[0],
            (rotate_share1_0(random) ^ src.s[1]) ^ unrotate_share2_1(src.s[2]),
        ],
    }
}

/// Drop from 4 shares to 2.
pub fn x2_from_x4<T: Trng>(src: &MaskedWord4, trng: &mut MixerTrng<T>) -> MaskedWord2 {
    let random = trng.generate_64();
    MaskedWord2 {
        s: [
            (random ^ src.s[0]) ^ unrotate_share2_0(src.s[2]),
            (rotate_share1_0(random) ^ src.s[1]) ^ unrotate_share3_1(src.s[3]),
        ],
    }
}

/// Raise from 2 shares to 3 by splitting off a fresh, independent third
/// share.
pub fn x3_from_x2<T: Trng>(src: &MaskedWord2, trng: &mut MixerTrng<T>) -> MaskedWord3 {
    let r1 = trng.generate_64();
    let r2 = trng.generate_64();
    MaskedWord3 {
        s: [
            r1 ^ r2 ^ src.s[0],
            rotate_share1_0(r1) ^ src.s[1],
            rotate_share2_0(r2),
        ],
    }
}

/// Drop from 4 shares to 3.
pub fn x3_from_x4<T: Trng>(src: &MaskedWord4, trng: &mut MixerTrng<T>) -> MaskedWord3 {
    let r1 = trng.generate_64();
    let r2 = trng.generate_64();
    MaskedWord3 {
        s: [
            (r1 ^ r2 ^ src.s[0]) ^ unrotate_share3_0(src.s[3]),
            rotate_share1_0(r1) ^ src.s[1],
            rotate_share2_0(r2) ^ src.s[2],
        ],
    }
}

/// Raise from 2 shares to 4.
pub fn x4_from_x2<T: Trng>(src: &MaskedWord2, trng: &mut MixerTrng<T>) -> MaskedWord4 {
    let r1 = trng.generate_64();
    let r2 = trng.generate_64();
    let r3 = trng.generate_64();
    MaskedWord4 {
        s: [
            r1 ^ r2 ^ r3 ^ src.s[0],
            rotate_share1_0(r1) ^ src.s[1],
            rotate_share2_0(r2),
            rotate_share3_0(r3),
        ],
    }
}

/// Raise from 3 shares to 4.
pub fn x4_from_x3<T: Trng>(src: &MaskedWord3, trng: &mut MixerTrng<T>) -> MaskedWord4 {
    let r1 = trng.generate_64();
    let r2 = trng.generate_64();
    let r3 = trng.generate_64();
    MaskedWord4 {
        s: [
            r1 ^ r2 ^ r3 ^ src.s[0],
            rotate_share1_0(r1) ^ src.s[1],
            rotate_share2_0(r2) ^ src.s[2],
            rotate_share3_0(r3),
        ],
    }
}
