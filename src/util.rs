//! Byte/word utilities
//!
//! Endian-safe load/store helpers, fixed-count rotations, an XOR-block
//! helper, and a secure-wipe routine the compiler cannot elide.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

// =============================================================================
// ROTATIONS
// =============================================================================

/// Rotate a 64-bit word right by `n` bits.
#[must_use]
#[inline(always)]
pub const fn rotr64(x: u64, n: u32) -> u64 {
    x.rotate_right(n)
}

/// Rotate a 32-bit word right by `n` bits.
#[must_use]
#[inline(always)]
pub const fn rotr32(x: u32, n: u32) -> u32 {
    x.rotate_right(n)
}

// =============================================================================
// BIG-ENDIAN LOAD/STORE
// =============================================================================

/// Load a big-endian `u16` from the first 2 bytes of `data`.
#[must_use]
#[inline]
pub fn be_load_u16(data: &[u8]) -> u16 {
    u16::from_be_bytes([data[0], data[1]])
}

/// Load a big-endian `u32` from the first 4 bytes of `data`.
#[must_use]
#[inline]
pub fn be_load_u32(data: &[u8]) -> u32 {
    u32::from_be_bytes([data[0], data[1], data[2], data[3]])
}

/// Load a big-endian `u64` from the first 8 bytes of `data`.
#[must_use]
#[inline]
pub fn be_load_u64(data: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[..8]);
    u64::from_be_bytes(buf)
}

/// Load a big-endian `u64` from fewer than 8 bytes, left-justified
/// (the missing low-order bytes are treated as zero).
#[must_use]
pub fn be_load_u64_partial(data: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..data.len()].copy_from_slice(data);
    u64::from_be_bytes(buf)
}

/// Store a big-endian `u16` into the first 2 bytes of `out`.
#[inline]
pub fn be_store_u16(out: &mut [u8], value: u16) {
    out[..2].copy_from_slice(&value.to_be_bytes());
}

/// Store a big-endian `u32` into the first 4 bytes of `out`.
#[inline]
pub fn be_store_u32(out: &mut [u8], value: u32) {
    out[..4].copy_from_slice(&value.to_be_bytes());
}

/// Store a big-endian `u64` into the first 8 bytes of `out`.
#[inline]
pub fn be_store_u64(out: &mut [u8], value: u64) {
    out[..8].copy_from_slice(&value.to_be_bytes());
}

/// Store the top `out.len()` bytes (`out.len() < 8`) of a big-endian `u64`.
pub fn be_store_u64_partial(out: &mut [u8], value: u64) {
    let full = value.to_be_bytes();
    out.copy_from_slice(&full[..out.len()]);
}

// =============================================================================
// BLOCK HELPERS
// =============================================================================

/// XOR `src` into `dst` in place, over the shorter of the two lengths.
#[inline]
pub fn xor_block(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= *s;
    }
}

/// `dst[i] = a[i] ^ b[i]` for the shared length of the three slices.
#[inline]
pub fn xor_block_2(dst: &mut [u8], a: &[u8], b: &[u8]) {
    for ((d, x), y) in dst.iter_mut().zip(a.iter()).zip(b.iter()) {
        *d = *x ^ *y;
    }
}

/// Overwrite every byte of `buf` with zero using a write the compiler
/// cannot optimize away, so secrets don't linger after `free`.
#[inline]
pub fn secure_zero(buf: &mut [u8]) {
    buf.zeroize();
}

/// Constant-time comparison of two equal-length byte slices.
///
/// Returns `true` if and only if every byte matches; the comparison does
/// not branch on the position of the first mismatch.
#[must_use]
#[inline]
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
