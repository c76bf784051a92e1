//! The SnP ("state-and-permutation") API
//!
//! Every higher-level construction (sponge, AEAD, XOF, SIV, ISAP) is
//! written once against this trait and is agnostic to which of the three
//! permitted permutation-state representations backs it.

use super::guard::AcquireGuard;

/// Capability set every permutation-state representation must provide.
///
/// Implementors store the 320-bit state in whatever shape suits their
/// target (byte array, native 64-bit lanes, or a 32-bit-word pair per
/// lane) but must behave identically from the caller's perspective: after
/// any public operation the state is addressable as 40 bytes in regular
/// (big-endian) order.
pub trait StateRepr: Sized + Clone {
    /// Zero-initialize a new state.
    fn init() -> Self;

    /// Read out the full 320-bit state as 40 bytes in regular order.
    fn to_bytes(&self) -> [u8; 40];

    /// Rebuild a state from 40 bytes in regular order.
    fn from_bytes(bytes: [u8; 40]) -> Self;

    /// Run the permutation for rounds `first_round..12`.
    fn permute(&mut self, first_round: u8);

    /// Overwrite every byte with zero. Implementors must make sure this
    /// write cannot be elided by the optimizer.
    fn free(&mut self);

    #[doc(hidden)]
    fn acquire_raw(&mut self) {}
    #[doc(hidden)]
    fn release_raw(&mut self) {}

    /// Bracket a critical section. The software backends in this crate
    /// have nothing to serialize, so this is a no-op besides producing a
    /// guard whose `Drop` balances the call.
    fn acquire(&mut self) -> AcquireGuard<'_, Self> {
        AcquireGuard::new(self)
    }

    /// XOR `size` bytes from `data` into the state starting at `offset`.
    fn add_bytes(&mut self, data: &[u8], offset: usize, size: usize) {
        let mut buf = self.to_bytes();
        crate::util::xor_block(&mut buf[offset..offset + size], &data[..size]);
        *self = Self::from_bytes(buf);
    }

    /// Replace `size` bytes of the state starting at `offset`.
    fn overwrite_bytes(&mut self, data: &[u8], offset: usize, size: usize) {
        let mut buf = self.to_bytes();
        buf[offset..offset + size].copy_from_slice(&data[..size]);
        *self = Self::from_bytes(buf);
    }

    /// Replace `size` bytes of the state starting at `offset` with zero.
    fn overwrite_with_zeroes(&mut self, offset: usize, size: usize) {
        let mut buf = self.to_bytes();
        buf[offset..offset + size].fill(0);
        *self = Self::from_bytes(buf);
    }

    /// Read `size` bytes starting at `offset` without modifying the state.
    fn extract_bytes(&self, out: &mut [u8], offset: usize, size: usize) {
        let buf = self.to_bytes();
        out[..size].copy_from_slice(&buf[offset..offset + size]);
    }

    /// Squeeze-then-XOR: `out = state[offset..] ^ input`, and the state's
    /// rate bytes become `out` (used by AEAD/SIV encryption).
    fn extract_and_add_bytes(&mut self, input: &[u8], out: &mut [u8], offset: usize, size: usize) {
        let mut buf = self.to_bytes();
        for i in 0..size {
            out[i] = buf[offset + i] ^ input[i];
        }
        buf[offset..offset + size].copy_from_slice(&out[..size]);
        *self = Self::from_bytes(buf);
    }

    /// Decrypt-and-reinsert: `out = state[offset..] ^ input`, and the
    /// state's rate bytes become `input` (used by AEAD decryption, where
    /// `input` is the ciphertext).
    fn extract_and_overwrite_bytes(
        &mut self,
        input: &[u8],
        out: &mut [u8],
        offset: usize,
        size: usize,
    ) {
        let mut buf = self.to_bytes();
        for i in 0..size {
            out[i] = buf[offset + i] ^ input[i];
        }
        buf[offset..offset + size].copy_from_slice(&input[..size]);
        *self = Self::from_bytes(buf);
    }

    /// Copy the state of `src` into `self`.
    fn copy_from(&mut self, src: &Self) {
        *self = src.clone();
    }
}
