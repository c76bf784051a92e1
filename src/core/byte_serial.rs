//! Byte-serial backend
//!
//! Models a target that processes the state one byte at a time rather
//! than in native machine words (the natural shape for an 8-bit target,
//! or for any implementation that prioritizes code size over speed).
//! The state is stored as a flat 40-byte array and converted to the
//! canonical 64-bit lane form only for the duration of a `permute` call.

use super::state::StateRepr;
use super::permute_lanes;
use crate::util::{be_load_u64, be_store_u64};

/// 320-bit Ascon-p state stored as a flat byte array.
#[derive(Clone)]
pub struct ByteSerialState {
    bytes: [u8; 40],
}

impl StateRepr for ByteSerialState {
    fn init() -> Self {
        Self { bytes: [0u8; 40] }
    }

    fn to_bytes(&self) -> [u8; 40] {
        self.bytes
    }

    fn from_bytes(bytes: [u8; 40]) -> Self {
        Self { bytes }
    }

    fn permute(&mut self, first_round: u8) {
        let mut lanes = [0u64; 5];
        for (lane, chunk) in lanes.iter_mut().zip(self.bytes.chunks_exact(8)) {
            *lane = be_load_u64(chunk);
        }
        permute_lanes(&mut lanes, first_round);
        for (lane, chunk) in lanes.iter().zip(self.bytes.chunks_exact_mut(8)) {
            be_store_u64(chunk, *lane);
        }
    }

    fn free(&mut self) {
        crate::util::secure_zero(&mut self.bytes);
    }
}
