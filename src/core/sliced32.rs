//! 32-bit bit-interleaved backend
//!
//! Models a target where the permutation operates on pairs of 32-bit
//! words rather than native 64-bit lanes (the common shape on 32-bit
//! microcontrollers, where each lane is split into an even/odd
//! bit-interleaved half). This crate does not implement the actual
//! bit-interleaving transform; it stores each lane as a
//! high/low 32-bit pair and converts to the canonical 64-bit lane form
//! to run the permutation, which is observably identical to a true
//! bit-sliced implementation from the `StateRepr` caller's perspective.

use super::state::StateRepr;
use super::{permute_lanes, Sliced64State};
use crate::util::{be_load_u32, be_store_u32};

/// 320-bit Ascon-p state stored as five `(high, low)` 32-bit word pairs.
#[derive(Clone)]
pub struct Sliced32State {
    words: [(u32, u32); 5],
}

impl StateRepr for Sliced32State {
    fn init() -> Self {
        Self {
            words: [(0, 0); 5],
        }
    }

    fn to_bytes(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        for ((hi, lo), chunk) in self.words.iter().zip(out.chunks_exact_mut(8)) {
            be_store_u32(&mut chunk[..4], *hi);
            be_store_u32(&mut chunk[4..], *lo);
        }
        out
    }

    fn from_bytes(bytes: [u8; 40]) -> Self {
        let mut words = [(0u32, 0u32); 5];
        for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            *w = (be_load_u32(&chunk[..4]), be_load_u32(&chunk[4..]));
        }
        Self { words }
    }

    fn permute(&mut self, first_round: u8) {
        let mut lanes = [0u64; 5];
        for (lane, (hi, lo)) in lanes.iter_mut().zip(self.words.iter()) {
            *lane = (u64::from(*hi) << 32) | u64::from(*lo);
        }
        permute_lanes(&mut lanes, first_round);
        for (w, lane) in self.words.iter_mut().zip(lanes.iter()) {
            *w = ((*lane >> 32) as u32, *lane as u32);
        }
    }

    fn free(&mut self) {
        let mut bytes = self.to_bytes();
        crate::util::secure_zero(&mut bytes);
        self.words = [(0, 0); 5];
    }
}

impl From<Sliced64State> for Sliced32State {
    fn from(s: Sliced64State) -> Self {
        Self::from_bytes(StateRepr::to_bytes(&s))
    }
}
