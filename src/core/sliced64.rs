//! Native 64-bit-lane backend
//!
//! The canonical representation: the state is kept as five host-endian
//! `u64` lanes at all times, so `permute` calls the core round function
//! directly with no conversion. This is the backend every other
//! representation converts through.

use super::state::StateRepr;
use super::{permute_lanes, Sliced32State};
use crate::util::{be_load_u64, be_store_u64};

/// 320-bit Ascon-p state stored as five 64-bit lanes.
#[derive(Clone)]
pub struct Sliced64State {
    lanes: [u64; 5],
}

impl Sliced64State {
    /// Borrow the lanes directly, for callers (the sponge engine) that
    /// want to avoid the byte round-trip on the hot path.
    #[must_use]
    pub(crate) fn lanes(&self) -> &[u64; 5] {
        &self.lanes
    }

    pub(crate) fn lanes_mut(&mut self) -> &mut [u64; 5] {
        &mut self.lanes
    }

    pub(crate) fn from_lanes(lanes: [u64; 5]) -> Self {
        Self { lanes }
    }
}

impl StateRepr for Sliced64State {
    fn init() -> Self {
        Self { lanes: [0u64; 5] }
    }

    fn to_bytes(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        for (lane, chunk) in self.lanes.iter().zip(out.chunks_exact_mut(8)) {
            be_store_u64(chunk, *lane);
        }
        out
    }

    fn from_bytes(bytes: [u8; 40]) -> Self {
        let mut lanes = [0u64; 5];
        for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(8)) {
            *lane = be_load_u64(chunk);
        }
        Self { lanes }
    }

    fn permute(&mut self, first_round: u8) {
        permute_lanes(&mut self.lanes, first_round);
    }

    fn free(&mut self) {
        let mut bytes = self.to_bytes();
        crate::util::secure_zero(&mut bytes);
        self.lanes = [0u64; 5];
    }
}

impl From<Sliced32State> for Sliced64State {
    fn from(s: Sliced32State) -> Self {
        Self::from_bytes(s.to_bytes())
    }
}
