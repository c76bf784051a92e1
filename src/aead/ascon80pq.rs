//! ASCON-80pq: 160-bit key, 64-bit rate, the post-quantum-margin variant.
//!
//! Identical duplex structure to [`super::ascon128`], but with a wider key
//! absorbed across the full 320-bit state rather than fitting in the
//! capacity alone, and a narrower 4-byte IV to make room for it.

use super::common::AeadVariant;
use crate::core::{Sliced64State, StateRepr};

const IV: [u8; 4] = [0xa0, 0x40, 0x0c, 0x06];

/// The ASCON-80pq AEAD variant marker type.
pub struct Ascon80pq;

impl AeadVariant for Ascon80pq {
    const KEY_SIZE: usize = 20;
    const RATE: usize = 8;
    const AD_ROUNDS: u8 = 6;
    const PAYLOAD_ROUNDS: u8 = 6;

    fn init(key: &[u8], nonce: &[u8; 16]) -> Sliced64State {
        let mut state = Sliced64State::init();
        state.overwrite_bytes(&IV, 0, 4);
        state.overwrite_bytes(key, 4, 20);
        state.overwrite_bytes(nonce, 24, 16);
        state.permute(0);
        state.add_bytes(key, 20, 20);
        state
    }

    fn finalize(state: &mut Sliced64State, key: &[u8]) -> [u8; 16] {
        state.add_bytes(key, 8, 20);
        state.permute(0);
        state.add_bytes(&key[4..20], 24, 16);
        let mut tag = [0u8; 16];
        state.extract_bytes(&mut tag, 24, 16);
        tag
    }
}
