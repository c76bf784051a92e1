//! ASCON-128a: 128-bit key, 16-byte rate.

use super::common::AeadVariant;
use crate::core::{Sliced64State, StateRepr};

const IV: [u8; 8] = [0x80, 0x80, 0x0c, 0x08, 0x00, 0x00, 0x00, 0x00];

/// The ASCON-128a AEAD variant marker type.
pub struct Ascon128a;

impl AeadVariant for Ascon128a {
    const KEY_SIZE: usize = 16;
    const RATE: usize = 16;
    const AD_ROUNDS: u8 = 4;
    const PAYLOAD_ROUNDS: u8 = 4;

    fn init(key: &[u8], nonce: &[u8; 16]) -> Sliced64State {
        let mut state = Sliced64State::init();
        state.overwrite_bytes(&IV, 0, 8);
        state.overwrite_bytes(key, 8, 16);
        state.overwrite_bytes(nonce, 24, 16);
        state.permute(0);
        state.add_bytes(key, 24, 16);
        state
    }

    fn finalize(state: &mut Sliced64State, key: &[u8]) -> [u8; 16] {
        state.add_bytes(key, 16, 16);
        state.permute(0);
        state.add_bytes(key, 24, 16);
        let mut tag = [0u8; 16];
        state.extract_bytes(&mut tag, 24, 16);
        tag
    }
}
