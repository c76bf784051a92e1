//! Ascon-p permutation
//!
//! The 320-bit, 12-round permutation shared by every higher-level
//! construction, plus the `StateRepr` seam (the "SnP" API) that lets the
//! sponge engine and every primitive built on it stay agnostic to the
//! underlying storage representation.

pub mod byte_serial;
pub mod guard;
pub mod sliced32;
pub mod sliced64;
pub mod state;

pub use byte_serial::ByteSerialState;
pub use guard::AcquireGuard;
pub use sliced32::Sliced32State;
pub use sliced64::Sliced64State;
pub use state::StateRepr;

/// Pre-inverted round constants, `RC[r] = !(((0x0F - r) << 4) | r)` for
/// `r` in `0..12`. Pre-inverting lets the permutation elide the explicit
/// `x2 = ~x2` step between rounds (the NOT is folded into the next round's
/// constant XOR); the caller restores the final NOT once after the loop.
pub(crate) const ROUND_CONSTANTS: [u64; 12] = [
    round_constant(0),
    round_constant(1),
    round_constant(2),
    round_constant(3),
    round_constant(4),
    round_constant(5),
    round_constant(6),
    round_constant(7),
    round_constant(8),
    round_constant(9),
    round_constant(10),
    round_constant(11),
];

const fn round_constant(round: u8) -> u64 {
    !((((0x0f - round as u64) << 4) | round as u64))
}

/// Run the Ascon-p permutation over five 64-bit lanes, executing rounds
/// `first_round..12`. `first_round` is one of `{0, 4, 6}` in practice
/// (12-, 8-, and 6-round variants), but any value `<= 12` is accepted.
pub(crate) fn permute_lanes(lanes: &mut [u64; 5], first_round: u8) {
    lanes[2] = !lanes[2];
    for rc in &ROUND_CONSTANTS[first_round as usize..12] {
        permute_round(lanes, *rc);
    }
    lanes[2] = !lanes[2];
}

#[inline]
fn permute_round(x: &mut [u64; 5], rc: u64) {
    // AddRoundConstant, folded into the pre-inverted x2.
    x[2] ^= rc;

    // Linear pre-mix of Chi5.
    x[0] ^= x[4];
    x[4] ^= x[3];
    x[2] ^= x[1];
    let t1 = x[0];

    // Toffoli-gate expansion of the non-linear layer: for each i,
    // x_i ^= (~x_i) & x_{i+1 mod 5}, computed with registers reused in
    // place so only one extra temporary (`t0`) is needed.
    let t0 = (!x[0]) & x[1];
    x[0] ^= (!x[1]) & x[2];
    x[1] ^= (!x[2]) & x[3];
    x[2] ^= (!x[3]) & x[4];
    x[3] ^= (!x[4]) & t1;
    x[4] ^= t0;

    // Linear post-mix of Chi5. The x2 = !x2 step is deferred to the next
    // round's constant XOR (or to the final restore after the loop).
    x[1] ^= x[0];
    x[0] ^= x[4];
    x[3] ^= x[2];

    // Linear diffusion layer.
    x[0] ^= crate::util::rotr64(x[0], 19) ^ crate::util::rotr64(x[0], 28);
    x[1] ^= crate::util::rotr64(x[1], 61) ^ crate::util::rotr64(x[1], 39);
    x[2] ^= crate::util::rotr64(x[2], 1) ^ crate::util::rotr64(x[2], 6);
    x[3] ^= crate::util::rotr64(x[3], 10) ^ crate::util::rotr64(x[3], 17);
    x[4] ^= crate::util::rotr64(x[4], 7) ^ crate::util::rotr64(x[4], 41);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn run(first_round: u8) -> [u8; 40] {
        let mut lanes = [0u64; 5];
        let mut input = [0u8; 40];
        for (i, b) in input.iter_mut().enumerate() {
            *b = i as u8;
        }
        for (lane, chunk) in lanes.iter_mut().zip(input.chunks_exact(8)) {
            *lane = crate::util::be_load_u64(chunk);
        }
        permute_lanes(&mut lanes, first_round);
        let mut out = [0u8; 40];
        for (lane, chunk) in lanes.iter().zip(out.chunks_exact_mut(8)) {
            crate::util::be_store_u64(chunk, *lane);
        }
        out
    }

    #[test]
    fn permutation_kat_12_rounds() {
        assert_eq!(
            hex(&run(0)),
            "060587e2d489dd431cc2b17b0e3c1764957342531844a67496b17175b4cb686329b512d627d906e5"
        );
    }

    #[test]
    fn permutation_kat_8_rounds() {
        assert_eq!(
            hex(&run(4)),
            "830d260d335f3bedda0bba917bcfcad7dd0d88e7dcb5ecd0892a02151f95946e3a69cb3cf982f6f7"
        );
    }
}
