//! Boolean-masked Ascon-p as a side-channel countermeasure
//!
//! A second, independent implementation of the permutation and the
//! ASCON-80pq AEAD construction, built so that no intermediate value in
//! the computation is ever the true secret-dependent lane: every lane is
//! split into `N` Boolean shares (`N` = 2, 3, or 4) whose XOR recovers
//! the real value, and every operation — the round function, key
//! loading, AD/payload absorption — is rewritten to work a share at a
//! time. This defends against power/EM side-channel attacks that a
//! bitwise-identical but unmasked implementation would be vulnerable to;
//! it is not a different algorithm, and [`aead`]'s test suite checks
//! that it produces byte-identical output to the unmasked AEAD family.

pub mod aead;
pub mod key;
pub mod permute;
pub mod state;
pub mod word;

pub use key::{MaskedKey128, MaskedKey80pq};
pub use permute::{x2_permute, x3_permute, x4_permute, MaskedPermute};
pub use state::MaskedState;
pub use word::{
    x2_from_x3, x2_from_x4, x3_from_x2, x3_from_x4, x4_from_x2, x4_from_x3, MaskedWord, MaskedWord2,
    MaskedWord3, MaskedWord4,
};
