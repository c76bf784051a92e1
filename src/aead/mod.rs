//! AEAD family: ASCON-128, ASCON-128a, ASCON-80pq
//!
//! Each variant is a thin configuration (IV, key size, rate, per-phase
//! round counts) plugged into one shared encrypt/decrypt/incremental
//! skeleton in [`common`].

pub mod ascon128;
pub mod ascon128a;
pub mod ascon80pq;
mod common;

pub use ascon128::Ascon128;
pub use ascon128a::Ascon128a;
pub use ascon80pq::Ascon80pq;
pub use common::{AeadState, AeadVariant};

/// AEAD tag size in bytes, shared by every variant.
pub const TAG_SIZE: usize = 16;

/// Nonce size in bytes, shared by every variant.
pub const NONCE_SIZE: usize = 16;
