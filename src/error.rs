//! Error types
//!
//! All fallible public functions return `Result<T, Error>`; the permutation
//! core and in-memory sponge absorb/squeeze have no error channel because
//! they cannot fail.

use core::fmt;

/// Errors surfaced by the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// AEAD/SIV/ISAP tag mismatch, or ciphertext shorter than the tag size.
    ///
    /// The plaintext output buffer is zeroed before this is returned.
    AuthenticationFailure,
    /// Input violates a length precondition (e.g. PRF-short input/output
    /// longer than 16 bytes, or a masked-key constructor given the wrong
    /// key length).
    InvalidInput(&'static str),
    /// The TRNG reported failure (`generate` returned `false`).
    TrngFailure,
    /// PRNG seed save/load returned a short byte count.
    StorageFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthenticationFailure => write!(f, "authentication failure"),
            Self::InvalidInput(why) => write!(f, "invalid input: {why}"),
            Self::TrngFailure => write!(f, "random number source failure"),
            Self::StorageFailure => write!(f, "non-volatile storage access failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Convenience alias for this crate's `Result`.
pub type Result<T> = core::result::Result<T, Error>;
