//! Error type for input parsing and key validation.

use core::fmt;

/// Failure modes of the fallible KEM operations.
///
/// Decapsulation is deliberately excluded: once a ciphertext and key have
/// parsed, it always produces a shared key (implicit rejection), since
/// reporting a mismatch would open a chosen-ciphertext oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KemError {
    /// A byte input had a length other than the expected fixed size.
    InvalidLength,
    /// A key failed validation: an encapsulation key whose coefficients
    /// decode out of range, or a decapsulation key whose embedded key hash
    /// does not match.
    InvalidKey,
}

impl fmt::Display for KemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("input has invalid length"),
            Self::InvalidKey => f.write_str("key failed validation"),
        }
    }
}

impl core::error::Error for KemError {}
