//! Typed keys, ciphertexts, and shared keys, with validating constructors.
//!
//! All parsing of untrusted bytes happens here: lengths, the modulus check
//! on encapsulation keys, and the embedded-hash consistency check on
//! decapsulation keys. Past these constructors the KEM operations cannot
//! fail. Secret-carrying types zeroize on drop and redact their `Debug`
//! output.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KemError;
use crate::hash;
use crate::params::{
    CIPHERTEXT_BYTES, DECAPSULATION_KEY_BYTES, ENCAPSULATION_KEY_BYTES,
    POLYVEC_BYTES, SHARED_KEY_BYTES, SYM_BYTES,
};
use crate::polyvec::NttVector;

/// ML-KEM-768 encapsulation (public) key.
///
/// Holds the canonical 1184-byte encoding together with the decoded
/// `t_hat` and matrix seed, so encapsulation never re-parses.
#[derive(Clone)]
pub struct EncapsulationKey {
    bytes: [u8; ENCAPSULATION_KEY_BYTES],
    t_hat: NttVector,
    rho: [u8; SYM_BYTES],
}

impl EncapsulationKey {
    /// Parse and validate an encapsulation key.
    ///
    /// Rejects wrong lengths with [`KemError::InvalidLength`] and any
    /// 12-bit coefficient `>= q` with [`KemError::InvalidKey`] (the
    /// FIPS 203 modulus check).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        let bytes: [u8; ENCAPSULATION_KEY_BYTES] =
            bytes.try_into().map_err(|_| KemError::InvalidLength)?;
        let t_hat = NttVector::from_bytes(&bytes[..POLYVEC_BYTES])?;
        let mut rho = [0u8; SYM_BYTES];
        rho.copy_from_slice(&bytes[POLYVEC_BYTES..]);
        Ok(Self { bytes, t_hat, rho })
    }

    /// Assemble a key from freshly generated, already-reduced parts.
    pub(crate) fn from_parts(
        bytes: [u8; ENCAPSULATION_KEY_BYTES],
        t_hat: NttVector,
    ) -> Self {
        let mut rho = [0u8; SYM_BYTES];
        rho.copy_from_slice(&bytes[POLYVEC_BYTES..]);
        Self { bytes, t_hat, rho }
    }

    /// The canonical 1184-byte encoding.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ENCAPSULATION_KEY_BYTES] {
        &self.bytes
    }

    pub(crate) fn t_hat(&self) -> &NttVector {
        &self.t_hat
    }

    pub(crate) fn rho(&self) -> &[u8; SYM_BYTES] {
        &self.rho
    }
}

impl AsRef<[u8]> for EncapsulationKey {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for EncapsulationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EncapsulationKey")
            .field("len", &ENCAPSULATION_KEY_BYTES)
            .finish_non_exhaustive()
    }
}

/// ML-KEM-768 decapsulation (secret) key. Zeroized on drop.
#[derive(Clone)]
pub struct DecapsulationKey {
    bytes: [u8; DECAPSULATION_KEY_BYTES],
    s_hat: NttVector,
    ek: EncapsulationKey,
}

impl DecapsulationKey {
    /// Parse and validate a decapsulation key.
    ///
    /// Checks the length, decodes `s_hat` and the embedded encapsulation
    /// key (rejecting out-of-range coefficients), and verifies that the
    /// embedded `H(ek)` matches SHA3-256 of the embedded key bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        let bytes: [u8; DECAPSULATION_KEY_BYTES] =
            bytes.try_into().map_err(|_| KemError::InvalidLength)?;
        let s_hat = NttVector::from_bytes(&bytes[..POLYVEC_BYTES])?;
        let ek_bytes = &bytes[POLYVEC_BYTES..POLYVEC_BYTES + ENCAPSULATION_KEY_BYTES];
        let ek = EncapsulationKey::from_bytes(ek_bytes)?;
        let h = &bytes[DECAPSULATION_KEY_BYTES - 2 * SYM_BYTES
            ..DECAPSULATION_KEY_BYTES - SYM_BYTES];
        if hash::hash_h(ek_bytes).as_slice() != h {
            return Err(KemError::InvalidKey);
        }
        Ok(Self { bytes, s_hat, ek })
    }

    pub(crate) fn from_parts(
        bytes: [u8; DECAPSULATION_KEY_BYTES],
        s_hat: NttVector,
        ek: EncapsulationKey,
    ) -> Self {
        Self { bytes, s_hat, ek }
    }

    /// The canonical 2400-byte encoding.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DECAPSULATION_KEY_BYTES] {
        &self.bytes
    }

    /// The public key embedded in this decapsulation key.
    #[must_use]
    pub fn encapsulation_key(&self) -> &EncapsulationKey {
        &self.ek
    }

    pub(crate) fn s_hat(&self) -> &NttVector {
        &self.s_hat
    }

    /// The stored `H(ek)`.
    pub(crate) fn h(&self) -> &[u8] {
        &self.bytes
            [DECAPSULATION_KEY_BYTES - 2 * SYM_BYTES..DECAPSULATION_KEY_BYTES - SYM_BYTES]
    }

    /// The implicit-rejection secret `z`.
    pub(crate) fn z(&self) -> &[u8] {
        &self.bytes[DECAPSULATION_KEY_BYTES - SYM_BYTES..]
    }
}

impl AsRef<[u8]> for DecapsulationKey {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl Zeroize for DecapsulationKey {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
        self.s_hat.zeroize();
    }
}

impl Drop for DecapsulationKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for DecapsulationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DecapsulationKey([REDACTED])")
    }
}

/// ML-KEM-768 ciphertext.
#[derive(Clone)]
pub struct Ciphertext {
    bytes: [u8; CIPHERTEXT_BYTES],
}

impl Ciphertext {
    /// Wrap ciphertext bytes, checking only the length: any 1088-byte
    /// string is a well-formed input to decapsulation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        let bytes = bytes.try_into().map_err(|_| KemError::InvalidLength)?;
        Ok(Self { bytes })
    }

    pub(crate) fn from_array(bytes: [u8; CIPHERTEXT_BYTES]) -> Self {
        Self { bytes }
    }

    /// The 1088-byte encoding.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CIPHERTEXT_BYTES] {
        &self.bytes
    }
}

impl AsRef<[u8]> for Ciphertext {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &CIPHERTEXT_BYTES)
            .finish_non_exhaustive()
    }
}

/// A 32-byte shared key. Zeroized on drop.
///
/// Deliberately no `PartialEq`: comparing shared keys byte-wise in variable
/// time is exactly the bug the strcmp-style test vectors exist to catch.
/// Compare via [`SharedKey::as_bytes`] only in test code.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedKey {
    bytes: [u8; SHARED_KEY_BYTES],
}

impl SharedKey {
    pub(crate) fn from_array(bytes: [u8; SHARED_KEY_BYTES]) -> Self {
        Self { bytes }
    }

    /// The 32 key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SHARED_KEY_BYTES] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedKey {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedKey([REDACTED])")
    }
}
