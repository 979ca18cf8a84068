//! The Keccak facade: SHA-3 and SHAKE in their FIPS 203 roles.
//!
//! H = SHA3-256, G = SHA3-512, PRF and J = SHAKE-256, XOF = SHAKE-128.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

use crate::params::{SHARED_KEY_BYTES, SYM_BYTES};
use crate::sample::CBD_BYTES;

/// `H(input) = SHA3-256(input)`.
#[inline]
#[must_use]
pub(crate) fn hash_h(input: impl AsRef<[u8]>) -> [u8; SYM_BYTES] {
    Sha3_256::digest(input).into()
}

/// `G(input) = SHA3-512(input)`.
#[must_use]
pub(crate) fn hash_g(input: impl AsRef<[u8]>) -> [u8; 2 * SYM_BYTES] {
    let mut out = [0u8; 2 * SYM_BYTES];
    out.copy_from_slice(&Sha3_512::digest(input));
    out
}

/// `PRF(seed, nonce) = SHAKE-256(seed || nonce)`, squeezed to the eta = 2
/// noise-buffer length.
#[must_use]
pub(crate) fn prf(seed: &[u8; SYM_BYTES], nonce: u8) -> [u8; CBD_BYTES] {
    let mut input = [0u8; SYM_BYTES + 1];
    input[..SYM_BYTES].copy_from_slice(seed);
    input[SYM_BYTES] = nonce;
    let mut out = [0u8; CBD_BYTES];
    Shake256::digest_xof(input, &mut out);
    out
}

/// XOF for matrix expansion: SHAKE-128 absorbing `rho || x || y`.
#[must_use]
pub(crate) fn xof_absorb(rho: &[u8; SYM_BYTES], x: u8, y: u8) -> impl XofReader {
    let mut input = [0u8; SYM_BYTES + 2];
    input[..SYM_BYTES].copy_from_slice(rho);
    input[SYM_BYTES] = x;
    input[SYM_BYTES + 1] = y;
    Shake128::default().chain(input).finalize_xof()
}

/// `J(z, c) = SHAKE-256(z || c)` -- the implicit-rejection key.
#[must_use]
pub(crate) fn rkprf(z: &[u8], ct: &[u8]) -> [u8; SHARED_KEY_BYTES] {
    let mut out = [0u8; SHARED_KEY_BYTES];
    Shake256::default()
        .chain(z)
        .chain(ct)
        .finalize_xof()
        .read(&mut out);
    out
}
