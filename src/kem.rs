//! The IND-CCA2 KEM: key generation, encapsulation, and decapsulation with
//! implicit rejection (FIPS 203, ML-KEM-768).

use rand_core::CryptoRng;
use zeroize::Zeroize;

use crate::ct;
use crate::error::KemError;
use crate::hash;
use crate::params::{
    DECAPSULATION_KEY_BYTES, ENCAPSULATION_KEY_BYTES, POLYVEC_BYTES, SEED_BYTES,
    SHARED_KEY_BYTES, SYM_BYTES,
};
use crate::pke;
use crate::types::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedKey};

/// Deterministic key generation from a 64-byte seed `d || z`.
///
/// `d` seeds the K-PKE keypair; `z` becomes the implicit-rejection secret.
/// The two are not interchangeable.
#[must_use]
pub fn keypair_derand(coins: &[u8; SEED_BYTES]) -> (EncapsulationKey, DecapsulationKey) {
    let mut d = [0u8; SYM_BYTES];
    d.copy_from_slice(&coins[..SYM_BYTES]);

    let (ek_bytes, t_hat, s_hat) = pke::keygen(&d);
    d.zeroize();

    // dk = ByteEncode_12(s_hat) || ek || H(ek) || z
    let mut dk_bytes = [0u8; DECAPSULATION_KEY_BYTES];
    s_hat.to_bytes(&mut dk_bytes[..POLYVEC_BYTES]);
    dk_bytes[POLYVEC_BYTES..POLYVEC_BYTES + ENCAPSULATION_KEY_BYTES]
        .copy_from_slice(&ek_bytes);
    let h = hash::hash_h(ek_bytes);
    dk_bytes[DECAPSULATION_KEY_BYTES - 2 * SYM_BYTES..DECAPSULATION_KEY_BYTES - SYM_BYTES]
        .copy_from_slice(&h);
    dk_bytes[DECAPSULATION_KEY_BYTES - SYM_BYTES..].copy_from_slice(&coins[SYM_BYTES..]);

    let ek = EncapsulationKey::from_parts(ek_bytes, t_hat);
    let dk = DecapsulationKey::from_parts(dk_bytes, s_hat, ek.clone());
    (ek, dk)
}

/// Key generation with fresh randomness.
pub fn keypair(rng: &mut impl CryptoRng) -> (EncapsulationKey, DecapsulationKey) {
    let mut coins = [0u8; SEED_BYTES];
    rng.fill_bytes(&mut coins);
    let pair = keypair_derand(&coins);
    coins.zeroize();
    pair
}

/// Deterministic key generation from a caller-supplied seed slice.
///
/// # Errors
///
/// [`KemError::InvalidLength`] unless the seed is exactly 64 bytes.
pub fn keypair_from_seed(
    seed: &[u8],
) -> Result<(EncapsulationKey, DecapsulationKey), KemError> {
    let coins: &[u8; SEED_BYTES] =
        seed.try_into().map_err(|_| KemError::InvalidLength)?;
    Ok(keypair_derand(coins))
}

/// Deterministic encapsulation over a typed 32-byte message. Shared by the
/// public entry points and the hybrid layer.
pub(crate) fn encapsulate_seeded(
    ek: &EncapsulationKey,
    m: &[u8; SYM_BYTES],
) -> (Ciphertext, SharedKey) {
    // (K, r) <- G(m || H(ek))
    let mut buf = [0u8; 2 * SYM_BYTES];
    buf[..SYM_BYTES].copy_from_slice(m);
    buf[SYM_BYTES..].copy_from_slice(&hash::hash_h(ek.as_bytes()));
    let mut g = hash::hash_g(buf);
    buf.zeroize();

    let mut r = [0u8; SYM_BYTES];
    r.copy_from_slice(&g[SYM_BYTES..]);
    let ct = pke::encrypt(ek.t_hat(), ek.rho(), m, &r);
    r.zeroize();

    let mut key = [0u8; SHARED_KEY_BYTES];
    key.copy_from_slice(&g[..SYM_BYTES]);
    g.zeroize();

    (Ciphertext::from_array(ct), SharedKey::from_array(key))
}

/// Encapsulation with fresh randomness.
///
/// The key was validated on construction, so this cannot fail.
pub fn encapsulate(
    ek: &EncapsulationKey,
    rng: &mut impl CryptoRng,
) -> (Ciphertext, SharedKey) {
    let mut m = [0u8; SYM_BYTES];
    rng.fill_bytes(&mut m);
    let out = encapsulate_seeded(ek, &m);
    m.zeroize();
    out
}

/// Deterministic encapsulation with an explicit 32-byte message.
///
/// # Errors
///
/// [`KemError::InvalidLength`] unless `m` is exactly 32 bytes.
pub fn encapsulate_derand(
    ek: &EncapsulationKey,
    m: &[u8],
) -> Result<(Ciphertext, SharedKey), KemError> {
    let m: &[u8; SYM_BYTES] = m.try_into().map_err(|_| KemError::InvalidLength)?;
    Ok(encapsulate_seeded(ek, m))
}

/// Decapsulation. Never fails: a ciphertext that does not re-encrypt to
/// itself yields the pseudorandom rejection key `J(z, c)` instead of an
/// error, selected without branching on the comparison.
#[must_use]
pub fn decapsulate(ct: &Ciphertext, dk: &DecapsulationKey) -> SharedKey {
    let mut m_prime = pke::decrypt(dk.s_hat(), ct.as_bytes());

    // (K', r') <- G(m' || H(ek))
    let mut buf = [0u8; 2 * SYM_BYTES];
    buf[..SYM_BYTES].copy_from_slice(&m_prime);
    buf[SYM_BYTES..].copy_from_slice(dk.h());
    let mut g = hash::hash_g(buf);
    buf.zeroize();

    let mut r_prime = [0u8; SYM_BYTES];
    r_prime.copy_from_slice(&g[SYM_BYTES..]);

    let ek = dk.encapsulation_key();
    let mut ct_prime = pke::encrypt(ek.t_hat(), ek.rho(), &m_prime, &r_prime);
    m_prime.zeroize();
    r_prime.zeroize();

    // K = K' if c == c' else J(z, c), in constant time.
    let equal = ct::ct_eq(ct.as_bytes(), &ct_prime);
    ct_prime.zeroize();

    let mut key = hash::rkprf(dk.z(), ct.as_bytes());
    ct::ct_select(&mut key, &g[..SHARED_KEY_BYTES], equal);
    g.zeroize();

    SharedKey::from_array(key)
}
