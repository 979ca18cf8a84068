//! X-Wing: the hybrid KEM combining ML-KEM-768 and X25519 under a
//! SHA3-256 combiner.
//!
//! The decapsulation key is a bare 32-byte seed; everything else is
//! re-derived from it through SHAKE-128, so serialising a secret key can
//! never produce an inconsistent key pair. Wire formats:
//!
//! - encapsulation key: ML-KEM ek (1184) || X25519 public key (32)
//! - ciphertext:        ML-KEM ct (1088) || X25519 ephemeral public (32)
//! - shared key:        SHA3-256(label || ss_M || ss_X || ct_X || pk_X)

use rand_core::CryptoRng;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Shake128};
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KemError;
use crate::kem;
use crate::params::{
    CIPHERTEXT_BYTES as MLKEM_CIPHERTEXT_BYTES,
    ENCAPSULATION_KEY_BYTES as MLKEM_EK_BYTES, SEED_BYTES as MLKEM_SEED_BYTES,
};
use crate::types::SharedKey;

/// Size in bytes of an X-Wing encapsulation key.
pub const ENCAPSULATION_KEY_BYTES: usize = MLKEM_EK_BYTES + 32;

/// Size in bytes of an X-Wing decapsulation key (a seed).
pub const DECAPSULATION_KEY_BYTES: usize = 32;

/// Size in bytes of an X-Wing ciphertext.
pub const CIPHERTEXT_BYTES: usize = MLKEM_CIPHERTEXT_BYTES + 32;

/// Size in bytes of the derandomised encapsulation seed.
pub const ENCAPS_SEED_BYTES: usize = 64;

/// Domain-separation label, `\./` then `/^\`.
const LABEL: &[u8; 6] = br"\.//^\";

/// X-Wing encapsulation key.
#[derive(Clone)]
pub struct EncapsulationKey {
    ek_m: crate::EncapsulationKey,
    pk_x: [u8; 32],
}

impl EncapsulationKey {
    /// Parse a 1216-byte encapsulation key, validating the embedded
    /// ML-KEM component.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != ENCAPSULATION_KEY_BYTES {
            return Err(KemError::InvalidLength);
        }
        let ek_m = crate::EncapsulationKey::from_bytes(&bytes[..MLKEM_EK_BYTES])?;
        let mut pk_x = [0u8; 32];
        pk_x.copy_from_slice(&bytes[MLKEM_EK_BYTES..]);
        Ok(Self { ek_m, pk_x })
    }

    /// The canonical 1216-byte encoding.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ENCAPSULATION_KEY_BYTES] {
        let mut out = [0u8; ENCAPSULATION_KEY_BYTES];
        out[..MLKEM_EK_BYTES].copy_from_slice(self.ek_m.as_bytes());
        out[MLKEM_EK_BYTES..].copy_from_slice(&self.pk_x);
        out
    }
}

impl core::fmt::Debug for EncapsulationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EncapsulationKey")
            .field("len", &ENCAPSULATION_KEY_BYTES)
            .finish_non_exhaustive()
    }
}

/// X-Wing decapsulation key: a 32-byte seed. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecapsulationKey {
    seed: [u8; DECAPSULATION_KEY_BYTES],
}

impl DecapsulationKey {
    /// The seed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DECAPSULATION_KEY_BYTES] {
        &self.seed
    }

    /// Re-derive the matching encapsulation key.
    #[must_use]
    pub fn encapsulation_key(&self) -> EncapsulationKey {
        let (mut mlkem_seed, mut sk_x) = expand_seed(&self.seed);
        let (ek_m, _) = kem::keypair_derand(&mlkem_seed);
        let pk_x = x25519(sk_x, X25519_BASEPOINT_BYTES);
        mlkem_seed.zeroize();
        sk_x.zeroize();
        EncapsulationKey { ek_m, pk_x }
    }
}

impl core::fmt::Debug for DecapsulationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DecapsulationKey([REDACTED])")
    }
}

/// X-Wing ciphertext.
#[derive(Clone)]
pub struct Ciphertext {
    ct_m: crate::Ciphertext,
    ct_x: [u8; 32],
}

impl Ciphertext {
    /// Parse a 1120-byte ciphertext (length check only).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KemError> {
        if bytes.len() != CIPHERTEXT_BYTES {
            return Err(KemError::InvalidLength);
        }
        let ct_m = crate::Ciphertext::from_bytes(&bytes[..MLKEM_CIPHERTEXT_BYTES])?;
        let mut ct_x = [0u8; 32];
        ct_x.copy_from_slice(&bytes[MLKEM_CIPHERTEXT_BYTES..]);
        Ok(Self { ct_m, ct_x })
    }

    /// The canonical 1120-byte encoding.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; CIPHERTEXT_BYTES] {
        let mut out = [0u8; CIPHERTEXT_BYTES];
        out[..MLKEM_CIPHERTEXT_BYTES].copy_from_slice(self.ct_m.as_bytes());
        out[MLKEM_CIPHERTEXT_BYTES..].copy_from_slice(&self.ct_x);
        out
    }
}

impl core::fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &CIPHERTEXT_BYTES)
            .finish_non_exhaustive()
    }
}

/// SHAKE-128(seed) squeezed into the ML-KEM seed (64) and the X25519
/// scalar (32).
fn expand_seed(seed: &[u8; DECAPSULATION_KEY_BYTES]) -> ([u8; MLKEM_SEED_BYTES], [u8; 32]) {
    let mut reader = Shake128::default().chain(seed).finalize_xof();
    let mut mlkem_seed = [0u8; MLKEM_SEED_BYTES];
    reader.read(&mut mlkem_seed);
    let mut sk_x = [0u8; 32];
    reader.read(&mut sk_x);
    (mlkem_seed, sk_x)
}

/// The domain-separation label is hashed first, then the two component
/// secrets and the X25519 transcript.
fn combiner(
    ss_m: &SharedKey,
    ss_x: &[u8; 32],
    ct_x: &[u8; 32],
    pk_x: &[u8; 32],
) -> SharedKey {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, LABEL);
    Digest::update(&mut hasher, ss_m.as_bytes());
    Digest::update(&mut hasher, ss_x);
    Digest::update(&mut hasher, ct_x);
    Digest::update(&mut hasher, pk_x);
    SharedKey::from_array(hasher.finalize().into())
}

/// Deterministic key generation from a 32-byte seed.
#[must_use]
pub fn keypair_derand(
    seed: &[u8; DECAPSULATION_KEY_BYTES],
) -> (EncapsulationKey, DecapsulationKey) {
    let dk = DecapsulationKey { seed: *seed };
    (dk.encapsulation_key(), dk)
}

/// Key generation with fresh randomness.
pub fn keypair(rng: &mut impl CryptoRng) -> (EncapsulationKey, DecapsulationKey) {
    let mut seed = [0u8; DECAPSULATION_KEY_BYTES];
    rng.fill_bytes(&mut seed);
    let pair = keypair_derand(&seed);
    seed.zeroize();
    pair
}

/// Deterministic key generation from a caller-supplied seed slice.
///
/// # Errors
///
/// [`KemError::InvalidLength`] unless the seed is exactly 32 bytes.
pub fn keypair_from_seed(
    seed: &[u8],
) -> Result<(EncapsulationKey, DecapsulationKey), KemError> {
    let seed: &[u8; DECAPSULATION_KEY_BYTES] =
        seed.try_into().map_err(|_| KemError::InvalidLength)?;
    Ok(keypair_derand(seed))
}

fn encaps_inner(
    ek: &EncapsulationKey,
    eseed: &[u8; ENCAPS_SEED_BYTES],
) -> (Ciphertext, SharedKey) {
    let mut m = [0u8; 32];
    m.copy_from_slice(&eseed[..32]);
    let mut ek_x = [0u8; 32];
    ek_x.copy_from_slice(&eseed[32..]);

    let (ct_m, ss_m) = kem::encapsulate_seeded(&ek.ek_m, &m);
    m.zeroize();

    let ct_x = x25519(ek_x, X25519_BASEPOINT_BYTES);
    let mut ss_x = x25519(ek_x, ek.pk_x);
    ek_x.zeroize();

    let ss = combiner(&ss_m, &ss_x, &ct_x, &ek.pk_x);
    ss_x.zeroize();

    (Ciphertext { ct_m, ct_x }, ss)
}

/// Encapsulation with fresh randomness.
pub fn encapsulate(
    ek: &EncapsulationKey,
    rng: &mut impl CryptoRng,
) -> (Ciphertext, SharedKey) {
    let mut eseed = [0u8; ENCAPS_SEED_BYTES];
    rng.fill_bytes(&mut eseed);
    let out = encaps_inner(ek, &eseed);
    eseed.zeroize();
    out
}

/// Deterministic encapsulation. The first 32 bytes of `eseed` feed the
/// ML-KEM message, the last 32 the X25519 ephemeral scalar.
///
/// # Errors
///
/// [`KemError::InvalidLength`] unless `eseed` is exactly 64 bytes.
pub fn encapsulate_derand(
    ek: &EncapsulationKey,
    eseed: &[u8],
) -> Result<(Ciphertext, SharedKey), KemError> {
    let eseed: &[u8; ENCAPS_SEED_BYTES] =
        eseed.try_into().map_err(|_| KemError::InvalidLength)?;
    Ok(encaps_inner(ek, eseed))
}

/// Decapsulation. Re-expands the seed and combines both component
/// secrets; like the underlying KEM, it never fails.
#[must_use]
pub fn decapsulate(ct: &Ciphertext, dk: &DecapsulationKey) -> SharedKey {
    let (mut mlkem_seed, mut sk_x) = expand_seed(&dk.seed);
    let (_, dk_m) = kem::keypair_derand(&mlkem_seed);
    mlkem_seed.zeroize();

    let ss_m = kem::decapsulate(&ct.ct_m, &dk_m);
    let mut ss_x = x25519(sk_x, ct.ct_x);
    let pk_x = x25519(sk_x, X25519_BASEPOINT_BYTES);
    sk_x.zeroize();

    let ss = combiner(&ss_m, &ss_x, &ct.ct_x, &pk_x);
    ss_x.zeroize();
    ss
}
