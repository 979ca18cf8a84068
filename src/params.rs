//! ML-KEM-768 parameter constants and derived sizes.

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: u16 = 3329;

/// Module rank (number of ring elements per vector).
pub const K: usize = 3;

/// Size in bytes of hashes and seeds.
pub const SYM_BYTES: usize = 32;

/// Size in bytes of a serialised polynomial (256 coefficients at 12 bits).
pub const POLY_BYTES: usize = 384;

/// Size in bytes of a key-generation seed (`d || z`).
pub const SEED_BYTES: usize = 2 * SYM_BYTES;

/// Size in bytes of a shared key.
pub const SHARED_KEY_BYTES: usize = 32;

/// Serialised vector of `K` polynomials.
pub(crate) const POLYVEC_BYTES: usize = K * POLY_BYTES;

/// Ciphertext `u` component: `K` polynomials compressed at `d = 10`.
pub(crate) const U_BYTES: usize = K * 320;

/// Ciphertext `v` component: one polynomial compressed at `d = 4`.
pub(crate) const V_BYTES: usize = 128;

/// Size in bytes of an encapsulation key: `ByteEncode_12(t_hat) || rho`.
pub const ENCAPSULATION_KEY_BYTES: usize = POLYVEC_BYTES + SYM_BYTES;

/// Size in bytes of a decapsulation key:
/// `ByteEncode_12(s_hat) || ek || H(ek) || z`.
pub const DECAPSULATION_KEY_BYTES: usize =
    POLYVEC_BYTES + ENCAPSULATION_KEY_BYTES + 2 * SYM_BYTES;

/// Size in bytes of a ciphertext.
pub const CIPHERTEXT_BYTES: usize = U_BYTES + V_BYTES;

const _: () = {
    assert!(ENCAPSULATION_KEY_BYTES == 1184);
    assert!(DECAPSULATION_KEY_BYTES == 2400);
    assert!(CIPHERTEXT_BYTES == 1088);
    assert!(SEED_BYTES == 64);
};
