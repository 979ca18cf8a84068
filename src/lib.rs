//! `mlkem768`: ML-KEM-768 (FIPS 203) key encapsulation.
//!
//! Implements the full IND-CCA2 KEM for the recommended parameter set
//! (k = 3): key generation, encapsulation, and decapsulation with implicit
//! rejection, plus the X-Wing hybrid (ML-KEM-768 + X25519) in [`xwing`].
//!
//! # Design principles
//!
//! - **No `unsafe`**, enforced by `#![deny(unsafe_code)]`.
//! - **Constant time**: no secret-dependent branches, memory indices, or
//!   early-exit comparisons anywhere in the core.
//! - **Typed domains**: coefficient-form and NTT-form polynomials are
//!   distinct types; the compiler rejects mixing them.
//! - **RAII zeroization** of secret material via the `zeroize` crate.
//! - **Validate at the boundary**: untrusted bytes are parsed once by the
//!   typed constructors; past them no operation can fail.
//!
//! # Example
//!
//! ```
//! let mut rng = rand::rng();
//! let (ek, dk) = mlkem768::keypair(&mut rng);
//! let (ct, key_sender) = mlkem768::encapsulate(&ek, &mut rng);
//! let key_receiver = mlkem768::decapsulate(&ct, &dk);
//! assert_eq!(key_sender.as_bytes(), key_receiver.as_bytes());
//! ```

#![deny(unsafe_code)]

mod compress;
mod ct;
mod error;
mod field;
mod hash;
mod kem;
mod ntt;
mod params;
mod pke;
mod poly;
mod polyvec;
mod sample;
mod types;
pub mod xwing;

pub use error::KemError;
pub use kem::{
    decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand,
    keypair_from_seed,
};
pub use params::{
    CIPHERTEXT_BYTES, DECAPSULATION_KEY_BYTES, ENCAPSULATION_KEY_BYTES,
    SEED_BYTES, SHARED_KEY_BYTES,
};
pub use types::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedKey};
